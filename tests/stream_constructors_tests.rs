use futures_util::stream;
use ordstream::{channel, Stream, StreamConfig, StreamError};

#[tokio::test]
async fn test_new_stream_has_no_concurrency() {
    let (_writer, seq) = channel::<i32>(0);
    let s = Stream::new(seq);

    assert_eq!(s.concurrency(), 0);
    assert!(!s.is_absent());
}

#[tokio::test]
async fn test_try_from_sequence_rejects_missing_sequence() {
    let result = Stream::<i32>::try_from_sequence(None);
    assert!(matches!(result, Err(StreamError::MissingSequence)));

    let (_writer, seq) = channel::<i32>(0);
    assert!(Stream::try_from_sequence(Some(seq)).is_ok());
}

#[tokio::test]
async fn test_default_stream_is_absent() {
    let s = Stream::<String>::default();
    assert!(s.is_absent());
    assert!(s.into_sequence().is_none());
}

#[tokio::test]
async fn test_stream_over_caller_sequence() {
    let (writer, seq) = channel(0);
    tokio::spawn(async move {
        for i in 1..=4 {
            if writer.send(i).await.is_err() {
                break;
            }
        }
    });

    assert_eq!(Stream::new(seq).to_vec().await, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_from_collection_preserves_order() {
    let items: Vec<u32> = (0..500).collect();
    let got = Stream::from_collection(items.clone(), 7).to_vec().await;
    assert_eq!(got, items);
}

#[tokio::test]
async fn test_from_empty_collection() {
    let got = Stream::from_collection(Vec::<i32>::new(), 0).to_vec().await;
    assert!(got.is_empty());
}

#[tokio::test]
async fn test_from_collection_uses_buffer_size() {
    let s = Stream::from_collection(vec![1, 2], 12);
    let seq = s.into_sequence().unwrap();
    assert_eq!(seq.capacity(), 12);
}

#[tokio::test]
async fn test_from_async_source() {
    let got = Stream::from_async(stream::iter(vec!["a", "b", "c"]), 1)
        .to_vec()
        .await;
    assert_eq!(got, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_empty_stream_is_closed() {
    assert_eq!(Stream::<i32>::empty().count().await, 0);
}

#[tokio::test]
async fn test_concurrent_keeps_sequence() {
    let s = Stream::from_collection(vec![1, 2, 3], 0).concurrent(8);
    assert_eq!(s.concurrency(), 8);
    assert_eq!(s.to_vec().await, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_concurrency_propagates_to_derived_streams() {
    let s = Stream::from_collection(vec![1, 2, 3], 0)
        .concurrent(3)
        .filter(|x| *x > 1)
        .map(|x| x + 1);
    assert_eq!(s.concurrency(), 3);
    assert_eq!(s.concurrent(0).concurrency(), 0);
}

#[tokio::test]
async fn test_from_collection_with_config() {
    let config = StreamConfig::default().with_buffer_size(4).with_concurrency(2);
    let s = Stream::from_collection_with(vec![5, 6], &config);
    assert_eq!(s.concurrency(), 2);
    assert_eq!(s.to_vec().await, vec![5, 6]);
}

#[tokio::test]
async fn test_with_config_wraps_sequence() {
    let (writer, seq) = channel(3);
    writer.send('x').await.unwrap();
    writer.close();

    let s = Stream::with_config(seq, &StreamConfig::default().with_concurrency(5));
    assert_eq!(s.concurrency(), 5);
    assert_eq!(s.to_vec().await, vec!['x']);
}
