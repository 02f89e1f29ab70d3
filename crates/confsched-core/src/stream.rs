//! Stream helpers shared by stores and the merge pipeline.

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

use crate::error::Result;

/// A live, fallible sequence of values published by a data source.
pub type RecordStream<T> = BoxStream<'static, Result<T>>;

/// Turns a watch receiver into a [`RecordStream`].
///
/// The current value is yielded immediately, then every subsequent change.
/// Intermediate values are conflated when the consumer lags behind. The
/// stream ends once the sender is dropped.
pub fn watch_stream<T>(receiver: watch::Receiver<T>) -> RecordStream<T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((receiver, false), |(mut receiver, started)| async move {
        if started && receiver.changed().await.is_err() {
            return None;
        }
        let value = receiver.borrow_and_update().clone();
        Some((Ok(value), (receiver, true)))
    })
    .boxed()
}
