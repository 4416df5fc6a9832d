//! Bounded concurrent fan-out, used to fetch many blog posts at once.

mod tests;

use futures_util::stream::{self, StreamExt};
use std::future::Future;

/// Run `operation` over `items` with at most `concurrency` in flight.
///
/// Results come back in completion order.
pub async fn batch<T, F, Fut, R>(items: Vec<T>, concurrency: usize, operation: F) -> Vec<R>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    stream::iter(items)
        .map(operation)
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

/// Like [`batch`], but results keep the order of `items`.
pub async fn batch_ordered<T, F, Fut, R>(items: Vec<T>, concurrency: usize, operation: F) -> Vec<R>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    let mut indexed: Vec<(usize, R)> = stream::iter(items.into_iter().enumerate())
        .map(|(idx, item)| {
            let pending = operation(item);
            async move { (idx, pending.await) }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, result)| result).collect()
}
