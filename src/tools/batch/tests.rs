#[cfg(test)]
mod tests {
    use crate::tools::batch::{batch, batch_ordered};

    #[tokio::test]
    async fn test_batch_basic() {
        let keywords = vec!["캠핑", "캠핑 의자", "텐트"];

        let results = batch(keywords, 2, |kw| async move { kw.chars().count() }).await;

        assert_eq!(results.len(), 3);
        // buffer_unordered gives no ordering guarantee
        let mut sorted = results.clone();
        sorted.sort();
        assert_eq!(sorted, vec![2, 2, 5]);
    }

    #[tokio::test]
    async fn test_batch_ordered_keeps_input_order() {
        let delays: Vec<u64> = vec![30, 10, 20];

        let results = batch_ordered(delays, 3, |ms| async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
            ms
        })
        .await;

        assert_eq!(results, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let results = batch_ordered(vec![1, 2, 3], 0, |n| async move { n * 10 }).await;
        assert_eq!(results, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_batch_empty() {
        let items: Vec<String> = vec![];
        let results = batch(items, 4, |url| async move { url.len() }).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_batch_concurrency_limit() {
        use std::sync::Arc;
        use tokio::sync::Mutex;

        let max_concurrent = Arc::new(Mutex::new(0));
        let current = Arc::new(Mutex::new(0));

        let posts: Vec<usize> = (0..10).collect();

        let max_handle = Arc::clone(&max_concurrent);
        let current_handle = Arc::clone(&current);

        let results = batch(posts, 4, move |post| {
            let max_concurrent = Arc::clone(&max_handle);
            let current = Arc::clone(&current_handle);

            async move {
                {
                    let mut curr = current.lock().await;
                    *curr += 1;
                    let mut max = max_concurrent.lock().await;
                    *max = (*max).max(*curr);
                }

                tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

                {
                    let mut curr = current.lock().await;
                    *curr -= 1;
                }

                post
            }
        })
        .await;

        assert_eq!(results.len(), 10);

        let max = max_concurrent.lock().await;
        assert!(*max <= 4, "max concurrent was {}, expected <= 4", *max);
    }
}
