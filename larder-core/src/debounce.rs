//! Debounce-then-deduplicate pipeline.
//!
//! [`debounce`] is a channel stage: it consumes a receiver and returns a new
//! one. [`Distinct`] is the equality filter applied to its output. The
//! consumer owns it, so it can re-anchor the filter when state changes from
//! elsewhere.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

const STAGE_BUFFER: usize = 32;

/// Forward a value only once `window` passes without a newer one.
///
/// Every new value discards the pending one and restarts the timer. When the
/// input closes, a still-pending value is flushed before the output closes.
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::Receiver<T>,
    window: Duration,
) -> mpsc::Receiver<T> {
    let (tx, rx) = mpsc::channel(STAGE_BUFFER);

    tokio::spawn(async move {
        while let Some(mut pending) = input.recv().await {
            loop {
                match timeout(window, input.recv()).await {
                    Ok(Some(newer)) => pending = newer,
                    Ok(None) => {
                        let _ = tx.send(pending).await;
                        return;
                    }
                    Err(_) => break,
                }
            }

            if tx.send(pending).await.is_err() {
                return;
            }
        }
    });

    rx
}

/// Equality filter against the last admitted value.
#[derive(Debug, Clone)]
pub struct Distinct<T> {
    last: Option<T>,
}

impl<T> Default for Distinct<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Clone> Distinct<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True (and remembered) if `value` differs from the last admitted value.
    pub fn admit(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }

    /// Treat `value` as the last admitted value.
    pub fn reset(&mut self, value: T) {
        self.last = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_distinct_filter() {
        let mut distinct = Distinct::new();
        let admitted: Vec<&str> = ["a", "a", "b", "b", "a"]
            .into_iter()
            .filter(|v| distinct.admit(v))
            .collect();
        assert_eq!(admitted, vec!["a", "b", "a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_emits_last_value_after_quiet_window() {
        let (tx, rx) = mpsc::channel(8);
        let mut out = debounce(rx, WINDOW);

        tx.send("p").await.unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send("pa").await.unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send("pas").await.unwrap();
        let last_input = Instant::now();

        assert_eq!(out.recv().await, Some("pas"));
        assert!(last_input.elapsed() >= WINDOW);

        assert!(timeout(Duration::from_secs(5), out.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_separates_bursts() {
        let (tx, rx) = mpsc::channel(8);
        let mut out = debounce(rx, WINDOW);

        tx.send(1).await.unwrap();
        sleep(Duration::from_millis(400)).await;
        tx.send(2).await.unwrap();

        assert_eq!(out.recv().await, Some(1));
        assert_eq!(out.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_flushes_pending_on_close() {
        let (tx, rx) = mpsc::channel(8);
        let mut out = debounce(rx, WINDOW);

        tx.send("tail").await.unwrap();
        drop(tx);

        assert_eq!(out.recv().await, Some("tail"));
        assert_eq!(out.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_then_distinct_suppresses_repeat() {
        let (tx, rx) = mpsc::channel(8);
        let mut out = debounce(rx, WINDOW);
        let mut distinct = Distinct::new();

        tx.send("ab".to_string()).await.unwrap();
        let first = out.recv().await.unwrap();
        assert!(distinct.admit(&first));

        // Type a character and delete it within the window.
        tx.send("abc".to_string()).await.unwrap();
        sleep(Duration::from_millis(50)).await;
        tx.send("ab".to_string()).await.unwrap();
        let settled = out.recv().await.unwrap();
        assert_eq!(settled, "ab");
        assert!(!distinct.admit(&settled));
    }

    #[test]
    fn test_distinct_reset_reanchors() {
        let mut distinct = Distinct::new();
        assert!(distinct.admit(&"pasta"));
        distinct.reset("");
        assert!(distinct.admit(&"pasta"));
        assert!(!distinct.admit(&"pasta"));
    }
}
