//! Latest-value-wins debouncing for search input.

use std::time::Duration;

use tokio::sync::watch;

/// Default quiet period before a search term is applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Sending half: push every keystroke here.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    tx: watch::Sender<Option<T>>,
}

/// Receiving half: yields a value once input has been quiet for the delay.
#[derive(Debug)]
pub struct Debounced<T> {
    rx: watch::Receiver<Option<T>>,
    delay: Duration,
}

/// Creates a connected debouncer pair.
///
/// # Example
///
/// ```ignore
/// let (input, mut settled) = debounce(Duration::from_millis(300));
/// input.push("ru".to_string());
/// input.push("rust".to_string());
/// assert_eq!(settled.next().await, Some("rust".to_string()));
/// ```
pub fn debounce<T: Clone>(delay: Duration) -> (Debouncer<T>, Debounced<T>) {
    let (tx, rx) = watch::channel(None);
    (Debouncer { tx }, Debounced { rx, delay })
}

impl<T> Debouncer<T> {
    /// Records a new value, replacing any value not yet emitted.
    pub fn push(&self, value: T) {
        self.tx.send_replace(Some(value));
    }
}

impl<T: Clone> Debounced<T> {
    /// Waits for the next settled value.
    ///
    /// Returns `None` once the sender is dropped and no pending value is left.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;

        loop {
            match tokio::time::timeout(self.delay, self.rx.changed()).await {
                // Another value arrived inside the window; restart it.
                Ok(Ok(())) => continue,
                // Sender gone: flush what we have.
                Ok(Err(_)) => break,
                Err(_elapsed) => break,
            }
        }

        self.rx.borrow_and_update().clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_yields_last_value() {
        let (input, mut settled) = debounce(Duration::from_millis(300));

        let typing = async {
            for term in ["r", "ru", "rus", "rust"] {
                input.push(term.to_string());
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        };
        let (_, value) = tokio::join!(typing, settled.next());

        assert_eq!(value.as_deref(), Some("rust"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_yield_separately() {
        let (input, mut settled) = debounce(Duration::from_millis(300));

        input.push("crypto");
        assert_eq!(settled.next().await, Some("crypto"));

        tokio::time::sleep(Duration::from_secs(1)).await;
        input.push("fitness");
        assert_eq!(settled.next().await, Some("fitness"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_ends_stream() {
        let (input, mut settled) = debounce::<u32>(Duration::from_millis(300));
        input.push(1);
        drop(input);

        assert_eq!(settled.next().await, Some(1));
        assert_eq!(settled.next().await, None);
    }
}
