use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

/// Cooperative view of the shutdown broadcast
///
/// A dropped sender or a lagged receiver is treated as a shutdown request.
/// Once observed, the request sticks.
#[derive(Debug)]
pub struct ShutdownListener {
    rx: broadcast::Receiver<()>,
    triggered: bool,
}

impl ShutdownListener {
    pub fn new(rx: broadcast::Receiver<()>) -> Self {
        Self {
            rx,
            triggered: false,
        }
    }

    /// Non-blocking check for a pending shutdown request
    pub fn is_triggered(&mut self) -> bool {
        if !self.triggered {
            self.triggered = match self.rx.try_recv() {
                Ok(()) => true,
                Err(TryRecvError::Empty) => false,
                Err(TryRecvError::Closed) | Err(TryRecvError::Lagged(_)) => true,
            };
        }
        self.triggered
    }

    /// Wait until shutdown is requested
    pub async fn recv(&mut self) {
        if self.triggered {
            return;
        }
        match self.rx.recv().await {
            Ok(()) | Err(RecvError::Closed) | Err(RecvError::Lagged(_)) => {
                self.triggered = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_not_triggered_until_sent() {
        let (tx, rx) = broadcast::channel::<()>(1);
        let mut listener = ShutdownListener::new(rx);
        assert!(!listener.is_triggered());

        tx.send(()).unwrap();
        assert!(listener.is_triggered());
        // Stays triggered after the message was consumed
        assert!(listener.is_triggered());
    }

    #[tokio::test]
    async fn test_recv_wakes_on_send() {
        let (tx, rx) = broadcast::channel::<()>(1);
        let mut listener = ShutdownListener::new(rx);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(());
        });

        tokio::time::timeout(Duration::from_secs(5), listener.recv())
            .await
            .expect("listener should wake up");
        assert!(listener.is_triggered());
    }

    #[tokio::test]
    async fn test_dropped_sender_counts_as_shutdown() {
        let (tx, rx) = broadcast::channel::<()>(1);
        let mut listener = ShutdownListener::new(rx);
        drop(tx);
        assert!(listener.is_triggered());
        listener.recv().await;
    }
}
