use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::errors::CoreError;

/// Marks how long the owning view is alive.
///
/// Components receive a `LifetimeToken` and route every remote call through
/// `LifetimeToken::run`. Once `end()` is called, pending calls resolve to
/// `CoreError::Cancelled` and their results are never applied.
#[derive(Debug, Clone)]
pub struct Lifetime {
    sender: Arc<watch::Sender<bool>>,
}

impl Lifetime {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn token(&self) -> LifetimeToken {
        LifetimeToken {
            receiver: self.sender.subscribe(),
        }
    }

    /// Tear down. Idempotent.
    pub fn end(&self) {
        if !self.sender.send_replace(true) {
            tracing::debug!("lifetime ended; cancelling pending calls");
        }
    }

    pub fn is_ended(&self) -> bool {
        *self.sender.borrow()
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct LifetimeToken {
    receiver: watch::Receiver<bool>,
}

impl LifetimeToken {
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Drive `fut` unless the lifetime ends first.
    ///
    /// A result that arrives after the lifetime has ended is discarded.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        if self.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        let mut receiver = self.receiver.clone();
        let ended = async move {
            // Every Lifetime handle dropped without `end()`: nothing can cancel
            // any more, so never resolve.
            if receiver.wait_for(|ended| *ended).await.is_err() {
                std::future::pending::<()>().await;
            }
        };
        tokio::select! {
            biased;
            _ = ended => Err(CoreError::Cancelled),
            result = fut => {
                if self.is_cancelled() {
                    Err(CoreError::Cancelled)
                } else {
                    result
                }
            }
        }
    }
}
