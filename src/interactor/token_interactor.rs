use async_trait::async_trait;
use log::{debug, error, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::TokenRepository;
use crate::entity::{BoardResult, TokenSnapshot};

/// Result of a reload that reached the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the held list
    Applied { sequence: u64, count: usize },
    /// A reload issued later had already been applied, the response was dropped
    Superseded { sequence: u64, current: u64 },
}

#[async_trait]
pub trait TokenInteractor: Send + Sync {
    /// Fetch the full table and replace the held list wholesale
    async fn load_all(&self) -> BoardResult<LoadOutcome>;

    /// Current list
    fn snapshot(&self) -> TokenSnapshot;

    /// Receiver that is notified whenever a new list is applied
    fn subscribe(&self) -> watch::Receiver<TokenSnapshot>;
}

pub struct TokenInteractorImpl {
    token_repository: Arc<dyn TokenRepository>,
    issued: AtomicU64,
    snapshot_tx: watch::Sender<TokenSnapshot>,
}

impl TokenInteractorImpl {
    pub fn new(token_repository: Arc<dyn TokenRepository>) -> Self {
        let (snapshot_tx, _rx) = watch::channel(TokenSnapshot::default());

        Self {
            token_repository,
            issued: AtomicU64::new(0),
            snapshot_tx,
        }
    }
}

#[async_trait]
impl TokenInteractor for TokenInteractorImpl {
    async fn load_all(&self) -> BoardResult<LoadOutcome> {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Fetching token table (reload #{})", sequence);

        let tokens = match self.token_repository.retrieve_token_table().await {
            Ok(tokens) => tokens,
            Err(e) => {
                // Keep serving the previous list
                error!("Error fetching tokens (reload #{}): {}", sequence, e);
                return Err(e);
            }
        };

        let count = tokens.len();
        let mut current = 0;
        let applied = self.snapshot_tx.send_if_modified(|snapshot| {
            if sequence > snapshot.sequence {
                *snapshot = TokenSnapshot::new(tokens, sequence);
                true
            } else {
                current = snapshot.sequence;
                false
            }
        });

        if applied {
            info!("Loaded {} tokens (reload #{})", count, sequence);
            Ok(LoadOutcome::Applied { sequence, count })
        } else {
            debug!(
                "Dropping reload #{}, reload #{} is already applied",
                sequence, current
            );
            Ok(LoadOutcome::Superseded { sequence, current })
        }
    }

    fn snapshot(&self) -> TokenSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<TokenSnapshot> {
        self.snapshot_tx.subscribe()
    }
}
