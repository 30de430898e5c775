use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::entity::TokenRecord;

/// Read-only copy of the token table as last applied.
#[derive(Debug, Clone, Default)]
pub struct TokenSnapshot {
    pub tokens: Arc<Vec<TokenRecord>>,
    // Sequence number of the reload that produced this list, 0 before the first one
    pub sequence: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl TokenSnapshot {
    pub fn new(tokens: Vec<TokenRecord>, sequence: u64) -> Self {
        Self {
            tokens: Arc::new(tokens),
            sequence,
            refreshed_at: Some(Utc::now()),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn find_by_rank(&self, rank: i64) -> Option<&TokenRecord> {
        self.tokens.iter().find(|token| token.rank == rank)
    }
}
