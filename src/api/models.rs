use serde::{Deserialize, Serialize};

use crate::entity::DraftForm;

// API endpoints
pub const RETRIEVE_TOKEN_TABLE_PATH: &str = "/token/RetrieveTokenTable";
pub const ADD_OR_UPDATE_TOKEN_PATH: &str = "/token/AddOrUpdateToken";

/// Body of a create-or-update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSubmission {
    pub name: String,
    pub symbol: String,
    pub total_supply: i64,
    pub contract_address: String,
    pub total_holders: i64,
}

impl From<&DraftForm> for TokenSubmission {
    fn from(draft: &DraftForm) -> Self {
        Self {
            name: draft.name.clone(),
            symbol: draft.symbol.clone(),
            total_supply: draft.total_supply,
            contract_address: draft.contact_address.clone(),
            total_holders: draft.total_holders,
        }
    }
}
