use serde::{Deserialize, Serialize};

/// One row of the remote token table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub rank: i64,
    pub symbol: String,
    pub name: String,
    pub contract_address: String,
    pub total_holders: i64,
    pub total_supply: i64,
    // Supplied by the server, never computed locally
    #[serde(
        default,
        rename = "pctg_supply",
        alias = "ptcg_supply",
        alias = "percent_supply"
    )]
    pub percent_supply: f64,
}

impl TokenRecord {
    // Format the supply share the way the grid shows it
    pub fn format_percent_supply(&self) -> String {
        format!("{}%", self.percent_supply)
    }
}
