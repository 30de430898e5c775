use std::fmt;

use crate::entity::TokenRecord;

/// Editable fields of the save/update form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Symbol,
    ContactAddress,
    TotalSupply,
    TotalHolders,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Symbol => "Symbol",
            DraftField::ContactAddress => "Contact Address",
            DraftField::TotalSupply => "Total Supply",
            DraftField::TotalHolders => "Total Holders",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DraftField::TotalSupply | DraftField::TotalHolders)
    }

    /// Resolve a field from user input such as `symbol` or `total-supply`
    pub fn parse(input: &str) -> Option<Self> {
        let key: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "name" => Some(DraftField::Name),
            "symbol" => Some(DraftField::Symbol),
            "contactaddress" | "contractaddress" | "address" => Some(DraftField::ContactAddress),
            "totalsupply" | "supply" => Some(DraftField::TotalSupply),
            "totalholders" | "holders" => Some(DraftField::TotalHolders),
            _ => None,
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Client-side draft of a token, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub name: String,
    pub symbol: String,
    pub contact_address: String,
    pub total_supply: i64,
    pub total_holders: i64,
}

impl DraftForm {
    /// Copy the editable fields of a listed token. The rank is not kept.
    pub fn from_record(record: &TokenRecord) -> Self {
        Self {
            name: record.name.clone(),
            symbol: record.symbol.clone(),
            contact_address: record.contract_address.clone(),
            total_supply: record.total_supply,
            total_holders: record.total_holders,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First required text field left empty, in form order. Whitespace counts as input.
    pub fn missing_field(&self) -> Option<DraftField> {
        [
            (DraftField::Name, &self.name),
            (DraftField::Symbol, &self.symbol),
            (DraftField::ContactAddress, &self.contact_address),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
    }
}
