//! Pure projections of the token list into chart slices and grid rows.

use crate::entity::{TokenRecord, TokenSnapshot};

/// One pie slice. Values are raw supplies, sizing is left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    pub id: i64,
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridColumn {
    pub field: &'static str,
    pub header: &'static str,
    pub width: usize,
    pub numeric: bool,
}

pub const GRID_COLUMNS: [GridColumn; 8] = [
    GridColumn { field: "id", header: "Rank", width: 90, numeric: false },
    GridColumn { field: "symbol", header: "Symbol", width: 150, numeric: false },
    GridColumn { field: "name", header: "Name", width: 150, numeric: false },
    GridColumn { field: "contract_address", header: "Contract Address", width: 400, numeric: false },
    GridColumn { field: "total_holders", header: "Total Holders", width: 140, numeric: true },
    GridColumn { field: "total_supply", header: "Total Supply", width: 200, numeric: true },
    GridColumn { field: "pctg_supply", header: "Total Supply %", width: 250, numeric: true },
    GridColumn { field: "actions", header: "Actions", width: 100, numeric: false },
];

/// Action bound to a grid row's "Edit" control
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    Edit(TokenRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub id: i64,
    pub record: TokenRecord,
    pub percent_supply: String,
}

impl GridRow {
    /// What activating this row's action control does
    pub fn edit_action(&self) -> RowAction {
        RowAction::Edit(self.record.clone())
    }

    /// Cell text in `GRID_COLUMNS` order
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.record.symbol.clone(),
            self.record.name.clone(),
            self.record.contract_address.clone(),
            self.record.total_holders.to_string(),
            self.record.total_supply.to_string(),
            self.percent_supply.clone(),
            "Edit".to_string(),
        ]
    }
}

pub fn chart_slices(tokens: &[TokenRecord]) -> Vec<ChartSlice> {
    tokens
        .iter()
        .map(|token| ChartSlice {
            id: token.rank,
            label: token.symbol.clone(),
            value: token.total_supply,
        })
        .collect()
}

// Rows keep source order; duplicate ranks are passed through as-is
pub fn grid_rows(tokens: &[TokenRecord]) -> Vec<GridRow> {
    tokens
        .iter()
        .map(|token| GridRow {
            id: token.rank,
            record: token.clone(),
            percent_supply: token.format_percent_supply(),
        })
        .collect()
}

/// Chart and grid derived from one snapshot
#[derive(Debug, Clone, Default)]
pub struct BoardProjection {
    pub sequence: u64,
    pub slices: Vec<ChartSlice>,
    pub rows: Vec<GridRow>,
}

impl BoardProjection {
    pub fn from_snapshot(snapshot: &TokenSnapshot) -> Self {
        Self {
            sequence: snapshot.sequence,
            slices: chart_slices(&snapshot.tokens),
            rows: grid_rows(&snapshot.tokens),
        }
    }

    pub fn row_by_rank(&self, rank: i64) -> Option<&GridRow> {
        self.rows.iter().find(|row| row.id == rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha() -> TokenRecord {
        TokenRecord {
            rank: 1,
            symbol: "AAA".to_string(),
            name: "Alpha".to_string(),
            contract_address: "0x1".to_string(),
            total_holders: 100,
            total_supply: 1000,
            percent_supply: 0.0,
        }
    }

    fn tokens(n: i64) -> Vec<TokenRecord> {
        (1..=n)
            .map(|rank| TokenRecord {
                rank,
                symbol: format!("T{}", rank),
                name: format!("Token {}", rank),
                contract_address: format!("0x{:x}", rank),
                total_holders: rank * 3,
                total_supply: rank * 1000,
                percent_supply: rank as f64,
            })
            .collect()
    }

    #[test]
    fn single_token_projects_to_slice_and_row() {
        let list = vec![alpha()];

        assert_eq!(
            chart_slices(&list),
            vec![ChartSlice { id: 1, label: "AAA".to_string(), value: 1000 }]
        );

        let rows = grid_rows(&list);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].record.total_supply, 1000);
        assert_eq!(rows[0].cells()[5], "1000");
        assert_eq!(rows[0].cells()[6], "0%");
    }

    #[test]
    fn empty_list_projects_to_nothing() {
        assert!(chart_slices(&[]).is_empty());
        assert!(grid_rows(&[]).is_empty());

        let projection = BoardProjection::from_snapshot(&TokenSnapshot::default());
        assert!(projection.slices.is_empty());
        assert!(projection.rows.is_empty());
    }

    #[test]
    fn cardinality_matches_list() {
        for n in [0, 1, 5, 37] {
            let list = tokens(n);
            assert_eq!(chart_slices(&list).len(), list.len());
            assert_eq!(grid_rows(&list).len(), list.len());
        }
    }

    #[test]
    fn each_row_action_carries_its_own_record() {
        let list = tokens(4);
        for (row, token) in grid_rows(&list).iter().zip(&list) {
            assert_eq!(row.edit_action(), RowAction::Edit(token.clone()));
        }
    }

    #[test]
    fn non_positive_supplies_are_passed_through() {
        let mut list = tokens(2);
        list[0].total_supply = 0;
        list[1].total_supply = -5;

        let values: Vec<i64> = chart_slices(&list).iter().map(|s| s.value).collect();
        assert_eq!(values, vec![0, -5]);
    }

    #[test]
    fn cells_follow_column_order() {
        let row = &grid_rows(&tokens(2))[1];
        let cells = row.cells();
        assert_eq!(cells.len(), GRID_COLUMNS.len());
        assert_eq!(cells[0], "2");
        assert_eq!(cells[1], "T2");
        assert_eq!(cells[6], "2%");
        assert_eq!(cells[7], "Edit");
    }
}
