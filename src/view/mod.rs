pub mod board_view;
pub mod projection;

pub use board_view::{ConsoleTokenBoardView, TokenBoardView};
pub use projection::{BoardProjection, ChartSlice, GridColumn, GridRow, RowAction, GRID_COLUMNS};
