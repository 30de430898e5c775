use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

use crate::entity::{DraftField, DraftForm};
use crate::utils::format_thousands;
use crate::view::projection::{BoardProjection, ChartSlice, GRID_COLUMNS};

// Grid column widths are given in pixels, the console uses one char per 10px
const PIXELS_PER_CHAR: usize = 10;
const CHART_BAR_WIDTH: usize = 40;

#[async_trait]
pub trait TokenBoardView: Send + Sync {
    async fn display_board(&self, projection: &BoardProjection) -> Result<()>;
    async fn display_draft(&self, draft: &DraftForm) -> Result<()>;
    async fn display_validation_error(&self, message: String) -> Result<()>;
    async fn display_saved(&self) -> Result<()>;
    async fn display_save_failed(&self, message: String) -> Result<()>;
    async fn display_error(&self, message: String) -> Result<()>;
    async fn display_help(&self, text: String) -> Result<()>;
}

/// Plain-text rendering of the board on any writer, stdout by default
pub struct ConsoleTokenBoardView<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleTokenBoardView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleTokenBoardView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|e| anyhow!("Console writer poisoned: {}", e))
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|e| anyhow!("Console writer poisoned: {}", e))?;
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }
}

pub fn render_chart(slices: &[ChartSlice]) -> String {
    // i128 holds the sum of any number of i64 supplies
    let total: i128 = slices
        .iter()
        .map(|slice| i128::from(slice.value.max(0)))
        .sum();
    let mut text = String::from("Total supply by token\n");

    if total <= 0 {
        text.push_str("  (no data)\n");
        return text;
    }

    for slice in slices {
        let share = slice.value.max(0) as f64 / total as f64;
        let bar = "#".repeat((share * CHART_BAR_WIDTH as f64).round() as usize);
        text.push_str(&format!(
            "  {:<10} {:<width$} {:>6.2}%\n",
            slice.label,
            bar,
            share * 100.0,
            width = CHART_BAR_WIDTH
        ));
    }

    text
}

pub fn render_grid(projection: &BoardProjection) -> String {
    let widths: Vec<usize> = GRID_COLUMNS
        .iter()
        .map(|column| column.width / PIXELS_PER_CHAR)
        .collect();

    let format_line = |cells: &[String]| {
        GRID_COLUMNS
            .iter()
            .zip(cells)
            .zip(&widths)
            .map(|((column, cell), width)| {
                if column.numeric {
                    format!("{:>width$}", cell, width = *width)
                } else {
                    format!("{:<width$}", cell, width = *width)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    };

    let headers: Vec<String> = GRID_COLUMNS
        .iter()
        .map(|column| column.header.to_string())
        .collect();

    let mut lines = vec![format_line(&headers)];
    lines.push("-".repeat(lines[0].len()));
    for row in &projection.rows {
        lines.push(format_line(&row.cells()));
    }
    if projection.rows.is_empty() {
        lines.push("No rows".to_string());
    }

    lines.join("\n")
}

pub fn render_draft(draft: &DraftForm) -> String {
    let fields = [
        (DraftField::Name, draft.name.clone()),
        (DraftField::Symbol, draft.symbol.clone()),
        (DraftField::ContactAddress, draft.contact_address.clone()),
        (DraftField::TotalSupply, format_thousands(draft.total_supply)),
        (DraftField::TotalHolders, format_thousands(draft.total_holders)),
    ];

    let mut text = String::from("Save / Update\n");
    for (field, value) in fields {
        text.push_str(&format!("  {:<16} {}\n", field.label(), value));
    }
    text
}

#[async_trait]
impl<W: Write + Send> TokenBoardView for ConsoleTokenBoardView<W> {
    async fn display_board(&self, projection: &BoardProjection) -> Result<()> {
        self.write(&render_chart(&projection.slices))?;
        self.write(&render_grid(projection))
    }

    async fn display_draft(&self, draft: &DraftForm) -> Result<()> {
        self.write(&render_draft(draft))
    }

    async fn display_validation_error(&self, message: String) -> Result<()> {
        self.write(&format!("❌ {}", message))
    }

    async fn display_saved(&self) -> Result<()> {
        self.write("✅ Record saved successfully!")
    }

    async fn display_save_failed(&self, message: String) -> Result<()> {
        self.write(&format!("❌ Record was not saved: {}", message))
    }

    async fn display_error(&self, message: String) -> Result<()> {
        self.write(&format!("Error: {}", message))
    }

    async fn display_help(&self, text: String) -> Result<()> {
        self.write(&text)
    }
}
