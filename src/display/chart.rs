//! Population bar chart.
//!
//! The chart is drawn in the terminal as a `comfy-table` table with one row per
//! state and a bar of block characters proportional to its population.

use crate::display::group_thousands;
use crate::error::Result;
use crate::models::PopulationEntry;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use std::io::{self, Write};
use tracing::debug;

/// Title of the top-populations chart.
pub const TOP_STATES_TITLE: &str = "Top 5 Populated States";
/// Category axis label of the top-populations chart.
pub const TOP_STATES_X_LABEL: &str = "State Names";
/// Value axis label of the top-populations chart.
pub const TOP_STATES_Y_LABEL: &str = "Population";

/// Width, in cells, of the longest bar.
const MAX_BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '█';

/// Everything needed to draw a bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<PopulationEntry>,
}

impl BarChart {
    /// Chart of the most populous states with the fixed title and axis labels.
    pub fn top_states(bars: Vec<PopulationEntry>) -> Self {
        Self {
            title: TOP_STATES_TITLE.to_string(),
            x_label: TOP_STATES_X_LABEL.to_string(),
            y_label: TOP_STATES_Y_LABEL.to_string(),
            bars,
        }
    }

    /// Renders the chart as text.
    pub fn render(&self) -> String {
        let max = self.bars.iter().map(|b| b.population).max().unwrap_or(0);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec![self.x_label.as_str(), self.y_label.as_str(), ""]);

        for bar in &self.bars {
            table.add_row(vec![
                Cell::new(&bar.name),
                Cell::new(group_thousands(bar.population)).set_alignment(CellAlignment::Right),
                Cell::new(bar_for(bar.population, max)),
            ]);
        }

        format!("\n{}\n{}\n", self.title, table)
    }
}

/// Bar for `value`, scaled so that `max` spans `MAX_BAR_WIDTH` cells.
fn bar_for(value: u64, max: u64) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let width = (u128::from(value) * MAX_BAR_WIDTH as u128 / u128::from(max)) as usize;
    BAR_CHAR.to_string().repeat(width.max(1))
}

/// Something that can display a bar chart.
pub trait ChartRenderer {
    fn render(&mut self, chart: &BarChart) -> Result<()>;
}

/// Writes charts to a terminal (or any other writer).
pub struct TerminalChart<W: Write> {
    out: W,
}

impl TerminalChart<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalChart<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TerminalChart<W> {
    fn render(&mut self, chart: &BarChart) -> Result<()> {
        debug!(title = %chart.title, bars = chart.bars.len(), "Rendering bar chart");
        self.out.write_all(chart.render().as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
