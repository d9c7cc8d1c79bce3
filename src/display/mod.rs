//! Presentation and external display collaborators.
//!
//! Includes:
//! - `table`: fixed-width text rendering of state records.
//! - `viewer`: opening a state's flower picture in an external viewer.
//! - `chart`: the population bar chart.

mod chart;
mod table;
mod viewer;

pub use chart::*;
pub use table::*;
pub use viewer::*;
