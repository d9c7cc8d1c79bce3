//! Defines the data structures and models used throughout the application.
//!
//! This includes the state record parsed from the states file and the
//! ranked population entries used for charting.

mod state;

pub use state::*;
