//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the command-line options, the interactive menu loop and the
//! operations it dispatches to, and the prompting layer that reads user input.

mod commands;
mod prompt;

pub use commands::*;
pub use prompt::*;
