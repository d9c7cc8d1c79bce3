//! Provides the in-memory record store.
//!
//! The store is loaded once from the states file at startup and owned by the
//! menu controller for the rest of the session. Nothing is written back to disk.

mod records;

pub use records::*;
