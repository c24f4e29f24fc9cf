//! # Built-in observers
//!
//! - [`LogWriter`]: renders controller events as `tracing` records (debug/demo).

mod log;

pub use log::LogWriter;
