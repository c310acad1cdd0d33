//! Filtering / 过滤
//!
//! - interpreter: free-text query -> FilterSpec (literal keyword rules only)
//! - engine: FilterSpec + records -> matching records, order preserved

pub mod engine;
pub mod interpreter;

pub use engine::{apply, matches};
pub use interpreter::interpret;
