//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts for move generation
//! - `make_unmake.rs` - apply/pass/undo correctness
//! - `edge_cases.rs` - Passes, finished games and text forms
//! - `proptest.rs` - Property-based tests
//! - `search.rs` - Search against a plain minimax reference

mod edge_cases;
mod perft;
mod proptest;
