//! LookML document tree and writer
//!
//! Generated views and models are built as a [`Block`] tree and rendered
//! with [`dump`]. The writer knows nothing about dbt or Looker semantics;
//! it only decides how keys, quoted strings, SQL, lists and nested blocks
//! are laid out.

pub mod tree;
pub mod writer;

pub use tree::{Block, Field, Value};
pub use writer::{dump, quote};
