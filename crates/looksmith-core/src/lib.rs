//! Looksmith Core
//!
//! Core domain model shared by every crate: supported dialects, the
//! semantic type map catalog, diagnostics and run configuration.
//! Never rename diagnostic codes - they are part of the public API.

pub mod config;
pub mod diagnostic;
pub mod dialect;
pub mod report;
pub mod types;

pub use config::{Config, ConfigError, CONFIG_FILE_NAME};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use dialect::{AdapterError, Dialect};
pub use report::{Report, ReportSummary, ReportVersion};
pub use types::{SemanticType, TypeCatalog};
