//! Model code generation for modelsmith.
//!
//! This crate reads a table's columns through a [`CatalogReader`], resolves
//! each column to a Rust type, and writes a module of record types and CRUD
//! functions that run on `modelsmith-runtime`.
//!
//! [`CatalogReader`]: modelsmith_introspect::CatalogReader

pub mod errors;
pub mod keys;
pub mod model;
pub mod names;
pub mod orchestrator;
pub mod resolver;
pub mod scaffold;
pub mod synth;

pub use errors::{GenerationError, ScaffoldError};
pub use model::{
    BatchReport, GenerateOptions, NamingMode, TableFailure, TableReport, TableSelection,
};
pub use orchestrator::Generator;
pub use scaffold::{
    DiskScaffolder, Formatter, GeneratedArtifact, ScaffoldOutcome, Scaffolder, WritePolicy,
};
pub use synth::TableModel;
