//! Support library linked by modelsmith-generated model modules.
//!
//! Generated code describes each table with a [`ColumnSpec`] table and a
//! [`Record`] impl; this crate turns those into bound MySQL statements,
//! validates values before a save and hands out pooled connections.

pub mod connection;
pub mod error;
pub mod exec;
pub mod spec;
pub mod statement;
pub mod validate;
pub mod value;

pub use connection::Connections;
pub use error::{Result, RuntimeError};
pub use exec::{column, execute, fetch_all, fetch_one, FromColumn};
pub use spec::{ColumnSpec, FieldKind, KeyRole, Record};
pub use statement::{build_upsert, quote_ident, select_statement, QueryOptions, Statement};
pub use validate::{check_members, literal_members, prepare, Slot};
pub use value::Value;

pub use chrono;
pub use sqlx;
