//! Common types and errors shared across `lambda-env-vars` crates.

pub mod error;
pub mod lookup;
pub mod value;

pub use error::EnvVarsError;
pub use lookup::{DocumentKey, Location, LookupConfig, ResolvedConfig, S3Config};
pub use value::{ConfigValue, Document};
