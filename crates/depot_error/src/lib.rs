//! Error types for the depot service.
//!
//! Every failure in the workspace is expressed through this crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use depot_error::{DepotResult, ValidationError};
//!
//! fn fetch_data() -> DepotResult<String> {
//!     Err(ValidationError::new("Name and address are required"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod database;
mod decision;
mod error;
mod json;
mod models;
mod upload;
mod validation;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use decision::{DecisionError, DecisionErrorKind};
pub use error::{DepotError, DepotErrorKind, DepotResult};
pub use json::JsonError;
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use upload::{UploadError, UploadErrorKind};
pub use validation::ValidationError;
