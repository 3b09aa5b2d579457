//! Processing Context
//!
//! Scope tracking and the error taxonomy shared by the rewriter and the
//! bundle extractor.

pub mod error;
pub mod scope;

pub use error::{BindingError, ErrorCode, ErrorKind, Result};
pub use scope::{Scope, ScopeGuard};
