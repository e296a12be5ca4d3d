//! Boundary validation for form input.
//!
//! Forms are checked here before any request leaves the process: either
//! serde-first (type and path errors only) or strictly against the JSON
//! Schema derived from the form type.

pub mod validator;

pub use validator::{StrictValidator, Validator};
