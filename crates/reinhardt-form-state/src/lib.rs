//! Form state management for Reinhardt components
//!
//! This crate provides the state side of client-side forms:
//! - A copy-on-write value tree for form data ([`FormData`], [`FormValue`])
//! - Dot-path reads and writes into nested fields ([`path`])
//! - A schema seam and the mapping of schema issues to per-field messages
//!   ([`Schema`], [`validation`])
//! - Per-field pre-validation coercions ([`Transforms`], [`Coercion`])
//! - A form state container ([`FormController`]) and its hook-style handle
//!   ([`use_form`], [`FormHandle`])
//!
//! ## Example
//!
//! ```
//! use reinhardt_form_state::{
//! 	ChangeEvent, Coercion, FormConfig, FormData, SchemaIssue, SchemaReport, use_form,
//! };
//!
//! fn schema(data: &FormData) -> Result<(), SchemaReport> {
//! 	let mut issues = Vec::new();
//! 	if data.get("marks").and_then(|v| v.as_f64()).is_none() {
//! 		issues.push(SchemaIssue::new(["marks"], "Expected number"));
//! 	}
//! 	if issues.is_empty() { Ok(()) } else { Err(SchemaReport::new(issues)) }
//! }
//!
//! let form = use_form(FormConfig::new().coerce("marks", Coercion::Number), schema);
//!
//! assert!(!form.validate());
//! assert_eq!(form.get_field_error("marks"), "Expected number");
//!
//! form.handle_change_event(&ChangeEvent::new("marks", "87"));
//! assert!(form.validate());
//! assert_eq!(form.get_field_error("marks"), "");
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod hook;
pub mod path;
pub mod schema;
pub mod transform;
pub mod validation;
pub mod value;

pub use config::FormConfig;
pub use controller::{FormController, FormState, StateField};
pub use error::{FormStateError, FormStateResult};
pub use event::{ChangeEvent, ChangeTarget};
pub use hook::{FormHandle, use_form};
pub use path::{
	DEFAULT_PATH_DELIMITER, MAX_SEQUENCE_GAP, get_by_path, lookup_by_path, set_by_path,
};
pub use schema::{AcceptAll, PathKey, Schema, SchemaIssue, SchemaReport, SharedSchema};
pub use transform::{Coercion, FieldTransform, Transforms};
pub use validation::{ValidationError, collect_validation_errors, field_error};
pub use value::{FormData, FormValue};
