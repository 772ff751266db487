//! Error types for the form state API
//!
//! Field validation failures are not errors in this sense: they are data,
//! stored as [`crate::ValidationError`] records on the form state. The
//! variants below cover misuse of the string-keyed and JSON-driven entry
//! points only.

/// Errors raised by the string-keyed and JSON-driven parts of the API.
#[derive(Debug, thiserror::Error)]
pub enum FormStateError {
	#[error("Unknown form state attribute: {0}")]
	UnknownAttribute(String),
	#[error("Invalid value for form state attribute {attribute}: {source}")]
	InvalidAttributeValue {
		attribute: &'static str,
		#[source]
		source: serde_json::Error,
	},
	#[error("Form data must be an object, got {0}")]
	NotAnObject(String),
	#[error("Invalid form configuration: {0}")]
	Config(#[from] serde_json::Error),
}

pub type FormStateResult<T> = Result<T, FormStateError>;
