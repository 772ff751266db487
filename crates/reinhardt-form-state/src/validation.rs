//! Mapping schema failures to field-level messages
//!
//! A [`SchemaReport`] carries issues with full paths. Form components only
//! need "which input is wrong, and why", so each issue is flattened to a
//! [`ValidationError`] keyed by the first segment of its path.

use crate::schema::{Schema, SchemaReport};
use crate::transform::Transforms;
use crate::value::FormData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validation message attached to a field.
///
/// Serialized as `{"for": <field>, "message": <message>}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
	/// Field identifier: the first path segment of the failing value
	#[serde(rename = "for")]
	pub field: String,
	pub message: String,
}

impl ValidationError {
	pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			message: message.into(),
		}
	}
}

impl fmt::Display for ValidationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.field, self.message)
	}
}

/// Flattens a schema report, preserving issue order.
///
/// Issues without a path are reported under the empty field name.
pub fn from_schema_report(report: &SchemaReport) -> Vec<ValidationError> {
	report
		.issues
		.iter()
		.map(|issue| ValidationError {
			field: issue
				.path
				.first()
				.map(ToString::to_string)
				.unwrap_or_default(),
			message: issue.message.clone(),
		})
		.collect()
}

/// Runs `schema` against the transformed copy of `state` and returns the
/// field errors. An empty vector means the data is valid.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{
/// 	FormData, SchemaIssue, SchemaReport, Transforms, ValidationError,
/// 	validation::collect_validation_errors,
/// };
///
/// let schema = |_: &FormData| -> Result<(), SchemaReport> {
/// 	Err(SchemaReport::new(vec![SchemaIssue::new(["email"], "Invalid email")]))
/// };
///
/// let errors = collect_validation_errors(&schema, &FormData::new(), &Transforms::new());
/// assert_eq!(errors, vec![ValidationError::new("email", "Invalid email")]);
/// ```
pub fn collect_validation_errors<S>(
	schema: &S,
	state: &FormData,
	transforms: &Transforms,
) -> Vec<ValidationError>
where
	S: Schema + ?Sized,
{
	let candidate = transforms.apply(state);
	match schema.safe_parse(&candidate) {
		Ok(()) => Vec::new(),
		Err(report) => from_schema_report(&report),
	}
}

/// Message of the first error recorded for `name`, or `""`.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{ValidationError, validation::field_error};
///
/// let errors = vec![ValidationError::new("a", "x")];
/// assert_eq!(field_error(&errors, "a"), "x");
/// assert_eq!(field_error(&errors, "b"), "");
/// assert_eq!(field_error(&[], "a"), "");
/// ```
pub fn field_error<'a>(errors: &'a [ValidationError], name: &str) -> &'a str {
	errors
		.iter()
		.find(|error| error.field == name)
		.map_or("", |error| error.message.as_str())
}
