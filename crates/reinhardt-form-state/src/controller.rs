//! Form controller
//!
//! [`FormController`] owns the state of one form: the field data, a loading
//! flag and the errors of the last validation. Every operation is a
//! synchronous transition from one [`FormState`] to the next.
//!
//! ## Example
//!
//! ```
//! use reinhardt_form_state::{FormController, FormData, SchemaIssue, SchemaReport};
//!
//! let mut form = FormController::new(|data: &FormData| -> Result<(), SchemaReport> {
//! 	match data.get("email").and_then(|v| v.as_str()) {
//! 		Some(email) if email.contains('@') => Ok(()),
//! 		_ => Err(SchemaReport::new(vec![SchemaIssue::new(["email"], "Invalid email")])),
//! 	}
//! });
//!
//! form.update_field("email", "not-an-email");
//! assert!(!form.validate());
//! assert_eq!(form.get_field_error("email"), "Invalid email");
//!
//! form.update_field("email", "john@example.com");
//! assert!(form.validate());
//! assert_eq!(form.get_field_error("email"), "");
//! ```

use crate::config::FormConfig;
use crate::error::{FormStateError, FormStateResult};
use crate::event::ChangeEvent;
use crate::path::{get_by_path_with_delimiter, set_by_path_with_delimiter};
use crate::schema::{Schema, SharedSchema};
use crate::transform::Transforms;
use crate::validation::{ValidationError, collect_validation_errors, field_error};
use crate::value::{FormData, FormValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Snapshot of a form.
///
/// Serialized with camelCase keys (`data`, `isLoading`, `error`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
	pub data: FormData,
	pub is_loading: bool,
	/// `None` until the form has been validated
	pub error: Option<Vec<ValidationError>>,
}

impl FormState {
	pub fn new(data: FormData) -> Self {
		Self {
			data,
			is_loading: false,
			error: None,
		}
	}
}

/// A whole-attribute replacement of [`FormState`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateField {
	Data(FormData),
	IsLoading(bool),
	Error(Option<Vec<ValidationError>>),
}

impl StateField {
	/// Attribute name as it appears in the serialized state.
	pub fn name(&self) -> &'static str {
		match self {
			StateField::Data(_) => "data",
			StateField::IsLoading(_) => "isLoading",
			StateField::Error(_) => "error",
		}
	}

	/// Build a replacement from an attribute name and a JSON value.
	///
	/// Accepts `data`, `isLoading` (or `is_loading`) and `error`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::StateField;
	/// use serde_json::json;
	///
	/// let field = StateField::from_json("isLoading", json!(true)).unwrap();
	/// assert_eq!(field, StateField::IsLoading(true));
	///
	/// assert!(StateField::from_json("loading", json!(true)).is_err());
	/// assert!(StateField::from_json("isLoading", json!("yes")).is_err());
	/// ```
	pub fn from_json(key: &str, value: serde_json::Value) -> FormStateResult<Self> {
		match key {
			"data" => serde_json::from_value(value)
				.map(StateField::Data)
				.map_err(|source| FormStateError::InvalidAttributeValue {
					attribute: "data",
					source,
				}),
			"isLoading" | "is_loading" => serde_json::from_value(value)
				.map(StateField::IsLoading)
				.map_err(|source| FormStateError::InvalidAttributeValue {
					attribute: "isLoading",
					source,
				}),
			"error" => serde_json::from_value(value)
				.map(StateField::Error)
				.map_err(|source| FormStateError::InvalidAttributeValue {
					attribute: "error",
					source,
				}),
			other => Err(FormStateError::UnknownAttribute(other.to_string())),
		}
	}
}

/// State container for one form.
pub struct FormController {
	state: FormState,
	schema: SharedSchema,
	transforms: Transforms,
}

impl FormController {
	/// Create a controller with empty data
	pub fn new(schema: impl Schema + Send + Sync + 'static) -> Self {
		Self::from_config(FormConfig::default(), schema)
	}

	/// Create a controller with initial data
	pub fn with_data(data: FormData, schema: impl Schema + Send + Sync + 'static) -> Self {
		Self::from_config(FormConfig::new().with_data(data), schema)
	}

	/// Create a controller from a full configuration
	pub fn from_config(config: FormConfig, schema: impl Schema + Send + Sync + 'static) -> Self {
		Self::from_shared(config, Arc::new(schema))
	}

	pub fn from_shared(config: FormConfig, schema: SharedSchema) -> Self {
		let transforms = config.transforms();
		Self {
			state: FormState::new(config.data),
			schema,
			transforms,
		}
	}

	pub fn state(&self) -> &FormState {
		&self.state
	}

	pub fn data(&self) -> &FormData {
		&self.state.data
	}

	pub fn is_loading(&self) -> bool {
		self.state.is_loading
	}

	pub fn error(&self) -> Option<&[ValidationError]> {
		self.state.error.as_deref()
	}

	/// Separator used for field paths
	pub fn delimiter(&self) -> char {
		self.transforms.delimiter()
	}

	/// Replace one state attribute wholesale.
	pub fn set_field(&mut self, field: StateField) {
		tracing::debug!(attribute = field.name(), "form state attribute replaced");
		match field {
			StateField::Data(data) => self.state.data = data,
			StateField::IsLoading(is_loading) => self.state.is_loading = is_loading,
			StateField::Error(error) => self.state.error = error,
		}
	}

	/// Replace one state attribute named by a string.
	///
	/// The state is left unchanged when the name or the value is rejected.
	pub fn set_field_by_name(
		&mut self,
		key: &str,
		value: serde_json::Value,
	) -> FormStateResult<()> {
		match StateField::from_json(key, value) {
			Ok(field) => {
				self.set_field(field);
				Ok(())
			}
			Err(e) => {
				tracing::warn!(attribute = key, error = %e, "form state update rejected");
				Err(e)
			}
		}
	}

	/// Replace the whole state with the result of `f`.
	pub fn update_state<F>(&mut self, f: F)
	where
		F: FnOnce(&FormState) -> FormState,
	{
		self.state = f(&self.state);
	}

	/// Write `value` at `path` inside the form data.
	pub fn update_field(&mut self, path: &str, value: impl Into<FormValue>) {
		self.state.data =
			set_by_path_with_delimiter(&self.state.data, path, value.into(), self.delimiter());
	}

	/// Apply an input change notification.
	pub fn handle_change_event(&mut self, event: &ChangeEvent) {
		self.update_field(event.name(), event.value().clone());
	}

	/// Validate the current data and store the resulting errors.
	///
	/// Returns `true` when there are no errors. The stored error list is
	/// always overwritten, with an empty list on success.
	pub fn validate(&mut self) -> bool {
		let errors =
			collect_validation_errors(self.schema.as_ref(), &self.state.data, &self.transforms);
		let valid = errors.is_empty();
		tracing::debug!(valid, error_count = errors.len(), "form validated");
		self.state.error = Some(errors);
		valid
	}

	/// Message of the first stored error for `name`, or `""`.
	pub fn get_field_error(&self, name: &str) -> &str {
		field_error(self.error().unwrap_or_default(), name)
	}

	/// Read the field at `path`, or `""` when it is not set.
	pub fn get_value(&self, path: &str) -> FormValue {
		get_by_path_with_delimiter(&self.state.data, path, self.delimiter())
	}

	/// Forget the errors of the last validation.
	pub fn clear_errors(&mut self) {
		self.state.error = None;
	}
}

impl fmt::Debug for FormController {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormController")
			.field("state", &self.state)
			.field("transforms", &self.transforms)
			.finish_non_exhaustive()
	}
}
