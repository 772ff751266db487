//! Form configuration
//!
//! [`FormConfig`] gathers everything a form needs besides its schema: the
//! initial data, the path delimiter and the pre-validation transforms.
//! The declarative part can be loaded from JSON.
//!
//! ```json
//! {
//!   "data": { "name": "", "marks": "" },
//!   "path_delimiter": ".",
//!   "coercions": { "marks": "number", "name": "trim" }
//! }
//! ```

use crate::error::FormStateResult;
use crate::path::DEFAULT_PATH_DELIMITER;
use crate::transform::{Coercion, FieldTransform, Transforms};
use crate::value::{FormData, FormValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Options for building a form controller.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{Coercion, FormConfig};
///
/// let config = FormConfig::from_json(r#"{ "coercions": { "marks": "number" } }"#).unwrap();
/// assert_eq!(config.coercions.get("marks"), Some(&Coercion::Number));
/// assert_eq!(config.path_delimiter, '.');
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
	/// Initial form data
	pub data: FormData,
	/// Separator used by every path-based operation of the form
	pub path_delimiter: char,
	/// Built-in coercions keyed by field path
	pub coercions: BTreeMap<String, Coercion>,
	/// Caller-supplied transforms, applied after the coercions
	#[serde(skip)]
	custom_transforms: Vec<(String, FieldTransform)>,
}

impl Default for FormConfig {
	fn default() -> Self {
		Self {
			data: FormData::new(),
			path_delimiter: DEFAULT_PATH_DELIMITER,
			coercions: BTreeMap::new(),
			custom_transforms: Vec::new(),
		}
	}
}

impl FormConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse the declarative part of a configuration from JSON.
	pub fn from_json(json: &str) -> FormStateResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn from_value(value: serde_json::Value) -> FormStateResult<Self> {
		Ok(serde_json::from_value(value)?)
	}

	pub fn with_data(mut self, data: FormData) -> Self {
		self.data = data;
		self
	}

	pub fn with_delimiter(mut self, delimiter: char) -> Self {
		self.path_delimiter = delimiter;
		self
	}

	/// Coerce `field` with `coercion` before validation. Replaces any
	/// coercion previously configured for the same field.
	pub fn coerce(mut self, field: impl Into<String>, coercion: Coercion) -> Self {
		self.coercions.insert(field.into(), coercion);
		self
	}

	/// Run `f` on `field` before validation.
	pub fn transform<F>(mut self, field: impl Into<String>, f: F) -> Self
	where
		F: Fn(Option<&FormValue>) -> Option<FormValue> + Send + Sync + 'static,
	{
		self.custom_transforms
			.push((field.into(), FieldTransform::Custom(Arc::new(f))));
		self
	}

	/// The transforms to apply before validation: coercions in field order,
	/// then custom transforms in registration order.
	pub fn transforms(&self) -> Transforms {
		let mut transforms = Transforms::new().with_delimiter(self.path_delimiter);
		for (field, coercion) in &self.coercions {
			transforms.push(field.clone(), FieldTransform::Coerce(*coercion));
		}
		for (field, transform) in &self.custom_transforms {
			transforms.push(field.clone(), transform.clone());
		}
		transforms
	}
}
