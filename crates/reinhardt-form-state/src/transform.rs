//! Pre-validation transforms
//!
//! Inputs deliver strings, while a schema usually wants typed values. Before
//! the schema runs, the configured transforms are applied to a derived copy
//! of the form data. The stored data is never changed by a transform.
//!
//! ## Example
//!
//! ```
//! use reinhardt_form_state::{Coercion, FormData, FormValue, Transforms};
//! use serde_json::json;
//!
//! let transforms = Transforms::new().coerce("marks", Coercion::Number);
//!
//! let data = FormData::try_from(json!({ "marks": "42" })).unwrap();
//! let candidate = transforms.apply(&data);
//! assert_eq!(candidate.get("marks"), Some(&FormValue::from(42)));
//! ```

use crate::path::{
	DEFAULT_PATH_DELIMITER, lookup_by_path_with_delimiter, set_by_path_with_delimiter,
};
use crate::value::{FormData, FormValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Built-in value coercions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercion {
	/// Truthy values become numbers; absent or falsy values become `""`.
	///
	/// Strings are parsed after trimming, and a blank string reads as `0`.
	/// Values that cannot be read as a number are passed through so the
	/// schema reports them.
	Number,
	/// Every value becomes its truthiness; absent becomes `false`.
	Boolean,
	/// Strings lose leading and trailing whitespace.
	Trim,
	/// Absent values and empty strings become `null`.
	EmptyToNull,
}

impl Coercion {
	/// Applies the coercion to the current value of a field (`None` when the
	/// field is absent). Returns `None` to leave the field as it is.
	pub fn apply(self, current: Option<&FormValue>) -> Option<FormValue> {
		match self {
			Coercion::Number => Some(match current {
				Some(value) if value.is_truthy() => to_number(value),
				_ => FormValue::empty(),
			}),
			Coercion::Boolean => Some(FormValue::Bool(current.is_some_and(FormValue::is_truthy))),
			Coercion::Trim => match current {
				Some(FormValue::String(s)) => Some(FormValue::from(s.trim())),
				_ => None,
			},
			Coercion::EmptyToNull => match current {
				None => Some(FormValue::Null),
				Some(FormValue::String(s)) if s.is_empty() => Some(FormValue::Null),
				Some(_) => None,
			},
		}
	}
}

fn to_number(value: &FormValue) -> FormValue {
	match value {
		FormValue::Number(_) => value.clone(),
		FormValue::Bool(b) => FormValue::from(i64::from(*b)),
		FormValue::String(s) => {
			let trimmed = s.trim();
			if trimmed.is_empty() {
				FormValue::from(0)
			} else if let Ok(int) = trimmed.parse::<i64>() {
				FormValue::from(int)
			} else {
				match trimmed.parse::<f64>() {
					Ok(float) if float.is_finite() => FormValue::from(float),
					_ => value.clone(),
				}
			}
		}
		_ => value.clone(),
	}
}

/// Signature of a caller-supplied transform.
pub type TransformFn = dyn Fn(Option<&FormValue>) -> Option<FormValue> + Send + Sync;

/// A transform attached to one field.
#[derive(Clone)]
pub enum FieldTransform {
	Coerce(Coercion),
	Custom(Arc<TransformFn>),
}

impl FieldTransform {
	pub fn apply(&self, current: Option<&FormValue>) -> Option<FormValue> {
		match self {
			FieldTransform::Coerce(coercion) => coercion.apply(current),
			FieldTransform::Custom(f) => f(current),
		}
	}
}

impl fmt::Debug for FieldTransform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldTransform::Coerce(coercion) => f.debug_tuple("Coerce").field(coercion).finish(),
			FieldTransform::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

/// Ordered list of field transforms applied before validation.
///
/// Fields are addressed by path, so nested fields can be transformed too.
/// Transforms run in registration order; a later transform sees the output
/// of an earlier one on the same field.
#[derive(Debug, Clone)]
pub struct Transforms {
	delimiter: char,
	entries: Vec<(String, FieldTransform)>,
}

impl Default for Transforms {
	fn default() -> Self {
		Self {
			delimiter: DEFAULT_PATH_DELIMITER,
			entries: Vec::new(),
		}
	}
}

impl Transforms {
	pub fn new() -> Self {
		Self::default()
	}

	/// Use `delimiter` to split field paths.
	pub fn with_delimiter(mut self, delimiter: char) -> Self {
		self.delimiter = delimiter;
		self
	}

	/// Register a built-in coercion for `field`.
	pub fn coerce(mut self, field: impl Into<String>, coercion: Coercion) -> Self {
		self.entries
			.push((field.into(), FieldTransform::Coerce(coercion)));
		self
	}

	/// Register a caller-supplied transform for `field`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::{FormData, FormValue, Transforms};
	/// use serde_json::json;
	///
	/// let transforms = Transforms::new().custom("code", |value| {
	/// 	value
	/// 		.and_then(FormValue::as_str)
	/// 		.map(|s| FormValue::from(s.to_uppercase()))
	/// });
	///
	/// let data = FormData::try_from(json!({ "code": "abc" })).unwrap();
	/// assert_eq!(transforms.apply(&data).get("code"), Some(&FormValue::from("ABC")));
	/// ```
	pub fn custom<F>(mut self, field: impl Into<String>, f: F) -> Self
	where
		F: Fn(Option<&FormValue>) -> Option<FormValue> + Send + Sync + 'static,
	{
		self.entries
			.push((field.into(), FieldTransform::Custom(Arc::new(f))));
		self
	}

	pub(crate) fn push(&mut self, field: String, transform: FieldTransform) {
		self.entries.push((field, transform));
	}

	pub fn delimiter(&self) -> char {
		self.delimiter
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Produces the candidate passed to the schema.
	///
	/// `data` is left untouched; when no transform changes anything the
	/// returned mapping shares storage with `data`.
	pub fn apply(&self, data: &FormData) -> FormData {
		self.entries
			.iter()
			.fold(data.clone(), |candidate, (field, transform)| {
				let current = lookup_by_path_with_delimiter(&candidate, field, self.delimiter);
				match transform.apply(current) {
					Some(next) => set_by_path_with_delimiter(&candidate, field, next, self.delimiter),
					None => candidate,
				}
			})
	}
}
