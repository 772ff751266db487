//! Tagged value tree for form data
//!
//! Form data is a mapping from field names to [`FormValue`]s. Containers
//! (sequences and mappings) hold their children behind an `Arc`, so cloning a
//! value is cheap and a copy-on-write update only duplicates the containers
//! along the written path. Everything else stays shared with the previous
//! snapshot.
//!
//! ```text
//! before:  data ──▶ { profile ──▶ {…}, address ──▶ {…} }
//! after:   data'──▶ { profile'──▶ {…}, address ──▶ {…} }   (address shared)
//! ```

use crate::error::{FormStateError, FormStateResult};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A single value inside the form data tree.
///
/// Serializes to and from plain JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
	#[default]
	Null,
	Bool(bool),
	Number(Number),
	String(String),
	Array(Arc<Vec<FormValue>>),
	Object(FormData),
}

impl FormValue {
	/// The value returned for paths that do not resolve: an empty string.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::FormValue;
	///
	/// assert_eq!(FormValue::empty(), FormValue::from(""));
	/// ```
	pub fn empty() -> Self {
		FormValue::String(String::new())
	}

	/// Truthiness as seen by UI input bindings.
	///
	/// `null`, `false`, `0`, `NaN` and `""` are falsy. Every sequence and
	/// mapping is truthy, even when empty.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::FormValue;
	///
	/// assert!(!FormValue::from(0).is_truthy());
	/// assert!(!FormValue::from("").is_truthy());
	/// assert!(FormValue::from("0").is_truthy());
	/// assert!(FormValue::from(Vec::<FormValue>::new()).is_truthy());
	/// ```
	pub fn is_truthy(&self) -> bool {
		match self {
			FormValue::Null => false,
			FormValue::Bool(b) => *b,
			FormValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
			FormValue::String(s) => !s.is_empty(),
			FormValue::Array(_) | FormValue::Object(_) => true,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, FormValue::Null)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			FormValue::String(s) => Some(s.as_str()),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			FormValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			FormValue::Number(n) => n.as_f64(),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&FormData> {
		match self {
			FormValue::Object(data) => Some(data),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&[FormValue]> {
		match self {
			FormValue::Array(items) => Some(items.as_slice()),
			_ => None,
		}
	}

	/// Short name of the variant, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			FormValue::Null => "null",
			FormValue::Bool(_) => "boolean",
			FormValue::Number(_) => "number",
			FormValue::String(_) => "string",
			FormValue::Array(_) => "array",
			FormValue::Object(_) => "object",
		}
	}

	/// Convert into a `serde_json::Value` (deep copy).
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			FormValue::Null => serde_json::Value::Null,
			FormValue::Bool(b) => serde_json::Value::Bool(*b),
			FormValue::Number(n) => serde_json::Value::Number(n.clone()),
			FormValue::String(s) => serde_json::Value::String(s.clone()),
			FormValue::Array(items) => {
				serde_json::Value::Array(items.iter().map(FormValue::to_json).collect())
			}
			FormValue::Object(data) => data.to_json(),
		}
	}
}

impl fmt::Display for FormValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FormValue::String(s) => f.write_str(s),
			other => write!(f, "{}", other.to_json()),
		}
	}
}

impl From<serde_json::Value> for FormValue {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => FormValue::Null,
			serde_json::Value::Bool(b) => FormValue::Bool(b),
			serde_json::Value::Number(n) => FormValue::Number(n),
			serde_json::Value::String(s) => FormValue::String(s),
			serde_json::Value::Array(items) => {
				FormValue::Array(Arc::new(items.into_iter().map(FormValue::from).collect()))
			}
			serde_json::Value::Object(map) => FormValue::Object(FormData::from(map)),
		}
	}
}

impl From<&str> for FormValue {
	fn from(value: &str) -> Self {
		FormValue::String(value.to_owned())
	}
}

impl From<String> for FormValue {
	fn from(value: String) -> Self {
		FormValue::String(value)
	}
}

impl From<bool> for FormValue {
	fn from(value: bool) -> Self {
		FormValue::Bool(value)
	}
}

impl From<i64> for FormValue {
	fn from(value: i64) -> Self {
		FormValue::Number(value.into())
	}
}

impl From<i32> for FormValue {
	fn from(value: i32) -> Self {
		FormValue::Number(value.into())
	}
}

impl From<u64> for FormValue {
	fn from(value: u64) -> Self {
		FormValue::Number(value.into())
	}
}

/// Non-finite floats have no JSON representation and become `Null`.
impl From<f64> for FormValue {
	fn from(value: f64) -> Self {
		Number::from_f64(value).map_or(FormValue::Null, FormValue::Number)
	}
}

impl From<Vec<FormValue>> for FormValue {
	fn from(items: Vec<FormValue>) -> Self {
		FormValue::Array(Arc::new(items))
	}
}

impl From<FormData> for FormValue {
	fn from(data: FormData) -> Self {
		FormValue::Object(data)
	}
}

/// The field values of one form: a string-keyed mapping of [`FormValue`]s.
///
/// `FormData` is a persistent map. Cloning shares the underlying storage, and
/// the only way to change a mapping is to produce a new one (see
/// [`crate::path::set_by_path`]).
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::FormData;
/// use serde_json::json;
///
/// let data = FormData::try_from(json!({ "name": "John", "age": 30 })).unwrap();
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.get("name").and_then(|v| v.as_str()), Some("John"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(Arc<BTreeMap<String, FormValue>>);

impl FormData {
	/// Create an empty mapping
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&FormValue> {
		self.0.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns a new mapping with `key` set to `value`.
	///
	/// Only the top-level mapping is copied; every other entry is shared
	/// with `self`.
	pub fn with(&self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
		let mut next = self.clone();
		next.entries_mut().insert(key.into(), value.into());
		next
	}

	/// Whether both mappings share the same storage.
	///
	/// Used to observe structural sharing between snapshots.
	pub fn ptr_eq(&self, other: &FormData) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	/// Convert into a `serde_json::Value` (deep copy).
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::Value::Object(
			self.0
				.iter()
				.map(|(k, v)| (k.clone(), v.to_json()))
				.collect(),
		)
	}

	/// Copy-on-write access to the entries. Clones the map (shallowly) when
	/// the storage is shared.
	pub(crate) fn entries_mut(&mut self) -> &mut BTreeMap<String, FormValue> {
		Arc::make_mut(&mut self.0)
	}
}

impl From<serde_json::Map<String, serde_json::Value>> for FormData {
	fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
		map.into_iter()
			.map(|(k, v)| (k, FormValue::from(v)))
			.collect()
	}
}

impl TryFrom<serde_json::Value> for FormData {
	type Error = FormStateError;

	fn try_from(value: serde_json::Value) -> FormStateResult<Self> {
		match value {
			serde_json::Value::Object(map) => Ok(FormData::from(map)),
			other => Err(FormStateError::NotAnObject(
				FormValue::from(other).kind().to_string(),
			)),
		}
	}
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for FormData {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		FormData(Arc::new(
			iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		))
	}
}
