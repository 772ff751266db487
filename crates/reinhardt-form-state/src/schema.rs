//! Schema validator seam
//!
//! The rule language of a schema is not part of this crate. A schema is
//! anything that can inspect a candidate [`FormData`] and either accept it or
//! return a [`SchemaReport`] listing the issues it found, in order.
//!
//! ## Example
//!
//! ```
//! use reinhardt_form_state::{FormData, Schema, SchemaIssue, SchemaReport};
//!
//! let schema = |data: &FormData| -> Result<(), SchemaReport> {
//! 	match data.get("email").and_then(|v| v.as_str()) {
//! 		Some(email) if email.contains('@') => Ok(()),
//! 		_ => Err(SchemaReport::new(vec![SchemaIssue::new(["email"], "Invalid email")])),
//! 	}
//! };
//!
//! assert!(schema.safe_parse(&FormData::new()).is_err());
//! ```

use crate::value::FormData;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One segment of the path attached to a schema issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathKey {
	Key(String),
	Index(usize),
}

impl fmt::Display for PathKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PathKey::Key(key) => f.write_str(key),
			PathKey::Index(index) => write!(f, "{}", index),
		}
	}
}

impl From<&str> for PathKey {
	fn from(key: &str) -> Self {
		PathKey::Key(key.to_owned())
	}
}

impl From<String> for PathKey {
	fn from(key: String) -> Self {
		PathKey::Key(key)
	}
}

impl From<usize> for PathKey {
	fn from(index: usize) -> Self {
		PathKey::Index(index)
	}
}

/// A single problem found by a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIssue {
	/// Location of the offending value, outermost segment first
	pub path: Vec<PathKey>,
	/// Human-readable reason
	pub message: String,
}

impl SchemaIssue {
	pub fn new<P, K>(path: P, message: impl Into<String>) -> Self
	where
		P: IntoIterator<Item = K>,
		K: Into<PathKey>,
	{
		Self {
			path: path.into_iter().map(Into::into).collect(),
			message: message.into(),
		}
	}
}

/// Failure report returned by [`Schema::safe_parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("schema validation failed with {} issue(s)", .issues.len())]
pub struct SchemaReport {
	pub issues: Vec<SchemaIssue>,
}

impl SchemaReport {
	pub fn new(issues: Vec<SchemaIssue>) -> Self {
		Self { issues }
	}
}

/// A validator that checks candidate form data.
///
/// Implemented for any `Fn(&FormData) -> Result<(), SchemaReport>`.
pub trait Schema {
	/// Validate `candidate` without panicking: `Ok(())` on success, the
	/// ordered list of issues otherwise.
	fn safe_parse(&self, candidate: &FormData) -> Result<(), SchemaReport>;
}

impl<F> Schema for F
where
	F: Fn(&FormData) -> Result<(), SchemaReport>,
{
	fn safe_parse(&self, candidate: &FormData) -> Result<(), SchemaReport> {
		self(candidate)
	}
}

/// Schema shared between a controller and its handles.
pub type SharedSchema = Arc<dyn Schema + Send + Sync>;

/// A schema that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Schema for AcceptAll {
	fn safe_parse(&self, _candidate: &FormData) -> Result<(), SchemaReport> {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_closure_schema() {
		let schema = |data: &FormData| {
			if data.contains_key("name") {
				Ok(())
			} else {
				Err(SchemaReport::new(vec![SchemaIssue::new(["name"], "Required")]))
			}
		};

		assert!(schema.safe_parse(&FormData::new()).is_err());
		assert!(
			schema
				.safe_parse(&FormData::try_from(json!({ "name": "x" })).unwrap())
				.is_ok()
		);
	}

	#[rstest]
	fn test_accept_all() {
		assert_eq!(AcceptAll.safe_parse(&FormData::new()), Ok(()));
	}

	#[rstest]
	fn test_issue_path_mixes_keys_and_indexes() {
		let issue = SchemaIssue::new([PathKey::from("items"), PathKey::from(2)], "Too small");
		let rendered: Vec<String> = issue.path.iter().map(ToString::to_string).collect();
		assert_eq!(rendered, vec!["items", "2"]);
	}

	#[rstest]
	fn test_report_deserializes_from_validator_json() {
		let report: SchemaReport = serde_json::from_value(json!({
			"issues": [{ "path": ["email"], "message": "Invalid email" },
			           { "path": ["items", 0, "qty"], "message": "Expected number" }]
		}))
		.unwrap();

		assert_eq!(report.issues.len(), 2);
		assert_eq!(report.issues[1].path[1], PathKey::Index(0));
		assert_eq!(report.to_string(), "schema validation failed with 2 issue(s)");
	}
}
