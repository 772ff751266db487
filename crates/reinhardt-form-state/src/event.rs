//! Change notifications from form inputs
//!
//! Inputs identify themselves by `name`, which doubles as the path of the
//! field they edit (for example `name="address.city"`).

use crate::value::FormValue;
use serde::{Deserialize, Serialize};

/// The input that emitted a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeTarget {
	pub name: String,
	pub value: FormValue,
}

/// A change notification, shaped like a DOM `change`/`input` event.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::ChangeEvent;
///
/// let event: ChangeEvent =
/// 	serde_json::from_str(r#"{ "target": { "name": "email", "value": "a@b.c" } }"#).unwrap();
/// assert_eq!(event, ChangeEvent::new("email", "a@b.c"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
	pub target: ChangeTarget,
}

impl ChangeEvent {
	pub fn new(name: impl Into<String>, value: impl Into<FormValue>) -> Self {
		Self {
			target: ChangeTarget {
				name: name.into(),
				value: value.into(),
			},
		}
	}

	pub fn name(&self) -> &str {
		&self.target.name
	}

	pub fn value(&self) -> &FormValue {
		&self.target.value
	}
}
