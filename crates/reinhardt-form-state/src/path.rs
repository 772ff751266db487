//! Dot-path access into form data
//!
//! A path such as `"address.city"` or `"items.0.qty"` names a location inside
//! nested [`FormData`]. Segments index mappings by key and sequences by
//! decimal position.
//!
//! Reads never fail: a path that does not resolve reads as an empty string.
//! Writes never fail either: missing or scalar intermediates are replaced by
//! fresh mappings. Writes are copy-on-write, so the source data is left
//! untouched and branches off the written path stay shared.
//!
//! Only canonical decimal segments (`"0"`, `"12"`, never `"+1"` or `"01"`)
//! index a sequence. A sequence written through any other segment, or through
//! an index more than [`MAX_SEQUENCE_GAP`] past its end, becomes a mapping
//! keyed by element position, so the write lands under the segment as a key.

use crate::value::{FormData, FormValue};
use std::sync::Arc;

/// Separator between path segments unless configured otherwise.
pub const DEFAULT_PATH_DELIMITER: char = '.';

/// How far past the end of a sequence a write may pad with nulls.
pub const MAX_SEQUENCE_GAP: usize = 1024;

/// Looks up the value at `path`, distinguishing absence from falsy values.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{FormData, FormValue, path::lookup_by_path};
/// use serde_json::json;
///
/// let data = FormData::try_from(json!({ "user": { "age": 0 } })).unwrap();
/// assert_eq!(lookup_by_path(&data, "user.age"), Some(&FormValue::from(0)));
/// assert_eq!(lookup_by_path(&data, "user.name"), None);
/// ```
pub fn lookup_by_path<'a>(source: &'a FormData, path: &str) -> Option<&'a FormValue> {
	lookup_by_path_with_delimiter(source, path, DEFAULT_PATH_DELIMITER)
}

pub fn lookup_by_path_with_delimiter<'a>(
	source: &'a FormData,
	path: &str,
	delimiter: char,
) -> Option<&'a FormValue> {
	let mut segments = path.split(delimiter);
	let first = segments.next()?;
	segments.try_fold(source.get(first)?, |current, segment| {
		child(current, segment)
	})
}

/// Reads the value at `path`, or an empty string when the path does not
/// resolve.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{FormData, FormValue, path::get_by_path};
/// use serde_json::json;
///
/// let data = FormData::try_from(json!({ "items": [{ "qty": 2 }] })).unwrap();
/// assert_eq!(get_by_path(&data, "items.0.qty"), FormValue::from(2));
/// assert_eq!(get_by_path(&data, "items.3.qty"), FormValue::empty());
/// ```
pub fn get_by_path(source: &FormData, path: &str) -> FormValue {
	get_by_path_with_delimiter(source, path, DEFAULT_PATH_DELIMITER)
}

pub fn get_by_path_with_delimiter(source: &FormData, path: &str, delimiter: char) -> FormValue {
	lookup_by_path_with_delimiter(source, path, delimiter)
		.cloned()
		.unwrap_or_else(FormValue::empty)
}

/// Returns a copy of `source` with `value` written at `path`.
///
/// The top-level mapping and every container on the path are copied;
/// siblings are shared with `source` by reference.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{FormData, path::set_by_path};
/// use serde_json::json;
///
/// let data = set_by_path(&FormData::new(), "a.b.c", 5.into());
/// assert_eq!(data.to_json(), json!({ "a": { "b": { "c": 5 } } }));
/// ```
pub fn set_by_path(source: &FormData, path: &str, value: FormValue) -> FormData {
	set_by_path_with_delimiter(source, path, value, DEFAULT_PATH_DELIMITER)
}

pub fn set_by_path_with_delimiter(
	source: &FormData,
	path: &str,
	value: FormValue,
	delimiter: char,
) -> FormData {
	let segments: Vec<&str> = path.split(delimiter).collect();
	let mut data = source.clone();
	if let Some((head, rest)) = segments.split_first() {
		assign_in_map(&mut data, head, rest, value);
	}
	tracing::trace!(path, "form data written");
	data
}

fn child<'a>(value: &'a FormValue, segment: &str) -> Option<&'a FormValue> {
	match value {
		FormValue::Object(map) => map.get(segment),
		FormValue::Array(items) => parse_index(segment).and_then(|i| items.get(i)),
		_ => None,
	}
}

fn assign_in_map(map: &mut FormData, head: &str, rest: &[&str], value: FormValue) {
	let slot = map.entries_mut().entry(head.to_owned()).or_default();
	assign(slot, rest, value);
}

fn assign(slot: &mut FormValue, segments: &[&str], value: FormValue) {
	let Some((head, rest)) = segments.split_first() else {
		*slot = value;
		return;
	};

	if let FormValue::Array(items) = &mut *slot {
		let padded_len = parse_index(head)
			.and_then(|index| index.checked_add(1))
			.filter(|len| *len <= items.len().saturating_add(MAX_SEQUENCE_GAP));
		if let Some(len) = padded_len {
			let items = Arc::make_mut(items);
			if len > items.len() {
				items.resize(len, FormValue::Null);
			}
			assign(&mut items[len - 1], rest, value);
			return;
		}
		let map = sequence_to_mapping(items);
		*slot = FormValue::Object(map);
	}

	if let FormValue::Object(map) = &mut *slot {
		assign_in_map(map, head, rest, value);
		return;
	}

	let mut map = FormData::new();
	assign_in_map(&mut map, head, rest, value);
	*slot = FormValue::Object(map);
}

/// Parses a canonical decimal index: digits only, no leading zeros.
fn parse_index(segment: &str) -> Option<usize> {
	let canonical = match segment.as_bytes() {
		[b'0'] => true,
		[b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
		_ => false,
	};
	if canonical { segment.parse().ok() } else { None }
}

fn sequence_to_mapping(items: &[FormValue]) -> FormData {
	items
		.iter()
		.enumerate()
		.map(|(index, item)| (index.to_string(), item.clone()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn data(value: serde_json::Value) -> FormData {
		FormData::try_from(value).unwrap()
	}

	#[rstest]
	#[case("name", FormValue::from("John"))]
	#[case("address.city", FormValue::from("Tokyo"))]
	#[case("tags.1", FormValue::from("b"))]
	#[case("missing", FormValue::empty())]
	#[case("address.zip.code", FormValue::empty())]
	#[case("name.first", FormValue::empty())]
	#[case("tags.9", FormValue::empty())]
	#[case("tags.x", FormValue::empty())]
	fn test_get_by_path(#[case] path: &str, #[case] expected: FormValue) {
		let source = data(json!({
			"name": "John",
			"address": { "city": "Tokyo" },
			"tags": ["a", "b"]
		}));

		assert_eq!(get_by_path(&source, path), expected);
	}

	#[rstest]
	#[case(json!(0))]
	#[case(json!(false))]
	#[case(json!(""))]
	#[case(json!(null))]
	fn test_get_returns_present_falsy_values(#[case] stored: serde_json::Value) {
		let source = data(json!({ "outer": { "inner": stored.clone() } }));

		assert_eq!(get_by_path(&source, "outer.inner"), FormValue::from(stored));
		assert!(lookup_by_path(&source, "outer.inner").is_some());
	}

	#[rstest]
	fn test_set_creates_nested_mappings() {
		let result = set_by_path(&FormData::new(), "a.b.c", FormValue::from(5));
		assert_eq!(result.to_json(), json!({ "a": { "b": { "c": 5 } } }));
	}

	#[rstest]
	fn test_set_does_not_mutate_source() {
		let source = data(json!({ "a": { "b": 1 }, "c": 2 }));
		let snapshot = source.to_json();

		let result = set_by_path(&source, "a.b", FormValue::from(10));

		assert_eq!(source.to_json(), snapshot);
		assert_eq!(result.to_json(), json!({ "a": { "b": 10 }, "c": 2 }));
		assert!(!result.ptr_eq(&source));
	}

	#[rstest]
	fn test_set_shares_sibling_branches() {
		let source = data(json!({
			"profile": { "name": "a", "contact": { "email": "x" } },
			"settings": { "theme": "dark" }
		}));

		let result = set_by_path(&source, "profile.name", FormValue::from("b"));

		let settings_before = source.get("settings").and_then(FormValue::as_object).unwrap();
		let settings_after = result.get("settings").and_then(FormValue::as_object).unwrap();
		assert!(settings_before.ptr_eq(settings_after));

		let profile_before = source.get("profile").and_then(FormValue::as_object).unwrap();
		let profile_after = result.get("profile").and_then(FormValue::as_object).unwrap();
		assert!(!profile_before.ptr_eq(profile_after));

		let contact_before = profile_before.get("contact").and_then(FormValue::as_object).unwrap();
		let contact_after = profile_after.get("contact").and_then(FormValue::as_object).unwrap();
		assert!(contact_before.ptr_eq(contact_after));
	}

	#[rstest]
	fn test_set_replaces_scalar_intermediate() {
		let source = data(json!({ "a": "text" }));
		let result = set_by_path(&source, "a.b", FormValue::from(1));
		assert_eq!(result.to_json(), json!({ "a": { "b": 1 } }));
	}

	#[rstest]
	fn test_set_writes_into_sequences() {
		let source = data(json!({ "items": [{ "qty": 1 }, { "qty": 2 }] }));

		let result = set_by_path(&source, "items.1.qty", FormValue::from(5));
		assert_eq!(result.to_json(), json!({ "items": [{ "qty": 1 }, { "qty": 5 }] }));
		assert_eq!(source.to_json(), json!({ "items": [{ "qty": 1 }, { "qty": 2 }] }));
	}

	#[rstest]
	fn test_set_pads_sequences_past_the_end() {
		let source = data(json!({ "tags": ["a"] }));
		let result = set_by_path(&source, "tags.2", FormValue::from("c"));
		assert_eq!(result.to_json(), json!({ "tags": ["a", null, "c"] }));
	}

	#[rstest]
	#[case("tags.18446744073709551615")]
	#[case("tags.4000000000000000")]
	#[case("tags.1026")]
	fn test_set_far_past_the_end_becomes_a_key(#[case] path: &str) {
		let source = data(json!({ "tags": ["a"] }));

		let result = set_by_path(&source, path, FormValue::from("x"));

		let index = path.strip_prefix("tags.").unwrap();
		let tags = result.get("tags").and_then(FormValue::as_object).unwrap();
		assert_eq!(tags.keys().collect::<Vec<_>>(), vec!["0", index]);
		assert_eq!(tags.get("0"), Some(&FormValue::from("a")));
		assert_eq!(get_by_path(&result, path), FormValue::from("x"));
	}

	#[rstest]
	fn test_set_pads_up_to_the_gap_limit() {
		let source = data(json!({ "tags": ["a"] }));

		let result = set_by_path(&source, "tags.1024", FormValue::from("x"));

		let tags = result.get("tags").and_then(FormValue::as_array).unwrap();
		assert_eq!(tags.len(), 1025);
		assert!(tags[1..1024].iter().all(FormValue::is_null));
		assert_eq!(get_by_path(&result, "tags.1024"), FormValue::from("x"));
	}

	#[rstest]
	#[case("+1")]
	#[case("01")]
	#[case("-0")]
	#[case(" 1")]
	fn test_non_canonical_index_is_a_key(#[case] segment: &str) {
		let source = data(json!({ "tags": ["a", "b"] }));
		let path = format!("tags.{segment}");

		assert_eq!(get_by_path(&source, &path), FormValue::empty());

		let result = set_by_path(&source, &path, FormValue::from("x"));
		let tags = result.get("tags").and_then(FormValue::as_object).unwrap();
		assert_eq!(tags.len(), 3);
		assert_eq!(tags.get(segment), Some(&FormValue::from("x")));
		assert_eq!(get_by_path(&result, "tags.1"), FormValue::from("b"));
		assert_eq!(get_by_path(&result, &path), FormValue::from("x"));
	}

	#[rstest]
	fn test_custom_delimiter() {
		let result =
			set_by_path_with_delimiter(&FormData::new(), "a/b", FormValue::from(true), '/');
		assert_eq!(result.to_json(), json!({ "a": { "b": true } }));
		assert_eq!(
			get_by_path_with_delimiter(&result, "a/b", '/'),
			FormValue::from(true)
		);
		assert_eq!(get_by_path(&result, "a/b"), FormValue::empty());
	}

	#[rstest]
	fn test_empty_path_addresses_empty_key() {
		let result = set_by_path(&FormData::new(), "", FormValue::from(1));
		assert_eq!(result.to_json(), json!({ "": 1 }));
		assert_eq!(get_by_path(&result, ""), FormValue::from(1));
	}
}
