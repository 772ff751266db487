//! Property-based tests for dot-path access
//!
//! Uses proptest to verify:
//! 1. Reading back a written path yields the written value
//! 2. Writing never changes the source data
//! 3. Branches off the written path stay shared with the source
//! 4. Paths that were never written read as an empty string
//!
//! Keys come from a small alphabet so generated paths often run into existing
//! mappings and sequences, and path segments mix keys with in-range,
//! past-the-end and huge indexes.

use proptest::prelude::*;
use reinhardt_form_state::{
	FormData, FormValue, MAX_SEQUENCE_GAP, get_by_path, lookup_by_path, set_by_path,
};
use rstest::rstest;
use serde_json::json;

fn key() -> impl Strategy<Value = String> {
	"[a-c]{1,2}"
}

fn index() -> impl Strategy<Value = String> {
	prop_oneof![
		4 => (0usize..6).prop_map(|i| i.to_string()),
		1 => (MAX_SEQUENCE_GAP..MAX_SEQUENCE_GAP + 8).prop_map(|i| i.to_string()),
		1 => Just(usize::MAX.to_string()),
		1 => Just("4000000000000000".to_string()),
		1 => Just("01".to_string()),
	]
}

fn segment() -> impl Strategy<Value = String> {
	prop_oneof![2 => key(), 1 => index()]
}

fn path() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec(segment(), 1..5)
}

fn scalar() -> impl Strategy<Value = FormValue> {
	prop_oneof![
		Just(FormValue::Null),
		any::<bool>().prop_map(FormValue::from),
		any::<i64>().prop_map(FormValue::from),
		"[ -~]{0,12}".prop_map(FormValue::from),
	]
}

fn form_value() -> impl Strategy<Value = FormValue> {
	scalar().prop_recursive(3, 24, 4, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..4).prop_map(FormValue::from),
			prop::collection::btree_map(key(), inner, 0..4)
				.prop_map(|map| FormValue::from(map.into_iter().collect::<FormData>())),
		]
	})
}

fn form_data() -> impl Strategy<Value = FormData> {
	prop::collection::btree_map(key(), form_value(), 0..5)
		.prop_map(|map| map.into_iter().collect::<FormData>())
}

// ============================================================================
// PB-01: get(set(m, p, v), p) == v
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	#[rstest]
	fn test_read_after_write(data in form_data(), segments in path(), value in form_value()) {
		let path = segments.join(".");
		let written = set_by_path(&data, &path, value.clone());
		prop_assert_eq!(get_by_path(&written, &path), value);
	}
}

// ============================================================================
// PB-02: set never mutates its input
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	#[rstest]
	fn test_write_leaves_source_unchanged(
		data in form_data(),
		segments in path(),
		value in form_value(),
	) {
		let before = data.to_json();
		let path = segments.join(".");

		let written = set_by_path(&data, &path, value);

		prop_assert_eq!(data.to_json(), before);
		prop_assert!(!written.ptr_eq(&data));
	}
}

// ============================================================================
// PB-03: top-level siblings of the written key are shared
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	#[rstest]
	fn test_siblings_are_shared(data in form_data(), segments in path(), value in form_value()) {
		let path = segments.join(".");
		let written = set_by_path(&data, &path, value);

		for (key, original) in data.iter() {
			if key == segments[0] {
				continue;
			}
			let after = written.get(key);
			prop_assert_eq!(after, Some(original));
			if let (FormValue::Object(before), Some(FormValue::Object(after))) = (original, after) {
				prop_assert!(before.ptr_eq(after));
			}
		}
	}
}

// ============================================================================
// PB-04: unknown paths read as ""
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	#[rstest]
	fn test_missing_path_reads_empty(data in form_data(), segments in path()) {
		// Generated keys are lowercase, so an uppercase head never exists.
		let path = format!("MISSING.{}", segments.join("."));
		prop_assert_eq!(lookup_by_path(&data, &path), None);
		prop_assert_eq!(get_by_path(&data, &path), FormValue::empty());
	}
}

// ============================================================================
// Scenarios
// ============================================================================

#[rstest]
fn test_set_into_empty_mapping() {
	let written = set_by_path(&FormData::new(), "a.b.c", FormValue::from(5));
	assert_eq!(written.to_json(), json!({ "a": { "b": { "c": 5 } } }));
}

#[rstest]
fn test_write_through_existing_sequence() {
	let source = FormData::try_from(json!({ "rows": [{ "qty": 1 }, { "qty": 2 }] })).unwrap();

	let written = set_by_path(&source, "rows.3.qty", FormValue::from(9));

	assert_eq!(
		written.to_json(),
		json!({ "rows": [{ "qty": 1 }, { "qty": 2 }, null, { "qty": 9 }] })
	);
	let (Some(FormValue::Array(before)), Some(FormValue::Array(after))) =
		(source.get("rows"), written.get("rows"))
	else {
		panic!("rows should stay a sequence");
	};
	let (FormValue::Object(first_before), FormValue::Object(first_after)) = (&before[0], &after[0])
	else {
		panic!("rows should hold mappings");
	};
	assert!(first_before.ptr_eq(first_after));
}

#[rstest]
#[case("rows.18446744073709551615")]
#[case("rows.4000000000000000")]
fn test_out_of_range_index_is_written_as_key(#[case] path: &str) {
	let source = FormData::try_from(json!({ "rows": ["a"] })).unwrap();

	let written = set_by_path(&source, path, FormValue::from("x"));

	assert_eq!(get_by_path(&written, path), FormValue::from("x"));
	assert_eq!(get_by_path(&written, "rows.0"), FormValue::from("a"));
	assert_eq!(source.to_json(), json!({ "rows": ["a"] }));
}

#[rstest]
#[case(json!(0))]
#[case(json!(false))]
#[case(json!(""))]
fn test_falsy_values_round_trip(#[case] value: serde_json::Value) {
	let written = set_by_path(&FormData::new(), "form.field", FormValue::from(value.clone()));
	assert_eq!(get_by_path(&written, "form.field"), FormValue::from(value));
}
