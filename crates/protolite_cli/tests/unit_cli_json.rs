#![allow(missing_docs)]

use std::process::{Command, Output};

use protolite_testkit::{fixture_json, fixture_path, scratch_path};
use serde_json::{Value, json};

#[test]
fn schema_json_lists_message_types() {
	let json = run_json(&["schema", &fixture("all_types.schema.json"), "--json"]);

	let messages = json["messages"].as_array().expect("messages array");
	assert_eq!(messages.len(), 4);
	assert_eq!(messages[0]["name"], "TestAllTypes");
	assert_eq!(messages[0]["fields"], 36);
	assert_eq!(messages[0]["array_len"], 50);
	assert_eq!(json["enums"], json!(["TestAllTypes.NestedEnum"]));
}

#[test]
fn schema_json_describes_one_message() {
	let json = run_json(&["schema", &fixture("all_types.schema.json"), "--message", "TestAllTypes", "--json"]);

	assert_eq!(json["name"], "TestAllTypes");
	let fields = json["fields"].as_array().expect("fields array");
	let bytes = fields.iter().find(|field| field["number"] == 15).expect("bytes field");
	assert_eq!(bytes["type"], "bytes");
	assert_eq!(bytes["default"], "moo");
	let group = fields.iter().find(|field| field["number"] == 46).expect("repeated group field");
	assert_eq!(group["label"], "repeated");
	assert_eq!(group["type_name"], "TestAllTypes.RepeatedGroup");
}

#[test]
fn defaults_match_reference_array() {
	let json = run_json(&["defaults", &fixture("all_types.schema.json"), "--message", "TestAllTypes"]);
	assert_eq!(json, fixture_json("all_types.defaults.json"));
}

#[test]
fn defaults_use_custom_filler() {
	let json = run_json(&["defaults", &fixture("all_types.schema.json"), "--message", "TestAllTypes.NestedMessage", "--filler", "\"_\""]);
	assert_eq!(json, json!(["_", 0]));
}

#[test]
fn normalize_reproduces_dense_fixture() {
	let json = run_json(&[
		"normalize",
		&fixture("all_types.schema.json"),
		&fixture("all_types.populated.json"),
		"--message",
		"TestAllTypes",
	]);
	assert_eq!(json, fixture_json("all_types.populated.json"));
}

#[test]
fn decode_json_is_keyed_by_field_name() {
	let json = run_json(&[
		"decode",
		&fixture("all_types.schema.json"),
		&fixture("all_types.populated.json"),
		"--message",
		"TestAllTypes",
		"--json",
	]);

	assert_eq!(json["optional_int32"], 101);
	assert_eq!(json["optional_bool"], true);
	assert_eq!(json["optionalgroup"], json!({"a": 111}));
	assert_eq!(json["repeated_bool"], json!([true, false, true]));
	assert_eq!(json["repeated_nested_message"], json!([{"b": 301}, {"b": 302}]));
	assert_eq!(json["repeated_nested_enum"], json!([2, 1]));
}

#[test]
fn zstd_compressed_data_is_accepted() {
	let raw = std::fs::read(fixture_path("all_types.populated.json")).expect("fixture reads");
	let compressed = zstd::encode_all(raw.as_slice(), 3).expect("fixture compresses");
	let path = scratch_path("all_types.populated.json.zst");
	std::fs::write(&path, compressed).expect("compressed fixture writes");

	let json = run_json(&[
		"normalize",
		&fixture("all_types.schema.json"),
		&path.display().to_string(),
		"--message",
		"TestAllTypes",
	]);
	assert_eq!(json, fixture_json("all_types.populated.json"));
}

#[test]
fn illegal_enum_fails_with_error_line() {
	let output = run(&[
		"decode",
		&fixture("all_types.schema.json"),
		&fixture("bad_enum.json"),
		"--message",
		"TestAllTypes",
	]);

	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.starts_with("error: "), "{stderr}");
	assert!(stderr.contains("TestAllTypes"), "{stderr}");
	assert!(stderr.contains("21"), "{stderr}");
}

#[test]
fn unknown_message_type_fails() {
	let output = run(&["defaults", &fixture("all_types.schema.json"), "--message", "Missing"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("message type not found: Missing"));
}

fn fixture(name: &str) -> String {
	fixture_path(name).display().to_string()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_protolite")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"command should succeed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
