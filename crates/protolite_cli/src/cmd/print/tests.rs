use std::sync::Arc;

use protolite::pblite::{DynamicMessage, Message, Schema, Value};
use serde_json::json;

use super::{PrintOptions, render_message, truncate};
use crate::cmd::test_support::{fixture_arg, protolite_stdout};

fn sample() -> DynamicMessage {
	let doc = serde_json::from_value(json!({
		"enums": [{"name": "Mood", "values": [{"name": "CALM", "number": 1}, {"name": "LOUD", "number": 2}]}],
		"messages": [
			{"name": "Outer", "fields": [
				{"name": "id", "number": 1, "type": "int32"},
				{"name": "mood", "number": 2, "type": "enum", "type_name": "Mood"},
				{"name": "tags", "number": 3, "label": "repeated", "type": "string"},
				{"name": "inner", "number": 4, "type": "message", "type_name": "Inner"},
				{"name": "items", "number": 5, "label": "repeated", "type": "message", "type_name": "Inner"},
				{"name": "note", "number": 6, "type": "string"}
			]},
			{"name": "Inner", "fields": [{"name": "value", "number": 1, "type": "uint32"}]}
		]
	}))
	.expect("schema document deserializes");
	let schema = Arc::new(Schema::from_doc(doc).expect("schema resolves"));

	let mut message = DynamicMessage::new(&schema, "Outer").expect("message creates");
	message.set(1, Value::Int(7)).expect("set id");
	message.set(2, Value::Int(2)).expect("set mood");
	for tag in ["a", "b", "c"] {
		message.push(3, Value::from(tag)).expect("push tag");
	}
	message.message_mut(4).expect("inner").set(1, Value::Int(3)).expect("set inner");
	message.add_message(5).expect("append item").set(1, Value::Int(9)).expect("set item");
	message.set(6, Value::from("hello world")).expect("set note");
	message
}

#[test]
fn renders_nested_tree_with_enum_names() {
	let lines = render_message(&sample(), PrintOptions::default()).expect("message renders");
	let expected = [
		"Outer {",
		"  id = 7",
		"  mood = 2 (LOUD)",
		"  tags = [",
		"    \"a\"",
		"    \"b\"",
		"    \"c\"",
		"  ]",
		"  inner =",
		"    Inner {",
		"      value = 3",
		"    }",
		"  items = [",
		"    Inner {",
		"      value = 9",
		"    }",
		"  ]",
		"  note = \"hello world\"",
		"}",
	];
	assert_eq!(lines, expected);
}

#[test]
fn limits_truncate_lists_strings_and_depth() {
	let options = PrintOptions {
		max_fields_per_message: 80,
		max_string_len: 5,
		max_repeated_items: 2,
		max_print_depth: 1,
	};
	let lines = render_message(&sample(), options).expect("message renders");

	assert!(lines.contains(&"    ... 1 more".to_owned()), "{lines:#?}");
	assert!(lines.contains(&"  note = \"hello...\"".to_owned()), "{lines:#?}");
	assert_eq!(lines.iter().filter(|line| line.as_str() == "    Inner { ... }").count(), 2, "{lines:#?}");
}

#[test]
fn field_limit_reports_remainder() {
	let options = PrintOptions {
		max_fields_per_message: 2,
		..PrintOptions::default()
	};
	let lines = render_message(&sample(), options).expect("message renders");
	assert_eq!(lines, ["Outer {", "  id = 7", "  mood = 2 (LOUD)", "  ... 4 more fields", "}"]);
}

#[test]
fn truncate_counts_chars_not_bytes() {
	assert_eq!(truncate("héllo", 5), "héllo");
	assert_eq!(truncate("héllo", 2), "hé...");
}

#[test]
fn decode_command_prints_tree() {
	let stdout = protolite_stdout(&[
		"decode",
		&fixture_arg("all_types.schema.json"),
		&fixture_arg("all_types.populated.json"),
		"--message",
		"TestAllTypes",
	]);

	assert!(stdout.contains("type: TestAllTypes"), "{stdout}");
	assert!(stdout.contains("  optional_nested_enum = 3 (BAZ)"), "{stdout}");
	assert!(stdout.contains("  optional_string = \"test\""), "{stdout}");
	assert!(stdout.contains("      a = 111"), "{stdout}");
}
