#![allow(missing_docs)]

use std::sync::Arc;

use protolite::pblite::{DecodeError, DynamicMessage, InputFile, Message, PbLiteError, PbLiteSerializer, Schema, Value, json};
use protolite_testkit::{fixture_json, fixture_path};

fn all_types() -> Arc<Schema> {
	let file = InputFile::open(fixture_path("all_types.schema.json")).expect("schema fixture opens");
	Arc::new(file.schema().expect("schema fixture resolves"))
}

fn populated() -> Vec<Value> {
	InputFile::open(fixture_path("all_types.populated.json"))
		.expect("data fixture opens")
		.pblite_array()
		.expect("data fixture is an array")
}

#[test]
fn default_instance_matches_reference_array() {
	let message = DynamicMessage::new(&all_types(), "TestAllTypes").expect("message creates");
	let array = PbLiteSerializer::new().serialize(&message).expect("serialize succeeds");

	assert_eq!(array.len(), 50);
	assert_eq!(json::array_to_json(&array), fixture_json("all_types.defaults.json"));
}

#[test]
fn populated_fixture_decodes_every_kind() {
	let mut message = DynamicMessage::new(&all_types(), "TestAllTypes").expect("message creates");
	PbLiteSerializer::new().deserialize(&mut message, &populated()).expect("decode succeeds");

	assert_eq!(message.get(1), Ok(Value::Int(101)));
	assert_eq!(message.get(4), Ok(Value::UInt(104)));
	assert_eq!(message.get(10), Ok(Value::Int(-110)));
	assert_eq!(message.get(11), Ok(Value::Float(111.5)));
	assert_eq!(message.get(13), Ok(Value::Bool(true)));
	assert_eq!(message.get(15), Ok(Value::Bytes(b"abcd".to_vec())));
	assert_eq!(message.message(16).expect("group").get(17), Ok(Value::Int(111)));
	assert_eq!(message.message(18).expect("nested").get(1), Ok(Value::Int(112)));
	assert_eq!(message.get(21), Ok(Value::Int(3)));
	assert_eq!(message.repeated(43), Ok(vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]));

	let groups = message.repeated_messages(46).expect("repeated group");
	assert_eq!(groups.iter().map(|item| item.get(47)).collect::<Vec<_>>(), vec![Ok(Value::Int(211)), Ok(Value::Int(212))]);
	assert_eq!(message.repeated(49), Ok(vec![Value::Int(2), Value::Int(1)]));
}

#[test]
fn populated_fixture_round_trips() {
	let schema = all_types();
	let serializer = PbLiteSerializer::new();
	let mut first = DynamicMessage::new(&schema, "TestAllTypes").expect("message creates");
	serializer.deserialize(&mut first, &populated()).expect("decode succeeds");

	let array = serializer.serialize(&first).expect("serialize succeeds");
	assert_eq!(json::array_to_json(&array), fixture_json("all_types.populated.json"));

	let mut second = DynamicMessage::new(&schema, "TestAllTypes").expect("message creates");
	serializer.deserialize(&mut second, &array).expect("decode succeeds");
	assert_eq!(first, second);
}

#[test]
fn illegal_enum_fixture_is_rejected() {
	let data = InputFile::open(fixture_path("bad_enum.json"))
		.expect("data fixture opens")
		.pblite_array()
		.expect("data fixture is an array");
	let mut message = DynamicMessage::new(&all_types(), "TestAllTypes").expect("message creates");

	let err = PbLiteSerializer::new().deserialize(&mut message, &data).expect_err("illegal enum should fail");
	assert!(matches!(err, DecodeError::InvalidEnum { field: 21, ref got, .. } if got == "5"));
}

#[test]
fn repeated_enum_elements_are_checked() {
	let mut data = populated();
	data[49] = Value::List(vec![Value::Int(2), Value::Int(4)]);
	let mut message = DynamicMessage::new(&all_types(), "TestAllTypes").expect("message creates");

	let err = PbLiteSerializer::new().deserialize(&mut message, &data).expect_err("undeclared element should fail");
	assert!(matches!(err, DecodeError::InvalidEnum { field: 49, ref got, .. } if got == "4"));
}

#[test]
fn compressed_schema_loads_like_plain() {
	let raw = std::fs::read(fixture_path("all_types.schema.json")).expect("fixture reads");
	let compressed = zstd::encode_all(raw.as_slice(), 3).expect("fixture compresses");

	let schema = Schema::parse(&compressed);
	assert!(matches!(schema, Err(PbLiteError::Json(_))), "parse expects decompressed bytes");

	let path = protolite_testkit::scratch_path("all_types.schema.json.zst");
	std::fs::write(&path, compressed).expect("compressed fixture writes");
	let file = InputFile::open(&path).expect("compressed fixture opens");
	assert_eq!(file.compression.as_str(), "zstd");
	assert_eq!(file.schema().expect("schema resolves").messages.len(), 4);
}
