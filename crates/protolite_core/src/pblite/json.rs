//! JSON carriage for PB-Lite arrays.
//!
//! The engine only produces and consumes in-memory [`Value`] arrays; these
//! helpers move them to and from `serde_json` documents.

use serde_json::{Map, Number};

use crate::pblite::{FieldKind, Message, PbLiteError, Result, SchemaError, StorageError, Value};

/// Convert one slot value to JSON.
///
/// Bytes become a string when they are valid UTF-8 and a list of byte numbers
/// otherwise. Non-finite floats become `null`.
pub fn to_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Null => serde_json::Value::Null,
		Value::Bool(item) => serde_json::Value::Bool(*item),
		Value::Int(item) => serde_json::Value::Number(Number::from(*item)),
		Value::UInt(item) => serde_json::Value::Number(Number::from(*item)),
		Value::Float(item) => Number::from_f64(*item).map_or(serde_json::Value::Null, serde_json::Value::Number),
		Value::String(item) => serde_json::Value::String(item.to_string()),
		Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
			Ok(text) => serde_json::Value::String(text.to_owned()),
			Err(_) => serde_json::Value::Array(bytes.iter().map(|byte| serde_json::Value::from(*byte)).collect()),
		},
		Value::List(items) => array_to_json(items),
	}
}

/// Convert a whole array to a JSON array.
pub fn array_to_json(items: &[Value]) -> serde_json::Value {
	serde_json::Value::Array(items.iter().map(to_json).collect())
}

/// Convert one JSON value to a slot value.
///
/// Integers prefer `Int`, falling back to `UInt` above `i64::MAX`. Objects
/// have no slot form and are rejected.
pub fn from_json(json: &serde_json::Value) -> Result<Value> {
	Ok(match json {
		serde_json::Value::Null => Value::Null,
		serde_json::Value::Bool(item) => Value::Bool(*item),
		serde_json::Value::Number(number) => number_value(number),
		serde_json::Value::String(item) => Value::String(item.as_str().into()),
		serde_json::Value::Array(items) => Value::List(items.iter().map(from_json).collect::<Result<Vec<_>>>()?),
		serde_json::Value::Object(_) => return Err(PbLiteError::UnsupportedJson { kind: "object" }),
	})
}

/// Parse JSON text whose top level must be an array.
pub fn parse_array(bytes: &[u8]) -> Result<Vec<Value>> {
	let json: serde_json::Value = serde_json::from_slice(bytes)?;
	array_from_json(&json)
}

/// Convert a JSON document whose top level must be an array.
pub fn array_from_json(json: &serde_json::Value) -> Result<Vec<Value>> {
	match json {
		serde_json::Value::Array(items) => items.iter().map(from_json).collect(),
		other => Err(PbLiteError::NotAnArray { kind: json_kind(other) }),
	}
}

/// Stable lowercase label for a JSON value's kind.
pub fn json_kind(json: &serde_json::Value) -> &'static str {
	match json {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "bool",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}

/// Build a JSON object from `(key, value)` pairs, keeping insertion order.
pub fn object<'a>(entries: impl IntoIterator<Item = (&'a str, serde_json::Value)>) -> serde_json::Value {
	let mut map = Map::new();
	for (key, value) in entries {
		map.insert(key.to_owned(), value);
	}
	serde_json::Value::Object(map)
}

/// Render a message as a JSON object keyed by field name.
///
/// Fields appear in declaration order with their effective values, so unset
/// fields show defaults. Nested messages become objects, enums stay numeric.
pub fn message_to_json(message: &dyn Message) -> std::result::Result<serde_json::Value, SchemaError> {
	let storage = |source: StorageError| SchemaError::Storage {
		type_name: message.type_name().to_owned(),
		source,
	};

	let mut entries = Vec::with_capacity(message.descriptor().fields.len());
	for field in &message.descriptor().fields {
		let number = field.number;
		let value = match (&field.kind, field.is_repeated()) {
			(FieldKind::Message(_) | FieldKind::Group(_), true) => serde_json::Value::Array(
				message
					.repeated_messages(number)
					.map_err(storage)?
					.into_iter()
					.map(message_to_json)
					.collect::<std::result::Result<Vec<_>, _>>()?,
			),
			(FieldKind::Message(_) | FieldKind::Group(_), false) => message_to_json(message.message(number).map_err(storage)?)?,
			(_, true) => array_to_json(&message.repeated(number).map_err(storage)?),
			(_, false) => to_json(&message.get(number).map_err(storage)?),
		};
		entries.push((&*field.name, value));
	}
	Ok(object(entries))
}

fn number_value(number: &Number) -> Value {
	if let Some(item) = number.as_i64() {
		Value::Int(item)
	} else if let Some(item) = number.as_u64() {
		Value::UInt(item)
	} else {
		Value::Float(number.as_f64().unwrap_or(f64::NAN))
	}
}
