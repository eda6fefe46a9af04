use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pblite::json::from_json;
use crate::pblite::{EnumDescriptor, EnumValue, FieldDescriptor, FieldKind, Label, MessageDescriptor, Result, ScalarType, SchemaError, Value};

/// JSON schema document: enum and message type declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDoc {
	/// Enum type declarations.
	#[serde(default)]
	pub enums: Vec<EnumDoc>,
	/// Message type declarations.
	#[serde(default)]
	pub messages: Vec<MessageDoc>,
}

/// Enum type declaration in a schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDoc {
	/// Fully qualified type name.
	pub name: String,
	/// Declared values; the first one is the implicit default.
	pub values: Vec<EnumValueDoc>,
}

/// One enum value in a schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValueDoc {
	/// Value name.
	pub name: String,
	/// Wire number.
	pub number: i32,
}

/// Message type declaration in a schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDoc {
	/// Fully qualified type name.
	pub name: String,
	/// Field declarations.
	#[serde(default)]
	pub fields: Vec<FieldDoc>,
}

/// Field declaration in a schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDoc {
	/// Field name.
	pub name: String,
	/// Field number.
	pub number: u32,
	/// Cardinality; `optional` when omitted.
	#[serde(default)]
	pub label: Label,
	/// Declared field type.
	#[serde(rename = "type")]
	pub ty: FieldType,
	/// Referenced enum or message type for `enum`, `message`, and `group`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub type_name: Option<String>,
	/// Declared default for singular scalar fields. Enum defaults may name a value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<serde_json::Value>,
}

/// Field type keyword in a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	/// `double`.
	Double,
	/// `float`.
	Float,
	/// `int32`.
	Int32,
	/// `int64`.
	Int64,
	/// `uint32`.
	UInt32,
	/// `uint64`.
	UInt64,
	/// `sint32`.
	SInt32,
	/// `sint64`.
	SInt64,
	/// `fixed32`.
	Fixed32,
	/// `fixed64`.
	Fixed64,
	/// `sfixed32`.
	SFixed32,
	/// `sfixed64`.
	SFixed64,
	/// `bool`.
	Bool,
	/// `string`.
	String,
	/// `bytes`.
	Bytes,
	/// `enum`.
	Enum,
	/// `message`.
	Message,
	/// `group`.
	Group,
}

impl FieldType {
	fn scalar(self) -> Option<ScalarType> {
		Some(match self {
			Self::Double => ScalarType::Double,
			Self::Float => ScalarType::Float,
			Self::Int32 => ScalarType::Int32,
			Self::Int64 => ScalarType::Int64,
			Self::UInt32 => ScalarType::UInt32,
			Self::UInt64 => ScalarType::UInt64,
			Self::SInt32 => ScalarType::SInt32,
			Self::SInt64 => ScalarType::SInt64,
			Self::Fixed32 => ScalarType::Fixed32,
			Self::Fixed64 => ScalarType::Fixed64,
			Self::SFixed32 => ScalarType::SFixed32,
			Self::SFixed64 => ScalarType::SFixed64,
			Self::String => ScalarType::String,
			Self::Bytes => ScalarType::Bytes,
			Self::Bool | Self::Enum | Self::Message | Self::Group => return None,
		})
	}
}

/// Resolved and validated set of message and enum types.
#[derive(Debug)]
pub struct Schema {
	/// Message types in document order.
	pub messages: Vec<MessageDescriptor>,
	/// Enum types in document order.
	pub enums: Vec<Arc<EnumDescriptor>>,
	message_for_name: HashMap<Box<str>, u32>,
	enum_for_name: HashMap<Box<str>, u32>,
}

impl Schema {
	/// Parse and validate a JSON schema document.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let doc: SchemaDoc = serde_json::from_slice(bytes)?;
		Ok(Self::from_doc(doc)?)
	}

	/// Validate a schema document and resolve type references.
	pub fn from_doc(doc: SchemaDoc) -> std::result::Result<Self, SchemaError> {
		let mut names = HashSet::new();

		let mut enums = Vec::with_capacity(doc.enums.len());
		let mut enum_for_name = HashMap::with_capacity(doc.enums.len());
		for item in doc.enums {
			if !names.insert(item.name.clone()) {
				return Err(SchemaError::DuplicateType { name: item.name });
			}
			if item.values.is_empty() {
				return Err(SchemaError::EmptyEnum { name: item.name });
			}
			enum_for_name.insert(item.name.clone().into_boxed_str(), enums.len() as u32);
			enums.push(Arc::new(EnumDescriptor {
				name: item.name.into_boxed_str(),
				values: item
					.values
					.into_iter()
					.map(|value| EnumValue {
						name: value.name.into_boxed_str(),
						number: value.number,
					})
					.collect(),
			}));
		}

		let mut message_for_name = HashMap::with_capacity(doc.messages.len());
		for (idx, item) in doc.messages.iter().enumerate() {
			if !names.insert(item.name.clone()) {
				return Err(SchemaError::DuplicateType { name: item.name.clone() });
			}
			message_for_name.insert(item.name.clone().into_boxed_str(), idx as u32);
		}

		let mut messages = Vec::with_capacity(doc.messages.len());
		for item in &doc.messages {
			messages.push(resolve_message(item, &enums, &enum_for_name, &message_for_name)?);
		}

		let schema = Self {
			messages,
			enums,
			message_for_name,
			enum_for_name,
		};
		schema.check_singular_cycles()?;

		log::debug!("schema loaded: {} message types, {} enum types", schema.messages.len(), schema.enums.len());
		Ok(schema)
	}

	/// Look up a message type by fully qualified name.
	pub fn message(&self, name: &str) -> Option<&MessageDescriptor> {
		self.message_index(name).and_then(|idx| self.message_by_index(idx))
	}

	/// Look up a message type's index by fully qualified name.
	pub fn message_index(&self, name: &str) -> Option<u32> {
		self.message_for_name.get(name).copied()
	}

	/// Look up a message type by index.
	pub fn message_by_index(&self, idx: u32) -> Option<&MessageDescriptor> {
		self.messages.get(idx as usize)
	}

	/// Look up an enum type by fully qualified name.
	pub fn enum_type(&self, name: &str) -> Option<&Arc<EnumDescriptor>> {
		self.enum_for_name.get(name).and_then(|idx| self.enums.get(*idx as usize))
	}

	/// Iterate declared message type names in document order.
	pub fn message_names(&self) -> impl Iterator<Item = &str> {
		self.messages.iter().map(|item| &*item.name)
	}

	fn check_singular_cycles(&self) -> std::result::Result<(), SchemaError> {
		// 0 = unvisited, 1 = on stack, 2 = done
		let mut state = vec![0_u8; self.messages.len()];
		for start in 0..self.messages.len() {
			if state[start] != 0 {
				continue;
			}
			let mut stack = vec![(start, 0_usize)];
			state[start] = 1;
			while let Some((idx, next_field)) = stack.pop() {
				let fields = &self.messages[idx].fields;
				let Some(field) = fields.get(next_field) else {
					state[idx] = 2;
					continue;
				};
				stack.push((idx, next_field + 1));

				if field.is_repeated() {
					continue;
				}
				let Some(target) = singular_target(field).and_then(|name| self.message_index(name)) else {
					continue;
				};
				match state[target as usize] {
					0 => {
						state[target as usize] = 1;
						stack.push((target as usize, 0));
					}
					1 => {
						return Err(SchemaError::SingularCycle {
							type_name: self.messages[target as usize].name.to_string(),
						});
					}
					_ => {}
				}
			}
		}
		Ok(())
	}
}

fn singular_target(field: &FieldDescriptor) -> Option<&str> {
	match &field.kind {
		FieldKind::Message(name) | FieldKind::Group(name) => Some(name),
		_ => None,
	}
}

/// Largest legal field number (2^29 - 1).
const MAX_FIELD_NUMBER: u32 = 536_870_911;

fn resolve_message(
	item: &MessageDoc,
	enums: &[Arc<EnumDescriptor>],
	enum_for_name: &HashMap<Box<str>, u32>,
	message_for_name: &HashMap<Box<str>, u32>,
) -> std::result::Result<MessageDescriptor, SchemaError> {
	let mut numbers = HashSet::with_capacity(item.fields.len());
	let mut field_names = HashSet::with_capacity(item.fields.len());
	let mut fields = Vec::with_capacity(item.fields.len());

	for doc in &item.fields {
		if doc.number == 0 || doc.number > MAX_FIELD_NUMBER {
			return Err(SchemaError::InvalidFieldNumber {
				type_name: item.name.clone(),
				field: doc.name.clone(),
				number: doc.number,
			});
		}
		if !numbers.insert(doc.number) {
			return Err(SchemaError::DuplicateFieldNumber {
				type_name: item.name.clone(),
				number: doc.number,
			});
		}
		if !field_names.insert(doc.name.as_str()) {
			return Err(SchemaError::DuplicateFieldName {
				type_name: item.name.clone(),
				field: doc.name.clone(),
			});
		}

		let unknown = |expected: &'static str| SchemaError::UnknownType {
			type_name: item.name.clone(),
			field: doc.name.clone(),
			expected,
			target: doc.type_name.clone(),
		};

		let kind = match doc.ty {
			FieldType::Bool => FieldKind::Bool,
			FieldType::Enum => {
				let idx = doc.type_name.as_deref().and_then(|name| enum_for_name.get(name)).ok_or_else(|| unknown("enum"))?;
				FieldKind::Enum(Arc::clone(&enums[*idx as usize]))
			}
			FieldType::Message | FieldType::Group => {
				let name = doc
					.type_name
					.as_deref()
					.filter(|name| message_for_name.contains_key(*name))
					.ok_or_else(|| unknown("message"))?;
				if doc.ty == FieldType::Group {
					FieldKind::Group(name.into())
				} else {
					FieldKind::Message(name.into())
				}
			}
			other => FieldKind::Scalar(other.scalar().ok_or_else(|| unknown("scalar"))?),
		};

		let default = match &doc.default {
			Some(raw) => Some(resolve_default(doc, &kind, raw).map_err(|reason| SchemaError::InvalidDefault {
				type_name: item.name.clone(),
				field: doc.name.clone(),
				reason,
			})?),
			None => None,
		};

		fields.push(FieldDescriptor {
			name: doc.name.as_str().into(),
			number: doc.number,
			label: doc.label,
			kind,
			default,
		});
	}

	Ok(MessageDescriptor {
		name: item.name.as_str().into(),
		fields,
	})
}

fn resolve_default(doc: &FieldDoc, kind: &FieldKind, raw: &serde_json::Value) -> std::result::Result<Value, String> {
	if doc.label == Label::Repeated {
		return Err("repeated fields cannot declare a default".to_owned());
	}
	match kind {
		FieldKind::Bool => match raw {
			serde_json::Value::Bool(item) => Ok(Value::Bool(*item)),
			other => Err(format!("expected true or false, got {other}")),
		},
		FieldKind::Enum(item) => {
			let number = match raw {
				serde_json::Value::String(name) => item.value_by_name(name).map(|value| i64::from(value.number)),
				serde_json::Value::Number(number) => number.as_i64().filter(|number| item.contains(*number)),
				_ => None,
			};
			number.map(Value::Int).ok_or_else(|| format!("{raw} is not a value of {}", item.name))
		}
		FieldKind::Message(_) | FieldKind::Group(_) => Err("message fields cannot declare a default".to_owned()),
		FieldKind::Scalar(ty) => {
			let value = from_json(raw).map_err(|err| err.to_string())?;
			ty.coerce(doc.number, value).map_err(|err| err.to_string())
		}
	}
}
