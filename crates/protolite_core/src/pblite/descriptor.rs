use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pblite::{StorageError, Value};

/// Field declarations of one message type.
#[derive(Debug, Clone)]
pub struct MessageDescriptor {
	/// Fully qualified type name.
	pub name: Box<str>,
	/// Field declarations in source order.
	pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
	/// Highest declared field number, or `None` for a type without fields.
	pub fn max_field_number(&self) -> Option<u32> {
		self.fields.iter().map(|field| field.number).max()
	}

	/// Look up a field declaration by number.
	pub fn field(&self, number: u32) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.number == number)
	}

	/// Look up a field declaration by name.
	pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| &*field.name == name)
	}
}

/// One field declaration.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	/// Field name.
	pub name: Box<str>,
	/// Field number; also the field's PB-Lite array index.
	pub number: u32,
	/// Cardinality label.
	pub label: Label,
	/// Value kind.
	pub kind: FieldKind,
	/// Declared default for singular scalar fields, already coerced.
	pub default: Option<Value>,
}

impl FieldDescriptor {
	/// Whether the field holds an ordered sequence.
	pub fn is_repeated(&self) -> bool {
		self.label == Label::Repeated
	}

	/// Value reported for a singular field that was never set.
	///
	/// Uses the declared default when present, otherwise the kind's zero value.
	/// Message and group fields have no scalar default and return `Null`.
	pub fn default_value(&self) -> Value {
		if let Some(value) = &self.default {
			return value.clone();
		}
		match &self.kind {
			FieldKind::Bool => Value::Bool(false),
			FieldKind::Enum(item) => Value::Int(item.values.first().map_or(0, |value| i64::from(value.number))),
			FieldKind::Scalar(ty) => ty.zero_value(),
			FieldKind::Message(_) | FieldKind::Group(_) => Value::Null,
		}
	}
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
	/// Singular, may be unset.
	#[default]
	Optional,
	/// Singular, expected to be set.
	Required,
	/// Ordered sequence.
	Repeated,
}

impl Label {
	/// Render label as a stable lowercase keyword.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Optional => "optional",
			Self::Required => "required",
			Self::Repeated => "repeated",
		}
	}
}

/// Closed set of field kinds the engine dispatches on.
#[derive(Debug, Clone)]
pub enum FieldKind {
	/// Boolean field.
	Bool,
	/// Enum field with its legal values.
	Enum(Arc<EnumDescriptor>),
	/// Nested message, by fully qualified type name.
	Message(Box<str>),
	/// Nested group, by fully qualified type name.
	Group(Box<str>),
	/// Any other scalar.
	Scalar(ScalarType),
}

impl FieldKind {
	/// Render kind as the schema keyword used for it.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Enum(_) => "enum",
			Self::Message(_) => "message",
			Self::Group(_) => "group",
			Self::Scalar(ty) => ty.as_str(),
		}
	}

	/// Referenced enum or message type name, if any.
	pub fn type_name(&self) -> Option<&str> {
		match self {
			Self::Enum(item) => Some(&item.name),
			Self::Message(name) | Self::Group(name) => Some(name),
			Self::Bool | Self::Scalar(_) => None,
		}
	}
}

/// Enum type declaration.
#[derive(Debug, Clone)]
pub struct EnumDescriptor {
	/// Fully qualified type name.
	pub name: Box<str>,
	/// Declared values in source order.
	pub values: Vec<EnumValue>,
}

impl EnumDescriptor {
	/// Whether `number` is a legal value of this enum.
	pub fn contains(&self, number: i64) -> bool {
		self.values.iter().any(|value| i64::from(value.number) == number)
	}

	/// Look up a declared value by name.
	pub fn value_by_name(&self, name: &str) -> Option<&EnumValue> {
		self.values.iter().find(|value| &*value.name == name)
	}
}

/// One named enum value.
#[derive(Debug, Clone)]
pub struct EnumValue {
	/// Value name.
	pub name: Box<str>,
	/// Wire number.
	pub number: i32,
}

/// Scalar field types other than bool and enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
	/// `double`.
	Double,
	/// `float`, stored rounded through `f32`.
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
	/// `string`.
	String,
	/// `bytes`.
	Bytes,
}

impl ScalarType {
	/// Render type as its schema keyword.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Double => "double",
			Self::Float => "float",
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::UInt32 => "uint32",
			Self::UInt64 => "uint64",
			Self::SInt32 => "sint32",
			Self::SInt64 => "sint64",
			Self::Fixed32 => "fixed32",
			Self::Fixed64 => "fixed64",
			Self::SFixed32 => "sfixed32",
			Self::SFixed64 => "sfixed64",
			Self::String => "string",
			Self::Bytes => "bytes",
		}
	}

	/// Value of a field of this type that was never set and has no default.
	pub fn zero_value(self) -> Value {
		match self {
			Self::Double | Self::Float => Value::Float(0.0),
			Self::Int32 | Self::Int64 | Self::SInt32 | Self::SInt64 | Self::SFixed32 | Self::SFixed64 => Value::Int(0),
			Self::UInt32 | Self::UInt64 | Self::Fixed32 | Self::Fixed64 => Value::UInt(0),
			Self::String => Value::String("".into()),
			Self::Bytes => Value::Bytes(Vec::new()),
		}
	}

	/// Convert `value` into this type's storage form.
	///
	/// Signed integers store as `Int`, unsigned as `UInt`, floating point as
	/// `Float` (rounded through `f32` for `float`), strings as `String`, bytes as
	/// `Bytes`.
	pub fn coerce(self, number: u32, value: Value) -> Result<Value, StorageError> {
		match self {
			Self::Double | Self::Float => {
				let raw = match value {
					Value::Int(item) => item as f64,
					Value::UInt(item) => item as f64,
					Value::Float(item) => item,
					other => return Err(mismatch(number, "a number", &other)),
				};
				if self == Self::Float {
					Ok(Value::Float(f64::from(raw as f32)))
				} else {
					Ok(Value::Float(raw))
				}
			}
			Self::Int32 | Self::SInt32 | Self::SFixed32 => {
				let item = self.integral(number, &value)?;
				i32::try_from(item).map_err(|_| self.out_of_range(number, &value))?;
				Ok(Value::Int(item))
			}
			Self::Int64 | Self::SInt64 | Self::SFixed64 => Ok(Value::Int(self.integral(number, &value)?)),
			Self::UInt32 | Self::Fixed32 => {
				let item = self.unsigned(number, &value)?;
				u32::try_from(item).map_err(|_| self.out_of_range(number, &value))?;
				Ok(Value::UInt(item))
			}
			Self::UInt64 | Self::Fixed64 => Ok(Value::UInt(self.unsigned(number, &value)?)),
			Self::String => match value {
				Value::String(item) => Ok(Value::String(item)),
				Value::Bytes(bytes) => match String::from_utf8(bytes) {
					Ok(text) => Ok(Value::String(text.into_boxed_str())),
					Err(_) => Err(StorageError::TypeMismatch {
						number,
						expected: "utf-8 text",
						got: "bytes",
					}),
				},
				other => Err(mismatch(number, "a string", &other)),
			},
			Self::Bytes => match value {
				Value::Bytes(bytes) => Ok(Value::Bytes(bytes)),
				Value::String(text) => Ok(Value::Bytes(text.into_string().into_bytes())),
				Value::List(items) => {
					let mut out = Vec::with_capacity(items.len());
					for item in &items {
						let byte = item
							.as_integral()
							.and_then(|raw| u8::try_from(raw).ok())
							.ok_or_else(|| self.out_of_range(number, item))?;
						out.push(byte);
					}
					Ok(Value::Bytes(out))
				}
				other => Err(mismatch(number, "bytes", &other)),
			},
		}
	}

	fn integral(self, number: u32, value: &Value) -> Result<i64, StorageError> {
		match value {
			Value::Int(_) | Value::UInt(_) | Value::Float(_) => value.as_integral().ok_or_else(|| self.out_of_range(number, value)),
			other => Err(mismatch(number, "an integer", other)),
		}
	}

	fn unsigned(self, number: u32, value: &Value) -> Result<u64, StorageError> {
		match value {
			Value::UInt(item) => Ok(*item),
			Value::Int(item) => u64::try_from(*item).map_err(|_| self.out_of_range(number, value)),
			Value::Float(item) if item.is_finite() && item.fract() == 0.0 && *item >= 0.0 && *item < 1.844_674_407_370_955_2e19 => Ok(*item as u64),
			Value::Float(_) => Err(self.out_of_range(number, value)),
			other => Err(mismatch(number, "an unsigned integer", other)),
		}
	}

	fn out_of_range(self, number: u32, value: &Value) -> StorageError {
		StorageError::OutOfRange {
			number,
			expected: self.as_str(),
			value: value.to_string(),
		}
	}
}

fn mismatch(number: u32, expected: &'static str, got: &Value) -> StorageError {
	StorageError::TypeMismatch {
		number,
		expected,
		got: got.kind(),
	}
}

#[cfg(test)]
mod tests {
	use crate::pblite::{ScalarType, StorageError, Value};

	#[test]
	fn int32_rejects_out_of_range_and_fractional() {
		assert_eq!(ScalarType::Int32.coerce(1, Value::UInt(7)), Ok(Value::Int(7)));
		assert!(matches!(ScalarType::Int32.coerce(1, Value::Int(1 << 40)), Err(StorageError::OutOfRange { number: 1, .. })));
		assert!(matches!(ScalarType::Int64.coerce(1, Value::Float(0.5)), Err(StorageError::OutOfRange { .. })));
		assert!(matches!(ScalarType::Int64.coerce(1, Value::from("1")), Err(StorageError::TypeMismatch { got: "string", .. })));
	}

	#[test]
	fn unsigned_rejects_negative() {
		assert_eq!(ScalarType::Fixed64.coerce(3, Value::Int(9)), Ok(Value::UInt(9)));
		assert!(matches!(ScalarType::UInt32.coerce(3, Value::Int(-1)), Err(StorageError::OutOfRange { .. })));
		assert!(matches!(ScalarType::UInt32.coerce(3, Value::UInt(u64::from(u32::MAX) + 1)), Err(StorageError::OutOfRange { .. })));
	}

	#[test]
	fn float_rounds_through_f32() {
		assert_eq!(ScalarType::Float.coerce(11, Value::Float(0.1)), Ok(Value::Float(f64::from(0.1_f32))));
		assert_eq!(ScalarType::Double.coerce(12, Value::Int(2)), Ok(Value::Float(2.0)));
	}

	#[test]
	fn bytes_accept_strings_and_byte_lists() {
		assert_eq!(ScalarType::Bytes.coerce(15, Value::from("moo")), Ok(Value::Bytes(b"moo".to_vec())));
		assert_eq!(
			ScalarType::Bytes.coerce(15, Value::List(vec![Value::Int(0), Value::Int(255)])),
			Ok(Value::Bytes(vec![0, 255]))
		);
		assert!(ScalarType::Bytes.coerce(15, Value::List(vec![Value::Int(256)])).is_err());
		assert!(ScalarType::String.coerce(14, Value::Bytes(vec![0xff])).is_err());
	}
}
