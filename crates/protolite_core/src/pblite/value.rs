use std::fmt;

/// One PB-Lite array slot, or one value held by message storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Absent value, and the default filler.
	#[default]
	Null,
	/// Boolean; serialized as `0`/`1`.
	Bool(bool),
	/// Signed integer, also enum numbers.
	Int(i64),
	/// Unsigned integer.
	UInt(u64),
	/// `float` and `double` values.
	Float(f64),
	/// UTF-8 text.
	String(Box<str>),
	/// Raw bytes.
	Bytes(Vec<u8>),
	/// Nested array for messages, or the elements of a repeated field.
	List(Vec<Value>),
}

impl Value {
	/// Stable lowercase label for the value's kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::UInt(_) => "uint",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::Bytes(_) => "bytes",
			Self::List(_) => "list",
		}
	}

	/// Return the value as an `i64` when it is a whole number that fits.
	///
	/// Floats qualify only when finite and without fractional part. Booleans do
	/// not qualify.
	pub fn as_integral(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			Self::UInt(value) => i64::try_from(*value).ok(),
			Self::Float(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.223_372_036_854_776e18 => Some(*value as i64),
			_ => None,
		}
	}

	/// Return list elements if this is a list.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Whether this is `Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(value) => write!(f, "{value}"),
			Self::Int(value) => write!(f, "{value}"),
			Self::UInt(value) => write!(f, "{value}"),
			Self::Float(value) => write!(f, "{value:?}"),
			Self::String(value) => write!(f, "{value:?}"),
			Self::Bytes(value) => write!(f, "bytes[{}]", value.len()),
			Self::List(items) => write!(f, "list[{}]", items.len()),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Self::UInt(u64::from(value))
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::UInt(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into_boxed_str())
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::List(items)
	}
}

#[cfg(test)]
mod tests {
	use crate::pblite::Value;

	#[test]
	fn integral_accepts_whole_floats_only() {
		assert_eq!(Value::Float(3.0).as_integral(), Some(3));
		assert_eq!(Value::Float(3.5).as_integral(), None);
		assert_eq!(Value::Float(f64::NAN).as_integral(), None);
		assert_eq!(Value::UInt(u64::MAX).as_integral(), None);
		assert_eq!(Value::Bool(true).as_integral(), None);
	}

	#[test]
	fn display_renders_compact_labels() {
		assert_eq!(Value::from("a").to_string(), "\"a\"");
		assert_eq!(Value::Float(1.0).to_string(), "1.0");
		assert_eq!(Value::List(vec![Value::Null; 3]).to_string(), "list[3]");
	}
}
