use crate::pblite::{FieldDescriptor, FieldKind, Message, SchemaError, StorageError, Value};

/// Converts messages to and from PB-Lite arrays.
///
/// A PB-Lite array stores the value of field `n` at index `n`. Index 0 and every
/// number without a declared field hold the filler value, so the array always
/// has `max_field_number + 1` slots.
#[derive(Debug, Clone, Default)]
pub struct PbLiteSerializer {
	filler: Value,
}

impl PbLiteSerializer {
	/// Serializer using `null` for unpopulated slots.
	pub fn new() -> Self {
		Self::default()
	}

	/// Serializer using `filler` for unpopulated slots.
	pub fn with_filler(filler: Value) -> Self {
		Self { filler }
	}

	/// Value placed in unpopulated slots.
	pub fn filler(&self) -> &Value {
		&self.filler
	}

	/// Serialize `message` into a dense PB-Lite array.
	///
	/// Bools become `0`/`1`, messages and groups become nested arrays, and
	/// repeated fields become lists (possibly empty).
	pub fn serialize(&self, message: &dyn Message) -> Result<Vec<Value>, SchemaError> {
		let descriptor = message.descriptor();
		let max = descriptor.max_field_number().ok_or_else(|| SchemaError::NoFields {
			type_name: descriptor.name.to_string(),
		})?;

		let mut out = vec![self.filler.clone(); max as usize + 1];
		for field in &descriptor.fields {
			out[field.number as usize] = self.serialize_field(message, field)?;
		}

		log::trace!("serialized {} into {} slots", descriptor.name, out.len());
		Ok(out)
	}

	fn serialize_field(&self, message: &dyn Message, field: &FieldDescriptor) -> Result<Value, SchemaError> {
		let number = field.number;
		let storage = |source: StorageError| SchemaError::Storage {
			type_name: message.type_name().to_owned(),
			source,
		};

		Ok(match (&field.kind, field.is_repeated()) {
			(FieldKind::Message(_) | FieldKind::Group(_), true) => {
				let children = message.repeated_messages(number).map_err(storage)?;
				let mut items = Vec::with_capacity(children.len());
				for child in children {
					items.push(Value::List(self.serialize(child)?));
				}
				Value::List(items)
			}
			(FieldKind::Message(_) | FieldKind::Group(_), false) => Value::List(self.serialize(message.message(number).map_err(storage)?)?),
			(kind, true) => Value::List(
				message
					.repeated(number)
					.map_err(storage)?
					.into_iter()
					.map(|item| serialize_scalar(kind, item))
					.collect(),
			),
			(kind, false) => serialize_scalar(kind, message.get(number).map_err(storage)?),
		})
	}
}

fn serialize_scalar(kind: &FieldKind, value: Value) -> Value {
	match (kind, value) {
		(FieldKind::Bool, Value::Bool(item)) => Value::Int(i64::from(item)),
		(FieldKind::Bool, other) => Value::Int(i64::from(is_truthy(&other))),
		(_, other) => other,
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(item) => *item,
		Value::Int(item) => *item != 0,
		Value::UInt(item) => *item != 0,
		Value::Float(item) => *item != 0.0,
		Value::String(item) => !item.is_empty(),
		Value::Bytes(item) => !item.is_empty(),
		Value::List(item) => !item.is_empty(),
	}
}
