use crate::pblite::{DecodeError, FieldDescriptor, FieldKind, Message, PbLiteSerializer, Value};

impl PbLiteSerializer {
	/// Replace the contents of `message` with the fields stored in `data`.
	///
	/// The message is cleared first, then every declared field is read from
	/// `data[number]`; slot 0 and slots past the highest declared number are
	/// ignored. Every other slot must hold a value of the field's kind, `null`
	/// included. Any failure aborts immediately and leaves the message partially
	/// populated.
	pub fn deserialize(&self, message: &mut dyn Message, data: &[Value]) -> Result<(), DecodeError> {
		message.clear();
		let result = deserialize_message(message, data);
		if let Err(err) = &result {
			log::debug!("pblite decode failed: {err}");
		}
		result
	}
}

fn deserialize_message(message: &mut dyn Message, data: &[Value]) -> Result<(), DecodeError> {
	// Descriptor borrows the message; copy out what the field walk needs.
	let type_name = message.type_name().to_owned();
	let fields = message.descriptor().fields.clone();

	for field in &fields {
		let slot = data.get(field.number as usize).ok_or_else(|| DecodeError::MissingIndex {
			type_name: type_name.clone(),
			field: field.number,
			len: data.len(),
		})?;
		deserialize_field(message, &type_name, field, slot)?;
	}

	Ok(())
}

fn deserialize_field(message: &mut dyn Message, type_name: &str, field: &FieldDescriptor, slot: &Value) -> Result<(), DecodeError> {
	let number = field.number;
	let invalid = |source| DecodeError::InvalidValue {
		type_name: type_name.to_owned(),
		field: number,
		source,
	};

	match (&field.kind, field.is_repeated()) {
		(FieldKind::Message(_) | FieldKind::Group(_), true) => {
			for item in expect_list(type_name, number, slot)? {
				let child = message.add_message(number).map_err(invalid)?;
				deserialize_nested(child, type_name, number, item)?;
			}
		}
		(FieldKind::Message(_) | FieldKind::Group(_), false) => {
			let child = message.message_mut(number).map_err(invalid)?;
			deserialize_nested(child, type_name, number, slot)?;
		}
		(kind, true) => {
			for item in expect_list(type_name, number, slot)? {
				let value = coerce_scalar(kind, type_name, number, item)?;
				message.push(number, value).map_err(invalid)?;
			}
		}
		(kind, false) => {
			let value = coerce_scalar(kind, type_name, number, slot)?;
			message.set(number, value).map_err(invalid)?;
		}
	}
	Ok(())
}

fn deserialize_nested(child: &mut dyn Message, type_name: &str, number: u32, slot: &Value) -> Result<(), DecodeError> {
	let data = expect_list(type_name, number, slot)?;
	deserialize_message(child, data)
}

fn expect_list<'a>(type_name: &str, number: u32, slot: &'a Value) -> Result<&'a [Value], DecodeError> {
	slot.as_list().ok_or_else(|| DecodeError::NotIterable {
		type_name: type_name.to_owned(),
		field: number,
		got: slot.kind(),
	})
}

/// Validate one raw slot value for a non-message field.
///
/// Bools accept only 0 and 1 in any numeric or boolean form. Enums accept only
/// declared values, whatever the storage would tolerate. Everything else is
/// handed to storage untouched.
fn coerce_scalar(kind: &FieldKind, type_name: &str, number: u32, raw: &Value) -> Result<Value, DecodeError> {
	match kind {
		FieldKind::Bool => match raw {
			Value::Bool(item) => Ok(Value::Bool(*item)),
			Value::Int(0) | Value::UInt(0) => Ok(Value::Bool(false)),
			Value::Int(1) | Value::UInt(1) => Ok(Value::Bool(true)),
			Value::Float(item) if *item == 0.0 => Ok(Value::Bool(false)),
			Value::Float(item) if *item == 1.0 => Ok(Value::Bool(true)),
			other => Err(DecodeError::InvalidBool {
				type_name: type_name.to_owned(),
				field: number,
				got: other.to_string(),
			}),
		},
		FieldKind::Enum(item) => match raw.as_integral() {
			Some(value) if item.contains(value) => Ok(Value::Int(value)),
			_ => Err(DecodeError::InvalidEnum {
				type_name: type_name.to_owned(),
				field: number,
				got: raw.to_string(),
			}),
		},
		FieldKind::Message(_) | FieldKind::Group(_) | FieldKind::Scalar(_) => Ok(raw.clone()),
	}
}
