use std::fmt;
use std::sync::Arc;

use crate::pblite::{FieldDescriptor, FieldKind, Message, MessageDescriptor, PbLiteError, Result, Schema, StorageError, Value};

/// Message instance whose layout comes from a [`Schema`] at runtime.
///
/// Singular message and group fields always hold an instance (a default one
/// until touched) plus a presence flag, so reads never allocate. Enum fields
/// accept any `i32` without checking it against the enum's values.
#[derive(Clone)]
pub struct DynamicMessage {
	schema: Arc<Schema>,
	type_idx: u32,
	slots: Vec<Slot>,
}

#[derive(Debug, Clone)]
enum Slot {
	Scalar(Option<Value>),
	Repeated(Vec<Value>),
	Message { present: bool, value: Box<DynamicMessage> },
	RepeatedMessage(Vec<DynamicMessage>),
}

impl DynamicMessage {
	/// Create an empty instance of the named message type.
	pub fn new(schema: &Arc<Schema>, type_name: &str) -> Result<Self> {
		let type_idx = schema
			.message_index(type_name)
			.ok_or_else(|| PbLiteError::MessageNotFound { name: type_name.to_owned() })?;
		Ok(Self::for_index(Arc::clone(schema), type_idx))
	}

	fn for_index(schema: Arc<Schema>, type_idx: u32) -> Self {
		let mut message = Self {
			schema,
			type_idx,
			slots: Vec::new(),
		};
		message.slots = message.empty_slots();
		message
	}

	fn empty_slots(&self) -> Vec<Slot> {
		self.descriptor().fields.iter().map(|field| self.empty_slot(field)).collect()
	}

	fn empty_slot(&self, field: &FieldDescriptor) -> Slot {
		match (&field.kind, field.is_repeated()) {
			(FieldKind::Message(_) | FieldKind::Group(_), true) => Slot::RepeatedMessage(Vec::new()),
			(FieldKind::Message(name) | FieldKind::Group(name), false) => Slot::Message {
				present: false,
				value: Box::new(self.nested(name)),
			},
			(_, true) => Slot::Repeated(Vec::new()),
			(_, false) => Slot::Scalar(None),
		}
	}

	fn nested(&self, type_name: &str) -> Self {
		// Schema resolution guarantees every referenced type exists.
		let type_idx = self.schema.message_index(type_name).unwrap_or(self.type_idx);
		Self::for_index(Arc::clone(&self.schema), type_idx)
	}

	/// Schema this instance was created from.
	pub fn schema(&self) -> &Arc<Schema> {
		&self.schema
	}

	/// Whether a field holds data.
	///
	/// Singular fields report whether they were set; repeated fields report
	/// whether they are non-empty. Unknown numbers report `false`.
	pub fn has(&self, number: u32) -> bool {
		let Ok((idx, _)) = self.field_slot(number) else {
			return false;
		};
		match &self.slots[idx] {
			Slot::Scalar(value) => value.is_some(),
			Slot::Repeated(items) => !items.is_empty(),
			Slot::Message { present, .. } => *present,
			Slot::RepeatedMessage(items) => !items.is_empty(),
		}
	}

	fn field_slot(&self, number: u32) -> std::result::Result<(usize, &FieldDescriptor), StorageError> {
		self.descriptor()
			.fields
			.iter()
			.enumerate()
			.find(|(_, field)| field.number == number)
			.ok_or(StorageError::UnknownField { number })
	}

	fn coerce(field: &FieldDescriptor, value: Value) -> std::result::Result<Value, StorageError> {
		let number = field.number;
		match &field.kind {
			FieldKind::Bool => match value {
				Value::Bool(item) => Ok(Value::Bool(item)),
				other => Err(StorageError::TypeMismatch {
					number,
					expected: "a bool",
					got: other.kind(),
				}),
			},
			FieldKind::Enum(_) => {
				let raw = value.as_integral().ok_or(StorageError::TypeMismatch {
					number,
					expected: "an enum number",
					got: value.kind(),
				})?;
				i32::try_from(raw).map_err(|_| StorageError::OutOfRange {
					number,
					expected: "enum",
					value: value.to_string(),
				})?;
				Ok(Value::Int(raw))
			}
			FieldKind::Scalar(ty) => ty.coerce(number, value),
			FieldKind::Message(_) | FieldKind::Group(_) => Err(StorageError::WrongShape { number, expected: "scalar" }),
		}
	}

	fn effective(&self, idx: usize) -> Value {
		match &self.slots[idx] {
			Slot::Scalar(Some(value)) => value.clone(),
			_ => self.descriptor().fields[idx].default_value(),
		}
	}
}

impl Message for DynamicMessage {
	fn descriptor(&self) -> &MessageDescriptor {
		&self.schema.messages[self.type_idx as usize]
	}

	fn clear(&mut self) {
		self.slots = self.empty_slots();
	}

	fn get(&self, number: u32) -> std::result::Result<Value, StorageError> {
		let (idx, field) = self.field_slot(number)?;
		match &self.slots[idx] {
			Slot::Scalar(Some(value)) => Ok(value.clone()),
			Slot::Scalar(None) => Ok(field.default_value()),
			_ => Err(StorageError::WrongShape {
				number,
				expected: "singular scalar",
			}),
		}
	}

	fn set(&mut self, number: u32, value: Value) -> std::result::Result<(), StorageError> {
		let (idx, field) = self.field_slot(number)?;
		if !matches!(self.slots[idx], Slot::Scalar(_)) {
			return Err(StorageError::WrongShape {
				number,
				expected: "singular scalar",
			});
		}
		let value = Self::coerce(field, value)?;
		self.slots[idx] = Slot::Scalar(Some(value));
		Ok(())
	}

	fn repeated(&self, number: u32) -> std::result::Result<Vec<Value>, StorageError> {
		let (idx, _) = self.field_slot(number)?;
		match &self.slots[idx] {
			Slot::Repeated(items) => Ok(items.clone()),
			_ => Err(StorageError::WrongShape {
				number,
				expected: "repeated scalar",
			}),
		}
	}

	fn push(&mut self, number: u32, value: Value) -> std::result::Result<(), StorageError> {
		let (idx, field) = self.field_slot(number)?;
		let value = match self.slots[idx] {
			Slot::Repeated(_) => Self::coerce(field, value)?,
			_ => {
				return Err(StorageError::WrongShape {
					number,
					expected: "repeated scalar",
				});
			}
		};
		if let Slot::Repeated(items) = &mut self.slots[idx] {
			items.push(value);
		}
		Ok(())
	}

	fn message(&self, number: u32) -> std::result::Result<&dyn Message, StorageError> {
		let (idx, _) = self.field_slot(number)?;
		match &self.slots[idx] {
			Slot::Message { value, .. } => Ok(&**value),
			_ => Err(StorageError::WrongShape {
				number,
				expected: "singular message",
			}),
		}
	}

	fn message_mut(&mut self, number: u32) -> std::result::Result<&mut dyn Message, StorageError> {
		let (idx, _) = self.field_slot(number)?;
		match &mut self.slots[idx] {
			Slot::Message { present, value } => {
				*present = true;
				Ok(&mut **value)
			}
			_ => Err(StorageError::WrongShape {
				number,
				expected: "singular message",
			}),
		}
	}

	fn repeated_messages(&self, number: u32) -> std::result::Result<Vec<&dyn Message>, StorageError> {
		let (idx, _) = self.field_slot(number)?;
		match &self.slots[idx] {
			Slot::RepeatedMessage(items) => Ok(items.iter().map(|item| item as &dyn Message).collect()),
			_ => Err(StorageError::WrongShape {
				number,
				expected: "repeated message",
			}),
		}
	}

	fn add_message(&mut self, number: u32) -> std::result::Result<&mut dyn Message, StorageError> {
		let (idx, field) = self.field_slot(number)?;
		let element = match (&field.kind, &self.slots[idx]) {
			(FieldKind::Message(name) | FieldKind::Group(name), Slot::RepeatedMessage(_)) => self.nested(name),
			_ => {
				return Err(StorageError::WrongShape {
					number,
					expected: "repeated message",
				});
			}
		};
		match &mut self.slots[idx] {
			Slot::RepeatedMessage(items) => {
				items.push(element);
				let last = items.len() - 1;
				Ok(&mut items[last])
			}
			_ => Err(StorageError::WrongShape {
				number,
				expected: "repeated message",
			}),
		}
	}
}

/// Field-by-field comparison of effective values; presence is ignored.
impl PartialEq for DynamicMessage {
	fn eq(&self, other: &Self) -> bool {
		if self.descriptor().name != other.descriptor().name || self.slots.len() != other.slots.len() {
			return false;
		}
		(0..self.slots.len()).all(|idx| match (&self.slots[idx], &other.slots[idx]) {
			(Slot::Scalar(_), Slot::Scalar(_)) => self.effective(idx) == other.effective(idx),
			(Slot::Repeated(left), Slot::Repeated(right)) => left == right,
			(Slot::Message { value: left, .. }, Slot::Message { value: right, .. }) => left == right,
			(Slot::RepeatedMessage(left), Slot::RepeatedMessage(right)) => left == right,
			_ => false,
		})
	}
}

impl fmt::Debug for DynamicMessage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DynamicMessage")
			.field("type_name", &self.descriptor().name)
			.field("slots", &self.slots)
			.finish()
	}
}
