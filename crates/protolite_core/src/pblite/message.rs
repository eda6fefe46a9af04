use crate::pblite::{MessageDescriptor, StorageError, Value};

/// Storage contract the engine reads from and writes into.
///
/// Fields are addressed by number. Accessors return
/// [`StorageError::UnknownField`] for undeclared numbers and
/// [`StorageError::WrongShape`] when the accessor does not fit the field's
/// label or kind. The engine never allocates a top-level message; nested
/// instances are always obtained through [`Message::message_mut`] and
/// [`Message::add_message`].
pub trait Message {
	/// Field declarations of this message's type.
	fn descriptor(&self) -> &MessageDescriptor;

	/// Reset every field to unset.
	fn clear(&mut self);

	/// Singular scalar value, or the field's default when unset.
	fn get(&self, number: u32) -> Result<Value, StorageError>;

	/// Assign a singular scalar field.
	fn set(&mut self, number: u32, value: Value) -> Result<(), StorageError>;

	/// Elements of a repeated scalar field in storage order.
	fn repeated(&self, number: u32) -> Result<Vec<Value>, StorageError>;

	/// Append to a repeated scalar field.
	fn push(&mut self, number: u32, value: Value) -> Result<(), StorageError>;

	/// Singular nested message; a default instance when unset.
	fn message(&self, number: u32) -> Result<&dyn Message, StorageError>;

	/// Singular nested message, created if absent and marked present.
	fn message_mut(&mut self, number: u32) -> Result<&mut dyn Message, StorageError>;

	/// Elements of a repeated message or group field in storage order.
	fn repeated_messages(&self, number: u32) -> Result<Vec<&dyn Message>, StorageError>;

	/// Append a new default element to a repeated message or group field.
	fn add_message(&mut self, number: u32) -> Result<&mut dyn Message, StorageError>;

	/// Fully qualified type name.
	fn type_name(&self) -> &str {
		&self.descriptor().name
	}
}
