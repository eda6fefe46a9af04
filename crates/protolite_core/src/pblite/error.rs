use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, PbLiteError>;

/// Errors produced while loading inputs and converting PB-Lite data.
#[derive(Debug, Error)]
pub enum PbLiteError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON text could not be parsed.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Schema loading or serialization failure.
	#[error(transparent)]
	Schema(#[from] SchemaError),
	/// PB-Lite array could not be applied to a message.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Requested message type is not declared in the schema.
	#[error("message type not found: {name}")]
	MessageNotFound {
		/// Requested fully qualified type name.
		name: String,
	},
	/// JSON value has no PB-Lite slot representation.
	#[error("unsupported json {kind} in pblite array")]
	UnsupportedJson {
		/// JSON kind label.
		kind: &'static str,
	},
	/// Top-level JSON document was not an array.
	#[error("expected a json array at top level, got {kind}")]
	NotAnArray {
		/// JSON kind label.
		kind: &'static str,
	},
}

/// Schema-level failures: unusable message types and invalid schema documents.
#[derive(Debug, Error)]
pub enum SchemaError {
	/// Message type declares no fields, so no array length exists.
	#[error("message type {type_name} declares no fields")]
	NoFields {
		/// Message type name.
		type_name: String,
	},
	/// Message storage rejected access to one of its own declared fields.
	#[error("message type {type_name} storage rejected declared field: {source}")]
	Storage {
		/// Message type name.
		type_name: String,
		/// Storage rejection.
		#[source]
		source: StorageError,
	},
	/// Two message or enum types share one name.
	#[error("duplicate type name {name}")]
	DuplicateType {
		/// Repeated type name.
		name: String,
	},
	/// Field number is 0 or above the largest legal tag.
	#[error("invalid field number {number} for {type_name}.{field}")]
	InvalidFieldNumber {
		/// Message type name.
		type_name: String,
		/// Field name.
		field: String,
		/// Offending number.
		number: u32,
	},
	/// Two fields share one number.
	#[error("duplicate field number {number} in {type_name}")]
	DuplicateFieldNumber {
		/// Message type name.
		type_name: String,
		/// Repeated field number.
		number: u32,
	},
	/// Two fields share one name.
	#[error("duplicate field name {field} in {type_name}")]
	DuplicateFieldName {
		/// Message type name.
		type_name: String,
		/// Repeated field name.
		field: String,
	},
	/// Field references a type that is missing or of the wrong sort.
	#[error("{type_name}.{field} references unknown {expected} type {target:?}")]
	UnknownType {
		/// Message type name.
		type_name: String,
		/// Field name.
		field: String,
		/// Expected sort of type (`enum` or `message`).
		expected: &'static str,
		/// Referenced type name, if any was given.
		target: Option<String>,
	},
	/// Enum type declares no values.
	#[error("enum type {name} declares no values")]
	EmptyEnum {
		/// Enum type name.
		name: String,
	},
	/// Declared default cannot be used for the field.
	#[error("invalid default for {type_name}.{field}: {reason}")]
	InvalidDefault {
		/// Message type name.
		type_name: String,
		/// Field name.
		field: String,
		/// Human-readable rejection reason.
		reason: String,
	},
	/// Message type contains itself through singular message fields.
	#[error("message type {type_name} contains itself through singular fields")]
	SingularCycle {
		/// Message type name on the cycle.
		type_name: String,
	},
}

/// Failures applying a PB-Lite array to a message.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Array is too short to hold a declared field.
	#[error("{type_name}: array of length {len} has no index for field {field}")]
	MissingIndex {
		/// Message type name.
		type_name: String,
		/// Field number.
		field: u32,
		/// Length of the offending array.
		len: usize,
	},
	/// Repeated or nested slot is not a list.
	#[error("{type_name}: field {field} expected a list but found {got}")]
	NotIterable {
		/// Message type name.
		type_name: String,
		/// Field number.
		field: u32,
		/// Kind label of the slot value.
		got: &'static str,
	},
	/// Bool slot holds something other than 0 or 1.
	#[error("{type_name}: field {field} expected 0 or 1 but found {got}")]
	InvalidBool {
		/// Message type name.
		type_name: String,
		/// Field number.
		field: u32,
		/// Rendered slot value.
		got: String,
	},
	/// Enum slot holds a value outside the enum's legal set.
	#[error("{type_name}: field {field} has illegal enum value {got}")]
	InvalidEnum {
		/// Message type name.
		type_name: String,
		/// Field number.
		field: u32,
		/// Rendered slot value.
		got: String,
	},
	/// Message storage rejected the assigned value.
	#[error("{type_name}: field {field} rejected value: {source}")]
	InvalidValue {
		/// Message type name.
		type_name: String,
		/// Field number.
		field: u32,
		/// Storage rejection.
		#[source]
		source: StorageError,
	},
}

impl DecodeError {
	/// Field number the error refers to.
	pub fn field(&self) -> u32 {
		match self {
			Self::MissingIndex { field, .. }
			| Self::NotIterable { field, .. }
			| Self::InvalidBool { field, .. }
			| Self::InvalidEnum { field, .. }
			| Self::InvalidValue { field, .. } => *field,
		}
	}

	/// Message type name the error refers to.
	pub fn type_name(&self) -> &str {
		match self {
			Self::MissingIndex { type_name, .. }
			| Self::NotIterable { type_name, .. }
			| Self::InvalidBool { type_name, .. }
			| Self::InvalidEnum { type_name, .. }
			| Self::InvalidValue { type_name, .. } => type_name,
		}
	}
}

/// Rejections reported by message storage accessors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
	/// No field with this number is declared.
	#[error("unknown field number {number}")]
	UnknownField {
		/// Requested field number.
		number: u32,
	},
	/// Accessor does not match the field's label or kind.
	#[error("field {number} is not a {expected} field")]
	WrongShape {
		/// Requested field number.
		number: u32,
		/// Shape the accessor requires.
		expected: &'static str,
	},
	/// Value kind cannot be stored in the field.
	#[error("field {number} expects {expected}, got {got}")]
	TypeMismatch {
		/// Field number.
		number: u32,
		/// Accepted value description.
		expected: &'static str,
		/// Kind label of the rejected value.
		got: &'static str,
	},
	/// Value kind fits but its magnitude does not.
	#[error("value {value} out of range for {expected} field {number}")]
	OutOfRange {
		/// Field number.
		number: u32,
		/// Field type label.
		expected: &'static str,
		/// Rendered rejected value.
		value: String,
	},
}
