mod compression;
mod descriptor;
mod deserialize;
mod dynamic;
mod error;
mod file;
pub mod json;
mod message;
mod schema;
mod serialize;
mod value;

/// Compression detection result.
pub use compression::Compression;
/// Read-only schema view consumed by the engine.
pub use descriptor::{EnumDescriptor, EnumValue, FieldDescriptor, FieldKind, Label, MessageDescriptor, ScalarType};
/// Schema-driven dynamic message runtime.
pub use dynamic::DynamicMessage;
/// Error and result aliases.
pub use error::{DecodeError, PbLiteError, Result, SchemaError, StorageError};
/// Input file abstraction.
pub use file::InputFile;
/// Runtime contract implemented by message storage.
pub use message::Message;
/// JSON schema document types and the resolved schema pool.
pub use schema::{EnumDoc, EnumValueDoc, FieldDoc, FieldType, MessageDoc, Schema, SchemaDoc};
/// Serializer entry point and configuration.
pub use serialize::PbLiteSerializer;
/// Array slot value type.
pub use value::Value;
