use std::path::Path;
use std::sync::Arc;

use protolite::pblite::{DynamicMessage, InputFile, PbLiteSerializer, Result, Schema, Value, json};

/// Load and resolve a schema document, compressed or not.
pub(crate) fn load_schema(path: &Path) -> Result<Arc<Schema>> {
	let file = InputFile::open(path)?;
	let schema = file.schema()?;
	log::debug!("schema {} ({}): {} message types", path.display(), file.compression.as_str(), schema.messages.len());
	Ok(Arc::new(schema))
}

/// Read a data file and decode its PB-Lite array into a fresh `type_name` instance.
pub(crate) fn decode_file(schema: &Arc<Schema>, type_name: &str, path: &Path, serializer: &PbLiteSerializer) -> Result<DynamicMessage> {
	let file = InputFile::open(path)?;
	let data = file.pblite_array()?;
	log::debug!("data {} ({}): {} slots", path.display(), file.compression.as_str(), data.len());

	let mut message = DynamicMessage::new(schema, type_name)?;
	serializer.deserialize(&mut message, &data)?;
	Ok(message)
}

/// Build a serializer from an optional JSON filler literal.
pub(crate) fn serializer_for(filler: Option<&str>) -> Result<PbLiteSerializer> {
	let Some(filler) = filler else {
		return Ok(PbLiteSerializer::new());
	};
	let literal: serde_json::Value = serde_json::from_str(filler)?;
	Ok(PbLiteSerializer::with_filler(json::from_json(&literal)?))
}

/// Print an array as compact single-line JSON.
pub(crate) fn emit_array(items: &[Value]) {
	println!("{}", json::array_to_json(items));
}

/// Print a serializable payload as pretty JSON.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
