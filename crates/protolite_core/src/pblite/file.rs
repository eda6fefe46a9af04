use std::fs;
use std::path::Path;

use crate::pblite::compression::decode_bytes;
use crate::pblite::{Compression, Result, Schema, Value, json};

/// Input document read from disk with compression already removed.
pub struct InputFile {
	/// Compression mode detected for source bytes.
	pub compression: Compression,
	bytes: Vec<u8>,
}

impl InputFile {
	/// Read and decompress a file from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let (compression, bytes) = decode_bytes(raw)?;
		Ok(Self { compression, bytes })
	}

	/// Return decoded raw bytes backing this file.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Parse the contents as a JSON schema document.
	pub fn schema(&self) -> Result<Schema> {
		Schema::parse(&self.bytes)
	}

	/// Parse the contents as a top-level PB-Lite JSON array.
	pub fn pblite_array(&self) -> Result<Vec<Value>> {
		json::parse_array(&self.bytes)
	}
}
