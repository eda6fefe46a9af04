use std::path::PathBuf;

use protolite::pblite::{MessageDescriptor, PbLiteError, Result};

use crate::cmd::util::{emit_json, load_schema};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long)]
	pub message: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// List message types, or one type's field layout.
pub fn run(args: Args) -> Result<()> {
	let Args { schema: path, message, json } = args;
	let schema = load_schema(&path)?;

	if let Some(name) = message {
		let item = schema.message(&name).ok_or(PbLiteError::MessageNotFound { name })?;
		if json {
			return emit_json(&MessageJson::from_descriptor(item));
		}

		println!("message: {}", item.name);
		println!("array_len: {}", render_len(item));
		println!("number\tlabel\ttype\tname\tdefault");
		for field in &item.fields {
			let ty = field.kind.type_name().unwrap_or(field.kind.as_str());
			let default = field.default.as_ref().map_or_else(|| "-".to_owned(), |value| value.to_string());
			println!("{}\t{}\t{}\t{}\t{}", field.number, field.label.as_str(), ty, field.name, default);
		}
		return Ok(());
	}

	if json {
		let payload = SchemaJson {
			path: path.display().to_string(),
			messages: schema.messages.iter().map(MessageSummaryJson::from_descriptor).collect(),
			enums: schema.enums.iter().map(|item| item.name.to_string()).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("messages: {}", schema.messages.len());
	println!("enums: {}", schema.enums.len());
	println!("name\tfields\tarray_len");
	for item in &schema.messages {
		println!("{}\t{}\t{}", item.name, item.fields.len(), render_len(item));
	}
	Ok(())
}

fn array_len(item: &MessageDescriptor) -> Option<u32> {
	item.max_field_number().map(|max| max + 1)
}

fn render_len(item: &MessageDescriptor) -> String {
	array_len(item).map_or_else(|| "-".to_owned(), |len| len.to_string())
}

#[derive(serde::Serialize)]
struct SchemaJson {
	path: String,
	messages: Vec<MessageSummaryJson>,
	enums: Vec<String>,
}

#[derive(serde::Serialize)]
struct MessageSummaryJson {
	name: String,
	fields: usize,
	array_len: Option<u32>,
}

impl MessageSummaryJson {
	fn from_descriptor(item: &MessageDescriptor) -> Self {
		Self {
			name: item.name.to_string(),
			fields: item.fields.len(),
			array_len: array_len(item),
		}
	}
}

#[derive(serde::Serialize)]
struct MessageJson {
	name: String,
	array_len: Option<u32>,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	number: u32,
	name: String,
	label: &'static str,
	#[serde(rename = "type")]
	kind: &'static str,
	type_name: Option<String>,
	default: Option<serde_json::Value>,
}

impl MessageJson {
	fn from_descriptor(item: &MessageDescriptor) -> Self {
		Self {
			name: item.name.to_string(),
			array_len: array_len(item),
			fields: item
				.fields
				.iter()
				.map(|field| FieldJson {
					number: field.number,
					name: field.name.to_string(),
					label: field.label.as_str(),
					kind: field.kind.as_str(),
					type_name: field.kind.type_name().map(str::to_owned),
					default: field.default.as_ref().map(protolite::pblite::json::to_json),
				})
				.collect(),
		}
	}
}
