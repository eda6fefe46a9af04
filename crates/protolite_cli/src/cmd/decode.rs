use protolite::pblite::{Message, PbLiteSerializer, json};

use crate::cmd::print::{PrintOptions, print_message};
use crate::cmd::util::{decode_file, load_schema};

#[derive(clap::Args)]
pub struct Args {
	pub schema: std::path::PathBuf,
	pub data: std::path::PathBuf,
	#[arg(long)]
	pub message: String,
	#[arg(long)]
	pub json: bool,
	/// Use tighter truncation limits for the tree view.
	#[arg(long)]
	pub compact: bool,
}

/// Decode an array and print the message.
pub fn run(args: Args) -> protolite::pblite::Result<()> {
	let schema = load_schema(&args.schema)?;
	let message = decode_file(&schema, &args.message, &args.data, &PbLiteSerializer::new())?;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&json::message_to_json(&message)?)?);
		return Ok(());
	}

	println!("path: {}", args.data.display());
	println!("type: {}", message.type_name());
	println!("fields: {}", message.descriptor().fields.len());
	println!("decoded:");
	let options = if args.compact { PrintOptions::compact() } else { PrintOptions::default() };
	print_message(&message, options)?;
	Ok(())
}
