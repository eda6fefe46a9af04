use crate::cmd::util::{decode_file, emit_array, load_schema, serializer_for};

#[derive(clap::Args)]
pub struct Args {
	pub schema: std::path::PathBuf,
	pub data: std::path::PathBuf,
	#[arg(long)]
	pub message: String,
	/// JSON literal placed in unpopulated slots.
	#[arg(long)]
	pub filler: Option<String>,
}

/// Decode an array and print its canonical dense form.
pub fn run(args: Args) -> protolite::pblite::Result<()> {
	let schema = load_schema(&args.schema)?;
	let serializer = serializer_for(args.filler.as_deref())?;
	let message = decode_file(&schema, &args.message, &args.data, &serializer)?;
	emit_array(&serializer.serialize(&message)?);
	Ok(())
}
