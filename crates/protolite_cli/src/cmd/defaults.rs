use protolite::pblite::DynamicMessage;

use crate::cmd::util::{emit_array, load_schema, serializer_for};

#[derive(clap::Args)]
pub struct Args {
	pub schema: std::path::PathBuf,
	#[arg(long)]
	pub message: String,
	/// JSON literal placed in unpopulated slots.
	#[arg(long)]
	pub filler: Option<String>,
}

/// Print the PB-Lite array of a default instance.
pub fn run(args: Args) -> protolite::pblite::Result<()> {
	let schema = load_schema(&args.schema)?;
	let serializer = serializer_for(args.filler.as_deref())?;
	let message = DynamicMessage::new(&schema, &args.message)?;
	emit_array(&serializer.serialize(&message)?);
	Ok(())
}
