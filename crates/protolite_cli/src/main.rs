#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "protolite", about = "PB-Lite array inspection and conversion tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Schema(cmd::schema::Args),
	Defaults(cmd::defaults::Args),
	Decode(cmd::decode::Args),
	Normalize(cmd::normalize::Args),
}

fn main() {
	env_logger::init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> protolite::pblite::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Schema(args) => cmd::schema::run(args),
		Commands::Defaults(args) => cmd::defaults::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Normalize(args) => cmd::normalize::run(args),
	}
}
