//! Fixture and scratch-file helpers shared by workspace tests.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read and parse a JSON fixture.
pub fn fixture_json(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let bytes = std::fs::read(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
	serde_json::from_slice(&bytes).unwrap_or_else(|err| panic!("parse {}: {err}", path.display()))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Path for a throwaway file under the target directory.
///
/// The parent directory is created; the file itself is not.
pub fn scratch_path(name: &str) -> PathBuf {
	let dir = target_dir().join("protolite-scratch");
	std::fs::create_dir_all(&dir).unwrap_or_else(|err| panic!("create {}: {err}", dir.display()));
	dir.join(name)
}

/// Locate a workspace binary, building it when cargo did not provide one.
///
/// Integration tests get `CARGO_BIN_EXE_<name>`; unit tests inside a binary
/// crate do not, so the binary is built into the workspace target directory.
pub fn cargo_bin(name: &str) -> PathBuf {
	if let Some(path) = std::env::var_os(format!("CARGO_BIN_EXE_{name}")) {
		return PathBuf::from(path);
	}

	let status = Command::new(std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into()))
		.current_dir(workspace_root())
		.args(["build", "--quiet", "--bin", name])
		.status()
		.unwrap_or_else(|err| panic!("cargo build {name}: {err}"));
	assert!(status.success(), "failed to build {name}");

	target_dir().join("debug").join(format!("{name}{}", std::env::consts::EXE_SUFFIX))
}
