use std::path::PathBuf;
use std::process::Command;
use std::sync::OnceLock;

static PROTOLITE_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_arg(name: &str) -> String {
	protolite_testkit::fixture_path(name).display().to_string()
}

/// Run the binary and return stdout, failing the test on a non-zero exit.
pub(crate) fn protolite_stdout(args: &[&str]) -> String {
	let bin = PROTOLITE_BIN.get_or_init(|| protolite_testkit::cargo_bin("protolite"));
	let output = Command::new(bin).args(args).output().expect("protolite command executes");
	assert!(output.status.success(), "protolite {args:?} exited with {}: {}", output.status, String::from_utf8_lossy(&output.stderr));
	String::from_utf8(output.stdout).expect("stdout should be utf-8")
}
