use assert_cmd::{Command, cargo::cargo_bin_cmd};
use std::path::Path;
use std::process::Output;

/// Command running inside `cwd`, so the default baseline location lands there.
pub fn checker_cmd(cwd: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("integrity-checker");
    cmd.arg("-C").arg(cwd);
    cmd
}

// Each integration test file is compiled as its own crate. Some crates only use
// `checker_cmd`, so this helper is intentionally unused there.
#[allow(dead_code)]
pub fn scan_output(cwd: &Path, args: &[&str]) -> Output {
    let mut cmd = checker_cmd(cwd);
    cmd.arg("scan").args(args);
    cmd.output().expect("failed to run `integrity-checker scan`")
}
