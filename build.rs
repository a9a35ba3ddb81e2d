//! Stamps `BuildInfo` with the build time, commit and compiler.

use std::process::Command;

fn main() {
    let built_at = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();

    let docs_rs = std::env::var_os("DOCS_RS").is_some();
    let commit = if docs_rs { None } else { command_line("git", &["rev-parse", "--short", "HEAD"]) };
    let rustc = if docs_rs { None } else { command_line("rustc", &["--version"]) };

    println!("cargo:rustc-env=BUILD_TIME={built_at}");
    println!("cargo:rustc-env=GIT_HASH={}", commit.as_deref().unwrap_or("unknown"));
    println!("cargo:rustc-env=RUST_VERSION={}", rustc.as_deref().unwrap_or("unknown"));

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}

/// First line printed by `program`, if it ran successfully
fn command_line(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    stdout.lines().next().map(|line| line.trim().to_string())
}
