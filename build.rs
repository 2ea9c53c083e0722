use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default());
    let head = manifest_dir.join(".git").join("HEAD");

    let commit = match fs::read_to_string(&head) {
        Ok(contents) => {
            println!("cargo:rerun-if-changed={}", head.display());
            match contents.trim().strip_prefix("ref: ") {
                Some(reference) => {
                    let ref_file = manifest_dir.join(".git").join(reference);
                    if ref_file.is_file() {
                        println!("cargo:rerun-if-changed={}", ref_file.display());
                    }
                    fs::read_to_string(ref_file).ok().or_else(git_head)
                }
                // Detached HEAD stores the commit id itself.
                None => Some(contents),
            }
        }
        Err(_) => git_head(),
    };

    let short = commit
        .map(|id| id.trim().chars().take(7).collect::<String>())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| "unknown".to_owned());

    println!("cargo:rustc-env=MAPSELECT_GIT_HASH={short}");
    println!(
        "cargo:rustc-env=MAPSELECT_BUILD_PROFILE={}",
        env::var("PROFILE").unwrap_or_else(|_| "unknown".to_owned())
    );
}

/// Packed refs and worktrees are left to git itself.
fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).into_owned())
}
