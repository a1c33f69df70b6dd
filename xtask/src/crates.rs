use std::process::Command;

use anyhow::Context;

/// Crates checked one by one, leaf first, so a missing dependency that the
/// workspace build happens to pull in through a sibling shows up here
const WORKSPACE_CRATES: &[&str] = &["trak-common", "trak-domain", "trak-core", "trak-infra", "trak-app"];

pub fn check_each_crate() -> anyhow::Result<()> {
    println!("Checking {} crates in isolation...", WORKSPACE_CRATES.len());

    for (index, name) in WORKSPACE_CRATES.iter().enumerate() {
        println!("\n[{}/{}] cargo check -p {name} --all-targets", index + 1, WORKSPACE_CRATES.len());

        let status = Command::new("cargo")
            .args(["check", "-p", name, "--all-targets"])
            .status()
            .with_context(|| format!("failed to run cargo check for {name}"))?;

        if !status.success() {
            anyhow::bail!("{name} failed to compile on its own");
        }
    }

    println!("\n✓ All crates compile in isolation");
    Ok(())
}
