//! `kgbot init` — write a default configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use kgbot_core::config::{get_config_path, save_config, Config};

/// Run the init command.
pub fn run(config_path: Option<&Path>, force: bool) -> Result<()> {
    println!();
    println!("{}", "🤖 kgbot — Setup".cyan().bold());
    println!();

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    if write_default(&path, force)? {
        println!("  {} created config at {}", "✓".green(), path.display());
    } else {
        println!(
            "  {} config already exists at {} (use --force to overwrite)",
            "✓".green(),
            path.display()
        );
    }

    println!();
    println!("  Next steps:");
    println!(
        "    1. Set {} and {} in {}",
        "knowledge.enable".cyan(),
        "knowledge.provider".cyan(),
        path.display()
    );
    println!("    2. Run {}", "kgbot ask --text \"what is the tallest mountain\"".cyan());
    println!();

    Ok(())
}

/// Write the default config unless one exists. Returns whether it wrote.
fn write_default(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
