//! `kgbot status` — show configuration and provider status.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use kgbot_core::config::{get_config_path, load_config, KnowledgeConfig};
use kgbot_core::types::ProviderKind;
use kgbot_providers::registry::{find_by_kind, ProviderSpec, PROVIDERS};

use crate::helpers::mark;

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);
    let knowledge = &config.knowledge;

    println!();
    println!("{}", "🤖 kgbot Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Knowledge graph
    println!();
    println!("  {}", "Knowledge graph:".bold());
    println!("    {:<20} {}", "Enabled", mark(knowledge.enable, if knowledge.enable { "yes" } else { "no" }));

    let kind = knowledge.provider_kind();
    let provider = match find_by_kind(kind) {
        Some(spec) => spec.display_name.to_string(),
        None if knowledge.provider.is_empty() => "(none)".dimmed().to_string(),
        None => format!("{} {}", knowledge.provider, "(unknown)".red()),
    };
    println!("    {:<20} {}", "Provider", provider);

    for spec in PROVIDERS {
        println!("    {:<20} {}", spec.display_name, provider_status(spec, knowledge));
    }

    if kind == ProviderKind::Together {
        println!("    {:<20} {}", "Model", knowledge.model);
    }
    println!("    {:<20} {}", "Robot name", knowledge.robot_name);

    // Transcription
    println!();
    println!("  {}", "Transcription:".bold());
    println!(
        "    {:<20} {}",
        config.transcription.model,
        mark(config.transcription.is_configured(), "key set")
    );
    println!("    {:<20} {}", "Endpoint", config.transcription.api_url.dimmed());

    println!();

    Ok(())
}

/// Status line for one provider. The CLI links no Houndify SDK, so a
/// selected Houndify always answers with the disabled message.
fn provider_status(spec: &ProviderSpec, knowledge: &KnowledgeConfig) -> String {
    if spec.kind != knowledge.provider_kind() {
        return mark(false, "not selected");
    }
    match spec.kind {
        ProviderKind::Houndify if !knowledge.has_credentials() => {
            mark(false, "client id or key missing")
        }
        ProviderKind::Houndify => format!("{}", "✗ Houndify SDK not linked".red()),
        _ => mark(!knowledge.key.is_empty(), "key set"),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
