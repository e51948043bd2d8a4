//! Read-only section inspection (`folio groups`, `folio show`, `folio dashboard`).
//! The hub is addressed as the `profile` group.
//!
//! Each invocation seeds a fresh in-memory registry, so these commands show
//! the demo profile as a new server would serve it.

use anyhow::{Context, Result};
use console::style;
use serde_json::Value;

use folio::folio_config::FolioToml;
use folio::profile::ProfileRegistry;
use folio::ui::{HIDDEN, VISIBLE};

fn registry(config: &FolioToml) -> ProfileRegistry {
    ProfileRegistry::seeded(config.registry_options())
}

pub fn cmd_groups(config: &FolioToml) -> Result<()> {
    let registry = registry(config);
    println!();
    println!("{:<16} {:<14} {}", style("SLUG").bold(), style("GROUP").bold(), style("FLAG").bold());
    for info in registry.groups() {
        println!("{:<16} {:<14} {}", info.slug, info.group, style(info.flag).dim());
    }
    println!();
    Ok(())
}

/// Print the display view (or the raw envelope) as pretty JSON.
pub async fn cmd_show(config: &FolioToml, group: &str, raw: bool) -> Result<()> {
    let section = registry(config).get(group)?;
    let value = if raw {
        section.raw_json().await
    } else {
        section.view_json().await
    }
    .with_context(|| format!("Failed to load section '{}'", group))?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub async fn cmd_dashboard(config: &FolioToml, group: &str, json: bool) -> Result<()> {
    let section = registry(config).get(group)?;
    let snapshot = section
        .dashboard_json()
        .await
        .with_context(|| format!("Failed to open dashboard for '{}'", group))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_dashboard(section.slug(), &snapshot);
    Ok(())
}

/// Section snapshots list `fields`; the hub lists `quickActions` then `modules`.
fn print_dashboard(slug: &str, snapshot: &Value) {
    let fields: Vec<&Value> = ["fields", "quickActions", "modules"]
        .into_iter()
        .filter_map(|key| snapshot[key].as_array())
        .flatten()
        .collect();

    println!();
    println!(
        "{} {} ({} fields)",
        style("Dashboard:").bold(),
        style(slug).cyan(),
        fields.len()
    );
    println!();
    for (position, field) in fields.iter().enumerate() {
        let id = field["id"].as_str().unwrap_or("?");
        let description = field["description"].as_str().unwrap_or("");
        let marker = if field["enabled"].as_bool().unwrap_or(false) {
            style(VISIBLE.to_string()).green()
        } else {
            style(HIDDEN.to_string()).red()
        };
        println!("  {:>2}. {} {:<24} {}", position + 1, marker, id, style(description).dim());
    }
    if let Some(enabled) = snapshot["emergency"]["enabled"].as_bool() {
        println!();
        println!("  emergency: {}", if enabled { "on" } else { "off" });
    }
    println!();
}
