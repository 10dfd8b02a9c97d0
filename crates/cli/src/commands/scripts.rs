// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `opskit scripts` — browse the script catalog.

use anyhow::{bail, Result};
use opskit_core::ScriptManifest;
use opskit_runbook::Catalog;

pub fn handle(name: Option<&str>) -> Result<()> {
    let dir = crate::env::scripts_dir();
    let catalog = Catalog::load(&dir);
    match name {
        Some(name) => match catalog.get(name) {
            Some(manifest) => {
                show_detail(manifest);
                Ok(())
            }
            None => bail!("unknown script '{}' in {}", name, dir.display()),
        },
        None => {
            if catalog.is_empty() {
                eprintln!("No scripts found in {}", dir.display());
                return Ok(());
            }
            list(&catalog);
            Ok(())
        }
    }
}

fn list(catalog: &Catalog) {
    println!("{:<20} {:<44} {}", "NAME", "DESCRIPTION", "PARAMETERS");
    for manifest in catalog.manifests() {
        println!(
            "{:<20} {:<44} {}",
            manifest.name,
            truncate(&manifest.description, 42),
            parameter_summary(manifest),
        );
    }
}

fn show_detail(manifest: &ScriptManifest) {
    println!("Script: {}", manifest.name);
    if !manifest.description.is_empty() {
        println!("{}", manifest.description);
    }
    println!("File:   {}", manifest.script_path.display());
    if !manifest.required_modules.is_empty() {
        println!("Requires modules:     {}", manifest.required_modules.join(", "));
    }
    if !manifest.required_permissions.is_empty() {
        println!("Requires permissions: {}", manifest.required_permissions.join(", "));
    }

    if !manifest.parameters.is_empty() {
        println!("\nParameters:");
        for spec in &manifest.parameters {
            let req = if spec.required { "(required)" } else { "(optional)" };
            let default = match &spec.default {
                Some(d) => format!(" [default: \"{d}\"]"),
                None => String::new(),
            };
            let choices = match &spec.choices {
                Some(c) => format!(" [one of: {}]", c.join(", ")),
                None => String::new(),
            };
            println!("  -{:<18} {:<10} {}{}{}", spec.name, req, spec.kind, default, choices);
            if let Some(desc) = &spec.description {
                println!("    {desc}");
            }
        }
    }

    println!("\nUsage:");
    let required_args: Vec<String> = manifest
        .parameters
        .iter()
        .filter(|p| p.required)
        .map(|p| format!("-p {}=<value>", p.name))
        .collect();
    println!("  opskit run {} {}", manifest.name, required_args.join(" "));
}

fn parameter_summary(manifest: &ScriptManifest) -> String {
    if manifest.parameters.is_empty() {
        return "-".to_string();
    }
    manifest
        .parameters
        .iter()
        .map(|p| {
            if p.required {
                format!("{} (req)", p.name)
            } else {
                p.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
#[path = "scripts_tests.rs"]
mod tests;
