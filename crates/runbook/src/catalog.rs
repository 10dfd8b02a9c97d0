// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script manifest discovery.
//!
//! The catalog is a read-only snapshot of every descriptor file in a
//! configured directory. Descriptors that fail to read, parse, or
//! validate are skipped with a warning; one bad file never fails the
//! load as a whole. Reload by calling [`Catalog::load`] again.

use opskit_core::ScriptManifest;
use std::path::{Path, PathBuf};

/// Directory name searched for script descriptors
pub const SCRIPTS_DIR_NAME: &str = "scripts";

/// Immutable snapshot of the available script manifests.
pub struct Catalog {
    dir: PathBuf,
    manifests: Vec<ScriptManifest>,
}

impl Catalog {
    /// Scan `dir` (non-recursive) for `*.json` descriptors.
    ///
    /// A missing or unreadable directory yields an empty catalog, and a
    /// malformed descriptor is excluded from the result; neither is an
    /// error. Relative `scriptFile` paths are resolved against `dir`.
    pub fn load(dir: &Path) -> Catalog {
        let mut manifests: Vec<ScriptManifest> = Vec::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "scripts directory not readable");
                return Catalog { dir: dir.to_path_buf(), manifests };
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "json"))
            .collect();
        // Deterministic catalog order regardless of readdir order
        paths.sort();

        for path in paths {
            let Some(mut manifest) = parse_descriptor(&path) else {
                continue;
            };
            if manifests.iter().any(|m| m.name == manifest.name) {
                tracing::warn!(
                    path = %path.display(),
                    name = %manifest.name,
                    "skipping descriptor with duplicate script name"
                );
                continue;
            }
            if manifest.script_path.is_relative() {
                manifest.script_path = dir.join(&manifest.script_path);
            }
            manifests.push(manifest);
        }

        Catalog { dir: dir.to_path_buf(), manifests }
    }

    /// Directory the catalog was loaded from (also the working directory
    /// for script processes).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifests(&self) -> &[ScriptManifest] {
        &self.manifests
    }

    /// Look up a manifest by its stable name.
    pub fn get(&self, name: &str) -> Option<&ScriptManifest> {
        self.manifests.iter().find(|m| m.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }
}

/// Parse and validate one descriptor file, logging and returning `None`
/// on any failure.
fn parse_descriptor(path: &Path) -> Option<ScriptManifest> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable descriptor");
            return None;
        }
    };
    let manifest: ScriptManifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping invalid descriptor");
            return None;
        }
    };
    if let Err(e) = manifest.validate() {
        tracing::warn!(path = %path.display(), error = %e, "skipping malformed descriptor");
        return None;
    }
    Some(manifest)
}

/// Resolve the default scripts directory.
///
/// Prefers a `scripts/` directory colocated with the running executable
/// (packaged layout). If absent, walks parent directories upward until
/// one containing a `scripts/` subdirectory is found (development
/// layout, e.g. `cargo run` from a target dir). Falls back to the
/// colocated path when neither exists.
pub fn default_scripts_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    scripts_dir_from(&exe_dir)
}

fn scripts_dir_from(base: &Path) -> PathBuf {
    let colocated = base.join(SCRIPTS_DIR_NAME);
    if colocated.is_dir() {
        return colocated;
    }
    let mut dir = base;
    while let Some(parent) = dir.parent() {
        let candidate = parent.join(SCRIPTS_DIR_NAME);
        if candidate.is_dir() {
            return candidate;
        }
        dir = parent;
    }
    colocated
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
