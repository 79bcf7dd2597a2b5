//! `crudkit stubs`: list and publish the stubs artifacts are rendered from.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::instrument;

use crudkit_adapters::{DirectoryStore, LocalFilesystem, builtin_templates};
use crudkit_core::application::TemplateStore;

use crate::{
    cli::StubsCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Where a stub comes from when `crudkit make` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum StubSource {
    /// A `.stub` file in the stub directory.
    Directory,
    /// Compiled into the binary.
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct StubEntry {
    name: String,
    source: StubSource,
    /// `false` for files in the directory no artifact renders from.
    used: bool,
}

/// Dispatch to the correct stubs subcommand.
pub fn execute(cmd: StubsCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        StubsCommands::List { stubs } => list(stubs, &config, &output),
        StubsCommands::Publish { dir, force } => publish(&dir, force, &output),
    }
}

#[instrument(skip_all)]
fn list(stubs: Option<PathBuf>, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let explicit = stubs.or_else(|| config.stubs.dir.clone());
    if let Some(dir) = explicit.as_ref().filter(|d| !d.is_dir()) {
        return Err(CliError::DirectoryNotFound { path: dir.clone() });
    }
    let dir = explicit.or_else(|| builtin_templates::discover_stub_dir(Path::new(".")));

    let on_disk = match &dir {
        Some(d) => DirectoryStore::new(d.clone()).list()?,
        None => Vec::new(),
    };
    let entries = collect_entries(&on_disk);

    if output.is_json() {
        output.json(&serde_json::json!({
            "directory": dir,
            "stubs": entries,
        }))?;
        return Ok(());
    }

    match &dir {
        Some(d) => output.header(&format!("Stubs (directory: {})", d.display()))?,
        None => output.header("Stubs (built-in only)")?,
    }
    for entry in &entries {
        let note = match (entry.source, entry.used) {
            (StubSource::Builtin, _) => "built-in",
            (StubSource::Directory, true) => "directory",
            (StubSource::Directory, false) => "directory, unused",
        };
        output.print(&format!("  {:<15} {note}", entry.name))?;
    }
    Ok(())
}

/// Every built-in name, marked with where it resolves from, followed by
/// extra stub files nothing renders.
fn collect_entries(on_disk: &[String]) -> Vec<StubEntry> {
    let mut entries: Vec<StubEntry> = builtin_templates::names()
        .map(|name| StubEntry {
            name: name.to_string(),
            source: if on_disk.iter().any(|n| n == name) {
                StubSource::Directory
            } else {
                StubSource::Builtin
            },
            used: true,
        })
        .collect();

    entries.extend(
        on_disk
            .iter()
            .filter(|n| builtin_templates::get(n).is_none())
            .map(|name| StubEntry {
                name: name.clone(),
                source: StubSource::Directory,
                used: false,
            }),
    );
    entries
}

#[instrument(skip_all, fields(dir = %dir.display(), force))]
fn publish(dir: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    let outcome = DirectoryStore::publish_builtin(&LocalFilesystem::new(), dir, force)?;

    if output.is_json() {
        output.json(&serde_json::json!({
            "directory": dir,
            "written": outcome.written,
            "skipped": outcome.skipped,
        }))?;
        return Ok(());
    }

    for path in &outcome.skipped {
        output.warning(&format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))?;
    }
    output.success(&format!(
        "Published {} stub(s) to {}",
        outcome.written.len(),
        dir.display()
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_builtin_when_directory_is_empty() {
        let entries = collect_entries(&[]);
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|e| e.source == StubSource::Builtin && e.used));
    }

    #[test]
    fn directory_stubs_override_and_extras_are_flagged() {
        let on_disk = vec!["model".to_string(), "notes".to_string()];
        let entries = collect_entries(&on_disk);

        let model = entries.iter().find(|e| e.name == "model").unwrap();
        assert_eq!(model.source, StubSource::Directory);

        let notes = entries.iter().find(|e| e.name == "notes").unwrap();
        assert!(!notes.used);

        let controller = entries.iter().find(|e| e.name == "controller").unwrap();
        assert_eq!(controller.source, StubSource::Builtin);
    }
}
