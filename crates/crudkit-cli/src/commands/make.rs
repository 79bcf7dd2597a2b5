//! Implementation of the `crudkit make` command.
//!
//! Responsibility: translate CLI arguments into a `GenerationRequest`, wire
//! the adapters the user asked for, call the core generation service, and
//! display results. No business logic lives here.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, instrument};

use crudkit_adapters::{
    ArtisanBackend, ConventionalBackend, DirectoryStore, InMemoryStore, LocalFilesystem,
    builtin_templates::discover_stub_dir,
};
use crudkit_core::{
    application::{
        GenerationPlan, GenerationReport, GenerationService, ScaffoldBackend, TemplateService,
        TemplateStore,
    },
    domain::{GenerationRequest, UnknownKindPolicy},
};

use crate::{
    cli::{BackendKind, MakeArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `crudkit make` command.
///
/// Dispatch sequence:
/// 1. Resolve the project root and build the request
/// 2. Wire stub store, scaffold backend and filesystem
/// 3. Early-exit with the rendered plan if `--dry-run`
/// 4. Confirm with user unless `--yes`, `--quiet` or non-interactive
/// 5. Generate and write every artifact
/// 6. Report written files
#[instrument(skip_all, fields(entity = %args.name))]
pub fn execute(
    args: MakeArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project root
    let root = resolve_root(args.path.as_deref())?;
    let request = build_request(&args);
    let backend_kind = args.backend.unwrap_or(config.project.backend);

    // 2. Wire adapters
    let store = build_store(&args, &config, &root)?;
    let service = GenerationService::new(
        TemplateService::new(store),
        build_backend(backend_kind, &config, &root),
        Box::new(LocalFilesystem::new()),
    )
    .with_unknown_kind_policy(relation_policy(&args, &config));

    debug!(
        root = %root.display(),
        backend = %backend_kind,
        "Generation wired"
    );

    // 3. Dry run: render everything, write nothing.
    if args.dry_run {
        let plan = service.plan(&request)?;
        return show_plan(&plan, &root, &output);
    }

    // 4. Show configuration and confirm
    let interactive = std::io::stdin().is_terminal() && !output.is_json();
    if interactive && !global.quiet && !args.yes {
        show_configuration(&request, &root, backend_kind, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Generate
    info!(entity = %request.entity_name, root = %root.display(), "Generation started");
    let spinner = spinner(&output, &global, &request.entity_name);
    let result = service.generate(&request);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = result?;

    // 6. Report
    show_report(&report, &root, &output)
}

// ── Request and adapter wiring ────────────────────────────────────────────────

/// `--path`, or the current directory.
fn resolve_root(path: Option<&Path>) -> CliResult<PathBuf> {
    match path {
        Some(p) if !p.is_dir() => Err(CliError::DirectoryNotFound {
            path: p.to_path_buf(),
        }),
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(PathBuf::from(".")),
    }
}

fn build_request(args: &MakeArgs) -> GenerationRequest {
    let request = GenerationRequest::new(&args.name, &args.fields);
    match &args.relations {
        Some(relations) => request.with_relations(relations),
        None => request,
    }
}

/// Stub directory from `--stubs`, the config, or discovery under `root`;
/// built-in stubs when there is none.
fn build_store(
    args: &MakeArgs,
    config: &AppConfig,
    root: &Path,
) -> CliResult<Box<dyn TemplateStore>> {
    let explicit = args.stubs.clone().or_else(|| config.stubs.dir.clone());
    if let Some(dir) = explicit.as_ref().filter(|d| !d.is_dir()) {
        return Err(CliError::DirectoryNotFound { path: dir.clone() });
    }

    match explicit.or_else(|| discover_stub_dir(root)) {
        Some(dir) => {
            debug!(dir = %dir.display(), fallback = config.stubs.fallback, "Using stub directory");
            let store = DirectoryStore::new(dir);
            if config.stubs.fallback {
                Ok(Box::new(store.with_fallback()?))
            } else {
                Ok(Box::new(store))
            }
        }
        None => Ok(Box::new(InMemoryStore::with_builtin()?)),
    }
}

fn build_backend(kind: BackendKind, config: &AppConfig, root: &Path) -> Box<dyn ScaffoldBackend> {
    match kind {
        BackendKind::Conventional => Box::new(ConventionalBackend::new(
            root,
            Box::new(LocalFilesystem::new()),
        )),
        BackendKind::Artisan => {
            Box::new(ArtisanBackend::new(root).with_php(config.project.php.clone()))
        }
    }
}

fn relation_policy(args: &MakeArgs, config: &AppConfig) -> UnknownKindPolicy {
    if args.strict_relations || config.relations.strict {
        UnknownKindPolicy::Reject
    } else {
        UnknownKindPolicy::Skip
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    request: &GenerationRequest,
    root: &Path,
    backend: BackendKind,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Entity:    {}", request.entity_name))?;
    out.print(&format!("  Fields:    {}", request.field_spec))?;
    out.print(&format!(
        "  Relations: {}",
        request.relation_spec.as_deref().unwrap_or("none")
    ))?;
    out.print(&format!("  Backend:   {backend}"))?;
    out.print(&format!("  Location:  {}", root.display()))?;
    out.print("")?;
    Ok(())
}

fn show_plan(plan: &GenerationPlan, root: &Path, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(plan)?;
        return Ok(());
    }

    warn_skipped(plan, out)?;
    out.info(&format!(
        "Dry run: would create {} file(s) for {} in {}",
        plan.artifacts.len(),
        plan.entity,
        root.display(),
    ))?;
    for (i, artifact) in plan.artifacts.iter().enumerate() {
        out.item(
            i + 1,
            &format!(
                "{:<15} {}",
                artifact.artifact_kind.to_string(),
                artifact.target_name
            ),
        )?;
    }
    Ok(())
}

fn show_report(report: &GenerationReport, root: &Path, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(report)?;
        return Ok(());
    }

    warn_skipped(&report.plan, out)?;
    out.header("Created files:")?;
    for (i, path) in report.paths().enumerate() {
        out.item(i + 1, &relative_to(path, root).display().to_string())?;
    }
    out.success(&format!(
        "CRUD for {} created successfully.",
        report.plan.entity
    ))?;
    Ok(())
}

fn warn_skipped(plan: &GenerationPlan, out: &OutputManager) -> CliResult<()> {
    for token in plan.relations.skipped() {
        out.warning(&format!("Skipped relation with unknown kind: '{token}'"))?;
    }
    Ok(())
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Spinner on stderr for human output; `None` when it would only get in
/// the way.
fn spinner(out: &OutputManager, global: &GlobalArgs, entity: &str) -> Option<ProgressBar> {
    if global.quiet || out.format() != OutputFormat::Human {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Generating CRUD for {entity}..."));
    Some(pb)
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str, fields: &str) -> MakeArgs {
        MakeArgs {
            name: name.into(),
            fields: fields.into(),
            relations: None,
            path: None,
            stubs: None,
            backend: None,
            strict_relations: false,
            dry_run: false,
            yes: true,
        }
    }

    #[test]
    fn root_defaults_to_current_dir() {
        assert_eq!(resolve_root(None).unwrap(), PathBuf::from("."));
    }

    #[test]
    fn missing_root_is_not_found() {
        let err = resolve_root(Some(Path::new("/definitely/not/a/project"))).unwrap_err();
        assert!(matches!(err, CliError::DirectoryNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn request_carries_relations() {
        let mut a = args("Post", "title:string");
        assert_eq!(build_request(&a).relation_spec, None);

        a.relations = Some("belongsTo:User:user_id:id".into());
        let request = build_request(&a);
        assert_eq!(request.entity_name, "Post");
        assert_eq!(
            request.relation_spec.as_deref(),
            Some("belongsTo:User:user_id:id")
        );
    }

    #[test]
    fn strict_relations_from_flag_or_config() {
        let mut a = args("Post", "title:string");
        let mut config = AppConfig::default();
        assert_eq!(relation_policy(&a, &config), UnknownKindPolicy::Skip);

        config.relations.strict = true;
        assert_eq!(relation_policy(&a, &config), UnknownKindPolicy::Reject);

        config.relations.strict = false;
        a.strict_relations = true;
        assert_eq!(relation_policy(&a, &config), UnknownKindPolicy::Reject);
    }

    #[test]
    fn builtin_stubs_without_stub_dir() {
        let project = tempfile::tempdir().unwrap();
        let store = build_store(
            &args("Post", "title:string"),
            &AppConfig::default(),
            project.path(),
        )
        .unwrap();
        assert!(store.get_template("model").unwrap().contains("{{modelName}}"));
    }

    #[test]
    fn discovered_stub_dir_overrides_builtin() {
        let project = tempfile::tempdir().unwrap();
        let stubs = project.path().join("stubs");
        std::fs::create_dir_all(&stubs).unwrap();
        std::fs::write(stubs.join("model.stub"), "custom {{modelName}}").unwrap();

        let store = build_store(
            &args("Post", "title:string"),
            &AppConfig::default(),
            project.path(),
        )
        .unwrap();
        assert_eq!(store.get_template("model").unwrap(), "custom {{modelName}}");
        // Falls back for stubs the directory lacks.
        assert!(store.get_template("controller").unwrap().contains("{{controllerName}}"));
    }

    #[test]
    fn missing_explicit_stub_dir_is_not_found() {
        let mut a = args("Post", "title:string");
        a.stubs = Some(PathBuf::from("/definitely/not/stubs"));
        let err = build_store(&a, &AppConfig::default(), Path::new(".")).err();
        assert!(matches!(err, Some(CliError::DirectoryNotFound { .. })));
    }

    #[test]
    fn paths_are_shown_relative_to_root() {
        let root = Path::new("/srv/app");
        assert_eq!(
            relative_to(Path::new("/srv/app/app/Models/Post.php"), root),
            Path::new("app/Models/Post.php")
        );
        assert_eq!(
            relative_to(Path::new("/elsewhere/x.php"), root),
            Path::new("/elsewhere/x.php")
        );
    }
}
