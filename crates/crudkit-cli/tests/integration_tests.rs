//! Integration tests for the crudkit binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, isolated from the user's config, env overrides and stubs.
fn crudkit(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("crudkit").unwrap();
    cmd.current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("CRUDKIT_STUBS_DIR")
        .env_remove("CRUDKIT_RELATIONS__STRICT")
        .env_remove("CRUDKIT_PROJECT__BACKEND")
        .env_remove("CRUDKIT_OUTPUT__FORMAT")
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

fn migrations(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root.join("database/migrations"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn migration_ending(root: &Path, suffix: &str) -> PathBuf {
    let name = migrations(root)
        .into_iter()
        .find(|n| n.ends_with(suffix))
        .unwrap_or_else(|| panic!("no migration ending in {suffix}"));
    root.join("database/migrations").join(name)
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    crudkit(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("crudkit"))
        .stdout(predicate::str::contains("make"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    crudkit(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_make_help_lists_spec_flags() {
    let temp = TempDir::new().unwrap();
    crudkit(temp.path())
        .args(["make", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--fields"))
        .stdout(predicate::str::contains("--relations"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_make_writes_full_crud_slice() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    crudkit(root)
        .args([
            "make",
            "Post",
            "--fields",
            "title:string,body:text",
            "--relations",
            "belongsTo:User:user_id:id,belongsToMany:Tag:tag_id:post_id",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CRUD for Post created successfully."));

    let model = fs::read_to_string(root.join("app/Models/Post.php")).unwrap();
    assert!(model.contains("class Post extends Model"));
    assert!(model.contains("protected $fillable = ['title', 'body'];"));
    assert!(model.contains("public function user()"));
    assert!(model.contains("return $this->belongsTo(User::class, 'user_id', 'id');"));
    assert!(model.contains("public function tags()"));

    let controller =
        fs::read_to_string(root.join("app/Http/Controllers/PostController.php")).unwrap();
    assert!(controller.contains("class PostController extends Controller"));
    assert!(controller.contains("public function store(PostStoreRequest $request)"));

    let store =
        fs::read_to_string(root.join("app/Http/Requests/PostStoreRequest.php")).unwrap();
    assert!(store.contains("'title' => 'required|string'"));
    assert!(store.contains("'body' => 'required|text'"));

    let update =
        fs::read_to_string(root.join("app/Http/Requests/PostUpdateRequest.php")).unwrap();
    assert!(update.contains("'title' => 'nullable|string'"));

    assert_eq!(migrations(root).len(), 2);
    let migration = fs::read_to_string(migration_ending(root, "_create_posts_table.php")).unwrap();
    assert!(migration.contains("Schema::create('posts'"));
    assert!(migration.contains("$table->string('title');"));
    assert!(migration.contains("$table->text('body');"));

    let pivot = fs::read_to_string(migration_ending(root, "_create_post_tag_table.php")).unwrap();
    assert!(pivot.contains("Schema::create('post_tag'"));
    assert!(pivot.contains("$table->unsignedBigInteger('tag_id');"));
    assert!(pivot.contains("$table->unsignedBigInteger('post_id');"));
}

#[test]
fn test_make_with_path_flag() {
    let cwd = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    crudkit(cwd.path())
        .args(["make", "Comment", "-f", "body:text", "-y", "--path"])
        .arg(project.path())
        .assert()
        .success();

    assert!(project.path().join("app/Models/Comment.php").is_file());
    assert!(!cwd.path().join("app").exists());
}

#[test]
fn test_make_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();

    crudkit(temp.path())
        .args(["make", "Post", "--fields", "title:string", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("PostController"));

    assert!(!temp.path().join("app").exists());
    assert!(!temp.path().join("database").exists());
}

#[test]
fn test_make_json_dry_run_is_valid_json() {
    let temp = TempDir::new().unwrap();

    let output = crudkit(temp.path())
        .args([
            "--output-format",
            "json",
            "make",
            "Post",
            "--fields",
            "title:string",
            "--dry-run",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["entity"], "Post");
    assert_eq!(plan["artifacts"].as_array().unwrap().len(), 5);
    assert_eq!(plan["artifacts"][0]["artifactKind"], "model");
    assert_eq!(plan["states"].as_array().unwrap().last().unwrap(), "done");
}

#[test]
fn test_make_json_report_lists_written_paths() {
    let temp = TempDir::new().unwrap();

    let output = crudkit(temp.path())
        .args(["--output-format", "json", "make", "Post", "-f", "title:string"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let written = report["written"].as_array().unwrap();
    assert_eq!(written.len(), 5);
    assert_eq!(written[0]["artifactKind"], "model");
}

#[test]
fn test_unknown_relation_kind_is_skipped_with_warning() {
    let temp = TempDir::new().unwrap();

    crudkit(temp.path())
        .args([
            "make",
            "Post",
            "-f",
            "title:string",
            "-r",
            "morphTo:Image:imageable_id:id",
            "-y",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped relation"));

    let model = fs::read_to_string(temp.path().join("app/Models/Post.php")).unwrap();
    assert!(!model.contains("Image"));
}

#[test]
fn test_custom_stub_directory_is_used() {
    let temp = TempDir::new().unwrap();
    let stubs = temp.path().join("stubs");
    fs::create_dir_all(&stubs).unwrap();
    fs::write(stubs.join("model.stub"), "CUSTOM {{modelName}} {{fillable}}").unwrap();

    crudkit(temp.path())
        .args(["make", "Post", "-f", "title:string", "-y"])
        .assert()
        .success();

    let model = fs::read_to_string(temp.path().join("app/Models/Post.php")).unwrap();
    assert_eq!(model, "CUSTOM Post 'title'");
    // Stubs missing from the directory come from the built-ins.
    assert!(temp
        .path()
        .join("app/Http/Controllers/PostController.php")
        .is_file());
}

#[test]
fn test_stubs_publish_then_list() {
    let temp = TempDir::new().unwrap();

    crudkit(temp.path())
        .args(["stubs", "publish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published 6 stub(s)"));

    for name in [
        "model",
        "migration",
        "pivotMigration",
        "controller",
        "storeRequest",
        "updateRequest",
    ] {
        assert!(temp.path().join("stubs").join(format!("{name}.stub")).is_file());
    }

    crudkit(temp.path())
        .args(["stubs", "publish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let output = crudkit(temp.path())
        .args(["--output-format", "json", "stubs", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stubs = listing["stubs"].as_array().unwrap();
    assert_eq!(stubs.len(), 6);
    assert!(stubs.iter().all(|s| s["source"] == "directory"));
}

#[test]
fn test_stubs_list_builtin_only() {
    let temp = TempDir::new().unwrap();
    crudkit(temp.path())
        .args(["stubs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in only"))
        .stdout(predicate::str::contains("pivotMigration"));
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    crudkit(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crudkit"));
}

#[test]
fn test_init_local_then_config_get() {
    let temp = TempDir::new().unwrap();

    crudkit(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(temp.path().join(".crudkit.toml").is_file());

    crudkit(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    crudkit(temp.path())
        .args(["config", "get", "project.backend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project.backend = conventional"));
}

#[test]
fn test_local_config_selects_json_output() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".crudkit.toml"),
        "[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let output = crudkit(temp.path())
        .args(["make", "Post", "-f", "title:string", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["entity"], "Post");

    // An explicit flag still wins.
    crudkit(temp.path())
        .args(["--output-format", "plain", "make", "Post", "-f", "title:string", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));
}

#[test]
fn test_local_config_enables_strict_relations() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".crudkit.toml"),
        "[relations]\nstrict = true\n",
    )
    .unwrap();

    crudkit(temp.path())
        .args(["make", "Post", "-f", "title:string", "-r", "morphTo:Image:a:b", "-y"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown relation kind"));
}
