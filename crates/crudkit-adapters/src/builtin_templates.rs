//! Built-in stubs and stub directory discovery.
//!
//! The six stubs below ship inside the binary. Projects can override any of
//! them by placing `<name>.stub` files in a stub directory; see
//! [`discover_stub_dir`] for where crudkit looks.
//!
//! # Stub directory resolution order
//!
//! 1. **`$CRUDKIT_STUBS_DIR`**: environment variable override.
//! 2. **`<project>/resources/stubs`**: the conventional Laravel location.
//! 3. **`<project>/stubs`**: where `crudkit stubs publish` writes by default.
//!
//! The first directory that exists wins. When none exists only the built-in
//! stubs are used.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable naming a stub directory.
pub const STUBS_DIR_ENV: &str = "CRUDKIT_STUBS_DIR";

/// File extension of stub files on disk.
pub const STUB_EXTENSION: &str = "stub";

// ── Stub text ─────────────────────────────────────────────────────────────────

const MODEL: &str = r#"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;

class {{modelName}} extends Model
{
    use HasFactory;

    protected $table = '{{tableName}}';

    protected $fillable = [{{fillable}}];
{{relations}}}
"#;

const MIGRATION: &str = "<?php

use Illuminate\\Database\\Migrations\\Migration;
use Illuminate\\Database\\Schema\\Blueprint;
use Illuminate\\Support\\Facades\\Schema;

return new class extends Migration
{
    public function up(): void
    {
        Schema::create('{{tableName}}', function (Blueprint $table) {
            $table->id();
\t\t\t{{fields}}
            $table->timestamps();
        });
    }

    public function down(): void
    {
        Schema::dropIfExists('{{tableName}}');
    }
};
";

const PIVOT_MIGRATION: &str = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

return new class extends Migration
{
    public function up(): void
    {
        Schema::create('{{pivotTableName}}', function (Blueprint $table) {
            $table->id();
            $table->unsignedBigInteger('{{foreignKey}}');
            $table->unsignedBigInteger('{{relatedKey}}');
            $table->timestamps();
        });
    }

    public function down(): void
    {
        Schema::dropIfExists('{{pivotTableName}}');
    }
};
"#;

const CONTROLLER: &str = r#"<?php

namespace App\Http\Controllers;

use App\Http\Requests\{{storeRequestName}};
use App\Http\Requests\{{updateRequestName}};
use App\Models\{{modelName}};

class {{controllerName}} extends Controller
{
    public function index()
    {
        return {{modelName}}::paginate();
    }

    public function store({{storeRequestName}} $request)
    {
        ${{modelVariable}} = {{modelName}}::create($request->validated());

        return response()->json(${{modelVariable}}, 201);
    }

    public function show({{modelName}} ${{modelVariable}})
    {
        return ${{modelVariable}};
    }

    public function update({{updateRequestName}} $request, {{modelName}} ${{modelVariable}})
    {
        ${{modelVariable}}->update($request->validated());

        return ${{modelVariable}};
    }

    public function destroy({{modelName}} ${{modelVariable}})
    {
        ${{modelVariable}}->delete();

        return response()->noContent();
    }
}
"#;

const FORM_REQUEST: &str = r#"<?php

namespace App\Http\Requests;

use Illuminate\Foundation\Http\FormRequest;

class {{formRequestName}} extends FormRequest
{
    public function authorize(): bool
    {
        return true;
    }

    public function rules(): array
    {
        return [
            {{rules}}
        ];
    }
}
"#;

/// `(template name, stub text)` for every built-in stub.
pub const BUILTIN_STUBS: [(&str, &str); 6] = [
    ("model", MODEL),
    ("migration", MIGRATION),
    ("pivotMigration", PIVOT_MIGRATION),
    ("controller", CONTROLLER),
    ("storeRequest", FORM_REQUEST),
    ("updateRequest", FORM_REQUEST),
];

/// Built-in stub text for a template name.
pub fn get(name: &str) -> Option<&'static str> {
    BUILTIN_STUBS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTIN_STUBS.iter().map(|(n, _)| *n)
}

/// File names a stub may use on disk, preferred first.
///
/// Besides `<name>.stub`, the file names used by Laravel's own `make:crud`
/// style commands are accepted so an existing `resources/stubs` works as is.
pub fn file_names(name: &str) -> Vec<String> {
    let mut candidates = vec![format!("{name}.{STUB_EXTENSION}")];
    let alias = match name {
        "pivotMigration" => Some("pivot_migration"),
        "storeRequest" => Some("StoreRequest"),
        "updateRequest" => Some("UpdateRequest"),
        _ => None,
    };
    if let Some(alias) = alias {
        candidates.push(format!("{alias}.{STUB_EXTENSION}"));
    }
    candidates
}

/// Template name for a stub file name, if it is one crudkit knows.
pub fn template_name_for_file(file_name: &str) -> Option<&'static str> {
    names().find(|name| file_names(name).iter().any(|f| f == file_name))
}

// ── Resolution helpers ────────────────────────────────────────────────────────

/// First existing stub directory for a project, in the documented order.
pub fn discover_stub_dir(project_root: &Path) -> Option<PathBuf> {
    candidate_dirs(project_root).into_iter().find(|candidate| {
        let found = candidate.is_dir();
        debug!(path = %candidate.display(), found, "checking candidate stub directory");
        found
    })
}

fn candidate_dirs(project_root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Ok(env_dir) = std::env::var(STUBS_DIR_ENV) {
        paths.push(PathBuf::from(env_dir));
    }
    paths.push(project_root.join("resources").join("stubs"));
    paths.push(project_root.join("stubs"));

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_core::domain::{ArtifactKind, find_placeholders};

    #[test]
    fn every_artifact_kind_has_a_stub() {
        for kind in ArtifactKind::ALL {
            assert!(get(kind.template_name()).is_some(), "{kind}");
        }
        assert_eq!(names().count(), ArtifactKind::ALL.len());
    }

    #[test]
    fn stubs_use_exactly_their_placeholders() {
        for kind in ArtifactKind::ALL {
            let mut found = find_placeholders(get(kind.template_name()).unwrap());
            let mut expected: Vec<String> =
                kind.placeholders().iter().map(|p| p.to_string()).collect();
            found.sort();
            expected.sort();
            assert_eq!(found, expected, "{kind}");
        }
    }

    #[test]
    fn migration_fields_line_is_tab_indented() {
        assert!(get("migration").unwrap().contains("\n\t\t\t{{fields}}\n"));
    }

    #[test]
    fn laravel_file_names_are_recognised() {
        assert_eq!(template_name_for_file("model.stub"), Some("model"));
        assert_eq!(template_name_for_file("pivot_migration.stub"), Some("pivotMigration"));
        assert_eq!(template_name_for_file("StoreRequest.stub"), Some("storeRequest"));
        assert_eq!(template_name_for_file("view.stub"), None);
    }

    #[test]
    fn discovery_prefers_resources_stubs() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(discover_stub_dir(temp.path()), None);

        std::fs::create_dir_all(temp.path().join("stubs")).unwrap();
        assert_eq!(discover_stub_dir(temp.path()), Some(temp.path().join("stubs")));

        std::fs::create_dir_all(temp.path().join("resources/stubs")).unwrap();
        assert_eq!(
            discover_stub_dir(temp.path()),
            Some(temp.path().join("resources").join("stubs"))
        );
    }
}
