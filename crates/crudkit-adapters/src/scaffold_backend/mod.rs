//! Scaffold backend adapters.
//!
//! A backend decides where each artifact lives in the target project and
//! creates an empty file there. The generation service then writes the
//! rendered text over it.

mod artisan;
mod conventional;

use std::path::{Path, PathBuf};

use crudkit_core::domain::BareArtifactKind;

pub use artisan::ArtisanBackend;
pub use conventional::ConventionalBackend;

/// Migrations directory relative to the project root.
pub const MIGRATIONS_DIR: &str = "database/migrations";

/// Laravel location of a non-migration artifact.
///
/// Returns `None` for migrations, whose file name depends on a timestamp.
pub fn conventional_path(root: &Path, kind: BareArtifactKind, name: &str) -> Option<PathBuf> {
    let dir = match kind {
        BareArtifactKind::Model => "app/Models",
        BareArtifactKind::Controller => "app/Http/Controllers",
        BareArtifactKind::Request => "app/Http/Requests",
        BareArtifactKind::Migration => return None,
    };
    Some(root.join(dir).join(format!("{name}.php")))
}

/// Newest entry among `names` containing `fragment`.
///
/// Migration file names start with a sortable timestamp, so the newest is
/// the greatest in descending name order.
pub fn latest_matching(mut names: Vec<String>, fragment: &str) -> Option<String> {
    names.sort_unstable_by(|a, b| b.cmp(a));
    names.into_iter().find(|name| name.contains(fragment))
}
