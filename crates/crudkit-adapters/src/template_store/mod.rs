//! Template store adapters.

mod directory;
mod memory;

pub use directory::{DirectoryStore, PublishOutcome};
pub use memory::InMemoryStore;
