mod changes;
mod discovery;

pub use changes::ChangeDetector;
pub use discovery::{discover_candidates, is_repository_root};
