//! Pipeline components: enumeration, run state, manifest output,
//! verification and promotion.

pub mod context;
pub mod orchestrator;
pub mod verify;
pub mod walk;
pub mod writer;

pub use context::RunState;
pub use orchestrator::{manifest_paths, run_manifest};
pub use verify::{count_lines, publish, verify_count};
pub use walk::{SkippedDir, WalkReport, enumerate};
pub use writer::ManifestWriter;
