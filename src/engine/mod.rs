//! Engine module: CLI surface, path tools, and the digest capability.

pub mod arg_parser;
pub mod digest;
pub mod handlers;
pub mod tools;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use digest::{Digester, ToolDigester, digest_suite, ensure_tools_available};
pub use handlers::handle_run;
pub use tools::{
    extension_of, is_manifest_artifact, path_relative_to, rel_path_string, resolve_root, sort_key,
};
