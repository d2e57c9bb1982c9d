pub mod paths;

pub use paths::{resolve_bundle_dir, resolve_repo_root};
