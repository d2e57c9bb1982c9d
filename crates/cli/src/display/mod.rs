pub mod starlark;

pub use starlark::{render_build_file, render_rule};
