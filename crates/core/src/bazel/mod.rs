//! Bazel support using proper Starlark parsing

pub mod build_file;
pub mod label;
pub mod rule_extractor;
pub mod starlark_parser;
pub mod target_finder;

pub use build_file::ProtoLibraryReader;
pub use label::Label;
pub use rule_extractor::{AttributeValue, GlobPattern, RuleCall, RuleExtractor};
pub use starlark_parser::{StarlarkAst, StarlarkParser};
pub use target_finder::ProtoTargetFinder;
