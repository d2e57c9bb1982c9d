//! protolake - Bazel rule generation for publishable proto bundles
//!
//! This crate provides functionality to:
//! - Load and merge repository (`lake.yaml`) and bundle (`bundle.yaml`) configuration
//! - Discover `proto_library` targets and index which target owns each proto import
//! - Synthesize stub, bundle and publish rules for Java, Python and JavaScript
pub mod bazel;
pub mod config;
pub mod error;
pub mod generator;
pub mod imports;
pub mod rules;

pub use error::{Error, Result};

pub use bazel::Label;
pub use config::{GenerateOptions, MergedConfig};
pub use generator::BundleGenerator;
pub use imports::ImportIndex;
pub use rules::{AttrValue, Rule, RuleSynthesizer};
