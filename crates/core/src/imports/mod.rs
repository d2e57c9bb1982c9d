//! Proto import resolution: source parsing, the repository import index and
//! per-bundle dependency collection

pub mod collector;
pub mod index;
pub mod proto_imports;

pub use collector::DependencyCollector;
pub use index::ImportIndex;
pub use proto_imports::parse_imports;
