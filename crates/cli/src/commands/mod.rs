pub mod config;
pub mod generate;
pub mod index;

pub use config::config_command;
pub use generate::generate_command;
pub use index::index_command;
