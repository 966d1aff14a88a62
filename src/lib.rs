#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod parsers;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::engine::DeclarationEngine;
pub use domain::model::Direction;
pub use utils::error::{DeclError, Result};
