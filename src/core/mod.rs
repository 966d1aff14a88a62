pub mod engine;
pub mod mapping;
pub mod mutate;
pub mod template;
pub mod tree;

pub use crate::domain::extract::Extracted;
pub use crate::domain::model::Direction;
pub use crate::utils::error::Result;
pub use engine::DeclarationEngine;
