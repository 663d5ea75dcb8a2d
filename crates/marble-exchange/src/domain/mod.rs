//! # Domain Module
//!
//! Entities, value objects, errors and the rules that govern them.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use validation::*;
pub use value_objects::*;
