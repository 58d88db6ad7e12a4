//! One module per entity. Every function runs parameterised SQL against the
//! pool of the store that owns the entity and maps rows into the named-field
//! records of `crate::models`.

pub mod answers;
pub mod courses;
pub mod exams;
pub mod lessons;
pub mod levels;
pub mod questions;
pub mod users;
