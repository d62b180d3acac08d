//! Small fixed-size vector value types used throughout the workspace.
//!
//! All quantities follow the workspace unit convention: lengths in meters,
//! times in seconds, masses in kilograms.

use thiserror::Error;

mod vector2;
mod vector3;

pub use vector2::Vector2;
pub use vector3::Vector3;

#[derive(Debug, Error, PartialEq)]
pub enum VectorError {
    #[error("cannot take the unit direction of a zero-magnitude vector")]
    ZeroMagnitude,
}
