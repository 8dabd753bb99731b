//! # CoilKit Core
//!
//! Core types shared by the CoilKit crates: the 2D [`Point`] used both for
//! positions and for direction vectors, and the geometry error raised when
//! a direction cannot be derived.

pub mod error;
pub mod point;

pub use error::{GeometryError, GeometryResult};
pub use point::Point;
