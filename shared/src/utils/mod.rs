//! Common utility functions

pub mod coordinates;

pub use coordinates::{parse_coordinate, parse_latitude, parse_longitude, CoordinateError};
