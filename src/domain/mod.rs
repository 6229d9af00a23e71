//! Domain definitions for the exposed resources.

pub mod resource;
