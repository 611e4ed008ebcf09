//! API endpoint handlers module
//!
//! Contains all HTTP endpoint handler implementations.

pub mod check_physics;
pub mod health;
