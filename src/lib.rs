//! Library exports for the LinkChop URL shortener
//!
//! This module exposes both halves of the system for testing and binary use:
//! the edge router (path classification and forwarding) and the chop client
//! (validation, code derivation, expiry resolution, backend submission).

pub mod backend;
pub mod config;
pub mod expiry;
pub mod hash;
pub mod middleware;
pub mod model;
pub mod route;
pub mod submit;
