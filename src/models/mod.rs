//! Data models for the shoe catalog.
//!
//! These match the JSON shape of the remote `/shoes` resource.

mod draft;
mod shoe;

pub use draft::*;
pub use shoe::*;
