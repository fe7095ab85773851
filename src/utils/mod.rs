//! Utility modules.

pub mod mime;
