//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration error types                    |
//! | `merge`  | Deep merge of TOML tables                    |

mod error;
mod merge;

pub use error::ConfigError;
pub use merge::deep_merge;
