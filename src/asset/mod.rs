//! Asset values and the pieces that resolve them.

mod compile;
mod defaults;
mod error;
mod external;
mod find;
mod kind;
pub mod minify;
mod model;

// Types
pub use error::{AssetError, EXTERNAL};
pub use kind::AssetKind;
pub use model::Asset;

// Compiler seam
pub use compile::{CompileRequest, Compiled, Compiler, Passthrough};
pub use minify::Minifier;

// Resolution helpers
pub use defaults::{DefaultContext, apply_defaults, asset_url};
pub use external::{external_asset, is_external, is_external_url};
pub use find::{SourceFile, find_source, strip_paths};
