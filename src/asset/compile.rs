//! Compiler collaborator seam.
//!
//! Turning a source (Sass, ES modules, images) into its output form is not
//! the pipeline's job; a [`Compiler`] is plugged into the environment instead.

/// One compile request.
#[derive(Debug, Clone, Copy)]
pub struct CompileRequest<'a> {
    pub logical_path: &'a str,
    pub bytes: &'a [u8],
    pub content_type: &'a str,
    /// `assets.source_maps`
    pub source_maps: bool,
    /// `assets.compression`
    pub compression: bool,
}

/// Compiled output. `content_type` may differ from the request (scss → css).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl Compiled {
    pub fn unchanged(req: &CompileRequest<'_>) -> Self {
        Self {
            bytes: req.bytes.to_vec(),
            content_type: req.content_type.to_string(),
        }
    }
}

/// Shared by every worker of a build.
pub trait Compiler: Send + Sync {
    fn compile(&self, req: &CompileRequest<'_>) -> anyhow::Result<Compiled>;

    /// Gzip body for a compiled output. `None` skips the `.gz` sibling.
    fn compress(&self, _bytes: &[u8]) -> Option<Vec<u8>> {
        None
    }
}

/// Copies sources through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Compiler for Passthrough {
    fn compile(&self, req: &CompileRequest<'_>) -> anyhow::Result<Compiled> {
        Ok(Compiled::unchanged(req))
    }
}
