//! Arguments of a single asset reference.

use std::collections::BTreeMap;

use crate::asset::AssetError;

/// Flag pairs that cannot be used together.
const EXCLUSIVE: [(&str, &str); 2] = [("@path", "@data-url"), ("@path", "@inline")];

/// Invocation context of one `{% asset %}` reference.
///
/// Argument parsing belongs to the template layer; this is the parsed result.
/// Lives for a single render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagArgs {
    /// Reference as written in the template, before any variable expansion.
    pub original: String,
    /// Reference after parsing (`argv1`).
    pub reference: String,
    /// Embed the content instead of linking it.
    pub inline: bool,
    /// Return only the url.
    pub path: bool,
    /// Return only a base64 data uri.
    pub data_url: bool,
    /// Explicit external override; `None` means detect from the reference.
    pub external: Option<bool>,
    /// Explicit content type override.
    pub content_type: Option<String>,
    /// HTML attributes, passed through and filled in by defaults.
    pub attrs: BTreeMap<String, String>,
}

impl TagArgs {
    pub fn new(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        Self {
            original: reference.clone(),
            reference,
            ..Self::default()
        }
    }

    /// Keep the unparsed reference for diagnostics.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn path_only(mut self) -> Self {
        self.path = true;
        self
    }

    pub fn data_url(mut self) -> Self {
        self.data_url = true;
        self
    }

    pub fn external(mut self, external: bool) -> Self {
        self.external = Some(external);
        self
    }

    pub fn with_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Reject mutually exclusive flag pairs.
    pub fn validate(&self) -> Result<(), AssetError> {
        for (arg, with) in EXCLUSIVE {
            if self.flag(arg) && self.flag(with) {
                return Err(AssetError::InvalidCombination { arg, with });
            }
        }
        Ok(())
    }

    fn flag(&self, name: &str) -> bool {
        match name {
            "@path" => self.path,
            "@data-url" => self.data_url,
            "@inline" => self.inline,
            _ => false,
        }
    }
}
