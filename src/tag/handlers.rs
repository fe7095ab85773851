//! Single-argument overrides, checked before full tag rendering.

use super::{Rendered, TagArgs};
use crate::asset::{Asset, AssetError, EXTERNAL, asset_url};
use crate::config::SiteConfig;

type Handler = fn(&TagArgs, &Asset, &SiteConfig) -> Result<Option<Rendered>, AssetError>;

/// Tried in order; the first handler returning a value wins.
const HANDLERS: [Handler; 2] = [on_path, on_data_url];

/// Run the override handlers; `None` means render the full tag.
pub fn run_handlers(
    args: &TagArgs,
    asset: &Asset,
    config: &SiteConfig,
) -> Result<Option<Rendered>, AssetError> {
    for handler in HANDLERS {
        if let Some(rendered) = handler(args, asset, config)? {
            return Ok(Some(rendered));
        }
    }
    Ok(None)
}

fn on_path(
    args: &TagArgs,
    asset: &Asset,
    config: &SiteConfig,
) -> Result<Option<Rendered>, AssetError> {
    if !args.path {
        return Ok(None);
    }
    if asset.is_external() {
        return Err(AssetError::InvalidCombination {
            arg: "@path",
            with: EXTERNAL,
        });
    }
    Ok(Some(Rendered::Url(asset_url(asset, config))))
}

fn on_data_url(
    args: &TagArgs,
    asset: &Asset,
    _: &SiteConfig,
) -> Result<Option<Rendered>, AssetError> {
    if !args.data_url {
        return Ok(None);
    }
    if asset.is_external() {
        return Err(AssetError::InvalidCombination {
            arg: "@data-url",
            with: EXTERNAL,
        });
    }
    Ok(Some(Rendered::DataUri(asset.data_uri())))
}
