//! Build mode configuration for production/development builds.

/// Environment variable consulted by [`BuildMode::from_env`].
pub const ENV_VAR: &str = "TOLA_ENV";

/// Build mode configuration.
///
/// The one runtime branch of the asset pipeline: it selects the configuration
/// defaults and decides whether CDN rewriting applies to urls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether the build targets production (CDN rewriting, no source maps).
    pub production: bool,
}

impl BuildMode {
    /// Production mode: optimized output, CDN urls when configured.
    pub const PRODUCTION: Self = Self { production: true };

    /// Development mode: source maps on, root-relative urls only.
    pub const DEVELOPMENT: Self = Self { production: false };

    /// Read the mode from `TOLA_ENV` (`production` selects production).
    pub fn from_env() -> Self {
        Self::from_name(std::env::var(ENV_VAR).ok().as_deref())
    }

    /// Map an environment name onto a mode. Unknown names mean development.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(name) if name.eq_ignore_ascii_case("production") => Self::PRODUCTION,
            _ => Self::DEVELOPMENT,
        }
    }

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        !self.production
    }

    /// Check if this is production mode.
    #[inline]
    pub const fn is_production(&self) -> bool {
        self.production
    }
}
