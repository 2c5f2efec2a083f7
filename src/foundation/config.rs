//! Runtime options of a draw context.

use serde::{Deserialize, Serialize};

use crate::foundation::core::Coord;
use crate::foundation::error::{RasterError, RasterResult};

/// Default width of the per-context opacity scratch row.
pub const DEFAULT_MAX_ROW_WIDTH: usize = 1024;
/// Default upper bound for `shadow width + radius` of one shadow corner.
pub const DEFAULT_SHADOW_MAX_SIZE: Coord = 256;

/// Runtime options of a [`DrawCtx`](crate::draw::DrawCtx).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterOpts {
    /// Length of the opacity scratch row. Wider rows are drawn in chunks.
    pub max_row_width: usize,
    /// Shadow corners larger than this are clamped.
    pub shadow_max_size: Coord,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            max_row_width: DEFAULT_MAX_ROW_WIDTH,
            shadow_max_size: DEFAULT_SHADOW_MAX_SIZE,
        }
    }
}

impl RasterOpts {
    /// Defaults overridden by `SWRASTER_MAX_ROW_WIDTH` / `SWRASTER_SHADOW_MAX_SIZE`.
    ///
    /// Unparsable or non-positive values are ignored.
    pub fn from_env() -> Self {
        let max_row_width = std::env::var("SWRASTER_MAX_ROW_WIDTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_ROW_WIDTH);
        let shadow_max_size = std::env::var("SWRASTER_SHADOW_MAX_SIZE")
            .ok()
            .and_then(|v| v.parse::<Coord>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_SHADOW_MAX_SIZE);
        Self {
            max_row_width,
            shadow_max_size,
        }
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(s: &str) -> RasterResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| RasterError::validation(format!("invalid raster opts: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> RasterResult<()> {
        if self.max_row_width == 0 {
            return Err(RasterError::validation("max_row_width must be > 0"));
        }
        if self.shadow_max_size <= 0 {
            return Err(RasterError::validation("shadow_max_size must be > 0"));
        }
        Ok(())
    }

    /// Set [`RasterOpts::max_row_width`].
    pub fn with_max_row_width(mut self, n: usize) -> Self {
        self.max_row_width = n;
        self
    }

    /// Set [`RasterOpts::shadow_max_size`].
    pub fn with_shadow_max_size(mut self, n: Coord) -> Self {
        self.shadow_max_size = n;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
