use serde::{Deserialize, Serialize};

use crate::error::ViewportError;
use crate::model::{Size, Viewbox};

/// Attribute on the bound element that may carry a JSON `ViewportConfig`.
pub const CONFIG_ATTRIBUTE: &str = "data-viewport";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Factor applied to the viewbox size per wheel notch.
    pub zoom_step: f64,
    /// How far the viewbox may shrink relative to its initial size.
    pub max_zoom_in: f64,
    /// How far the viewbox may grow relative to its initial size.
    pub max_zoom_out: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.1,
            max_zoom_in: 64.0,
            max_zoom_out: 64.0,
        }
    }
}

impl ViewportConfig {
    /// Parse from the `data-viewport` attribute value; `None` means defaults.
    pub fn from_attribute(raw: Option<&str>) -> Result<Self, ViewportError> {
        let cfg = match raw.map(str::trim) {
            None | Some("") => Self::default(),
            Some(json) => serde_json::from_str::<Self>(json)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ViewportError> {
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ViewportError::InvalidConfig(format!(
                "zoomStep must be a finite number greater than 1, got {}",
                self.zoom_step
            )));
        }
        for (name, v) in [("maxZoomIn", self.max_zoom_in), ("maxZoomOut", self.max_zoom_out)] {
            if !v.is_finite() || v < 1.0 {
                return Err(ViewportError::InvalidConfig(format!(
                    "{name} must be a finite number of at least 1, got {v}"
                )));
            }
        }
        Ok(())
    }

    pub fn limits_for(&self, initial: &Viewbox) -> SizeLimits {
        SizeLimits {
            min: Size::new(
                initial.width / self.max_zoom_in,
                initial.height / self.max_zoom_in,
            ),
            max: Size::new(
                (initial.width * self.max_zoom_out).min(f64::MAX),
                (initial.height * self.max_zoom_out).min(f64::MAX),
            ),
        }
    }
}

/// Allowed range for the viewbox width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeLimits {
    pub min: Size,
    pub max: Size,
}

impl SizeLimits {
    /// Clamp a uniform `scale` so `size * scale` stays within the limits on both axes.
    /// A size already outside the limits is never pushed further out.
    pub fn clamp_scale(&self, size: Size, scale: f64) -> f64 {
        let lo = (self.min.width / size.width).max(self.min.height / size.height);
        let hi = (self.max.width / size.width).min(self.max.height / size.height);
        if lo > hi {
            return 1.0;
        }
        scale.clamp(lo.min(1.0), hi.max(1.0))
    }
}
