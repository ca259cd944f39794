//! Geometry value types shared by the viewport state and the DOM controller.
//! Image-space values live in `Viewbox`; screen-space values are plain `Point`/`Size`.

use std::fmt;
use std::str::FromStr;

use crate::error::ViewportError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both axes are strictly positive, i.e. the element has been laid out.
    pub fn is_renderable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Visible window into the image's own coordinate space.
/// Width and height are always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewbox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, ViewportError> {
        let vb = Self {
            x,
            y,
            width,
            height,
        };
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return Err(ViewportError::malformed(&vb.to_string(), "values must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(ViewportError::malformed(
                &vb.to_string(),
                "width and height must be positive",
            ));
        }
        Ok(vb)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same size, origin moved by `(dx, dy)` image units.
    /// Fails if the moved origin is no longer finite.
    pub fn translated(&self, dx: f64, dy: f64) -> Result<Self, ViewportError> {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Scale both dimensions by `scale`, keeping the point at fraction `anchor`
    /// (0..1 on each axis) fixed. Fails on overflow or underflow to zero.
    pub fn scaled_about(&self, scale: f64, anchor: Point) -> Result<Self, ViewportError> {
        let width = self.width * scale;
        let height = self.height * scale;
        Self::new(
            self.x + anchor.x * (self.width - width),
            self.y + anchor.y * (self.height - height),
            width,
            height,
        )
    }

    /// Image-space point shown at fraction `at` of the rendered area.
    #[cfg(test)]
    pub fn point_at(&self, at: Point) -> Point {
        Point::new(self.x + at.x * self.width, self.y + at.y * self.height)
    }
}

impl fmt::Display for Viewbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for Viewbox {
    type Err = ViewportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.len() != 4 {
            return Err(ViewportError::malformed(
                s,
                &format!("expected 4 numbers, found {}", tokens.len()),
            ));
        }
        let mut vals = [0.0f64; 4];
        for (slot, tok) in vals.iter_mut().zip(&tokens) {
            *slot = tok
                .parse::<f64>()
                .map_err(|_| ViewportError::malformed(s, &format!("`{tok}` is not a number")))?;
        }
        let [x, y, w, h] = vals;
        Viewbox::new(x, y, w, h).map_err(|e| match e {
            ViewportError::MalformedViewBox { reason, .. } => ViewportError::malformed(s, &reason),
            other => other,
        })
    }
}
