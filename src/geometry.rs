//! Rectangle representation and the two clamping policies shared by all
//! operations.
//!
//! Every operation re-derives its own clamped copy of the incoming
//! rectangle against the target image's size; clamped rectangles are never
//! mutated after that.

fn default_extent() -> i64 {
    1
}

/// An axis-aligned pixel rectangle: top-left corner plus extent.
///
/// Coordinates are relative to a specific image's pixel grid. Raw values
/// may be anything; consumers clamp with [`Rect::clamp_for_crop`] or
/// [`Rect::clamp_for_select`] before touching a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge in pixels.
    #[serde(default)]
    pub x: i64,
    /// Top edge in pixels.
    #[serde(default)]
    pub y: i64,
    /// Width in pixels.
    #[serde(default = "default_extent")]
    pub w: i64,
    /// Height in pixels.
    #[serde(default = "default_extent")]
    pub h: i64,
}

impl Rect {
    /// The degenerate fallback rectangle substituted for malformed input.
    pub const DEGENERATE: Self = Self {
        x: 0,
        y: 0,
        w: 1,
        h: 1,
    };

    /// Create a rectangle from raw components.
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// Parse a JSON rect record (`{"x":..,"y":..,"w":..,"h":..}`).
    ///
    /// Malformed input is recovered, never fatal: missing fields take their
    /// per-field defaults (x,y = 0; w,h = 1), and a record that is not an
    /// object or carries non-numeric fields collapses to
    /// [`Rect::DEGENERATE`]. A best-effort visual result beats aborting a
    /// host pipeline over a bad rect.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(obj) = value.as_object() else {
            tracing::debug!(?value, "rect record is not an object; using degenerate rect");
            return Self::DEGENERATE;
        };

        let field = |key: &str, default: i64| -> Option<i64> {
            match obj.get(key) {
                None => Some(default),
                Some(v) => v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)),
            }
        };

        match (
            field("x", 0),
            field("y", 0),
            field("w", 1),
            field("h", 1),
        ) {
            (Some(x), Some(y), Some(w), Some(h)) => Self { x, y, w, h },
            _ => {
                tracing::debug!(?value, "rect record has non-numeric fields; using degenerate rect");
                Self::DEGENERATE
            }
        }
    }

    /// Crop-style clamp: the result always selects at least one pixel and
    /// never exceeds the image bounds.
    ///
    /// Postconditions for `image_w, image_h > 0`:
    /// `0 <= x < image_w`, `0 <= y < image_h`, `1 <= w <= image_w - x`,
    /// `1 <= h <= image_h - y`. An empty image degenerates to a 1x1 rect
    /// at the origin rather than failing.
    pub fn clamp_for_crop(self, image_w: i64, image_h: i64) -> Self {
        if image_w <= 0 || image_h <= 0 {
            return Self::DEGENERATE;
        }
        let x = self.x.clamp(0, image_w - 1);
        let y = self.y.clamp(0, image_h - 1);
        let w = self.w.clamp(1, image_w - x);
        let h = self.h.clamp(1, image_h - y);
        Self { x, y, w, h }
    }

    /// Select-style clamp: produces a rectangle proposal for downstream
    /// consumers, allowing a zero-area position at the far edge
    /// (`x == image_w`) while keeping `w, h >= 1`.
    ///
    /// The corner stays where the caller put it (within `[0, image_w]`);
    /// only the extent shrinks to fit.
    pub fn clamp_for_select(self, image_w: i64, image_h: i64) -> Self {
        let x = self.x.clamp(0, image_w.max(0));
        let y = self.y.clamp(0, image_h.max(0));
        let mut w = self.w.max(1);
        let mut h = self.h.max(1);
        if x.saturating_add(w) > image_w {
            w = (image_w - x).max(1);
        }
        if y.saturating_add(h) > image_h {
            h = (image_h - y).max(1);
        }
        Self { x, y, w, h }
    }
}
