//! Static operation registry.
//!
//! The set of operations is fixed at build time, so discovery is a table
//! lookup rather than any dynamic loading: one descriptor per operation,
//! keyed by its host-facing name. The JSON-driven [`run`] entry point
//! parses a host parameter record (defaults matching the node
//! declarations), then dispatches to the typed operation.

use crate::{
    composite::CombineMode,
    foundation::{
        buffer::{ImageBuffer, MaskBuffer, MaskTensor},
        error::{RectError, RectResult},
    },
    geometry::Rect,
    ops::{crop, fill, mask, select},
    raster::FillMode,
};

/// Which engine operation a registry entry dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    /// Clamp a rectangle proposal against an image.
    Select,
    /// Slice an image to a rectangle.
    Crop,
    /// Paint a rectangle into an image.
    Fill,
    /// Build a mask from a rectangle.
    Mask,
}

/// A registered operation: host-facing name, human-facing display name,
/// and the dispatch target.
#[derive(Clone, Copy, Debug)]
pub struct OpDescriptor {
    /// Stable host-facing identifier.
    pub name: &'static str,
    /// Human-facing label.
    pub display_name: &'static str,
    /// Dispatch target.
    pub kind: OpKind,
}

/// Every operation this crate exposes.
pub const OPS: &[OpDescriptor] = &[
    OpDescriptor {
        name: "RectSelect",
        display_name: "Rect / Select",
        kind: OpKind::Select,
    },
    OpDescriptor {
        name: "RectCrop",
        display_name: "Rect / Crop",
        kind: OpKind::Crop,
    },
    OpDescriptor {
        name: "RectFill",
        display_name: "Rect / Fill",
        kind: OpKind::Fill,
    },
    OpDescriptor {
        name: "RectMask",
        display_name: "Rect / Mask",
        kind: OpKind::Mask,
    },
];

/// Look up a registered operation by name.
pub fn find(name: &str) -> Option<&'static OpDescriptor> {
    OPS.iter().find(|d| d.name == name)
}

/// Result of a dispatched operation.
#[derive(Clone, Debug)]
pub enum OpOutput {
    /// A new image (crop, fill).
    Image(ImageBuffer),
    /// A new mask (mask).
    Mask(MaskBuffer),
    /// A clamped rectangle proposal (select).
    Select(select::SelectOutput),
}

/// Parse `params` and run the named operation against `image`.
///
/// `existing_mask` is consulted only by the mask operation. Unknown
/// operation names and out-of-vocabulary enum parameters are validation
/// errors; a malformed `rect` record is recovered per [`Rect::from_value`].
pub fn run(
    name: &str,
    image: &ImageBuffer,
    params: &serde_json::Value,
    existing_mask: Option<&MaskTensor>,
) -> RectResult<OpOutput> {
    let desc = find(name)
        .ok_or_else(|| RectError::validation(format!("unknown operation '{name}'")))?;

    match desc.kind {
        OpKind::Select => {
            let x = get_i64_or(params, "x", 0)?;
            let y = get_i64_or(params, "y", 0)?;
            let w = get_i64_or(params, "w", 256)?;
            let h = get_i64_or(params, "h", 256)?;
            Ok(OpOutput::Select(select::run(image, x, y, w, h)))
        }
        OpKind::Crop => {
            let rect = rect_param(params);
            Ok(OpOutput::Image(crop::run(image, rect)))
        }
        OpKind::Fill => {
            let rect = rect_param(params);
            let p = fill::FillParams {
                color: [
                    get_channel_or(params, "r", 255)?,
                    get_channel_or(params, "g", 0)?,
                    get_channel_or(params, "b", 0)?,
                ],
                opacity: get_f32_or(params, "opacity", 1.0)?.clamp(0.0, 1.0),
                mode: fill_mode_param(params)?,
                thickness: get_i64_or(params, "thickness", 4)?.max(1) as u32,
                feather: get_i64_or(params, "feather", 0)?.max(0) as u32,
            };
            Ok(OpOutput::Image(fill::run(image, rect, &p)?))
        }
        OpKind::Mask => {
            let rect = rect_param(params);
            let p = mask::MaskParams {
                feather: get_i64_or(params, "feather", 0)?.max(0) as u32,
                invert: get_bool_or(params, "invert", false)?,
                combine: combine_param(params)?,
            };
            Ok(OpOutput::Mask(mask::run(image, rect, &p, existing_mask)?))
        }
    }
}

fn rect_param(params: &serde_json::Value) -> Rect {
    match params.get("rect") {
        None => Rect::DEGENERATE,
        Some(v) => Rect::from_value(v),
    }
}

fn fill_mode_param(params: &serde_json::Value) -> RectResult<FillMode> {
    match get_str(params, "mode")? {
        None => Ok(FillMode::Fill),
        Some("fill") => Ok(FillMode::Fill),
        Some("outline") => Ok(FillMode::Outline),
        Some(other) => Err(RectError::validation(format!(
            "unknown fill mode '{other}'"
        ))),
    }
}

fn combine_param(params: &serde_json::Value) -> RectResult<CombineMode> {
    match get_str(params, "combine")? {
        None => Ok(CombineMode::Replace),
        Some("replace") => Ok(CombineMode::Replace),
        Some("union") => Ok(CombineMode::Union),
        Some("intersect") => Ok(CombineMode::Intersect),
        Some("subtract") => Ok(CombineMode::Subtract),
        Some("multiply") => Ok(CombineMode::Multiply),
        Some(other) => Err(RectError::validation(format!(
            "unknown combine mode '{other}'"
        ))),
    }
}

fn get_str<'a>(params: &'a serde_json::Value, key: &str) -> RectResult<Option<&'a str>> {
    match params.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| RectError::validation(format!("parameter '{key}' must be a string"))),
    }
}

fn get_i64_or(params: &serde_json::Value, key: &str, default: i64) -> RectResult<i64> {
    match params.get(key) {
        None => Ok(default),
        Some(v) => v
            .as_i64()
            .ok_or_else(|| RectError::validation(format!("parameter '{key}' must be an integer"))),
    }
}

fn get_f32_or(params: &serde_json::Value, key: &str, default: f32) -> RectResult<f32> {
    match params.get(key) {
        None => Ok(default),
        Some(v) => {
            let n = v
                .as_f64()
                .ok_or_else(|| RectError::validation(format!("parameter '{key}' must be a number")))?
                as f32;
            if !n.is_finite() {
                return Err(RectError::validation(format!(
                    "parameter '{key}' must be finite"
                )));
            }
            Ok(n)
        }
    }
}

fn get_bool_or(params: &serde_json::Value, key: &str, default: bool) -> RectResult<bool> {
    match params.get(key) {
        None => Ok(default),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| RectError::validation(format!("parameter '{key}' must be a boolean"))),
    }
}

fn get_channel_or(params: &serde_json::Value, key: &str, default: u8) -> RectResult<u8> {
    Ok(get_i64_or(params, key, i64::from(default))?.clamp(0, 255) as u8)
}
