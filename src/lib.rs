//! Apply arbitrary point transformations (functions from R2 to R2) to the
//! geometry of SVG data, while keeping everything else (styling, attributes,
//! element structure) the same.
//!
//! The core is a small codec for SVG path data (the `d` attribute): a path
//! string is split into commands, every coordinate pair is passed through the
//! transformation while tracking the current point, and the result is encoded
//! back into path data.
//!
//! ```
//! use svg_transform::{transform_path_string, CoordinatePair};
//!
//! let moved = transform_path_string("M0,0 H5 V5 Z", |p: CoordinatePair| {
//!     CoordinatePair::new(p.x + 1.0, p.y + 1.0)
//! })
//! .unwrap();
//! assert_eq!(moved, "M1 1L6 1L6 6Z");
//! ```
//!
//! **Note: Only absolute commands are supported.** Elliptical arcs (`A`/`a`)
//! and relative commands (`m`, `l`, `c`, `s`, `q`, `t`, `h`, `v`) are rejected
//! with [`Error::UnsupportedCommand`]. `H` and `V` are always rewritten to `L`.
//!
//! Whole documents can be processed with [`transform_svg`], and [`svg_shape`]
//! reads the document size.
//!
//! You can optionally get serde 1 support by enabling the `serde` feature.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

use std::convert;

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod command;
mod document;
mod error;
mod path;

pub use crate::command::{Axis, Command, CommandKind, CoordinateShape};
pub use crate::document::{svg_shape, transform_svg};
pub use crate::error::{Error, Result};
pub use crate::path::{encode, tokenize, transform, Path};

/// A `CoordinatePair` consists of an x and y coordinate.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinatePair {
    pub x: f64,
    pub y: f64,
}

impl CoordinatePair {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl convert::From<(f64, f64)> for CoordinatePair {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

impl convert::From<CoordinatePair> for (f64, f64) {
    fn from(val: CoordinatePair) -> Self {
        (val.x, val.y)
    }
}

/// Transform a path-data string by applying `transformation` to every point.
pub fn transform_path_string<F>(expr: &str, transformation: F) -> Result<String>
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    trace!("transform_path_string");
    let path: Path = expr.parse()?;
    Ok(path.transform(transformation)?.to_string())
}

/// Apply `transformation` to a single point.
pub fn transform_point<F>(x: f64, y: f64, mut transformation: F) -> (f64, f64)
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    transformation(CoordinatePair::new(x, y)).into()
}

pub(crate) fn parse_coordinate(name: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
        })
}

/// Transform a pair of coordinate attribute values (e.g. `x` and `y`) and
/// return the new attribute values.
pub fn transform_coordinate_attributes<F>(
    x: &str,
    y: &str,
    transformation: F,
) -> Result<(String, String)>
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    let x = parse_coordinate("x", x)?;
    let y = parse_coordinate("y", y)?;
    let (x, y) = transform_point(x, y, transformation);
    Ok((x.to_string(), y.to_string()))
}
