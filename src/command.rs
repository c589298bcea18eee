//! A single path-data instruction: a command kind plus its operands.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The operation selected by a path command letter.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommandKind {
    MoveTo,
    LineTo,
    CurveTo,
    SmoothCurveTo,
    Quadratic,
    SmoothQuadratic,
    HorizontalLineTo,
    VerticalLineTo,
    ClosePath,
    EllipticalArc,
}

/// Axis along which a single-axis command moves the cursor.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// How a command consumes its operands.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CoordinateShape {
    /// Operands are consumed in `(x, y)` groups.
    PointPairs,
    /// Every operand is a single coordinate along one axis.
    SingleAxis(Axis),
    NoOperand,
    /// Commands that are recognized but cannot be transformed.
    Unsupported,
}

impl CommandKind {
    /// Look up a command letter. Returns the kind and whether the letter
    /// denotes absolute coordinates.
    pub fn from_tag(tag: char) -> Option<(Self, bool)> {
        let kind = match tag.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'C' => CommandKind::CurveTo,
            'S' => CommandKind::SmoothCurveTo,
            'Q' => CommandKind::Quadratic,
            'T' => CommandKind::SmoothQuadratic,
            'H' => CommandKind::HorizontalLineTo,
            'V' => CommandKind::VerticalLineTo,
            'Z' => CommandKind::ClosePath,
            'A' => CommandKind::EllipticalArc,
            _ => return None,
        };
        Some((kind, tag.is_ascii_uppercase()))
    }

    /// The command letter, uppercase for absolute commands.
    pub fn tag(self, abs: bool) -> char {
        let tag = match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::CurveTo => 'C',
            CommandKind::SmoothCurveTo => 'S',
            CommandKind::Quadratic => 'Q',
            CommandKind::SmoothQuadratic => 'T',
            CommandKind::HorizontalLineTo => 'H',
            CommandKind::VerticalLineTo => 'V',
            CommandKind::ClosePath => 'Z',
            CommandKind::EllipticalArc => 'A',
        };
        if abs {
            tag
        } else {
            tag.to_ascii_lowercase()
        }
    }

    pub fn coordinate_shape(self) -> CoordinateShape {
        match self {
            CommandKind::MoveTo
            | CommandKind::LineTo
            | CommandKind::CurveTo
            | CommandKind::SmoothCurveTo
            | CommandKind::Quadratic
            | CommandKind::SmoothQuadratic => CoordinateShape::PointPairs,
            CommandKind::HorizontalLineTo => CoordinateShape::SingleAxis(Axis::Horizontal),
            CommandKind::VerticalLineTo => CoordinateShape::SingleAxis(Axis::Vertical),
            CommandKind::ClosePath => CoordinateShape::NoOperand,
            CommandKind::EllipticalArc => CoordinateShape::Unsupported,
        }
    }
}

/// One instruction of a path-data string.
///
/// The operand count is not checked against the kind here; that happens when
/// the command is transformed.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command {
    kind: CommandKind,
    abs: bool,
    operands: Vec<f64>,
}

impl Command {
    /// Create a command from its letter.
    pub fn new(tag: char, operands: Vec<f64>) -> Result<Self> {
        let (kind, abs) = CommandKind::from_tag(tag).ok_or(Error::InvalidCommandKind(tag))?;
        Ok(Self::from_kind(kind, abs, operands))
    }

    pub fn from_kind(kind: CommandKind, abs: bool, operands: Vec<f64>) -> Self {
        Self {
            kind,
            abs,
            operands,
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn is_absolute(&self) -> bool {
        self.abs
    }

    pub fn tag(&self) -> char {
        self.kind.tag(self.abs)
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    pub fn coordinate_shape(&self) -> CoordinateShape {
        self.kind.coordinate_shape()
    }
}

/// Encode as the command letter directly followed by the space separated
/// operands, e.g. `L5 0`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())?;
        for (idx, operand) in self.operands.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", operand)?;
        }
        Ok(())
    }
}
