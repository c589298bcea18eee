//! Tokenizing, transforming and encoding of path data (the `d` attribute).

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::command::{Axis, Command, CommandKind, CoordinateShape};
use crate::error::{Error, Result};
use crate::CoordinatePair;

/// An ordered sequence of path commands.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Path {
    commands: Vec<Command>,
}

impl Path {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Apply `transformation` to every point of the path, see [`transform`].
    pub fn transform<F>(&self, transformation: F) -> Result<Path>
    where
        F: FnMut(CoordinatePair) -> CoordinatePair,
    {
        transform(&self.commands, transformation).map(Path::new)
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        tokenize(s).map(Path::new)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_ascii_whitespace()
}

fn parse_number(fragment: &str) -> Result<f64> {
    fragment
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| Error::MalformedNumber(fragment.to_string()))
}

/// Parse the text between two command letters into numbers.
fn parse_operands(text: &str) -> Result<Vec<f64>> {
    text.split(is_separator)
        .filter(|fragment| !fragment.is_empty())
        .map(parse_number)
        .collect()
}

fn finish_command(tag: Option<char>, text: &str, commands: &mut Vec<Command>) -> Result<()> {
    match tag {
        Some(tag) => {
            let operands = parse_operands(text)?;
            trace!("tokenize: {} with {} operands", tag, operands.len());
            commands.push(Command::new(tag, operands)?);
        }
        None => {
            if !text.chars().all(is_separator) {
                return Err(Error::MissingCommand(text.trim().to_string()));
            }
        }
    }
    Ok(())
}

/// Split a path-data string into commands.
///
/// Every command letter starts a new command; everything up to the next
/// letter are its operands, separated by commas and/or whitespace.
pub fn tokenize(expr: &str) -> Result<Vec<Command>> {
    trace!("tokenize");
    let mut commands = Vec::new();
    let mut tag: Option<char> = None;
    let mut operands = String::new();
    for c in expr.chars() {
        if CommandKind::from_tag(c).is_some() {
            finish_command(tag.replace(c), &operands, &mut commands)?;
            operands.clear();
        } else {
            operands.push(c);
        }
    }
    finish_command(tag, &operands, &mut commands)?;
    trace!("tokenize: Return {} commands", commands.len());
    Ok(commands)
}

/// Encode commands back into a path-data string.
pub fn encode(commands: &[Command]) -> String {
    commands.iter().map(ToString::to_string).collect()
}

fn check_operand_count(command: &Command, valid: bool) -> Result<()> {
    if valid {
        Ok(())
    } else {
        Err(Error::MalformedOperandCount {
            command: command.tag(),
            count: command.operands().len(),
        })
    }
}

/// Cursor position in the untransformed coordinate space.
#[derive(Debug)]
struct Cursor {
    current: CoordinatePair,
    /// Target of the next close-path. Cleared by a close-path and recorded
    /// again from `current` after every command.
    subpath_start: Option<CoordinatePair>,
}

impl Cursor {
    fn new() -> Self {
        Self {
            current: CoordinatePair::new(0.0, 0.0),
            subpath_start: None,
        }
    }
}

fn transform_point_pairs<F>(
    command: &Command,
    cursor: &mut Cursor,
    transformation: &mut F,
) -> Result<Command>
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    let operands = command.operands();
    check_operand_count(command, !operands.is_empty() && operands.len() % 2 == 0)?;

    let mut transformed = Vec::with_capacity(operands.len());
    for pair in operands.chunks_exact(2) {
        let point = transformation(CoordinatePair::new(pair[0], pair[1]));
        transformed.push(point.x);
        transformed.push(point.y);
    }

    let n = operands.len();
    cursor.current = CoordinatePair::new(operands[n - 2], operands[n - 1]);

    Ok(Command::from_kind(command.kind(), true, transformed))
}

/// Horizontal and vertical lines are emitted as plain lines, since their
/// image under an arbitrary transformation is generally not axis aligned.
fn transform_single_axis<F>(
    command: &Command,
    axis: Axis,
    cursor: &mut Cursor,
    transformation: &mut F,
) -> Result<Command>
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    let operands = command.operands();
    check_operand_count(command, !operands.is_empty())?;

    let mut transformed = Vec::with_capacity(operands.len() * 2);
    for &value in operands {
        let point = match axis {
            Axis::Horizontal => CoordinatePair::new(value, cursor.current.y),
            Axis::Vertical => CoordinatePair::new(cursor.current.x, value),
        };
        let point = transformation(point);
        transformed.push(point.x);
        transformed.push(point.y);
    }

    let last = operands[operands.len() - 1];
    match axis {
        Axis::Horizontal => cursor.current.x = last,
        Axis::Vertical => cursor.current.y = last,
    }

    Ok(Command::from_kind(CommandKind::LineTo, true, transformed))
}

fn transform_command<F>(
    command: &Command,
    cursor: &mut Cursor,
    transformation: &mut F,
) -> Result<Command>
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    match (command.coordinate_shape(), command.is_absolute()) {
        (CoordinateShape::Unsupported, _) => Err(Error::UnsupportedCommand(command.tag())),
        (CoordinateShape::NoOperand, _) => {
            check_operand_count(command, command.operands().is_empty())?;
            cursor.current = cursor.subpath_start.take().unwrap_or(cursor.current);
            Ok(Command::from_kind(CommandKind::ClosePath, true, Vec::new()))
        }
        // Relative operands are deltas from the current point and would
        // need to be resolved before transforming.
        (_, false) => Err(Error::UnsupportedCommand(command.tag())),
        (CoordinateShape::PointPairs, true) => {
            transform_point_pairs(command, cursor, transformation)
        }
        (CoordinateShape::SingleAxis(axis), true) => {
            transform_single_axis(command, axis, cursor, transformation)
        }
    }
}

/// Apply `transformation` to every point of the given commands.
///
/// The transformation is called once per coordinate pair (or per operand of
/// `H`/`V`), in the order the operands appear. `H` and `V` are rewritten to
/// `L`. Arcs and relative commands are rejected with
/// [`Error::UnsupportedCommand`].
pub fn transform<F>(commands: &[Command], mut transformation: F) -> Result<Vec<Command>>
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    trace!("transform");
    let mut cursor = Cursor::new();
    let mut transformed = Vec::with_capacity(commands.len());
    for command in commands {
        let result = transform_command(command, &mut cursor, &mut transformation)?;
        if cursor.subpath_start.is_none() {
            cursor.subpath_start = Some(cursor.current);
        }
        trace!("transform: {} -> {}", command, result);
        transformed.push(result);
    }
    Ok(transformed)
}
