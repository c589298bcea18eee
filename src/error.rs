#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid path command: {0:?}")]
    InvalidCommandKind(char),
    #[error("Malformed number in path data: {0:?}")]
    MalformedNumber(String),
    #[error("Unsupported path command: {0}")]
    UnsupportedCommand(char),
    #[error("Path command {command} cannot take {count} operand(s)")]
    MalformedOperandCount { command: char, count: usize },
    #[error("Path data does not start with a command: {0:?}")]
    MissingCommand(String),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("Missing attribute {0} on the root element")]
    MissingAttribute(String),
    #[error("Invalid coordinate attribute {name}={value:?}")]
    InvalidAttribute { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
