use simplefat::{FatErrorConvertible, ImageError};
use std::fmt::Formatter;

/// What went wrong in a tool, next to the message shown to the user.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ToolErrorKind {
    /// The image file the tool was pointed at does not exist.
    MissingImage,
    /// Reading or writing a host file, or the terminal, failed.
    Io(std::io::ErrorKind),
    /// A command line value could not be parsed.
    InvalidArgument,
    /// The requested sizes do not describe a usable disc.
    Geometry(ImageError),
}

#[derive(Debug, PartialEq, Clone)]
pub struct ToolError {
    kind: ToolErrorKind,
    message: String,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: &str) -> Self {
        return ToolError {
            kind,
            message: String::from(message),
        };
    }

    /// Wraps a host I/O failure. `context` says what was being done.
    pub fn io(context: &str, error: &std::io::Error) -> Self {
        return Self::new(
            ToolErrorKind::Io(error.kind()),
            &format!("{}. Error: {}", context, error),
        );
    }

    pub fn invalid_argument(message: &str) -> Self {
        return Self::new(ToolErrorKind::InvalidArgument, message);
    }

    #[inline]
    pub fn kind(&self) -> ToolErrorKind {
        return self.kind;
    }

    pub fn get_message(&self) -> String {
        return self.message.clone();
    }
}

impl FatErrorConvertible for ToolError {}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", self.message);
    }
}
