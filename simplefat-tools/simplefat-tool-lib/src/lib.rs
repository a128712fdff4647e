mod error;
mod handler;
mod logger;
mod manager;

pub use error::{ToolError, ToolErrorKind};
pub use handler::Handler;
pub use logger::{init_logger, StderrLogger};
pub use manager::Manager;
use byte_unit::Byte;
use simplefat::{Geometry, DEFAULT_CLUSTER_SIZE};
use std::io::{BufRead, Write};

pub fn sized_string_to_u64(string: &str) -> Option<u64> {
    return match Byte::from_str(string) {
        Ok(b) => Some(b.get_bytes() as u64),
        Err(_) => None,
    };
}

pub fn u64_to_sized_string(n: u64) -> String {
    return Byte::from(n).get_appropriate_unit(false).to_string();
}

/// Builds a geometry from the optional `--size` and `--cluster-size` values of a tool.
pub fn geometry_from_arguments(
    size: Option<&str>,
    cluster_size: Option<&str>,
) -> Result<Geometry, ToolError> {
    let default = Geometry::default();

    let disc_size = match size {
        Some(s) => match sized_string_to_u64(s) {
            Some(n) => n as usize,
            None => return Err(ToolError::invalid_argument(&format!("Invalid size: \"{}\"", s))),
        },
        None => default.disc_size(),
    };

    let cluster_size = match cluster_size {
        Some(s) => match sized_string_to_u64(s) {
            Some(n) => n as usize,
            None => {
                return Err(ToolError::invalid_argument(&format!(
                    "Invalid cluster size: \"{}\"",
                    s
                )))
            }
        },
        None => DEFAULT_CLUSTER_SIZE,
    };

    return match Geometry::new(disc_size, cluster_size) {
        Ok(g) => Ok(g),
        Err(e) => Err(ToolError::new(
            ToolErrorKind::Geometry(e),
            &format!(
                "A {} byte disc with {} byte clusters cannot be used: {}",
                disc_size, cluster_size, e
            ),
        )),
    };
}

/// The geometry of an existing image: its disc size is the length of the file.
pub fn image_geometry(
    handler: &Handler,
    cluster_size: Option<&str>,
) -> Result<Geometry, ToolError> {
    let size = handler.image_size()?.to_string();

    return geometry_from_arguments(Some(&size), cluster_size);
}

/// Asks a y/n question on stdout. Anything other than "y" or "Y" is a no.
pub fn confirm(question: &str) -> Result<bool, ToolError> {
    let stdin = std::io::stdin();

    return ask(question, &mut stdin.lock(), &mut std::io::stdout());
}

fn ask<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool, ToolError> {
    match write!(output, "{} (y/n) ", question).and_then(|_| output.flush()) {
        Ok(_) => (),
        Err(e) => return Err(ToolError::io("Failed to show the question", &e)),
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => (),
        Err(e) => return Err(ToolError::io("Failed to read response", &e)),
    }

    let answer = answer.trim_end_matches(|c| c == '\n' || c == '\r');

    return Ok(answer == "y" || answer == "Y");
}
