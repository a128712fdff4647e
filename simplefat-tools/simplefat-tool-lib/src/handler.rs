use crate::error::{ToolError, ToolErrorKind};
use simplefat::DiscStore;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Keeps the disc image in a host file. The whole image is read on every load and rewritten on
/// every persist.
pub struct Handler {
    path: PathBuf,
}

impl Handler {
    /// A handler for `path`, which does not have to exist yet. Mounting through a handler whose
    /// file is missing formats a new image there.
    pub fn new(path: String) -> Self {
        return Self {
            path: PathBuf::from(path),
        };
    }

    /// A handler for an image that must already exist.
    pub fn open(path: String) -> Result<Self, ToolError> {
        let handler = Self::new(path);

        if !handler.path.is_file() {
            return Err(ToolError::new(
                ToolErrorKind::MissingImage,
                &format!("No image exists at {}", handler.path.display()),
            ));
        }

        return Ok(handler);
    }

    /// The size of the image file in bytes.
    pub fn image_size(&self) -> Result<u64, ToolError> {
        return match std::fs::metadata(&self.path) {
            Ok(m) => Ok(m.len()),
            Err(e) => Err(ToolError::io("Could not determine file size", &e)),
        };
    }
}

impl DiscStore<ToolError> for Handler {
    fn load(&self) -> Result<Option<Vec<u8>>, ToolError> {
        return match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ToolError::io(
                &format!("Failed to read {}", self.path.display()),
                &e,
            )),
        };
    }

    fn persist(&mut self, image: &[u8]) -> Result<(), ToolError> {
        return match std::fs::write(&self.path, image) {
            Ok(_) => Ok(()),
            Err(e) => Err(ToolError::io(
                &format!("Failed to write {}", self.path.display()),
                &e,
            )),
        };
    }
}
