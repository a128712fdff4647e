use crate::FatErrorConvertible;
use alloc::vec::Vec;

/// Implementors can define their own error type but must be able to load and persist a whole
/// disc image, e.g. from an image file or a vector held in memory.
pub trait DiscStore<E: FatErrorConvertible> {
    /// Return the stored image, or `None` if no image has been persisted yet.
    fn load(&self) -> Result<Option<Vec<u8>>, E>;

    /// Replace the stored image with `image`.
    fn persist(&mut self, image: &[u8]) -> Result<(), E>;
}
