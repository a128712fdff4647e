use crate::{
    Geometry, ImageError, END_OF_CHAIN, IDENTITY_CLUSTER, RESERVED_CLUSTERS, ROOT_CLUSTER,
    TABLE_CLUSTER,
};
use alloc::{string::String, vec, vec::Vec};

/// The raw bytes of a disc. The length always equals the geometry's disc size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    bytes: Vec<u8>,
    geometry: Geometry,
}

impl Image {
    /// A zero-filled, unformatted image.
    pub fn blank(geometry: Geometry) -> Self {
        return Self {
            bytes: vec![0u8; geometry.disc_size()],
            geometry,
        };
    }

    pub fn from_bytes(bytes: Vec<u8>, geometry: Geometry) -> Result<Self, ImageError> {
        if bytes.len() != geometry.disc_size() {
            return Err(ImageError::InvalidImageSize {
                expected: geometry.disc_size(),
                found: bytes.len(),
            });
        }

        return Ok(Self { bytes, geometry });
    }

    /// Zeroes the image, writes the identity label and reserves the three metadata clusters.
    pub fn format(&mut self, label: &str) -> Result<(), ImageError> {
        if !label.is_ascii() {
            return Err(ImageError::InvalidLabel);
        }

        for b in self.bytes.iter_mut() {
            *b = 0;
        }

        let identity = self.cluster_mut(IDENTITY_CLUSTER)?;
        let length = label.len().min(identity.len());
        identity[..length].copy_from_slice(&label.as_bytes()[..length]);

        for cluster in &[IDENTITY_CLUSTER, TABLE_CLUSTER, ROOT_CLUSTER] {
            let slot = self.geometry.allocation_table_slot(*cluster as usize)?;
            self.bytes[slot] = END_OF_CHAIN;
        }

        return Ok(());
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        return self.geometry;
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        return &self.bytes;
    }

    /// The identity label up to its null padding.
    pub fn label(&self) -> String {
        let identity = match self.cluster(IDENTITY_CLUSTER) {
            Ok(c) => c,
            Err(_) => return String::new(),
        };

        let end = identity.iter().position(|b| *b == 0).unwrap_or(identity.len());

        return String::from_utf8_lossy(&identity[..end]).into_owned();
    }

    pub fn cluster(&self, index: u8) -> Result<&[u8], ImageError> {
        let range = self.geometry.cluster_byte_range(index as usize)?;

        return Ok(&self.bytes[range]);
    }

    pub(crate) fn cluster_mut(&mut self, index: u8) -> Result<&mut [u8], ImageError> {
        let range = self.geometry.cluster_byte_range(index as usize)?;

        return Ok(&mut self.bytes[range]);
    }

    /// Whether every byte of a cluster is zero, i.e. it holds no file data.
    pub fn is_cluster_empty(&self, index: u8) -> Result<bool, ImageError> {
        return Ok(self.cluster(index)?.iter().all(|b| *b == 0));
    }

    pub(crate) fn zero_cluster(&mut self, index: u8) -> Result<(), ImageError> {
        if index < RESERVED_CLUSTERS {
            return Err(ImageError::OutOfRange(index as usize));
        }

        for b in self.cluster_mut(index)?.iter_mut() {
            *b = 0;
        }

        return Ok(());
    }

    pub(crate) fn byte(&self, offset: usize) -> Result<u8, ImageError> {
        return match self.bytes.get(offset) {
            Some(b) => Ok(*b),
            None => Err(ImageError::OutOfRange(offset)),
        };
    }

    pub(crate) fn set_byte(&mut self, offset: usize, value: u8) -> Result<(), ImageError> {
        return match self.bytes.get_mut(offset) {
            Some(b) => {
                *b = value;
                Ok(())
            }
            None => Err(ImageError::OutOfRange(offset)),
        };
    }
}
