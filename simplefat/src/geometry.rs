// Disc layout, one cluster per region:
// identity label (cluster 0), allocation table (cluster 1), root directory (cluster 2), data clusters ...
// The allocation table holds one status byte per cluster index, the root directory a packed
// sequence of 3-byte entries. Bytes past the last whole cluster are never addressed.

use crate::ImageError;
use core::ops::Range;

pub const DEFAULT_DISC_SIZE: usize = 3_072;
pub const DEFAULT_CLUSTER_SIZE: usize = 100;
pub const DEFAULT_LABEL: &str = "SIMPLE FAT FILE SYSTEM SIMULATION";

pub const IDENTITY_CLUSTER: u8 = 0;
pub const TABLE_CLUSTER: u8 = 1;
pub const ROOT_CLUSTER: u8 = 2;
/// Clusters below this index hold metadata and are never handed to a file.
pub const RESERVED_CLUSTERS: u8 = 3;

/// Allocation table status byte of a free cluster.
pub const FREE_CLUSTER: u8 = 0;
/// Allocation table status byte of the last cluster of a chain or of a metadata cluster.
pub const END_OF_CHAIN: u8 = 255;

/// `[name, first_cluster, length]`
pub const DIRECTORY_ENTRY_SIZE: usize = 3;

/// Sizes of a disc image. All the other offsets of the layout are derived from these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    disc_size: usize,
    cluster_size: usize,
}

impl Geometry {
    /// Fails with `InvalidGeometry` unless the disc holds the three metadata clusters, at least one
    /// addressable data cluster and a root directory with room for one entry.
    pub fn new(disc_size: usize, cluster_size: usize) -> Result<Self, ImageError> {
        if cluster_size < DIRECTORY_ENTRY_SIZE {
            return Err(ImageError::InvalidGeometry);
        }

        let geometry = Self {
            disc_size,
            cluster_size,
        };

        if geometry.addressable_clusters() <= RESERVED_CLUSTERS as usize {
            return Err(ImageError::InvalidGeometry);
        }

        return Ok(geometry);
    }

    #[inline]
    pub fn disc_size(&self) -> usize {
        return self.disc_size;
    }

    #[inline]
    pub fn cluster_size(&self) -> usize {
        return self.cluster_size;
    }

    /// The number of whole clusters on the disc, metadata clusters included.
    #[inline]
    pub fn cluster_count(&self) -> usize {
        return self.disc_size / self.cluster_size;
    }

    /// The allocation table is a single cluster holding one byte per cluster index.
    #[inline]
    pub fn table_slots(&self) -> usize {
        return self.cluster_size;
    }

    /// Clusters that both exist and can be recorded in the allocation table. A link is one byte
    /// and 255 marks the end of a chain, so no index above 254 is ever addressable.
    pub fn addressable_clusters(&self) -> usize {
        return self
            .cluster_count()
            .min(self.table_slots())
            .min(END_OF_CHAIN as usize);
    }

    /// Clusters a file can be given.
    pub fn data_clusters(&self) -> usize {
        return self.addressable_clusters() - RESERVED_CLUSTERS as usize;
    }

    pub fn directory_slots(&self) -> usize {
        return self.cluster_size / DIRECTORY_ENTRY_SIZE;
    }

    /// The bytes `[start, start + cluster_size)` of cluster `index`.
    pub fn cluster_byte_range(&self, index: usize) -> Result<Range<usize>, ImageError> {
        if index >= self.cluster_count() {
            return Err(ImageError::OutOfRange(index));
        }

        let start = index * self.cluster_size;

        return Ok(start..start + self.cluster_size);
    }

    /// Byte offset of the allocation table entry of `cluster_index`.
    pub fn allocation_table_slot(&self, cluster_index: usize) -> Result<usize, ImageError> {
        if cluster_index >= self.addressable_clusters() {
            return Err(ImageError::OutOfRange(cluster_index));
        }

        return Ok(TABLE_CLUSTER as usize * self.cluster_size + cluster_index);
    }

    /// Byte offset of directory entry number `slot` inside the root directory cluster.
    pub fn directory_slot_offset(&self, slot: usize) -> Result<usize, ImageError> {
        if slot >= self.directory_slots() {
            return Err(ImageError::OutOfRange(slot));
        }

        return Ok(ROOT_CLUSTER as usize * self.cluster_size + slot * DIRECTORY_ENTRY_SIZE);
    }

    /// Inverse of `directory_slot_offset`. Offsets that do not start an entry are out of range.
    pub fn directory_slot(&self, offset: usize) -> Result<usize, ImageError> {
        let start = ROOT_CLUSTER as usize * self.cluster_size;

        if offset < start || (offset - start) % DIRECTORY_ENTRY_SIZE != 0 {
            return Err(ImageError::OutOfRange(offset));
        }

        let slot = (offset - start) / DIRECTORY_ENTRY_SIZE;

        if slot >= self.directory_slots() {
            return Err(ImageError::OutOfRange(offset));
        }

        return Ok(slot);
    }
}

impl Default for Geometry {
    fn default() -> Self {
        return Self {
            disc_size: DEFAULT_DISC_SIZE,
            cluster_size: DEFAULT_CLUSTER_SIZE,
        };
    }
}
