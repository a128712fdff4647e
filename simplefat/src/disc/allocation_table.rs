use super::Image;
use crate::bitmap::BitMap;
use crate::{ImageError, END_OF_CHAIN, FREE_CLUSTER, RESERVED_CLUSTERS};
use alloc::vec::Vec;

/// The decoded status byte of one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEntry {
    Free,
    /// Last cluster of a chain, or a metadata cluster.
    EndOfChain,
    /// The chain continues at this cluster.
    Next(u8),
}

impl TableEntry {
    pub fn from_byte(byte: u8) -> Self {
        return match byte {
            FREE_CLUSTER => TableEntry::Free,
            END_OF_CHAIN => TableEntry::EndOfChain,
            next => TableEntry::Next(next),
        };
    }

    pub fn to_byte(self) -> u8 {
        return match self {
            TableEntry::Free => FREE_CLUSTER,
            TableEntry::EndOfChain => END_OF_CHAIN,
            TableEntry::Next(next) => next,
        };
    }
}

impl Image {
    pub fn table_entry(&self, cluster: u8) -> Result<TableEntry, ImageError> {
        let slot = self.geometry().allocation_table_slot(cluster as usize)?;

        return Ok(TableEntry::from_byte(self.byte(slot)?));
    }

    pub(crate) fn set_table_entry(
        &mut self,
        cluster: u8,
        entry: TableEntry,
    ) -> Result<(), ImageError> {
        let slot = self.geometry().allocation_table_slot(cluster as usize)?;

        return self.set_byte(slot, entry.to_byte());
    }

    /// Takes the lowest free data cluster, marks it as the end of a chain and returns its index.
    ///
    /// When nothing is free the error tells which resource ran out: `AllocationTableFull` when the
    /// disc has clusters the one-cluster table cannot address, `DiscFull` otherwise.
    pub fn allocate_cluster(&mut self) -> Result<u8, ImageError> {
        let addressable = self.geometry().addressable_clusters();

        for index in RESERVED_CLUSTERS as usize..addressable {
            let cluster = index as u8;

            if self.table_entry(cluster)? == TableEntry::Free {
                self.set_table_entry(cluster, TableEntry::EndOfChain)?;
                self.zero_cluster(cluster)?;

                return Ok(cluster);
            }
        }

        if addressable < self.geometry().cluster_count() {
            return Err(ImageError::AllocationTableFull);
        }

        return Err(ImageError::DiscFull);
    }

    /// Appends a fresh cluster after `tail`, the current end of a chain, and returns it.
    /// Nothing is changed unless both the allocation and the link succeed.
    pub fn extend_chain(&mut self, tail: u8) -> Result<u8, ImageError> {
        if tail < RESERVED_CLUSTERS || self.table_entry(tail)? != TableEntry::EndOfChain {
            return Err(ImageError::CorruptedChain(tail));
        }

        let cluster = self.allocate_cluster()?;
        self.set_table_entry(tail, TableEntry::Next(cluster))?;

        return Ok(cluster);
    }

    /// The clusters of the chain starting at `head`, in order.
    ///
    /// Fails with `CorruptedChain` on a link to a free, reserved or unaddressable cluster and on
    /// a cluster reached twice, so a looping table cannot hang the walk.
    pub fn chain(&self, head: u8) -> Result<Vec<u8>, ImageError> {
        let mut visited = BitMap::new(self.geometry().addressable_clusters());
        let mut chain = Vec::new();
        let mut current = head;

        loop {
            if current < RESERVED_CLUSTERS || visited.test_and_set(current as usize) {
                return Err(ImageError::CorruptedChain(current));
            }

            chain.push(current);

            match self.table_entry(current)? {
                TableEntry::EndOfChain => return Ok(chain),
                TableEntry::Next(next) => current = next,
                TableEntry::Free => return Err(ImageError::CorruptedChain(current)),
            }
        }
    }

    /// Frees `length` clusters starting at `head`, following the links in the table. Both the
    /// table entries and the cluster contents are zeroed. The directory's length is trusted:
    /// the walk stops early only at the end of the chain or at an already free cluster.
    /// Returns the number of clusters freed.
    pub fn free_chain(&mut self, head: u8, length: u8) -> Result<u8, ImageError> {
        let mut visited = BitMap::new(self.geometry().addressable_clusters());
        let mut clusters = Vec::new();
        let mut current = head;

        // Walk first so a corrupted chain leaves the image untouched.
        while clusters.len() < length as usize {
            if current < RESERVED_CLUSTERS || visited.test_and_set(current as usize) {
                return Err(ImageError::CorruptedChain(current));
            }

            let entry = self.table_entry(current)?;

            if entry == TableEntry::Free {
                break;
            }

            clusters.push(current);

            match entry {
                TableEntry::Next(next) => current = next,
                _ => break,
            }
        }

        for cluster in clusters.iter() {
            self.set_table_entry(*cluster, TableEntry::Free)?;
            self.zero_cluster(*cluster)?;
        }

        return Ok(clusters.len() as u8);
    }

    /// The number of data clusters not owned by any file.
    pub fn free_cluster_count(&self) -> usize {
        let addressable = self.geometry().addressable_clusters();

        return (RESERVED_CLUSTERS as usize..addressable)
            .filter(|index| self.table_entry(*index as u8) == Ok(TableEntry::Free))
            .count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Geometry, DEFAULT_LABEL};
    use alloc::vec;

    fn formatted(geometry: Geometry) -> Image {
        let mut image = Image::blank(geometry);
        image.format(DEFAULT_LABEL).unwrap();

        return image;
    }

    #[test]
    fn test_entry_encoding() {
        assert_eq!(TableEntry::from_byte(0), TableEntry::Free);
        assert_eq!(TableEntry::from_byte(255), TableEntry::EndOfChain);
        assert_eq!(TableEntry::from_byte(17), TableEntry::Next(17));
        assert_eq!(TableEntry::Next(17).to_byte(), 17);
    }

    #[test]
    fn test_allocate_ascending() {
        let mut image = formatted(Geometry::default());

        assert_eq!(image.allocate_cluster().unwrap(), 3);
        assert_eq!(image.allocate_cluster().unwrap(), 4);
        assert_eq!(image.as_bytes()[103], 255);
        assert_eq!(image.as_bytes()[104], 255);
        assert_eq!(image.free_cluster_count(), 25);
    }

    #[test]
    fn test_allocate_reuses_lowest_free() {
        let mut image = formatted(Geometry::default());

        for _ in 0..5 {
            image.allocate_cluster().unwrap();
        }

        assert_eq!(image.free_chain(5, 1).unwrap(), 1);
        assert_eq!(image.allocate_cluster().unwrap(), 5);
    }

    #[test]
    fn test_allocate_disc_full() {
        let mut image = formatted(Geometry::default());

        for _ in 0..27 {
            image.allocate_cluster().unwrap();
        }

        assert_eq!(image.allocate_cluster(), Err(ImageError::DiscFull));
        assert_eq!(image.free_cluster_count(), 0);
    }

    #[test]
    fn test_allocate_table_full() {
        let mut image = formatted(Geometry::new(3072, 10).unwrap());

        for _ in 0..7 {
            image.allocate_cluster().unwrap();
        }

        assert_eq!(image.allocate_cluster(), Err(ImageError::AllocationTableFull));
    }

    #[test]
    fn test_extend_chain() {
        let mut image = formatted(Geometry::default());

        let head = image.allocate_cluster().unwrap();
        let second = image.extend_chain(head).unwrap();
        let third = image.extend_chain(second).unwrap();

        assert_eq!(image.table_entry(head).unwrap(), TableEntry::Next(second));
        assert_eq!(image.table_entry(second).unwrap(), TableEntry::Next(third));
        assert_eq!(image.table_entry(third).unwrap(), TableEntry::EndOfChain);
        assert_eq!(image.chain(head).unwrap(), vec![3, 4, 5]);
    }

    #[test]
    fn test_extend_chain_requires_tail() {
        let mut image = formatted(Geometry::default());

        let head = image.allocate_cluster().unwrap();
        image.extend_chain(head).unwrap();

        assert_eq!(image.extend_chain(head), Err(ImageError::CorruptedChain(head)));
        assert_eq!(image.extend_chain(2), Err(ImageError::CorruptedChain(2)));
    }

    #[test]
    fn test_extend_chain_full_leaves_tail() {
        let mut image = formatted(Geometry::default());

        let head = image.allocate_cluster().unwrap();
        let mut tail = head;

        for _ in 0..26 {
            tail = image.extend_chain(tail).unwrap();
        }

        let before = image.clone();

        assert_eq!(image.extend_chain(tail), Err(ImageError::DiscFull));
        assert_eq!(image, before);
    }

    #[test]
    fn test_free_chain() {
        let mut image = formatted(Geometry::default());

        let head = image.allocate_cluster().unwrap();
        let second = image.extend_chain(head).unwrap();
        image.cluster_mut(second).unwrap()[0] = b'x';

        assert_eq!(image.free_chain(head, 2).unwrap(), 2);
        assert_eq!(image.table_entry(head).unwrap(), TableEntry::Free);
        assert_eq!(image.table_entry(second).unwrap(), TableEntry::Free);
        assert!(image.is_cluster_empty(second).unwrap());
        assert_eq!(image.free_cluster_count(), 27);
    }

    #[test]
    fn test_free_chain_trusts_length() {
        let mut image = formatted(Geometry::default());

        let head = image.allocate_cluster().unwrap();
        let second = image.extend_chain(head).unwrap();

        assert_eq!(image.free_chain(head, 1).unwrap(), 1);
        assert_eq!(image.table_entry(second).unwrap(), TableEntry::EndOfChain);
    }

    #[test]
    fn test_cycle_detected() {
        let mut image = formatted(Geometry::default());

        let head = image.allocate_cluster().unwrap();
        let second = image.extend_chain(head).unwrap();
        image.set_table_entry(second, TableEntry::Next(head)).unwrap();

        assert_eq!(image.chain(head), Err(ImageError::CorruptedChain(head)));

        let before = image.clone();
        assert_eq!(image.free_chain(head, 5), Err(ImageError::CorruptedChain(head)));
        assert_eq!(image, before);
    }

    #[test]
    fn test_link_into_metadata_detected() {
        let mut image = formatted(Geometry::default());

        let head = image.allocate_cluster().unwrap();
        image.set_table_entry(head, TableEntry::Next(1)).unwrap();

        assert_eq!(image.chain(head), Err(ImageError::CorruptedChain(1)));
    }
}
