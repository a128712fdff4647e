use super::Image;
use crate::{ByteSerializable, ImageError, DIRECTORY_ENTRY_SIZE};
use alloc::vec::Vec;

/// One file of the flat root directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: u8,
    first_cluster: u8,
    /// Clusters in the chain, not bytes.
    length: u8,
}

impl DirectoryEntry {
    pub fn new(name: u8, first_cluster: u8, length: u8) -> Self {
        return Self {
            name,
            first_cluster,
            length,
        };
    }

    #[inline]
    pub fn name(&self) -> char {
        return self.name as char;
    }

    #[inline]
    pub fn first_cluster(&self) -> u8 {
        return self.first_cluster;
    }

    #[inline]
    pub fn length(&self) -> u8 {
        return self.length;
    }
}

impl ByteSerializable for DirectoryEntry {
    type BytesArrayType = [u8; DIRECTORY_ENTRY_SIZE];

    fn to_bytes(&self) -> Self::BytesArrayType {
        return [self.name, self.first_cluster, self.length];
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: core::marker::Sized,
    {
        if bytes.len() < DIRECTORY_ENTRY_SIZE || bytes[..DIRECTORY_ENTRY_SIZE] == [0u8; 3] {
            return None;
        }

        return Some(Self::new(bytes[0], bytes[1], bytes[2]));
    }
}

impl Image {
    /// Offset of the lowest unused directory slot.
    pub fn find_free_slot(&self) -> Result<usize, ImageError> {
        for slot in 0..self.geometry().directory_slots() {
            let offset = self.geometry().directory_slot_offset(slot)?;

            if self.entry_at(offset)?.is_none() {
                return Ok(offset);
            }
        }

        return Err(ImageError::DiscFull);
    }

    /// Records a new file with a one-cluster chain.
    pub fn write_entry(
        &mut self,
        offset: usize,
        name: u8,
        first_cluster: u8,
    ) -> Result<DirectoryEntry, ImageError> {
        let entry = DirectoryEntry::new(name, first_cluster, 1);
        self.store_entry(offset, &entry.to_bytes())?;

        return Ok(entry);
    }

    pub fn clear_entry(&mut self, offset: usize) -> Result<(), ImageError> {
        return self.store_entry(offset, &[0u8; DIRECTORY_ENTRY_SIZE]);
    }

    /// Adds one cluster to the recorded chain length and returns the new length.
    pub fn bump_length(&mut self, offset: usize) -> Result<u8, ImageError> {
        let entry = match self.entry_at(offset)? {
            Some(e) => e,
            None => return Err(ImageError::OutOfRange(offset)),
        };

        let length = match entry.length().checked_add(1) {
            Some(l) => l,
            None => return Err(ImageError::LengthOverflow),
        };

        self.set_byte(offset + 2, length)?;

        return Ok(length);
    }

    pub(crate) fn set_length(&mut self, offset: usize, length: u8) -> Result<(), ImageError> {
        self.geometry().directory_slot(offset)?;

        return self.set_byte(offset + 2, length);
    }

    /// The entry stored at `offset`, or `None` for an unused slot.
    pub fn entry_at(&self, offset: usize) -> Result<Option<DirectoryEntry>, ImageError> {
        self.geometry().directory_slot(offset)?;

        let bytes = [
            self.byte(offset)?,
            self.byte(offset + 1)?,
            self.byte(offset + 2)?,
        ];

        return Ok(DirectoryEntry::from_bytes(&bytes));
    }

    /// The lowest slot holding a file called `name`, with its offset.
    pub fn find_entry(&self, name: u8) -> Option<(usize, DirectoryEntry)> {
        return self
            .entries()
            .into_iter()
            .find(|(_, entry)| entry.name == name);
    }

    /// Every used slot, lowest offset first.
    pub fn entries(&self) -> Vec<(usize, DirectoryEntry)> {
        let mut entries = Vec::new();

        for slot in 0..self.geometry().directory_slots() {
            let offset = match self.geometry().directory_slot_offset(slot) {
                Ok(o) => o,
                Err(_) => break,
            };

            if let Ok(Some(entry)) = self.entry_at(offset) {
                entries.push((offset, entry));
            }
        }

        return entries;
    }

    fn store_entry(
        &mut self,
        offset: usize,
        bytes: &[u8; DIRECTORY_ENTRY_SIZE],
    ) -> Result<(), ImageError> {
        self.geometry().directory_slot(offset)?;

        for (i, b) in bytes.iter().enumerate() {
            self.set_byte(offset + i, *b)?;
        }

        return Ok(());
    }
}
