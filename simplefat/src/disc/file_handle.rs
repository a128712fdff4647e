use super::DirectoryEntry;

/// An open file. Handles live only in memory and are only valid for the `Disc` that issued them,
/// until the file is closed or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    disc_id: u64,
    id: u64,
    name: char,
    /// Clusters in the chain, mirrors the directory entry. Refreshed each time the handle is
    /// written through, so another handle growing the file is only seen on the next write.
    size: u8,
    /// Head of the chain.
    position: u8,
    /// Byte offset of the directory entry.
    origin: usize,
    /// The cluster the last write stopped in.
    active_cluster: u8,
}

impl FileHandle {
    pub(crate) fn new(disc_id: u64, id: u64, origin: usize, entry: &DirectoryEntry) -> Self {
        return Self {
            disc_id,
            id,
            name: entry.name(),
            size: entry.length(),
            position: entry.first_cluster(),
            origin,
            active_cluster: entry.first_cluster(),
        };
    }

    #[inline]
    pub(crate) fn disc_id(&self) -> u64 {
        return self.disc_id;
    }

    #[inline]
    pub(crate) fn id(&self) -> u64 {
        return self.id;
    }

    #[inline]
    pub fn name(&self) -> char {
        return self.name;
    }

    #[inline]
    pub fn size(&self) -> u8 {
        return self.size;
    }

    #[inline]
    pub fn position(&self) -> u8 {
        return self.position;
    }

    #[inline]
    pub fn origin(&self) -> usize {
        return self.origin;
    }

    #[inline]
    pub fn active_cluster(&self) -> u8 {
        return self.active_cluster;
    }

    pub(crate) fn set_size(&mut self, size: u8) {
        self.size = size;
    }

    pub(crate) fn set_active_cluster(&mut self, cluster: u8) {
        self.active_cluster = cluster;
    }
}
