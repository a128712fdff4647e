use super::Image;
use alloc::string::String;

/// A summary of the usage of a disc image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscInfo {
    label: String,
    number_of_files: u64,
    free_file_slots: u64,
    cluster_size: u64,
    data_cluster_count: u64,
    free_cluster_count: u64,
}

impl DiscInfo {
    pub fn from_image(image: &Image) -> Self {
        let geometry = image.geometry();
        let number_of_files = image.entries().len() as u64;

        return Self {
            label: image.label(),
            number_of_files,
            free_file_slots: geometry.directory_slots() as u64 - number_of_files,
            cluster_size: geometry.cluster_size() as u64,
            data_cluster_count: geometry.data_clusters() as u64,
            free_cluster_count: image.free_cluster_count() as u64,
        };
    }

    #[inline]
    pub fn label(&self) -> &str {
        return &self.label;
    }

    #[inline]
    pub fn number_of_files(&self) -> u64 {
        return self.number_of_files;
    }

    #[inline]
    pub fn free_file_slots(&self) -> u64 {
        return self.free_file_slots;
    }

    #[inline]
    pub fn cluster_size(&self) -> u64 {
        return self.cluster_size;
    }

    #[inline]
    pub fn data_cluster_count(&self) -> u64 {
        return self.data_cluster_count;
    }

    #[inline]
    pub fn free_cluster_count(&self) -> u64 {
        return self.free_cluster_count;
    }

    /// Bytes that can still be given to files.
    #[inline]
    pub fn free_space(&self) -> u64 {
        return self.free_cluster_count * self.cluster_size;
    }
}
