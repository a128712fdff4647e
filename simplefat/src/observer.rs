use crate::ImageError;
use chrono::DateTime;
use chrono::Utc;
use core::fmt::Debug;

/// Diagnostics a `Disc` reports while it works. None of them are needed for correctness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscEvent {
    Formatted,
    Mounted { file_count: usize },
    ClusterAllocated { cluster: u8 },
    ChainExtended { name: char, tail: u8, cluster: u8 },
    FileCreated { name: char, slot: usize, cluster: u8 },
    FileReopened { name: char, slot: usize },
    FileTruncated { name: char, freed: u8 },
    /// The bytes before the failure stay on the disc.
    WriteAborted {
        name: char,
        written: usize,
        error: ImageError,
    },
    FileDeleted { name: char, freed: u8 },
    FileClosed { name: char },
}

/// Provide host specific services and receive the diagnostics of a disc.
pub trait DiscObserver: Debug {
    fn current_time(&self) -> DateTime<Utc>;

    fn notify(&mut self, _at: DateTime<Utc>, _event: &DiscEvent) {}
}
