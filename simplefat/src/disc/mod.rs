// Every mutating operation reads the whole image from the store, changes an in-memory copy and
// writes the whole image back. See `geometry.rs` for the layout.

mod allocation_table;
mod directory;
mod disc;
mod disc_info;
mod file_handle;
mod file_io;
mod image;
pub mod disc_store;

pub use allocation_table::TableEntry;
pub use directory::DirectoryEntry;
pub use disc::Disc;
pub use disc_info::DiscInfo;
pub use disc_store::DiscStore;
pub use file_handle::FileHandle;
pub use image::Image;
