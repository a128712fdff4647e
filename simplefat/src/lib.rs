#![no_std]

extern crate alloc;

mod bitmap;
mod byte_serializable;
mod disc;
mod fat_error;
mod geometry;
mod observer;

pub use byte_serializable::ByteSerializable;
pub use disc::*;
pub use fat_error::{FatError, FatErrorConvertible, ImageError};
pub use geometry::*;
pub use observer::{DiscEvent, DiscObserver};
