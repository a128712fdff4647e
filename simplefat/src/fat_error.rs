use core::fmt::{Debug, Display};

macro_rules! enum_variant_stringify {
    ($self:expr, [$($var:ident),+]) => {
        match $self {
            $(
               $var => stringify!($var),
            )+
            _ => "",
        }
    }
}

pub trait FatErrorConvertible: Debug {
    /// Wraps an error raised by a disc store so it can be returned from a `Disc` operation.
    fn into_fat_error(self) -> FatError<Self>
    where
        Self: Sized,
    {
        return FatError::DiscError(self);
    }
}

/// Errors raised while inspecting or mutating an in-memory disc image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    /// No free data cluster or directory slot is left.
    DiscFull,
    /// Every cluster the allocation table can address is taken although the disc has more.
    AllocationTableFull,
    /// A cluster index or byte offset outside the disc.
    OutOfRange(usize),
    InvalidGeometry,
    InvalidImageSize { expected: usize, found: usize },
    InvalidLabel,
    /// A chain that links to a free, reserved or already visited cluster.
    CorruptedChain(u8),
    LengthOverflow,
}

impl Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use ImageError::*;

        match self {
            OutOfRange(index) => write!(f, "OutOfRange({})", index),
            InvalidImageSize { expected, found } => write!(
                f,
                "InvalidImageSize(expected {} bytes, found {})",
                expected, found
            ),
            CorruptedChain(cluster) => write!(f, "CorruptedChain(cluster {})", cluster),
            _ => write!(
                f,
                "{}",
                enum_variant_stringify!(
                    self,
                    [
                        DiscFull,
                        AllocationTableFull,
                        InvalidGeometry,
                        InvalidLabel,
                        LengthOverflow
                    ]
                )
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatError<E> {
    DiscFull,
    AllocationTableFull,
    OutOfRange(usize),
    InvalidGeometry,
    InvalidImageSize { expected: usize, found: usize },
    InvalidLabel,
    CorruptedChain(u8),
    LengthOverflow,
    /// The name is not exactly one non-NUL ASCII character.
    InvalidFilename,
    /// The handle was closed, deleted, or never issued by this disc.
    InvalidHandle,
    DiscError(E),
}

impl<E> From<ImageError> for FatError<E> {
    fn from(error: ImageError) -> Self {
        return match error {
            ImageError::DiscFull => FatError::DiscFull,
            ImageError::AllocationTableFull => FatError::AllocationTableFull,
            ImageError::OutOfRange(index) => FatError::OutOfRange(index),
            ImageError::InvalidGeometry => FatError::InvalidGeometry,
            ImageError::InvalidImageSize { expected, found } => {
                FatError::InvalidImageSize { expected, found }
            }
            ImageError::InvalidLabel => FatError::InvalidLabel,
            ImageError::CorruptedChain(cluster) => FatError::CorruptedChain(cluster),
            ImageError::LengthOverflow => FatError::LengthOverflow,
        };
    }
}

impl<E: Display> Display for FatError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use FatError::*;

        match self {
            DiscError(e) => write!(f, "Disc error: {}", e),
            OutOfRange(index) => write!(f, "OutOfRange({})", index),
            InvalidImageSize { expected, found } => write!(
                f,
                "InvalidImageSize(expected {} bytes, found {})",
                expected, found
            ),
            CorruptedChain(cluster) => write!(f, "CorruptedChain(cluster {})", cluster),
            _ => write!(
                f,
                "{}",
                enum_variant_stringify!(
                    self,
                    [
                        DiscFull,
                        AllocationTableFull,
                        InvalidGeometry,
                        InvalidLabel,
                        LengthOverflow,
                        InvalidFilename,
                        InvalidHandle
                    ]
                )
            ),
        }
    }
}
