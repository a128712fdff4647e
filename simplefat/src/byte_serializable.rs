/// Fixed-width records stored verbatim inside the disc image.
pub trait ByteSerializable {
    type BytesArrayType;

    fn to_bytes(&self) -> Self::BytesArrayType;

    /// Returns `None` when the bytes do not describe a record, e.g. an unused slot.
    fn from_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: core::marker::Sized;
}
