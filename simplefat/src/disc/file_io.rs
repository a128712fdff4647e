use super::{FileHandle, Image, TableEntry};
use crate::ImageError;
use alloc::vec::Vec;

/// What a write got done before it finished or failed.
#[derive(Debug, Default)]
pub(crate) struct WriteProgress {
    pub written: usize,
    /// `(old tail, new cluster)` for every extension of the chain.
    pub extensions: Vec<(u8, u8)>,
}

/// The cluster and in-cluster offset where new bytes of a file go: the start of the first
/// cluster of the chain whose data is all zero, or else the byte after the last non-zero byte of
/// the terminal cluster. Each candidate cluster is scanned byte by byte.
pub(crate) fn find_append_point(image: &Image, head: u8) -> Result<(u8, usize), ImageError> {
    let chain = image.chain(head)?;

    for cluster in chain.iter() {
        if image.is_cluster_empty(*cluster)? {
            return Ok((*cluster, 0));
        }
    }

    let tail = match chain.last() {
        Some(t) => *t,
        None => return Err(ImageError::CorruptedChain(head)),
    };

    let used = match image.cluster(tail)?.iter().rposition(|b| *b != 0) {
        Some(last) => last + 1,
        None => 0,
    };

    return Ok((tail, used));
}

/// Writes `data` into the chain of `handle` from its append point, extending the chain one
/// cluster at a time when a byte would not fit. A cluster is only added once there is a byte to
/// put in it, so data filling a cluster exactly does not extend the chain.
///
/// Bytes written before an error stay in the image and are counted in `progress`.
pub(crate) fn write_chain(
    image: &mut Image,
    handle: &mut FileHandle,
    data: &[u8],
    progress: &mut WriteProgress,
) -> Result<(), ImageError> {
    handle.set_active_cluster(handle.position());

    let geometry = image.geometry();
    let (mut cluster, mut offset) = find_append_point(image, handle.position())?;
    handle.set_active_cluster(cluster);

    for byte in data.iter() {
        if offset == geometry.cluster_size() {
            cluster = next_cluster(image, handle, cluster, progress)?;
            offset = 0;
            handle.set_active_cluster(cluster);
        }

        let absolute = geometry.cluster_byte_range(cluster as usize)?.start + offset;

        if absolute >= geometry.disc_size() {
            return Err(ImageError::DiscFull);
        }

        image.set_byte(absolute, *byte)?;
        offset += 1;
        progress.written += 1;
    }

    return Ok(());
}

/// The cluster following `cluster`. At the end of the chain a new one is allocated and the
/// directory length of the file grows by one.
fn next_cluster(
    image: &mut Image,
    handle: &mut FileHandle,
    cluster: u8,
    progress: &mut WriteProgress,
) -> Result<u8, ImageError> {
    match image.table_entry(cluster)? {
        TableEntry::Next(next) => return Ok(next),
        TableEntry::Free => return Err(ImageError::CorruptedChain(cluster)),
        TableEntry::EndOfChain => (),
    }

    // Check the length byte can grow before the chain does.
    match image.entry_at(handle.origin())? {
        Some(entry) if entry.length() < u8::MAX => (),
        Some(_) => return Err(ImageError::LengthOverflow),
        None => return Err(ImageError::OutOfRange(handle.origin())),
    }

    let next = image.extend_chain(cluster)?;
    let length = image.bump_length(handle.origin())?;

    handle.set_size(length);
    progress.extensions.push((cluster, next));

    return Ok(next);
}

/// Every data byte of the chain starting at `head`, without the zero padding after the end of
/// the data.
pub(crate) fn read_chain(image: &Image, head: u8) -> Result<Vec<u8>, ImageError> {
    let mut contents = Vec::new();

    for cluster in image.chain(head)? {
        contents.extend_from_slice(image.cluster(cluster)?);
    }

    let end = match contents.iter().rposition(|b| *b != 0) {
        Some(last) => last + 1,
        None => 0,
    };
    contents.truncate(end);

    return Ok(contents);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Geometry, DEFAULT_LABEL};
    use alloc::vec;

    fn new_file(image: &mut Image) -> FileHandle {
        let cluster = image.allocate_cluster().unwrap();
        let entry = image.write_entry(200, b'a', cluster).unwrap();

        return FileHandle::new(0, 0, 200, &entry);
    }

    fn formatted() -> Image {
        let mut image = Image::blank(Geometry::default());
        image.format(DEFAULT_LABEL).unwrap();

        return image;
    }

    #[test]
    fn test_append_point_fresh_file() {
        let mut image = formatted();
        let handle = new_file(&mut image);

        assert_eq!(find_append_point(&image, handle.position()).unwrap(), (3, 0));
    }

    #[test]
    fn test_append_point_partial_cluster() {
        let mut image = formatted();
        let mut handle = new_file(&mut image);
        let mut progress = WriteProgress::default();

        write_chain(&mut image, &mut handle, &[b'a'; 42], &mut progress).unwrap();

        assert_eq!(find_append_point(&image, 3).unwrap(), (3, 42));
    }

    #[test]
    fn test_exact_cluster_does_not_extend() {
        let mut image = formatted();
        let mut handle = new_file(&mut image);
        let mut progress = WriteProgress::default();

        write_chain(&mut image, &mut handle, &[b'a'; 100], &mut progress).unwrap();

        assert_eq!(progress.written, 100);
        assert!(progress.extensions.is_empty());
        assert_eq!(handle.size(), 1);
        assert_eq!(image.chain(3).unwrap(), vec![3]);
        assert_eq!(find_append_point(&image, 3).unwrap(), (3, 100));
    }

    #[test]
    fn test_extension_on_next_byte() {
        let mut image = formatted();
        let mut handle = new_file(&mut image);
        let mut progress = WriteProgress::default();

        write_chain(&mut image, &mut handle, &[b'a'; 100], &mut progress).unwrap();
        write_chain(&mut image, &mut handle, b"b", &mut progress).unwrap();

        assert_eq!(progress.extensions, vec![(3, 4)]);
        assert_eq!(handle.size(), 2);
        assert_eq!(handle.active_cluster(), 4);
        assert_eq!(image.as_bytes()[400], b'b');
    }

    #[test]
    fn test_append_into_empty_inner_cluster() {
        let mut image = formatted();
        let mut handle = new_file(&mut image);
        let mut progress = WriteProgress::default();

        write_chain(&mut image, &mut handle, &[b'a'; 150], &mut progress).unwrap();

        // Wipe the second cluster by hand: the scan must stop there.
        image.zero_cluster(4).unwrap();

        assert_eq!(find_append_point(&image, 3).unwrap(), (4, 0));
    }

    #[test]
    fn test_read_chain_strips_padding() {
        let mut image = formatted();
        let mut handle = new_file(&mut image);
        let mut progress = WriteProgress::default();

        let data: Vec<u8> = (0..250u32).map(|i| (i % 200 + 1) as u8).collect();
        write_chain(&mut image, &mut handle, &data, &mut progress).unwrap();

        assert_eq!(read_chain(&image, 3).unwrap(), data);
    }
}
