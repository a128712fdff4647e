use super::file_io::{self, WriteProgress};
use super::{DirectoryEntry, DiscInfo, DiscStore, FileHandle, Image, TableEntry};
use crate::{
    DiscEvent, DiscObserver, FatError, FatErrorConvertible, Geometry, ImageError, DEFAULT_LABEL,
};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

// Tags every `Disc` so handles issued by one are rejected by all the others.
static NEXT_DISC_ID: AtomicU64 = AtomicU64::new(0);

pub struct Disc<'a, 'b, E: FatErrorConvertible> {
    store: &'a mut dyn DiscStore<E>,
    observer: &'b mut dyn DiscObserver,

    geometry: Geometry,

    disc_id: u64,
    next_handle_id: u64,
    // Handle id -> directory entry offset, for every handle not yet closed or deleted.
    open_handles: BTreeMap<u64, usize>,
}

macro_rules! unwrap_error_fat_convertible {
    ($v:expr) => {
        match $v {
            Ok(val) => val,
            Err(e) => return Err(e.into_fat_error()),
        }
    };
}

impl<'a, 'b, E: FatErrorConvertible> Disc<'a, 'b, E> {
    /// Mounts the image held by the store using the default geometry. A store without an image
    /// gets a freshly formatted one.
    pub fn mount(
        store: &'a mut dyn DiscStore<E>,
        observer: &'b mut dyn DiscObserver,
    ) -> Result<Self, FatError<E>> {
        return Self::mount_with_geometry(store, observer, Geometry::default(), DEFAULT_LABEL);
    }

    /// Mounts the image held by the store. `label` is only used when a new image has to be
    /// formatted.
    pub fn mount_with_geometry(
        store: &'a mut dyn DiscStore<E>,
        observer: &'b mut dyn DiscObserver,
        geometry: Geometry,
        label: &str,
    ) -> Result<Self, FatError<E>> {
        let stored = unwrap_error_fat_convertible!(store.load());
        let mut disc = Self::new(store, observer, geometry);

        match stored {
            Some(bytes) => {
                let image = Image::from_bytes(bytes, geometry)?;
                let file_count = image.entries().len();

                disc.emit(DiscEvent::Mounted { file_count });
            }
            None => disc.write_fresh_image(label)?,
        }

        return Ok(disc);
    }

    /// Formats a new image over whatever the store holds.
    pub fn format(
        store: &'a mut dyn DiscStore<E>,
        observer: &'b mut dyn DiscObserver,
        geometry: Geometry,
        label: &str,
    ) -> Result<Self, FatError<E>> {
        let mut disc = Self::new(store, observer, geometry);
        disc.write_fresh_image(label)?;

        return Ok(disc);
    }

    fn new(
        store: &'a mut dyn DiscStore<E>,
        observer: &'b mut dyn DiscObserver,
        geometry: Geometry,
    ) -> Self {
        return Self {
            store,
            observer,
            geometry,
            disc_id: NEXT_DISC_ID.fetch_add(1, Ordering::Relaxed),
            next_handle_id: 0,
            open_handles: BTreeMap::new(),
        };
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        return self.geometry;
    }

    /// Opens the file called `name`, creating it with one empty cluster if it does not exist.
    /// `name` must be exactly one ASCII character other than NUL. Nothing is written to the
    /// store unless the file is created completely.
    pub fn open(&mut self, name: &str) -> Result<FileHandle, FatError<E>> {
        let name = Self::validate_filename(name)?;
        let mut image = self.load_image()?;

        if let Some((slot, entry)) = image.find_entry(name as u8) {
            self.emit(DiscEvent::FileReopened { name, slot });

            return Ok(self.issue_handle(slot, &entry));
        }

        let slot = image.find_free_slot()?;
        let cluster = image.allocate_cluster()?;
        let entry = image.write_entry(slot, name as u8, cluster)?;

        self.persist(&image)?;

        self.emit(DiscEvent::ClusterAllocated { cluster });
        self.emit(DiscEvent::FileCreated {
            name,
            slot,
            cluster,
        });

        return Ok(self.issue_handle(slot, &entry));
    }

    /// Replaces the contents of the file: the chain is cut back to its head cluster, which is
    /// wiped, then `data` is written from its start. Returns the number of bytes written.
    ///
    /// If the chain cannot grow far enough the bytes that fit are kept, the image is persisted and
    /// the error is returned.
    pub fn write(&mut self, handle: &mut FileHandle, data: &[u8]) -> Result<usize, FatError<E>> {
        let mut image = self.load_image()?;
        let entry = self.check_handle(&image, handle)?;

        // The table decides what gets cut, a stale length byte must not leak clusters.
        let chain = image.chain(entry.first_cluster())?;
        let freed = match chain.get(1) {
            Some(next) => image.free_chain(*next, (chain.len() - 1) as u8)?,
            None => 0,
        };

        image.set_table_entry(entry.first_cluster(), TableEntry::EndOfChain)?;
        image.zero_cluster(entry.first_cluster())?;
        image.set_length(handle.origin(), 1)?;
        handle.set_size(1);

        if freed > 0 {
            self.emit(DiscEvent::FileTruncated {
                name: handle.name(),
                freed,
            });
        }

        return self.stream(image, handle, data);
    }

    /// Adds `data` after the current contents of the file. Returns the number of bytes written.
    ///
    /// If the chain cannot grow far enough the bytes that fit are kept, the image is persisted and
    /// the error is returned.
    pub fn append(&mut self, handle: &mut FileHandle, data: &[u8]) -> Result<usize, FatError<E>> {
        let image = self.load_image()?;
        let entry = self.check_handle(&image, handle)?;
        handle.set_size(entry.length());

        return self.stream(image, handle, data);
    }

    /// Reads the whole file. Trailing zero bytes are padding and never part of the result.
    pub fn read(&self, handle: &FileHandle) -> Result<Vec<u8>, FatError<E>> {
        let image = self.load_image()?;
        let entry = self.check_handle(&image, handle)?;

        return Ok(file_io::read_chain(&image, entry.first_cluster())?);
    }

    /// Removes the file and frees its chain. The handle, and every other handle on the same
    /// file, becomes invalid. Returns the number of clusters freed.
    pub fn delete(&mut self, handle: &FileHandle) -> Result<u8, FatError<E>> {
        let mut image = self.load_image()?;
        let entry = self.check_handle(&image, handle)?;

        let freed = image.free_chain(entry.first_cluster(), entry.length())?;
        image.clear_entry(handle.origin())?;

        self.persist(&image)?;

        let origin = handle.origin();
        self.open_handles.retain(|_, o| *o != origin);

        self.emit(DiscEvent::FileDeleted {
            name: handle.name(),
            freed,
        });

        return Ok(freed);
    }

    /// Invalidates the handle. The image is not touched.
    pub fn close(&mut self, handle: FileHandle) -> Result<(), FatError<E>> {
        if handle.disc_id() != self.disc_id {
            return Err(FatError::InvalidHandle);
        }

        match self.open_handles.get(&handle.id()) {
            Some(origin) if *origin == handle.origin() => (),
            _ => return Err(FatError::InvalidHandle),
        }

        self.open_handles.remove(&handle.id());
        self.emit(DiscEvent::FileClosed {
            name: handle.name(),
        });

        return Ok(());
    }

    /// The directory entry of the file called `name`, without opening or creating it.
    pub fn lookup(&self, name: &str) -> Result<Option<DirectoryEntry>, FatError<E>> {
        let name = Self::validate_filename(name)?;
        let image = self.load_image()?;

        return Ok(image.find_entry(name as u8).map(|(_, entry)| entry));
    }

    /// Every file on the disc, in directory order.
    pub fn list_files(&self) -> Result<Vec<DirectoryEntry>, FatError<E>> {
        let image = self.load_image()?;

        return Ok(image.entries().into_iter().map(|(_, entry)| entry).collect());
    }

    /// The clusters owned by a file, head first.
    pub fn chain(&self, entry: &DirectoryEntry) -> Result<Vec<u8>, FatError<E>> {
        let image = self.load_image()?;

        return Ok(image.chain(entry.first_cluster())?);
    }

    pub fn disc_info(&self) -> Result<DiscInfo, FatError<E>> {
        let image = self.load_image()?;

        return Ok(DiscInfo::from_image(&image));
    }

    pub fn label(&self) -> Result<String, FatError<E>> {
        return Ok(self.load_image()?.label());
    }

    /// A copy of the raw image as currently stored.
    pub fn image(&self) -> Result<Image, FatError<E>> {
        return self.load_image();
    }

    /// Runs the write engine, persists whatever it managed to write and reports the outcome.
    fn stream(
        &mut self,
        mut image: Image,
        handle: &mut FileHandle,
        data: &[u8],
    ) -> Result<usize, FatError<E>> {
        let mut progress = WriteProgress::default();
        let result = file_io::write_chain(&mut image, handle, data, &mut progress);

        self.persist(&image)?;

        for (tail, cluster) in progress.extensions.iter() {
            self.emit(DiscEvent::ClusterAllocated { cluster: *cluster });
            self.emit(DiscEvent::ChainExtended {
                name: handle.name(),
                tail: *tail,
                cluster: *cluster,
            });
        }

        return match result {
            Ok(()) => Ok(progress.written),
            Err(error) => {
                self.emit(DiscEvent::WriteAborted {
                    name: handle.name(),
                    written: progress.written,
                    error,
                });

                Err(error.into())
            }
        };
    }

    /// The directory entry behind `handle`, if the handle is still live and the entry still
    /// describes the same file.
    fn check_handle(
        &self,
        image: &Image,
        handle: &FileHandle,
    ) -> Result<DirectoryEntry, FatError<E>> {
        if handle.disc_id() != self.disc_id {
            return Err(FatError::InvalidHandle);
        }

        match self.open_handles.get(&handle.id()) {
            Some(origin) if *origin == handle.origin() => (),
            _ => return Err(FatError::InvalidHandle),
        }

        return match image.entry_at(handle.origin()) {
            Ok(Some(entry))
                if entry.name() == handle.name() && entry.first_cluster() == handle.position() =>
            {
                Ok(entry)
            }
            _ => Err(FatError::InvalidHandle),
        };
    }

    fn issue_handle(&mut self, slot: usize, entry: &DirectoryEntry) -> FileHandle {
        let id = self.next_handle_id;
        self.next_handle_id += 1;
        self.open_handles.insert(id, slot);

        return FileHandle::new(self.disc_id, id, slot, entry);
    }

    fn validate_filename(name: &str) -> Result<char, FatError<E>> {
        let mut chars = name.chars();

        return match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() && c != '\0' => Ok(c),
            _ => Err(FatError::InvalidFilename),
        };
    }

    fn write_fresh_image(&mut self, label: &str) -> Result<(), FatError<E>> {
        let mut image = Image::blank(self.geometry);
        image.format(label)?;

        self.persist(&image)?;
        self.emit(DiscEvent::Formatted);

        return Ok(());
    }

    fn load_image(&self) -> Result<Image, FatError<E>> {
        let bytes = match unwrap_error_fat_convertible!(self.store.load()) {
            Some(b) => b,
            None => {
                return Err(FatError::from(ImageError::InvalidImageSize {
                    expected: self.geometry.disc_size(),
                    found: 0,
                }))
            }
        };

        return Ok(Image::from_bytes(bytes, self.geometry)?);
    }

    fn persist(&mut self, image: &Image) -> Result<(), FatError<E>> {
        unwrap_error_fat_convertible!(self.store.persist(image.as_bytes()));

        return Ok(());
    }

    fn emit(&mut self, event: DiscEvent) {
        let at = self.observer.current_time();
        self.observer.notify(at, &event);
    }
}
