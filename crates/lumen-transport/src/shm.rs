//! Shared-memory buffer mapping.
//!
//! Clients hand the compositor a file descriptor backing their pixel
//! buffers; [`ShmMapping`] turns it into a process-local byte view
//! (`MAP_SHARED`, read+write) so buffer contents are reachable without
//! copying.

use std::os::fd::{AsRawFd, BorrowedFd};

use memmap2::{MmapMut, MmapOptions};

use crate::errors::{Result, TransportError};

/// A mapped shared-memory view.
///
/// The view lives until [`unmap`](Self::unmap) or drop. Unmap is idempotent,
/// and an unmapped view is unrepresentable rather than merely invalid: the
/// accessors return `None` once the mapping is gone.
///
/// No internal synchronization: the caller guarantees no reader holds the
/// byte view across an unmap.
#[derive(Debug)]
pub struct ShmMapping {
    map: Option<MmapMut>,
    len: usize,
}

impl ShmMapping {
    /// Map `len` bytes of `fd` into this process.
    ///
    /// The descriptor only needs to stay open for the duration of this call;
    /// the mapping keeps the underlying object alive.
    ///
    /// # Errors
    ///
    /// [`TransportError::MapFailed`] when the kernel refuses the mapping
    /// (unmappable descriptor, zero length, no write permission). No view
    /// exists on failure.
    pub fn map(fd: BorrowedFd<'_>, len: usize) -> Result<Self> {
        // SAFETY: the mapping is MAP_SHARED over a client-supplied fd; the
        // session layer guarantees exclusive unmap discipline. A client that
        // truncates the backing object can still fault reads, the same
        // exposure every shm compositor accepts.
        let map = unsafe { MmapOptions::new().len(len).map_mut(fd.as_raw_fd()) }
            .map_err(|source| TransportError::MapFailed { size: len, source })?;
        Ok(Self { map: Some(map), len })
    }

    /// Size the view was mapped with.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view was mapped with zero length (never true for a live
    /// mapping, since the kernel rejects empty maps).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the view is still mapped.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.map.is_some()
    }

    /// The byte view, or `None` after unmap.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.map.as_deref()
    }

    /// The mutable byte view, or `None` after unmap.
    #[must_use]
    pub fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        self.map.as_deref_mut()
    }

    /// Release the mapping. A no-op when already unmapped.
    pub fn unmap(&mut self) {
        self.map = None;
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::Write, os::fd::AsFd};

    use super::*;

    fn backing_file(len: u64) -> File {
        let file = tempfile::tempfile().unwrap();
        file.set_len(len).unwrap();
        file
    }

    #[test]
    fn maps_and_reads_written_bytes() {
        let mut file = backing_file(4096);
        file.write_all(b"pixels").unwrap();

        let mapping = ShmMapping::map(file.as_fd(), 4096).unwrap();
        assert_eq!(mapping.len(), 4096);
        assert_eq!(&mapping.bytes().unwrap()[..6], b"pixels");
    }

    #[test]
    fn writes_are_visible_through_the_file() {
        use std::io::{Read, Seek, SeekFrom};

        let mut file = backing_file(64);
        let mut mapping = ShmMapping::map(file.as_fd(), 64).unwrap();
        mapping.bytes_mut().unwrap()[..4].copy_from_slice(b"abcd");
        mapping.unmap();

        let mut back = [0u8; 4];
        file.seek(SeekFrom::Start(0)).unwrap();
        file.read_exact(&mut back).unwrap();
        assert_eq!(&back, b"abcd");
    }

    #[test]
    fn unmap_is_idempotent_and_kills_the_view() {
        let file = backing_file(128);
        let mut mapping = ShmMapping::map(file.as_fd(), 128).unwrap();
        assert!(mapping.is_mapped());

        mapping.unmap();
        assert!(!mapping.is_mapped());
        assert!(mapping.bytes().is_none());
        assert!(mapping.bytes_mut().is_none());

        // second unmap succeeds as a no-op
        mapping.unmap();
        assert!(!mapping.is_mapped());
    }

    #[test]
    fn zero_length_mapping_fails() {
        let file = backing_file(0);
        let err = ShmMapping::map(file.as_fd(), 0).unwrap_err();
        assert!(matches!(err, TransportError::MapFailed { size: 0, .. }));
    }

    #[test]
    fn read_only_descriptor_fails_to_map() {
        // a writable view over a read-only fd is refused by the kernel
        let readonly = File::open("/dev/null").unwrap();
        let err = ShmMapping::map(readonly.as_fd(), 4096).unwrap_err();
        assert!(matches!(err, TransportError::MapFailed { size: 4096, .. }));
    }
}
