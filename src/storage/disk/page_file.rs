use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, trace, warn};

use crate::common::{
    page_offset, Cursor, PageData, PageNum, Result, StorageError, INVALID_PAGE_POS, MAX_PAGES,
    PAGE_SIZE,
};

/// PageFileHandle is an open page file: a headerless sequence of PAGE_SIZE
/// blocks addressed by page number.
///
/// The handle owns the underlying file. It tracks the number of whole pages
/// stored in the file and a cursor naming the page most recently read or
/// written, which the relative read operations navigate from.
///
/// A `Default` handle has never been opened; it, and any closed handle, fail
/// every operation with `StorageError::HandleNotInit` before touching storage.
#[derive(Debug, Default)]
pub struct PageFileHandle {
    /// Path the file was opened with
    file_name: String,
    /// Number of whole pages in the file
    total_pages: PageNum,
    /// Most recently touched page
    cursor: Cursor,
    /// The page file, `None` unless open
    file: Option<File>,
}

impl PageFileHandle {
    /// Creates a page file holding exactly one zeroed page.
    /// An existing file at `path` is truncated.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let name = path.to_string_lossy().to_string();
        if path.as_os_str().is_empty() {
            return Err(StorageError::FileNotFound { path: name });
        }

        let zeros = zeroed_block()?;
        let mut file = File::create(path).map_err(|source| StorageError::FileUnavailable {
            path: name.clone(),
            source,
        })?;

        file.write_all(&zeros)
            .map_err(|e| StorageError::write_failed(format!("initial page of {:?}", name), e))?;
        file.sync_all()
            .map_err(|e| StorageError::write_failed(format!("sync of {:?}", name), e))?;

        debug!("created page file {:?}", name);
        Ok(())
    }

    /// Opens an existing page file for reading and writing.
    /// Bytes past the last whole page are not counted and cannot be addressed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.to_string_lossy().to_string();
        if path.as_os_str().is_empty() {
            return Err(StorageError::FileNotFound { path: name });
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| StorageError::FileUnavailable {
                path: name.clone(),
                source,
            })?;

        let file_size = file
            .metadata()
            .map_err(|source| StorageError::FileUnavailable {
                path: name.clone(),
                source,
            })?
            .len();
        let total_pages = PageNum::try_from(file_size / PAGE_SIZE as u64).unwrap_or(MAX_PAGES);

        if file_size % PAGE_SIZE as u64 != 0 {
            debug!(
                "{:?} ends in a partial page ({} stray bytes)",
                name,
                file_size % PAGE_SIZE as u64
            );
        }
        debug!("opened page file {:?} with {} pages", name, total_pages);

        Ok(Self {
            file_name: name,
            total_pages,
            cursor: Cursor::Unset,
            file: Some(file),
        })
    }

    /// Removes a page file from the filesystem.
    ///
    /// Removing a file that still has an open handle is unspecified: the
    /// outcome is whatever the platform does with an unlinked open file.
    pub fn destroy<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let name = path.to_string_lossy().to_string();
        if path.as_os_str().is_empty() {
            return Err(StorageError::FileNotFound { path: name });
        }

        match fs::remove_file(path) {
            Ok(()) => {
                debug!("destroyed page file {:?}", name);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::FileNotFound { path: name })
            }
            Err(source) => Err(StorageError::RemoveFailed { path: name, source }),
        }
    }

    /// Closes the handle, syncing and releasing the file.
    ///
    /// The handle is reset to the closed state even when the final sync
    /// fails, so it can never be closed twice.
    pub fn close(&mut self) -> Result<()> {
        let file = self.file.take().ok_or(StorageError::HandleNotInit)?;
        let path = std::mem::take(&mut self.file_name);

        let synced = file.sync_all();
        drop(file);

        self.total_pages = 0;
        self.cursor = Cursor::Closed;

        match synced {
            Ok(()) => {
                debug!("closed page file {:?}", path);
                Ok(())
            }
            Err(source) => {
                warn!("closing {:?} failed: {}", path, source);
                Err(StorageError::CloseFailed { path, source })
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Returns the path the file was opened with, empty once closed.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the number of whole pages in the file.
    pub fn total_pages(&self) -> PageNum {
        self.total_pages
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the cursor page: 0 before any page is touched, -1 once closed.
    pub fn block_pos(&self) -> PageNum {
        self.cursor.reference()
    }

    /// Reads page `page` into `data`.
    ///
    /// If the file turns out shorter than its page count promises (it was
    /// truncated behind this handle's back), the missing tail of `data` is
    /// zero-filled.
    pub fn read_block(&mut self, page: PageNum, data: &mut PageData) -> Result<()> {
        let total_pages = self.total_pages;
        let file = self.file.as_mut().ok_or(StorageError::HandleNotInit)?;

        if !(0..total_pages).contains(&page) {
            return Err(StorageError::ReadNonExistingPage { page, total_pages });
        }

        file.seek(SeekFrom::Start(page_offset(page)))
            .map_err(|source| StorageError::ReadSeekFailed { page, source })?;

        let bytes_read =
            read_up_to(file, data).map_err(|source| StorageError::ReadFailed { page, source })?;
        if bytes_read < PAGE_SIZE {
            warn!(
                "short read of page {} in {:?}: {} of {} bytes, zero-filling",
                page, self.file_name, bytes_read, PAGE_SIZE
            );
            data[bytes_read..].fill(0);
        }

        trace!("read page {} of {:?}", page, self.file_name);
        self.cursor = Cursor::At(page);
        Ok(())
    }

    pub fn read_first(&mut self, data: &mut PageData) -> Result<()> {
        self.read_block(0, data)
    }

    /// Reads the page before the cursor. Fails at page 0 rather than wrapping.
    pub fn read_previous(&mut self, data: &mut PageData) -> Result<()> {
        self.ensure_open()?;
        self.read_block(self.cursor.reference().saturating_sub(1), data)
    }

    pub fn read_current(&mut self, data: &mut PageData) -> Result<()> {
        self.ensure_open()?;
        self.read_block(self.cursor.reference(), data)
    }

    pub fn read_next(&mut self, data: &mut PageData) -> Result<()> {
        self.ensure_open()?;
        self.read_block(self.cursor.reference().saturating_add(1), data)
    }

    pub fn read_last(&mut self, data: &mut PageData) -> Result<()> {
        self.ensure_open()?;
        self.read_block(self.total_pages - 1, data)
    }

    /// Writes `data` to page `page` and syncs it to the device.
    /// The page must already exist; use `append_empty_block` or
    /// `ensure_capacity` to grow the file.
    pub fn write_block(&mut self, page: PageNum, data: &PageData) -> Result<()> {
        let total_pages = self.total_pages;
        let file = self.file.as_mut().ok_or(StorageError::HandleNotInit)?;

        if !(0..total_pages).contains(&page) {
            return Err(StorageError::WriteOutOfRange { page, total_pages });
        }

        file.seek(SeekFrom::Start(page_offset(page)))
            .map_err(|e| StorageError::write_failed(format!("seek to page {}", page), e))?;
        file.write_all(data)
            .map_err(|e| StorageError::write_failed(format!("write of page {}", page), e))?;
        file.sync_data()
            .map_err(|e| StorageError::write_failed(format!("sync of page {}", page), e))?;

        trace!("wrote page {} of {:?}", page, self.file_name);
        self.cursor = Cursor::At(page);
        Ok(())
    }

    pub fn write_current(&mut self, data: &PageData) -> Result<()> {
        self.ensure_open()?;
        self.write_block(self.cursor.reference(), data)
    }

    /// Appends one zeroed page at the end of the file and moves the cursor to it.
    ///
    /// The page is written at the end of the last whole page, replacing any
    /// partial trailing bytes. The page count only changes once the page is
    /// fully written and synced.
    pub fn append_empty_block(&mut self) -> Result<()> {
        let total_pages = self.total_pages;
        let file = self.file.as_mut().ok_or(StorageError::HandleNotInit)?;

        if total_pages >= MAX_PAGES {
            return Err(StorageError::FileFull(total_pages));
        }

        let zeros = zeroed_block()?;
        file.seek(SeekFrom::Start(page_offset(total_pages)))
            .map_err(|e| StorageError::write_failed(format!("seek to page {}", total_pages), e))?;
        file.write_all(&zeros)
            .map_err(|e| StorageError::write_failed(format!("append of page {}", total_pages), e))?;
        file.sync_data()
            .map_err(|e| StorageError::write_failed(format!("sync of page {}", total_pages), e))?;

        self.total_pages = total_pages + 1;
        self.cursor = Cursor::At(total_pages);
        debug!("appended page {} to {:?}", total_pages, self.file_name);
        Ok(())
    }

    /// Grows the file to at least `num_pages` pages, one appended page at a time.
    ///
    /// Stops at the first failed append. Pages appended before the failure stay.
    pub fn ensure_capacity(&mut self, num_pages: PageNum) -> Result<()> {
        self.ensure_open()?;
        if num_pages <= self.total_pages {
            return Ok(());
        }

        let missing = num_pages - self.total_pages;
        for _ in 0..missing {
            self.append_empty_block()?;
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.file.is_some() {
            Ok(())
        } else {
            Err(StorageError::HandleNotInit)
        }
    }
}

impl Drop for PageFileHandle {
    fn drop(&mut self) {
        // A handle dropped without close still gets its writes to disk
        if let Some(file) = self.file.take() {
            let _ = file.sync_all();
            debug!("released unclosed page file {:?}", self.file_name);
        }
    }
}

/// Returns the cursor page of `handle`, or -1 when there is no handle.
pub fn block_pos(handle: Option<&PageFileHandle>) -> PageNum {
    handle.map_or(INVALID_PAGE_POS, PageFileHandle::block_pos)
}

/// Allocates a zeroed scratch page, reporting allocation failure instead of aborting.
fn zeroed_block() -> Result<Vec<u8>> {
    let mut block = Vec::new();
    block
        .try_reserve_exact(PAGE_SIZE)
        .map_err(|_| StorageError::InsufficientMemory(PAGE_SIZE))?;
    block.resize(PAGE_SIZE, 0);
    Ok(block)
}

/// Reads until `buf` is full or the file ends. Returns the number of bytes read.
fn read_up_to(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
