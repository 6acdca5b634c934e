//! pagefile - fixed-size page storage on top of a raw file
//!
//! This crate is the bottom layer of a disk-oriented data system. Higher
//! layers (buffer pool, record manager, index) address storage purely by page
//! number; this layer translates page numbers to byte offsets and performs
//! the unbuffered, synchronous file I/O.
//!
//! # Architecture
//!
//! - **Common** (`common`): page size, page numbers, cursor, errors
//!   - `StorageError` / `ResultCode`: failure kinds and their stable outcome codes
//!   - `report`: human-readable diagnostics for outcome codes
//!
//! - **Storage Layer** (`storage::disk`): page files
//!   - `StorageManager`: storage session and page file lifecycle
//!   - `PageFileHandle`: an open page file, with absolute and cursor-relative
//!     block reads, writes and capacity growth
//!
//! A page file is a headerless run of `PAGE_SIZE` blocks. Its page count is
//! recomputed from the file length on every open.
//!
//! # Example
//!
//! ```rust,no_run
//! use pagefile::common::PAGE_SIZE;
//! use pagefile::storage::disk::StorageManager;
//!
//! let mut sm = StorageManager::new();
//! sm.initialize();
//!
//! sm.create_page_file("test.db").unwrap();
//! let mut handle = sm.open_page_file("test.db").unwrap();
//!
//! // Write a page, then grow the file to three pages
//! let data = [b'A'; PAGE_SIZE];
//! handle.write_block(0, &data).unwrap();
//! handle.ensure_capacity(3).unwrap();
//!
//! // Walk the file with the cursor
//! let mut buf = [0u8; PAGE_SIZE];
//! handle.read_first(&mut buf).unwrap();
//! handle.read_next(&mut buf).unwrap();
//! assert_eq!(handle.block_pos(), 1);
//!
//! sm.close_page_file(&mut handle).unwrap();
//! sm.destroy_page_file("test.db").unwrap();
//! ```

pub mod common;
pub mod storage;

// Re-export commonly used types at the crate root
pub use common::{Cursor, PageData, PageNum, Result, ResultCode, StorageError, PAGE_SIZE};
pub use storage::disk::{PageFileHandle, StorageManager};
