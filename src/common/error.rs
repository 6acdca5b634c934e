use std::fmt;
use std::io;

use thiserror::Error;

use super::types::PageNum;

/// Stable outcome codes reported for every storage operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Ok = 0,
    FileNotFound = 1,
    FileHandleNotInit = 2,
    WriteFailed = 3,
    ReadNonExistingPage = 4,
    CloseFailed = 5,
    RemoveFailed = 6,
    InsufficientMemory = 7,
    ReadFailed = 8,
}

impl ResultCode {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Symbolic name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ResultCode::Ok => "RC_OK",
            ResultCode::FileNotFound => "RC_FILE_NOT_FOUND",
            ResultCode::FileHandleNotInit => "RC_FILE_HANDLE_NOT_INIT",
            ResultCode::WriteFailed => "RC_WRITE_FAILED",
            ResultCode::ReadNonExistingPage => "RC_READ_NON_EXISTING_PAGE",
            ResultCode::CloseFailed => "RC_CLOSE_FAIL",
            ResultCode::RemoveFailed => "RC_FILE_REMOVE_FAILED",
            ResultCode::InsufficientMemory => "RC_INSUFFICIENT_MEMORY",
            ResultCode::ReadFailed => "RC_READ_FAILED",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File not found: {path:?}")]
    FileNotFound { path: String },

    #[error("Cannot access file {path:?}: {source}")]
    FileUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("File handle not initialized")]
    HandleNotInit,

    #[error("Write failed: page {page} out of range ({total_pages} pages)")]
    WriteOutOfRange { page: PageNum, total_pages: PageNum },

    #[error("Write failed: {context}: {source}")]
    WriteFailed {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Write failed: file already holds {0} pages")]
    FileFull(PageNum),

    #[error("Reading non-existing page {page} ({total_pages} pages)")]
    ReadNonExistingPage { page: PageNum, total_pages: PageNum },

    #[error("Seek to page {page} failed: {source}")]
    ReadSeekFailed {
        page: PageNum,
        #[source]
        source: io::Error,
    },

    #[error("Read of page {page} failed: {source}")]
    ReadFailed {
        page: PageNum,
        #[source]
        source: io::Error,
    },

    #[error("Close of {path:?} failed: {source}")]
    CloseFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Removal of {path:?} failed: {source}")]
    RemoveFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Insufficient memory for a {0}-byte block")]
    InsufficientMemory(usize),
}

impl StorageError {
    /// Outcome code this error is reported under
    pub fn code(&self) -> ResultCode {
        match self {
            StorageError::FileNotFound { .. } | StorageError::FileUnavailable { .. } => {
                ResultCode::FileNotFound
            }
            StorageError::HandleNotInit => ResultCode::FileHandleNotInit,
            StorageError::WriteOutOfRange { .. }
            | StorageError::WriteFailed { .. }
            | StorageError::FileFull(_) => ResultCode::WriteFailed,
            StorageError::ReadNonExistingPage { .. } | StorageError::ReadSeekFailed { .. } => {
                ResultCode::ReadNonExistingPage
            }
            StorageError::ReadFailed { .. } => ResultCode::ReadFailed,
            StorageError::CloseFailed { .. } => ResultCode::CloseFailed,
            StorageError::RemoveFailed { .. } => ResultCode::RemoveFailed,
            StorageError::InsufficientMemory(_) => ResultCode::InsufficientMemory,
        }
    }

    pub(crate) fn write_failed(context: impl Into<String>, source: io::Error) -> Self {
        StorageError::WriteFailed {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
