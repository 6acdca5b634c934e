use std::fmt;

use super::config::{INVALID_PAGE_POS, PAGE_SIZE};

/// Zero-based page number. Signed so that cursor arithmetic below page 0
/// produces a value the range check can reject.
pub type PageNum = i32;

/// A caller-owned page buffer
pub type PageData = [u8; PAGE_SIZE];

/// Byte offset of a page inside its file. Only meaningful for non-negative pages.
pub fn page_offset(page: PageNum) -> u64 {
    (page as u64) * (PAGE_SIZE as u64)
}

/// Position of a handle's cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cursor {
    /// Freshly opened, no page touched yet
    #[default]
    Unset,
    /// Most recently read or written page
    At(PageNum),
    /// Handle has been closed
    Closed,
}

impl Cursor {
    /// Page that relative reads are computed from. An unset cursor refers to page 0.
    pub fn reference(&self) -> PageNum {
        match self {
            Cursor::Unset => 0,
            Cursor::At(page) => *page,
            Cursor::Closed => INVALID_PAGE_POS,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Unset => write!(f, "unset"),
            Cursor::At(page) => write!(f, "page {}", page),
            Cursor::Closed => write!(f, "closed"),
        }
    }
}

/// Identifier of an activated storage session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u16);

impl SessionId {
    pub fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
