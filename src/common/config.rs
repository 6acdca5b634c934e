use super::types::PageNum;

/// Size of a page in bytes (4 KB)
pub const PAGE_SIZE: usize = 4096;

/// Cursor position reported for a closed handle or a missing handle
pub const INVALID_PAGE_POS: PageNum = -1;

/// Largest page count a single page file can reach
pub const MAX_PAGES: PageNum = PageNum::MAX;
