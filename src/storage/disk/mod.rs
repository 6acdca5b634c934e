mod page_file;
mod storage_manager;

pub use page_file::*;
pub use storage_manager::*;
