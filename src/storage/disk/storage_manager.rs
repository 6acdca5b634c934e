use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::common::{Result, SessionId};

use super::PageFileHandle;

/// StorageManager is the entry point for page file lifecycle operations.
///
/// It carries the storage session: `initialize` activates it once and is a
/// no-op afterwards. Activation only tags diagnostics with the session id;
/// page file operations work on an inactive manager too.
#[derive(Debug, Default)]
pub struct StorageManager {
    session: Option<SessionId>,
}

impl StorageManager {
    /// Creates an inactive storage manager.
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Activates the storage session and returns its id.
    /// Calling it again returns the existing session unchanged.
    pub fn initialize(&mut self) -> SessionId {
        if let Some(session) = self.session {
            debug!("storage manager already active (session {})", session);
            return session;
        }

        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let session = SessionId::new((secs & 0xFFFF) as u16);
        self.session = Some(session);

        info!("storage manager online, session {}", session);
        session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session
    }

    /// Creates a page file holding one zeroed page. Does not open it.
    pub fn create_page_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PageFileHandle::create(path)
    }

    /// Opens an existing page file.
    pub fn open_page_file<P: AsRef<Path>>(&self, path: P) -> Result<PageFileHandle> {
        PageFileHandle::open(path)
    }

    /// Closes an open handle, leaving it in the closed state.
    pub fn close_page_file(&self, handle: &mut PageFileHandle) -> Result<()> {
        handle.close()
    }

    /// Removes a page file. The file must not have a live handle.
    pub fn destroy_page_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PageFileHandle::destroy(path)
    }
}
