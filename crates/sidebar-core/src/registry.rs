//! Viewer to board map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use crate::board::Board;
use crate::error::RegistryError;
use crate::viewer::{Transport, ViewerDirectory, ViewerId};

/// A board shared between the registry and the redraw driver.
pub type SharedBoard = Arc<Mutex<Board>>;

/// Owns one board per attached viewer.
///
/// Boards are created on [`attach`](Self::attach) and destroyed on
/// [`detach`](Self::detach) or [`shutdown`](Self::shutdown).
pub struct BoardRegistry {
    directory: Arc<dyn ViewerDirectory>,
    transport: Arc<dyn Transport>,
    boards: RwLock<HashMap<ViewerId, SharedBoard>>,
}

impl BoardRegistry {
    pub fn new(directory: Arc<dyn ViewerDirectory>, transport: Arc<dyn Transport>) -> Self {
        Self {
            directory,
            transport,
            boards: RwLock::new(HashMap::new()),
        }
    }

    /// Create a board for an online viewer, or return the existing one.
    pub fn attach(&self, viewer: ViewerId) -> Result<SharedBoard, RegistryError> {
        if let Some(board) = self.board(viewer) {
            return Ok(board);
        }
        if !self.directory.is_online(viewer) {
            return Err(RegistryError::ViewerOffline(viewer));
        }

        let board = self
            .write()
            .entry(viewer)
            .or_insert_with(|| {
                info!(%viewer, "attached board");
                Arc::new(Mutex::new(Board::new(viewer, Arc::clone(&self.transport))))
            })
            .clone();
        Ok(board)
    }

    /// Destroy and forget a viewer's board. No-op when absent.
    pub fn detach(&self, viewer: ViewerId) -> Result<(), RegistryError> {
        let Some(board) = self.write().remove(&viewer) else {
            return Ok(());
        };
        info!(%viewer, "detached board");
        lock_board(&board)
            .destroy()
            .map_err(|source| RegistryError::Board { viewer, source })
    }

    /// Destroy every board.
    ///
    /// All boards are removed even if some fail to destroy; the first
    /// failure is returned.
    pub fn shutdown(&self) -> Result<(), RegistryError> {
        let boards: Vec<(ViewerId, SharedBoard)> = self.write().drain().collect();
        info!(count = boards.len(), "shutting down boards");

        let mut first_error = None;
        for (viewer, board) in boards {
            if let Err(source) = lock_board(&board).destroy() {
                warn!(%viewer, error = %source, "failed to destroy board");
                first_error.get_or_insert(RegistryError::Board { viewer, source });
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn board(&self, viewer: ViewerId) -> Option<SharedBoard> {
        self.read().get(&viewer).cloned()
    }

    pub fn contains(&self, viewer: ViewerId) -> bool {
        self.read().contains_key(&viewer)
    }

    pub fn is_online(&self, viewer: ViewerId) -> bool {
        self.directory.is_online(viewer)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Attached boards ordered by viewer id.
    pub fn snapshot(&self) -> Vec<(ViewerId, SharedBoard)> {
        let mut boards: Vec<_> = self
            .read()
            .iter()
            .map(|(viewer, board)| (*viewer, Arc::clone(board)))
            .collect();
        boards.sort_by_key(|(viewer, _)| *viewer);
        boards
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ViewerId, SharedBoard>> {
        self.boards.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ViewerId, SharedBoard>> {
        self.boards.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lock a board, recovering it if a previous holder panicked.
pub fn lock_board(board: &SharedBoard) -> MutexGuard<'_, Board> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}
