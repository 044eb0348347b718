// weir/src/core/context.rs

use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use std::sync::Arc;

/// Shared mutable state for one pipeline run, passed by handle to every
/// middleware in the chain.
///
/// The caller creates a `Context` immediately before `run`, every middleware
/// receives a clone of the same handle (the underlying `C` is never copied
/// between steps), and the caller reads the accumulated state back out after
/// the run resolves or fails. Fields written by an earlier middleware are
/// visible to every later one; later writes override earlier ones.
///
/// IMPORTANT: lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points inside a middleware.
#[derive(Debug)]
pub struct Context<C: Send + Sync + 'static>(Arc<RwLock<C>>);

impl<C: Send + Sync + 'static> Context<C> {
    pub fn new(data: C) -> Self {
        Context(Arc::new(RwLock::new(data)))
    }

    /// Acquires a read lock on the context state.
    /// The returned guard MUST be dropped before any `.await` point.
    pub fn read(&self) -> RwLockReadGuard<'_, C> {
        self.0.read()
    }

    /// Acquires a write lock on the context state.
    /// The returned guard MUST be dropped before any `.await` point.
    pub fn write(&self) -> RwLockWriteGuard<'_, C> {
        self.0.write()
    }

    /// Read guard narrowed to one part of the context.
    /// Example: `context.map_read(|c| &c.user_id)`
    pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
    where
        F: FnOnce(&C) -> &U,
    {
        RwLockReadGuard::map(self.read(), f)
    }

    /// Write guard narrowed to one part of the context.
    pub fn map_write<F, U: ?Sized>(&self, f: F) -> MappedRwLockWriteGuard<'_, U>
    where
        F: FnOnce(&mut C) -> &mut U,
    {
        RwLockWriteGuard::map(self.write(), f)
    }
}

impl<C: Send + Sync + 'static> Clone for Context<C> {
    fn clone(&self) -> Self {
        Context(Arc::clone(&self.0))
    }
}

impl<C: Send + Sync + 'static + Default> Default for Context<C> {
    fn default() -> Self {
        Self::new(Default::default())
    }
}
