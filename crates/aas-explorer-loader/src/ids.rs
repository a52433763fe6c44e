//! Session-scoped shell id allocation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic allocator for the session-local `id` field of loaded shells.
///
/// Ids are unique within one running session and restart at zero with a fresh
/// allocator; they are not stable across reloads and must not be persisted.
/// Constructed explicitly by the session context and shared with the loader,
/// so tests can inject their own.
#[derive(Debug, Default)]
pub struct ShellIdAllocator {
    next: AtomicU64,
}

impl ShellIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
