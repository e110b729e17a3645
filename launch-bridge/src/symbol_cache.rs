use std::sync::OnceLock;

use crate::object::bridge_error::LaunchBridgeError;

/// Write-once holder for loaded libraries and resolved symbols.
///
/// The loader runs at most once per cache, even with concurrent callers;
/// late callers block until it finishes and then share the result. A failed
/// load is cached as well, so a missing mandatory symbol is reported the same
/// way on every call without retrying the dlopen() sequence.
pub struct SymbolCache<T> {
    cell: OnceLock<Result<T, LaunchBridgeError>>,
}

impl<T> SymbolCache<T> {
    pub const fn new() -> Self {
        SymbolCache {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_load<F>(&self, load: F) -> Result<&T, LaunchBridgeError>
    where
        F: FnOnce() -> Result<T, LaunchBridgeError>,
    {
        self.cell.get_or_init(load).as_ref().map_err(Clone::clone)
    }

    /// Whether initialization already ran (successfully or not)
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for SymbolCache<T> {
    fn default() -> Self {
        SymbolCache::new()
    }
}
