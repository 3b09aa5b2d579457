//! Processing Scope
//!
//! A thread-local stack describing which file and which region of it is
//! currently being processed, so errors raised deep in the pipeline can be
//! attributed without threading context through every call. Entries are
//! pushed through RAII guards only; the guard pops its entry on drop, so the
//! stack stays balanced on every exit path, early returns included.

use std::cell::RefCell;

use crate::store::resource_bundle::Location;

#[derive(Debug, Clone, PartialEq)]
enum ScopeEntry {
    File(String),
    Location(Location),
}

thread_local! {
    static SCOPE_STACK: RefCell<Vec<ScopeEntry>> = RefCell::new(Vec::new());
}

pub struct Scope;

impl Scope {
    /// Mark `file_path` as the file being processed until the returned guard
    /// is dropped.
    #[must_use]
    pub fn enter_file(file_path: impl Into<String>) -> ScopeGuard {
        Scope::push(ScopeEntry::File(file_path.into()))
    }

    /// Mark `location` as the region being processed until the returned
    /// guard is dropped.
    #[must_use]
    pub fn enter_location(location: Location) -> ScopeGuard {
        Scope::push(ScopeEntry::Location(location))
    }

    /// The innermost file on the stack, if any.
    pub fn current_file() -> Option<String> {
        SCOPE_STACK.with(|stack| {
            stack.borrow().iter().rev().find_map(|entry| match entry {
                ScopeEntry::File(path) => Some(path.clone()),
                _ => None,
            })
        })
    }

    /// The innermost location on the stack, if any.
    pub fn current_location() -> Option<Location> {
        SCOPE_STACK.with(|stack| {
            stack.borrow().iter().rev().find_map(|entry| match entry {
                ScopeEntry::Location(location) => Some(*location),
                _ => None,
            })
        })
    }

    fn push(entry: ScopeEntry) -> ScopeGuard {
        SCOPE_STACK.with(|stack| stack.borrow_mut().push(entry));
        ScopeGuard { _private: () }
    }

    fn pop() {
        SCOPE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Pops its scope entry when dropped.
pub struct ScopeGuard {
    _private: (),
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        Scope::pop();
    }
}
