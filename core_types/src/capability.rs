//! Capability flags
//!
//! Flags tell a browsing client which mutating operations are currently
//! permitted. They are never stored: document flags are derived from
//! permission bits each time a document is queried, so they are a snapshot
//! and may be stale by the time the client acts on them.
//!
//! Bit values match the document-browsing client's wire constants.

use bitflags::bitflags;

bitflags! {
    /// Per-document capability flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DocumentFlags: u32 {
        /// File contents can be written
        const SUPPORTS_WRITE = 0x2;
        /// Document can be deleted
        const SUPPORTS_DELETE = 0x4;
        /// Directory accepts new children
        const DIR_SUPPORTS_CREATE = 0x8;
        /// Document can be renamed
        const SUPPORTS_RENAME = 0x40;
    }
}

bitflags! {
    /// Capability summary reported for a root
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RootFlags: u32 {
        /// Documents can be created under the root
        const SUPPORTS_CREATE = 0x1;
        /// Root is backed by local storage only
        const LOCAL_ONLY = 0x2;
        const SUPPORTS_RECENTS = 0x4;
        const SUPPORTS_SEARCH = 0x8;
        /// Root answers descendant queries
        const SUPPORTS_IS_CHILD = 0x10;
    }
}

impl DocumentFlags {
    /// Derives flags for one entry
    ///
    /// The entry's own write permission contributes `SUPPORTS_WRITE` for
    /// files or `DIR_SUPPORTS_CREATE` for directories. Rename and delete
    /// depend only on the parent directory being writable.
    pub fn derive(is_dir: bool, entry_writable: bool, parent_writable: bool) -> Self {
        let mut flags = DocumentFlags::empty();
        if entry_writable {
            flags |= if is_dir {
                DocumentFlags::DIR_SUPPORTS_CREATE
            } else {
                DocumentFlags::SUPPORTS_WRITE
            };
        }
        if parent_writable {
            flags |= DocumentFlags::SUPPORTS_DELETE | DocumentFlags::SUPPORTS_RENAME;
        }
        flags
    }
}

impl RootFlags {
    /// Summary for a single local root that allows nested creation
    pub fn local_tree() -> Self {
        RootFlags::SUPPORTS_CREATE | RootFlags::LOCAL_ONLY | RootFlags::SUPPORTS_IS_CHILD
    }
}
