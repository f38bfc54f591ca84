use serde::{Deserialize, Serialize};

use crate::store::StoredDocument;

/// Window bounds for one list call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    pub fn new(limit: u64) -> Self {
        Self { limit, offset: 0 }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

/// Process-local pagination state.
///
/// Changing the page size invalidates the current position, so `set_limit`
/// rewinds to offset 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    limit: u64,
    offset: u64,
}

impl Pager {
    pub fn new(limit: u64) -> Self {
        Self { limit, offset: 0 }
    }

    pub fn request(&self) -> PageRequest {
        PageRequest {
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn set_limit(&mut self, limit: u64) {
        self.limit = limit;
        self.offset = 0;
    }

    pub fn next_page(&mut self) {
        self.offset += self.limit;
    }

    pub fn prev_page(&mut self) {
        self.offset = self.offset.saturating_sub(self.limit);
    }
}

/// Result envelope of one list call: the bounded window plus the
/// store-reported total of all matches before limit/offset were applied.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentList {
    pub documents: Vec<StoredDocument>,
    pub total: u64,
}

impl DocumentList {
    pub fn empty() -> Self {
        Self {
            documents: Vec::new(),
            total: 0,
        }
    }
}
