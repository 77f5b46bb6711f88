//! Run-wide product accumulator.

use std::collections::HashSet;

use crate::extract::{ProductCandidate, ProductRecord};

/// Records gathered so far in one listing run, unique by `product_id`.
#[derive(Debug, Default)]
pub struct Catalog {
    seen: HashSet<String>,
    records: Vec<ProductRecord>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one page's candidates; returns how many were new.
    ///
    /// The first occurrence of an id wins, including its `page` tag.
    pub fn merge(&mut self, candidates: Vec<ProductCandidate>, page: u32) -> usize {
        let before = self.records.len();
        for candidate in candidates {
            if self.seen.insert(candidate.product_id.clone()) {
                self.records.push(candidate.into_record(page));
            }
        }
        self.records.len() - before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }
}
