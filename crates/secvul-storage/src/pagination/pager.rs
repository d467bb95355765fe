//! RowPager: pulls at most `page_size` decoded rows per call from a cursor.
//!
//! The cursor stays open between pages, so peak memory is one page of
//! [`RevisionPair`]s no matter how many rows the query produces.

use rusqlite::Rows;
use secvul_core::errors::StorageError;
use secvul_core::types::RevisionPair;

use crate::queries::decode::decode_revision_pair;

pub struct RowPager<'stmt> {
    rows: Rows<'stmt>,
    page_size: usize,
    pages: u64,
    rows_read: u64,
    exhausted: bool,
}

impl<'stmt> RowPager<'stmt> {
    /// `page_size` of 0 is treated as 1.
    pub fn new(rows: Rows<'stmt>, page_size: usize) -> Self {
        Self {
            rows,
            page_size: page_size.max(1),
            pages: 0,
            rows_read: 0,
            exhausted: false,
        }
    }

    /// Fetch the next page. `Ok(None)` once the cursor is drained.
    /// A row that fails to decode aborts the scan with `MalformedRow`.
    pub fn next_page(&mut self) -> Result<Option<Vec<RevisionPair>>, StorageError> {
        if self.exhausted {
            return Ok(None);
        }

        let mut page = Vec::with_capacity(self.page_size);
        while page.len() < self.page_size {
            match self.rows.next().map_err(StorageError::sqlite)? {
                Some(row) => {
                    page.push(decode_revision_pair(row)?);
                    self.rows_read += 1;
                }
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        if page.is_empty() {
            return Ok(None);
        }
        self.pages += 1;
        Ok(Some(page))
    }

    /// Pages returned so far.
    pub fn pages(&self) -> u64 {
        self.pages
    }

    /// Rows pulled from the cursor so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
