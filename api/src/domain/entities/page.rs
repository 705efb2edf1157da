//! Pagination window for list queries

use crate::error::DomainError;

/// Largest page a single list request may ask for
pub const MAX_LIMIT: i64 = 100;

/// Default page size for list endpoints
pub const DEFAULT_LIMIT: i64 = 5;

/// A validated `limit`/`offset` window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    /// Validate raw query values.
    ///
    /// Out-of-range values are reported as `NotFound`; negative values are
    /// reported together, joined by `" | "`.
    pub fn new(limit: i64, offset: i64) -> Result<Self, DomainError> {
        let mut errors = Vec::new();
        if limit < 0 {
            errors.push("Limit cannot be less than 0");
        }
        if offset < 0 {
            errors.push("Offset cannot be less than 0");
        }
        if !errors.is_empty() {
            return Err(DomainError::NotFound(errors.join(" | ")));
        }

        if limit > MAX_LIMIT {
            return Err(DomainError::NotFound(format!(
                "Limit must not exceed {} per request",
                MAX_LIMIT
            )));
        }

        Ok(Self {
            limit: limit as u64,
            offset: offset as u64,
        })
    }

    /// A zero-sized page never touches storage
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT as u64,
            offset: 0,
        }
    }
}
