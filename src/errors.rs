// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the core. Validation is rejected before any store
/// call; store failures leave in-memory state untouched; malformed stored
/// documents are degraded (skipped or zeroed) rather than fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("store operation failed: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("malformed document in '{collection}': {reason}")]
    Malformed { collection: String, reason: String },
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
