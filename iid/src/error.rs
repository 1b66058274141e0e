// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

use thiserror::Error;

/// Errors of the IID conversion pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IidError {
    /// The value to convert is not exactly 16 defined bytes.
    #[error("not a valid IID: expected 16 bytes, got {len}")]
    InvalidInputSize { len: usize },
}
