// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::IidError;

/// Number of bytes of a serialized IID.
pub const IID_SIZE: usize = 16;

/// A 128-bit interface identifier.
///
/// The serialized form is mixed-endian: a little-endian `u32`, two
/// little-endian `u16`s, then 8 bytes kept in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Iid(Uuid);

impl Iid {
    /// Decodes an IID from its 16 byte mixed-endian serialized form.
    ///
    /// Fails with [`IidError::InvalidInputSize`] for any other input
    /// length. Total over all 16 byte inputs.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Iid, IidError> {
        let raw: [u8; IID_SIZE] = bytes
            .try_into()
            .map_err(|_| IidError::InvalidInputSize { len: bytes.len() })?;
        Ok(Iid(Uuid::from_bytes_le(raw)))
    }

    /// Serializes back into the mixed-endian layout. Exact inverse of
    /// [`Iid::from_bytes_le`].
    pub fn to_bytes_le(&self) -> [u8; IID_SIZE] {
        self.0.to_bytes_le()
    }
}

impl fmt::Display for Iid {
    /// Canonical lowercase hyphenated form,
    /// e.g. `44332211-6655-8877-99aa-bbccddeeff00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Iid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Iid, Self::Err> {
        Uuid::parse_str(s).map(Iid)
    }
}
