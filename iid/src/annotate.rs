// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

use log::warn;

use crate::error::IidError;
use crate::guid::{Iid, IID_SIZE};

/// Linear address in the host's address space.
pub type Address = u64;

/// The narrow view of the host's analysis database the annotator needs.
///
/// The host owns symbol resolution, cross-reference indexing and comment
/// storage. This trait only carries the read and write calls the pipeline
/// issues against it.
pub trait Database {
    /// Byte length of the item starting at `ea`.
    fn item_size(&self, ea: Address) -> usize;
    /// Reads `len` defined bytes at `ea`. `None` if any byte is missing.
    fn read_bytes(&self, ea: Address, len: usize) -> Option<Vec<u8>>;
    /// Sets (replaces) the comment at `ea`. Repeatable comments are echoed
    /// by the host at every referencing address, non-repeatable ones show
    /// only at `ea` itself.
    fn set_comment(&mut self, ea: Address, text: &str, repeatable: bool) -> bool;
    /// Addresses whose code or data refers to `ea`.
    fn xrefs_to(&self, ea: Address) -> Vec<Address>;
}

/// Converts the 16 byte item at `ea` into its canonical IID string and
/// writes that string as a non-repeatable comment at `ea` and at every
/// address referencing `ea`.
///
/// Aborts before any write if the item is not exactly 16 bytes. The
/// comment writes are independent and idempotent: a failed write is
/// logged and the remaining references are still processed, and re-running
/// the pipeline replaces the comments instead of accumulating text.
pub fn comment_iid_at<D: Database>(db: &mut D, ea: Address) -> Result<Iid, IidError> {
    let size = db.item_size(ea);
    if size != IID_SIZE {
        return Err(IidError::InvalidInputSize { len: size });
    }
    // An item of the right size can still contain undefined bytes. Those
    // read as missing and are rejected like a wrong item size.
    let bytes = db
        .read_bytes(ea, IID_SIZE)
        .ok_or(IidError::InvalidInputSize { len: 0 })?;
    let iid = Iid::from_bytes_le(&bytes)?;
    let text = iid.to_string();

    if !db.set_comment(ea, &text, false) {
        warn!("Could not set comment at {:#x}", ea);
    }
    for site in db.xrefs_to(ea) {
        if !db.set_comment(site, &text, false) {
            warn!("Could not set comment at reference site {:#x}", site);
        }
    }
    Ok(iid)
}
