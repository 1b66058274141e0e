// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

use std::collections::{HashMap, HashSet};

use iid::annotate::{Address, Database};

/// In-memory stand-in for the host's analysis database.
///
/// Items, comments and cross-references are plain maps; individual
/// addresses can be made to refuse comment writes or to report their bytes
/// as undefined, to exercise the fail-soft paths.
#[derive(Default)]
pub struct MockDatabase {
    items: HashMap<Address, Vec<u8>>,
    pub comments: HashMap<Address, String>,
    pub repeatable_comments: HashMap<Address, String>,
    xrefs: HashMap<Address, Vec<Address>>,
    failing_writes: HashSet<Address>,
    undefined: HashSet<Address>,
    /// Number of `set_comment` calls, successful or not.
    pub writes: usize,
}

impl MockDatabase {
    pub fn new() -> MockDatabase {
        MockDatabase::default()
    }

    pub fn define_item(&mut self, ea: Address, bytes: &[u8]) {
        self.items.insert(ea, bytes.to_vec());
    }

    pub fn add_xref(&mut self, from: Address, to: Address) {
        self.xrefs.entry(to).or_default().push(from);
    }

    /// All further `set_comment` calls at `ea` report failure.
    pub fn fail_writes_at(&mut self, ea: Address) {
        self.failing_writes.insert(ea);
    }

    /// The item at `ea` keeps its size but its bytes read as undefined.
    pub fn undefine_bytes_at(&mut self, ea: Address) {
        self.undefined.insert(ea);
    }
}

impl Database for MockDatabase {
    fn item_size(&self, ea: Address) -> usize {
        self.items.get(&ea).map_or(0, Vec::len)
    }

    fn read_bytes(&self, ea: Address, len: usize) -> Option<Vec<u8>> {
        if self.undefined.contains(&ea) {
            return None;
        }
        let item = self.items.get(&ea)?;
        if len > item.len() {
            return None;
        }
        Some(item[..len].to_vec())
    }

    fn set_comment(&mut self, ea: Address, text: &str, repeatable: bool) -> bool {
        self.writes += 1;
        if self.failing_writes.contains(&ea) {
            return false;
        }
        let store = if repeatable {
            &mut self.repeatable_comments
        } else {
            &mut self.comments
        };
        store.insert(ea, text.to_owned());
        true
    }

    fn xrefs_to(&self, ea: Address) -> Vec<Address> {
        self.xrefs.get(&ea).cloned().unwrap_or_default()
    }
}
