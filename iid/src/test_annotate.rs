// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

#[cfg(test)]
mod tests {

    use std::collections::HashMap;

    use crate::annotate::{comment_iid_at, Address, Database};
    use crate::error::IidError;

    /// Minimal in-memory database. The full mock with failure injection
    /// lives with the integration tests.
    #[derive(Default)]
    struct MemDb {
        items: HashMap<Address, Vec<u8>>,
        comments: HashMap<Address, String>,
        xrefs: HashMap<Address, Vec<Address>>,
    }

    impl Database for MemDb {
        fn item_size(&self, ea: Address) -> usize {
            self.items.get(&ea).map_or(0, Vec::len)
        }

        fn read_bytes(&self, ea: Address, len: usize) -> Option<Vec<u8>> {
            let item = self.items.get(&ea)?;
            if len > item.len() {
                return None;
            }
            Some(item[..len].to_vec())
        }

        fn set_comment(&mut self, ea: Address, text: &str, _repeatable: bool) -> bool {
            self.comments.insert(ea, text.to_owned());
            true
        }

        fn xrefs_to(&self, ea: Address) -> Vec<Address> {
            self.xrefs.get(&ea).cloned().unwrap_or_default()
        }
    }

    const IID_ADDR: Address = 0x1400021a0;

    fn db_with_iid() -> MemDb {
        let mut db = MemDb::default();
        db.items.insert(
            IID_ADDR,
            vec![
                0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
                0xee, 0xff, 0x00,
            ],
        );
        db
    }

    #[test]
    fn test_comment_set_at_source_and_references() {
        let mut db = db_with_iid();
        db.xrefs.insert(IID_ADDR, vec![0x140001000, 0x140001040]);

        let iid = comment_iid_at(&mut db, IID_ADDR).unwrap();
        assert_eq!(iid.to_string(), "44332211-6655-8877-99aa-bbccddeeff00");
        for ea in [IID_ADDR, 0x140001000, 0x140001040] {
            assert_eq!(
                db.comments.get(&ea).map(String::as_str),
                Some("44332211-6655-8877-99aa-bbccddeeff00")
            );
        }
    }

    #[test]
    fn test_wrong_item_size_writes_nothing() {
        let mut db = MemDb::default();
        db.items.insert(IID_ADDR, vec![0u8; 8]);
        db.xrefs.insert(IID_ADDR, vec![0x140001000]);

        assert_eq!(
            comment_iid_at(&mut db, IID_ADDR),
            Err(IidError::InvalidInputSize { len: 8 })
        );
        assert!(db.comments.is_empty());
    }

    #[test]
    fn test_unknown_address_is_size_zero() {
        let mut db = MemDb::default();
        assert_eq!(
            comment_iid_at(&mut db, 0xdead),
            Err(IidError::InvalidInputSize { len: 0 })
        );
    }
}
