// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

#[cfg(test)]
mod tests {

    use std::str::FromStr;

    use crate::error::IidError;
    use crate::guid::{Iid, IID_SIZE};

    const IID_BYTES: [u8; IID_SIZE] = [
        0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
        0x00,
    ];
    const IID_STR: &str = "44332211-6655-8877-99aa-bbccddeeff00";

    #[test]
    fn test_decode_mixed_endian_layout() {
        let iid = Iid::from_bytes_le(&IID_BYTES).unwrap();
        assert_eq!(iid.to_string(), IID_STR);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let a = Iid::from_bytes_le(&IID_BYTES).unwrap();
        let b = Iid::from_bytes_le(&IID_BYTES).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_rejects_any_other_length() {
        for len in [0usize, 1, 8, 15, 17, 32] {
            let bytes = vec![0xab; len];
            assert_eq!(
                Iid::from_bytes_le(&bytes),
                Err(IidError::InvalidInputSize { len })
            );
        }
    }

    #[test]
    fn test_round_trip_reproduces_bytes() {
        let iid = Iid::from_bytes_le(&IID_BYTES).unwrap();
        assert_eq!(iid.to_bytes_le(), IID_BYTES);
    }

    #[test]
    fn test_well_known_interface_iids() {
        // IID_IUnknown and IID_IDispatch in their in-memory layout.
        let iunknown: [u8; IID_SIZE] = [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x46,
        ];
        let idispatch: [u8; IID_SIZE] = [
            0x00, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x46,
        ];
        let unk = Iid::from_bytes_le(&iunknown).unwrap();
        let disp = Iid::from_bytes_le(&idispatch).unwrap();
        assert_eq!(unk.to_string(), "00000000-0000-0000-c000-000000000046");
        assert_eq!(disp.to_string(), "00020400-0000-0000-c000-000000000046");
        assert_eq!(unk.to_bytes_le(), iunknown);
        assert_eq!(disp.to_bytes_le(), idispatch);
    }

    #[test]
    fn test_parse_canonical_string() {
        let iid = Iid::from_str(IID_STR).unwrap();
        assert_eq!(iid.to_bytes_le(), IID_BYTES);
        assert!(Iid::from_str("not-an-iid").is_err());
    }

    #[test]
    fn test_display_is_lowercase() {
        let bytes: [u8; IID_SIZE] = [0xff; 16];
        let iid = Iid::from_bytes_le(&bytes).unwrap();
        assert_eq!(iid.to_string(), "ffffffff-ffff-ffff-ffff-ffffffffffff");
    }
}
