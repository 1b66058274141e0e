// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

//! "IID to String" plugin for IDA Pro.
//!
//! Highlight the start address of an IID, right click, "IID to String":
//! the 16 byte value is converted to its canonical GUID string and written
//! as a comment at the address and at every cross-reference to it.

#![allow(non_snake_case)]
#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]

pub mod ida_binding;
