// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

//! Hand-maintained surface of the IDA kernel API consumed by the plugin.
//!
//! The host is a closed process; the declarations below cover only the
//! entry points the plugin calls. Everything resolves at load time, when
//! the host maps the plugin into its own address space.

#![allow(non_snake_case)]
#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]

use std::ffi::CString;

use bitflags::bitflags;
use cty::{c_char, c_int, c_uint, c_void};
pub use log::Level;

pub const LOG_DEBUG: Level = Level::Debug;
pub const LOG_INFO: Level = Level::Info;
pub const LOG_WARN: Level = Level::Warn;
pub const LOG_ERROR: Level = Level::Error;

/// Linear address in the host's address space.
pub type ea_t = u64;
/// Item size in bytes.
pub type asize_t = u64;
/// The host's marker for an invalid or missing address.
pub const BADADDR: ea_t = 0xffff_ffff_ffff_ffff;

/// Kernel/plugin interface version the loader checks `plugin_t` against.
pub const IDP_INTERFACE_VERSION: c_int = 700;

// plugin_t.flags
pub const PLUGIN_HIDE: c_int = 0x10;
pub const PLUGIN_PROC: c_int = 0x40;

// plugin_t.init() answers
pub const PLUGIN_SKIP: c_int = 0;
pub const PLUGIN_OK: c_int = 1;
pub const PLUGIN_KEEP: c_int = 2;

// action_handler_t.update() answers
pub const AST_ENABLE_ALWAYS: c_int = 0;
pub const AST_DISABLE_ALWAYS: c_int = 4;

/// Widget type of disassembly listing views.
pub const BWN_DISASM: c_int = 29;

// attach_action_to_popup() placement
pub const SETMENU_INS: c_int = 0x0;
pub const SETMENU_APP: c_int = 0x1;

// get_bytes() flags. READALL fails the read if any byte in the range has
// no defined value in the database.
pub const GMB_READALL: c_int = 0x1;

bitflags! {
    /// Filter for cross-reference enumeration. `empty()` walks every
    /// reference kind, code and data.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct XrefFlags: c_int {
        const FAR = 0x1;
        const DATA = 0x2;
    }
}

#[repr(C)]
pub struct TWidget {
    _private: [u8; 0],
}

#[repr(C)]
pub struct TPopupMenu {
    _private: [u8; 0],
}

/// Activation context handed to action callbacks. Opaque to the plugin.
#[repr(C)]
pub struct action_ctx_t {
    _private: [u8; 0],
}

pub type action_activate_cb =
    extern "C" fn(handler: *const action_handler_t, ctx: *mut action_ctx_t) -> c_int;
pub type action_update_cb =
    extern "C" fn(handler: *const action_handler_t, ctx: *mut action_ctx_t) -> c_int;

// The host defines the handler as a virtual class. It is laid out by hand
// as its callback record, like the plugin and hook records below, so it
// can be assigned as a const.
#[repr(C)]
pub struct action_handler_t {
    pub activate: Option<action_activate_cb>,
    pub update: Option<action_update_cb>,
}

#[repr(C)]
pub struct action_desc_t {
    /// Size of this record, used by the loader for versioning.
    pub cb: c_int,
    pub name: *const c_char,
    pub label: *const c_char,
    pub handler: *const action_handler_t,
    pub owner: *const c_void,
    pub shortcut: *const c_char,
    pub tooltip: *const c_char,
    pub icon: c_int,
    pub flags: c_int,
}

/// UI notification receivers. Only the callbacks the plugin implements are
/// listed; unset members are skipped by the dispatcher.
#[repr(C)]
pub struct ui_hooks_t {
    pub user_data: *mut c_void,
    pub populating_widget_popup: Option<
        extern "C" fn(user_data: *mut c_void, widget: *mut TWidget, popup_handle: *mut TPopupMenu),
    >,
}

unsafe impl Sync for ui_hooks_t {}

/// Loader-facing plugin record. The host resolves the `PLUGIN` export of
/// the shared object against this layout.
#[repr(C)]
pub struct plugin_t {
    pub version: c_int,
    pub flags: c_int,
    pub init: Option<extern "C" fn() -> c_int>,
    pub term: Option<extern "C" fn()>,
    pub run: Option<extern "C" fn(arg: c_int)>,
    pub comment: *const c_char,
    pub help: *const c_char,
    pub wanted_name: *const c_char,
    pub wanted_hotkey: *const c_char,
}

unsafe impl Sync for plugin_t {}

/// One cross-reference edge, filled in by the enumeration calls.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct xrefblk_t {
    pub from: ea_t,
    pub to: ea_t,
    pub iscode: u8,
    pub type_: u8,
    pub user: u8,
}

impl xrefblk_t {
    pub const fn new() -> xrefblk_t {
        xrefblk_t {
            from: BADADDR,
            to: BADADDR,
            iscode: 0,
            type_: 0,
            user: 0,
        }
    }
}

extern "C" {
    pub fn get_screen_ea() -> ea_t;
    pub fn get_item_end(ea: ea_t) -> ea_t;
    pub fn get_bytes(
        buf: *mut c_void,
        size: isize,
        ea: ea_t,
        gmb_flags: c_int,
        mask: *mut c_void,
    ) -> isize;
    pub fn set_cmt(ea: ea_t, comm: *const c_char, rptble: bool) -> bool;
    pub fn xrefblk_t_first_to(blk: *mut xrefblk_t, to: ea_t, flags: c_int) -> bool;
    pub fn xrefblk_t_next_to(blk: *mut xrefblk_t) -> bool;
    pub fn register_action(desc: *const action_desc_t) -> bool;
    pub fn unregister_action(name: *const c_char) -> bool;
    pub fn attach_action_to_popup(
        widget: *mut TWidget,
        popup_handle: *mut TPopupMenu,
        name: *const c_char,
        popuppath: *const c_char,
        flags: c_int,
    ) -> bool;
    pub fn get_widget_type(widget: *mut TWidget) -> c_int;
    pub fn load_custom_icon(ptr: *const c_void, len: c_uint, format: *const c_char) -> c_int;
    pub fn free_custom_icon(icon_id: c_int);
    pub fn hook_ui_notification_point(hooks: *const ui_hooks_t) -> bool;
    pub fn unhook_ui_notification_point(hooks: *const ui_hooks_t) -> bool;
    pub fn msg(format: *const c_char, ...) -> c_int;
    pub fn warning(format: *const c_char, ...);
}

/// Write a log message both to the log facade and the host console.
///
/// ```ignore
/// log_ida!(LOG_WARN, Some("IID2Str"), "No address selected.");
/// ```
#[macro_export]
macro_rules! log_ida {
    ( $lvl:expr, $tag:expr, $msg:expr ) => {{
        let tag: Option<&str> = $tag;
        let text = match tag {
            Some(t) => format!("[{}] {}", t, $msg),
            None => format!("{}", $msg),
        };
        log::log!($lvl, "{}", text);
        $crate::ida_msg(&format!("{}: {}\n", $lvl, text));
    }};
}

/// The currently selected address, if the cursor is on one.
pub fn screen_ea() -> Option<ea_t> {
    let ea = unsafe { get_screen_ea() };
    if ea == BADADDR {
        None
    } else {
        Some(ea)
    }
}

/// Byte length of the item starting at `ea`.
pub fn item_size(ea: ea_t) -> asize_t {
    unsafe { get_item_end(ea) }.saturating_sub(ea)
}

/// Reads `len` defined bytes at `ea`. `None` if the range is shorter or
/// holds undefined bytes.
pub fn read_bytes(ea: ea_t, len: usize) -> Option<Vec<u8>> {
    let mut buf = vec![0u8; len];
    let got = unsafe {
        get_bytes(
            buf.as_mut_ptr().cast(),
            len as isize,
            ea,
            GMB_READALL,
            std::ptr::null_mut(),
        )
    };
    if got == len as isize {
        Some(buf)
    } else {
        None
    }
}

/// Sets (replaces) the comment at `ea`.
pub fn set_comment(ea: ea_t, text: &str, repeatable: bool) -> bool {
    let Ok(comm) = CString::new(text) else {
        return false;
    };
    unsafe { set_cmt(ea, comm.as_ptr(), repeatable) }
}

/// All addresses referencing `ea`, in the host's enumeration order.
pub fn xrefs_to(ea: ea_t, flags: XrefFlags) -> Vec<ea_t> {
    let mut refs = Vec::new();
    let mut blk = xrefblk_t::new();
    let mut more = unsafe { xrefblk_t_first_to(&mut blk, ea, flags.bits()) };
    while more {
        refs.push(blk.from);
        more = unsafe { xrefblk_t_next_to(&mut blk) };
    }
    refs
}

/// Prints to the host's message console.
pub fn ida_msg(text: &str) {
    if let Ok(c) = CString::new(text) {
        unsafe {
            msg("%s\0".as_ptr().cast(), c.as_ptr());
        }
    }
}

/// Pops the host's warning dialog.
pub fn ida_warning(text: &str) {
    if let Ok(c) = CString::new(text) {
        unsafe {
            warning("%s\0".as_ptr().cast(), c.as_ptr());
        }
    }
}

/// Registers PNG icon data with the host and returns its icon id.
pub fn load_png_icon(data: &[u8]) -> c_int {
    unsafe {
        load_custom_icon(
            data.as_ptr().cast(),
            data.len() as c_uint,
            "png\0".as_ptr().cast(),
        )
    }
}
