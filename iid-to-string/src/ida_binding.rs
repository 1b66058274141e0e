// SPDX-FileCopyrightText: 2025 YungBinary
// SPDX-License-Identifier: LGPL-3.0-only

use std::ptr::{null, null_mut};
use std::sync::OnceLock;

use binding::{
    action_ctx_t, action_desc_t, action_handler_t, attach_action_to_popup, free_custom_icon,
    get_widget_type, hook_ui_notification_point, log_ida, plugin_t, register_action, ui_hooks_t,
    unhook_ui_notification_point, unregister_action, TPopupMenu, TWidget, XrefFlags,
    AST_ENABLE_ALWAYS, BWN_DISASM, IDP_INTERFACE_VERSION, LOG_ERROR, LOG_WARN, PLUGIN_HIDE,
    PLUGIN_KEEP, PLUGIN_PROC, PLUGIN_SKIP, SETMENU_APP,
};
use cty::{c_int, c_void};
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};
use iid::annotate::{comment_iid_at, Address, Database};

pub const ACTION_IID_TO_STRING: &str = "iid_to_string\0";
pub const ACTION_LABEL: &str = "IID to String\0";

/// The host database, seen through the annotator's capability set.
pub struct IdaDatabase;

impl Database for IdaDatabase {
    fn item_size(&self, ea: Address) -> usize {
        binding::item_size(ea) as usize
    }

    fn read_bytes(&self, ea: Address, len: usize) -> Option<Vec<u8>> {
        binding::read_bytes(ea, len)
    }

    fn set_comment(&mut self, ea: Address, text: &str, repeatable: bool) -> bool {
        binding::set_comment(ea, text, repeatable)
    }

    fn xrefs_to(&self, ea: Address) -> Vec<Address> {
        binding::xrefs_to(ea, XrefFlags::empty())
    }
}

pub extern "C" fn iid_to_string_activate(
    _handler: *const action_handler_t,
    _ctx: *mut action_ctx_t,
) -> c_int {
    let Some(ea) = binding::screen_ea() else {
        log_ida!(LOG_WARN, Some("IID2Str"), "No address selected.");
        return 0;
    };
    match comment_iid_at(&mut IdaDatabase, ea) {
        Ok(iid) => {
            binding::ida_msg(&format!(
                "Converted IID at {:#x} to string: {}\n",
                ea, iid
            ));
            1
        }
        Err(err) => {
            binding::ida_warning(&err.to_string());
            0
        }
    }
}

pub extern "C" fn iid_to_string_update(
    _handler: *const action_handler_t,
    _ctx: *mut action_ctx_t,
) -> c_int {
    // This action is always available.
    AST_ENABLE_ALWAYS
}

pub static IID_TO_STRING_HANDLER: action_handler_t = action_handler_t {
    activate: Some(iid_to_string_activate),
    update: Some(iid_to_string_update),
};

/// Attach the action to the context menu of disassembly widgets.
extern "C" fn populating_widget_popup(
    _user_data: *mut c_void,
    widget: *mut TWidget,
    popup_handle: *mut TPopupMenu,
) {
    if unsafe { get_widget_type(widget) } != BWN_DISASM {
        return;
    }
    unsafe {
        attach_action_to_popup(
            widget,
            popup_handle,
            ACTION_IID_TO_STRING.as_ptr().cast(),
            ACTION_LABEL.as_ptr().cast(),
            SETMENU_APP,
        );
    }
}

static UI_HOOKS: ui_hooks_t = ui_hooks_t {
    user_data: null_mut(),
    populating_widget_popup: Some(populating_widget_popup),
};

static ACTION_ICON_ID: OnceLock<c_int> = OnceLock::new();
static LOGGER: OnceLock<Option<LoggerHandle>> = OnceLock::new();

fn init_logger() {
    LOGGER.get_or_init(|| {
        Logger::try_with_env_or_str("info")
            .ok()?
            .log_to_file(FileSpec::default().basename("iid_to_string"))
            .duplicate_to_stderr(Duplicate::Warn)
            .start()
            .ok()
    });
}

pub extern "C" fn iid_to_string_init() -> c_int {
    init_logger();
    let icon = binding::load_png_icon(ACTION_ICON_PNG);
    let _ = ACTION_ICON_ID.set(icon);
    let desc = action_desc_t {
        cb: std::mem::size_of::<action_desc_t>() as c_int,
        name: ACTION_IID_TO_STRING.as_ptr().cast(),
        label: ACTION_LABEL.as_ptr().cast(),
        handler: &IID_TO_STRING_HANDLER,
        owner: null(),
        shortcut: null(),
        tooltip: ACTION_LABEL.as_ptr().cast(),
        icon,
        flags: 0,
    };
    if !unsafe { register_action(&desc) } {
        log_ida!(
            LOG_ERROR,
            Some("IID2Str"),
            "Could not register the IID to String action."
        );
        return PLUGIN_SKIP;
    }
    if !unsafe { hook_ui_notification_point(&UI_HOOKS) } {
        log_ida!(
            LOG_WARN,
            Some("IID2Str"),
            "Could not hook the popup notification. The context menu entry stays missing."
        );
    }
    PLUGIN_KEEP
}

pub extern "C" fn iid_to_string_term() {
    unsafe {
        unhook_ui_notification_point(&UI_HOOKS);
        unregister_action(ACTION_IID_TO_STRING.as_ptr().cast());
    }
    if let Some(icon) = ACTION_ICON_ID.get() {
        unsafe { free_custom_icon(*icon) };
    }
}

pub extern "C" fn iid_to_string_run(_arg: c_int) {
    // Action driven, nothing to do on an explicit plugin invocation.
}

#[no_mangle]
pub static PLUGIN: plugin_t = plugin_t {
    version: IDP_INTERFACE_VERSION,
    flags: PLUGIN_PROC | PLUGIN_HIDE,
    init: Some(iid_to_string_init),
    term: Some(iid_to_string_term),
    run: Some(iid_to_string_run),
    comment: "Convert the IID at the selected address to its string form\0"
        .as_ptr()
        .cast(),
    help: "Highlight an IID start address, right click, IID to String\0"
        .as_ptr()
        .cast(),
    wanted_name: "IID to String\0".as_ptr().cast(),
    wanted_hotkey: null(),
};

/// 16x16 menu icon.
const ACTION_ICON_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x10,
    0x08, 0x03, 0x00, 0x00, 0x00, 0x28, 0x2d, 0x0f, 0x53, 0x00, 0x00, 0x01,
    0x95, 0x50, 0x4c, 0x54, 0x45, 0x47, 0x70, 0x4c, 0x22, 0x4f, 0x85, 0x41,
    0x56, 0x7b, 0x35, 0x38, 0x53, 0x3e, 0x69, 0x9a, 0x6b, 0x89, 0xac, 0x59,
    0x76, 0x9a, 0x50, 0x6f, 0x95, 0x5e, 0x4e, 0x42, 0x5c, 0x82, 0xac, 0x94,
    0x77, 0x4d, 0x7a, 0x9b, 0xbe, 0x21, 0x4b, 0x7d, 0x63, 0x74, 0x85, 0x75,
    0x6f, 0x5f, 0x50, 0x72, 0x99, 0x97, 0x5c, 0x34, 0x47, 0x67, 0x90, 0x9c,
    0x5c, 0x31, 0x91, 0x76, 0x5f, 0xa6, 0x61, 0x33, 0xa3, 0x59, 0x2b, 0x5a,
    0x25, 0x19, 0x8e, 0x4b, 0x26, 0x47, 0x24, 0x1e, 0x8b, 0x62, 0x37, 0x4f,
    0x65, 0x7d, 0x84, 0x6a, 0x46, 0x3a, 0x63, 0x94, 0xc4, 0x7e, 0x41, 0x92,
    0x70, 0x41, 0x93, 0x6c, 0x38, 0x5a, 0x2f, 0x24, 0x4b, 0x20, 0x1b, 0x68,
    0x68, 0x73, 0x37, 0x5e, 0x8d, 0x66, 0x41, 0x3f, 0x3f, 0x17, 0x18, 0x89,
    0x53, 0x33, 0x3c, 0x53, 0x7a, 0x69, 0x8b, 0xaf, 0x84, 0x72, 0x59, 0xa1,
    0x81, 0x53, 0xa6, 0x71, 0x37, 0x74, 0x93, 0xb5, 0x8a, 0x81, 0x6f, 0x7d,
    0x68, 0x4a, 0xf7, 0x85, 0x00, 0x91, 0x71, 0x46, 0x5f, 0x60, 0x67, 0xa1,
    0x82, 0x52, 0x22, 0x4b, 0x7c, 0x3c, 0x38, 0x4b, 0x6f, 0x7c, 0x83, 0x42,
    0x4e, 0x69, 0x29, 0x56, 0x8a, 0x7a, 0x9c, 0xc0, 0x6c, 0x65, 0x55, 0x73,
    0x8f, 0xaf, 0x7b, 0x6f, 0x55, 0xe8, 0xef, 0xf4, 0x96, 0x9f, 0xab, 0xa3,
    0x8f, 0x6e, 0xc4, 0x76, 0x38, 0x8f, 0xa6, 0xc0, 0xa7, 0x95, 0x78, 0xce,
    0xda, 0xe4, 0xbd, 0xc8, 0xd3, 0x9c, 0x85, 0x5f, 0x9c, 0x7b, 0x4f, 0x85,
    0x78, 0x65, 0xa5, 0x88, 0x5d, 0x62, 0x81, 0xa1, 0xa9, 0xba, 0xcb, 0x83,
    0x91, 0xa7, 0x8f, 0x97, 0xa1, 0xbd, 0xb8, 0xaa, 0xc3, 0xd2, 0xdb, 0x9d,
    0x60, 0x3b, 0x76, 0x42, 0x37, 0xdf, 0xe9, 0xf2, 0xaa, 0x59, 0x28, 0xc8,
    0xce, 0xd4, 0xcc, 0xd7, 0xde, 0xa7, 0xc1, 0xd8, 0x91, 0x42, 0x1f, 0xaa,
    0xac, 0xb4, 0xa5, 0xbd, 0xd2, 0xc0, 0xc7, 0xcb, 0x8f, 0x9b, 0xad, 0x2c,
    0x2c, 0x38, 0xd7, 0xe1, 0xe9, 0x91, 0x8c, 0x93, 0x90, 0x5f, 0x45, 0x5f,
    0x61, 0x68, 0xbd, 0xc0, 0xc6, 0x39, 0x39, 0x44, 0xa6, 0xb6, 0xc9, 0xa1,
    0x83, 0x55, 0xac, 0xb2, 0xb2, 0xb3, 0xb7, 0xb8, 0xbd, 0xb3, 0xac, 0x95,
    0x7b, 0x5a, 0x78, 0x8f, 0xa6, 0x83, 0xa4, 0xc7, 0xa8, 0x78, 0x54, 0xaf,
    0x5f, 0x2d, 0x9a, 0x4a, 0x22, 0xba, 0xbd, 0xbe, 0x62, 0x77, 0x97, 0xb9,
    0x6a, 0x32, 0x4c, 0x6d, 0x94, 0x5d, 0x93, 0xc0, 0xf2, 0xf6, 0xfb, 0xb0,
    0xa8, 0x95, 0xb4, 0xa5, 0x8d, 0xa8, 0xa6, 0x9e, 0x82, 0x31, 0x15, 0xac,
    0xb5, 0xbf, 0x95, 0x94, 0x9b, 0xc9, 0xe7, 0xf5, 0x89, 0x4c, 0x2e, 0x4f,
    0xb3, 0xe2, 0x7e, 0x57, 0x4c, 0xc4, 0xbc, 0x9a, 0xa6, 0x7b, 0x6c, 0xcd,
    0xcb, 0xba, 0x7b, 0xbc, 0x69, 0x87, 0xa8, 0x8a, 0xe1, 0xd0, 0x81, 0xc8,
    0xa8, 0xa5, 0xbe, 0xb7, 0x64, 0xad, 0xa7, 0x6c, 0xc2, 0x8f, 0x81, 0xc4,
    0xd5, 0xe7, 0x24, 0xcc, 0x43, 0x70, 0x00, 0x00, 0x00, 0x3c, 0x74, 0x52,
    0x4e, 0x53, 0x00, 0x37, 0x6e, 0x0e, 0x67, 0x71, 0x6b, 0x71, 0x07, 0xe9,
    0xe7, 0xed, 0x38, 0xed, 0xf4, 0x37, 0x6d, 0x2b, 0xd6, 0xb1, 0xe9, 0xdb,
    0x28, 0xa8, 0x1d, 0x44, 0x66, 0x9b, 0x5d, 0xf8, 0xe1, 0x87, 0x7a, 0x3e,
    0x6c, 0x99, 0xc6, 0xa8, 0xdb, 0x51, 0xfb, 0xdc, 0x72, 0x15, 0xed, 0xee,
    0xa5, 0x04, 0x2e, 0x98, 0x35, 0x2e, 0xcf, 0xab, 0x6d, 0x3d, 0xed, 0x8e,
    0xed, 0xbd, 0x5c, 0x58, 0xf7, 0x2d, 0x00, 0x00, 0x00, 0xf9, 0x49, 0x44,
    0x41, 0x54, 0x18, 0xd3, 0x63, 0x60, 0x60, 0x60, 0x60, 0x16, 0x10, 0x12,
    0x11, 0x15, 0x17, 0x63, 0x80, 0x01, 0x7e, 0x61, 0x59, 0x7b, 0xfb, 0xac,
    0x6c, 0x15, 0x76, 0x66, 0xa8, 0x00, 0x5b, 0xa6, 0x7d, 0x5e, 0x60, 0x68,
    0xa9, 0xbf, 0x86, 0x32, 0x2b, 0xab, 0x20, 0x48, 0x40, 0xc9, 0x2f, 0x30,
    0xd4, 0x3f, 0xb6, 0x36, 0x35, 0xa4, 0xc0, 0xc3, 0x81, 0x8d, 0x81, 0x41,
    0x42, 0x41, 0xcd, 0xaf, 0xb2, 0x3a, 0x26, 0x2c, 0x3e, 0xc8, 0xd6, 0x23,
    0x3f, 0x97, 0x9d, 0x81, 0x41, 0x51, 0xd5, 0x24, 0xb2, 0x3c, 0x2e, 0x2a,
    0x21, 0x26, 0x2e, 0x21, 0x2a, 0xcc, 0x8b, 0x09, 0xa8, 0x43, 0xdb, 0x34,
    0xc4, 0xa6, 0x35, 0xb6, 0xc1, 0x26, 0xc2, 0x36, 0xbe, 0x30, 0xd1, 0x50,
    0x9f, 0x81, 0x41, 0x4b, 0x37, 0xdc, 0xa6, 0xa9, 0xa5, 0xde, 0xd7, 0xd9,
    0xd9, 0xc6, 0xa6, 0x4c, 0xd3, 0x88, 0x81, 0x41, 0x9e, 0x2b, 0xb9, 0xa2,
    0xaa, 0xb9, 0x31, 0xda, 0x29, 0x20, 0x20, 0xda, 0x91, 0xcb, 0x80, 0x81,
    0x41, 0x52, 0xce, 0x31, 0x38, 0xbc, 0xa6, 0xce, 0x29, 0x38, 0xc8, 0xc9,
    0x27, 0x4d, 0x8f, 0x03, 0x68, 0x88, 0xb4, 0x6b, 0xb1, 0x6d, 0xa4, 0xad,
    0xb7, 0xb7, 0x6d, 0x89, 0xbb, 0x9b, 0x19, 0xc8, 0x1d, 0x52, 0x6e, 0xae,
    0x3e, 0xbe, 0x9e, 0x9e, 0x89, 0xc9, 0x76, 0x76, 0x60, 0x5b, 0x18, 0x58,
    0xd2, 0xdd, 0x93, 0x8a, 0x22, 0x9c, 0x53, 0xed, 0x5c, 0x52, 0x1c, 0x20,
    0x02, 0x19, 0x39, 0x8e, 0x2e, 0x2e, 0x69, 0x49, 0x76, 0x29, 0x6d, 0x10,
    0x01, 0x19, 0x4e, 0x6e, 0x1d, 0x5e, 0x3e, 0x3e, 0x5e, 0x2b, 0x0b, 0x6e,
    0x4e, 0x75, 0x90, 0x00, 0x33, 0x0f, 0x0f, 0x0f, 0xa3, 0xa5, 0xb5, 0x39,
    0x23, 0x0f, 0x8f, 0x31, 0x07, 0x03, 0x00, 0x2a, 0xe8, 0x34, 0xf5, 0x24,
    0x85, 0x86, 0x55, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae,
    0x42, 0x60, 0x82,
];
