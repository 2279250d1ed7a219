//! Windows Raw Input parsing helpers (mouse only).
//!
//! This module is intentionally "dumb": it only parses `WM_INPUT` payloads
//! into small packets and enumerates mouse handles. Higher-level routing
//! (device registration, event translation) lives in the source.
//!
//! ## Conventions
//! - Deltas are reported in **raw OS units** (counts) as provided by Raw
//!   Input, positive Y **down** — the source flips Y when translating to
//!   aggregator events.
//! - Button transitions are reported as the `RAWMOUSE` `usButtonFlags`
//!   bitfield, re-exported here as `RI_MOUSE_*` constants.

#![cfg(target_os = "windows")]

use core::ffi::c_void;

use crate::event::RawHandle;

use windows_sys::Win32::UI::Input::{
    GetRawInputData, GetRawInputDeviceList, RAWINPUTDEVICELIST, RAWINPUTHEADER, RAWMOUSE,
    RID_INPUT, RIM_TYPEMOUSE,
};

// Local constants (avoid relying on module exports that vary by windows-sys version)
pub(crate) const RI_MOUSE_LEFT_BUTTON_DOWN: u16 = 0x0001;
pub(crate) const RI_MOUSE_LEFT_BUTTON_UP: u16 = 0x0002;
pub(crate) const RI_MOUSE_RIGHT_BUTTON_DOWN: u16 = 0x0004;
pub(crate) const RI_MOUSE_RIGHT_BUTTON_UP: u16 = 0x0008;

/// Parsed `RAWMOUSE` payload.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MousePacket {
    /// Raw Input device handle that produced the event.
    pub device: RawHandle,
    /// Relative delta X (raw counts).
    pub dx: i32,
    /// Relative delta Y (raw counts, positive = down).
    pub dy: i32,
    /// RAWMOUSE usButtonFlags bitfield (RI_MOUSE_*).
    pub button_flags: u16,
}

/// Parse a `WM_INPUT` lparam into a mouse packet (if it is a mouse event).
pub(crate) fn read_wm_input(lparam: isize) -> Option<MousePacket> {
    unsafe {
        // Query size
        let mut size: u32 = 0;
        let r0 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            core::ptr::null_mut(),
            &mut size,
            core::mem::size_of::<RAWINPUTHEADER>() as u32,
        );
        if r0 == u32::MAX || size == 0 {
            return None;
        }

        // Read buffer
        let mut buf = vec![0u8; size as usize];
        let r1 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            buf.as_mut_ptr() as *mut c_void,
            &mut size,
            core::mem::size_of::<RAWINPUTHEADER>() as u32,
        );
        if r1 == u32::MAX {
            return None;
        }

        read_raw_input_bytes(&buf)
    }
}

/// Parse a raw `RID_INPUT` payload (bytes returned by `GetRawInputData`) into
/// a mouse packet. Non-mouse payloads yield `None`.
pub(crate) fn read_raw_input_bytes(buf: &[u8]) -> Option<MousePacket> {
    let hdr_sz = core::mem::size_of::<RAWINPUTHEADER>();
    if buf.len() < hdr_sz {
        return None;
    }

    unsafe {
        // Read header only (RAWINPUT payload is variable-sized).
        let hdr: RAWINPUTHEADER = core::ptr::read_unaligned(buf.as_ptr() as *const RAWINPUTHEADER);
        if hdr.dwType != RIM_TYPEMOUSE {
            return None;
        }

        let need = hdr_sz + core::mem::size_of::<RAWMOUSE>();
        if buf.len() < need {
            return None;
        }

        let data_ptr = buf.as_ptr().add(hdr_sz);
        let m: RAWMOUSE = core::ptr::read_unaligned(data_ptr as *const RAWMOUSE);

        Some(MousePacket {
            device: RawHandle(hdr.hDevice as usize as u64),
            dx: m.lLastX,
            dy: m.lLastY,
            button_flags: m.Anonymous.Anonymous.usButtonFlags,
        })
    }
}

/// Handles of all mice currently known to the OS, in enumeration order.
///
/// Failure (or a machine with no mice) yields an empty list; zero devices is
/// a valid steady state for the aggregator.
pub(crate) fn enumerate_mouse_handles() -> Vec<RawHandle> {
    unsafe {
        let entry_sz = core::mem::size_of::<RAWINPUTDEVICELIST>() as u32;

        let mut count: u32 = 0;
        let r0 = GetRawInputDeviceList(core::ptr::null_mut(), &mut count, entry_sz);
        if r0 == u32::MAX || count == 0 {
            return Vec::new();
        }

        let mut list: Vec<RAWINPUTDEVICELIST> = vec![core::mem::zeroed(); count as usize];
        let r1 = GetRawInputDeviceList(list.as_mut_ptr(), &mut count, entry_sz);
        if r1 == u32::MAX {
            return Vec::new();
        }
        list.truncate(r1 as usize);

        list.iter()
            .filter(|entry| entry.dwType == RIM_TYPEMOUSE)
            .map(|entry| RawHandle(entry.hDevice as usize as u64))
            .collect()
    }
}
