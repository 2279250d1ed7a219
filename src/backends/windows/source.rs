//! Message-loop event source for Windows Raw Input.
//!
//! One dedicated thread owns a message-only window registered for the
//! generic-desktop mouse usage (`0x01`/`0x02`) with `RIDEV_INPUTSINK`, so
//! input arrives even while the host window is unfocused. `WM_INPUT`
//! payloads are parsed by [`raw_input`](super::raw_input) and translated
//! into aggregator events here.
//!
//! The host environment may silently invalidate raw-input registrations on
//! focus changes; [`RawInputSource::reacquire`] re-issues the registration
//! against the existing window and is safe to call speculatively.

#![cfg(target_os = "windows")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::backends::windows::raw_input::{
    self, enumerate_mouse_handles, MousePacket, RI_MOUSE_LEFT_BUTTON_DOWN, RI_MOUSE_LEFT_BUTTON_UP,
    RI_MOUSE_RIGHT_BUTTON_DOWN, RI_MOUSE_RIGHT_BUTTON_UP,
};
use crate::backends::{EventSink, EventSource};
use crate::error::{Error, Result};
use crate::event::{MouseButton, RawMouseEvent};

use windows_sys::Win32::Foundation::{GetLastError, HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Input::{RegisterRawInputDevices, RAWINPUTDEVICE, RIDEV_INPUTSINK};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW, PostQuitMessage,
    RegisterClassExW, SendMessageW, HWND_MESSAGE, MSG, WM_CLOSE, WM_DESTROY, WM_INPUT, WNDCLASSEXW,
};

const WINDOW_CLASS: &str = "multimouse_capture";

// HID generic desktop page / mouse usage.
const HID_USAGE_PAGE_GENERIC: u16 = 0x01;
const HID_USAGE_GENERIC_MOUSE: u16 = 0x02;

const ERROR_CLASS_ALREADY_EXISTS: u32 = 1410;

/// Sink the capture window delivers into.
///
/// The window procedure has no instance context, so the running source
/// publishes its sink here (one capture window per process, matching the
/// single registration the OS keeps per target window).
static ACTIVE_SINK: Mutex<Option<EventSink>> = Mutex::new(None);

/// [`EventSource`] backed by a Raw Input message loop thread.
pub struct RawInputSource {
    // Capture window handle as usize; 0 while the thread is not running.
    hwnd: Arc<AtomicUsize>,
    thread: Option<JoinHandle<()>>,
}

impl RawInputSource {
    pub fn new() -> Self {
        Self {
            hwnd: Arc::new(AtomicUsize::new(0)),
            thread: None,
        }
    }
}

impl Default for RawInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for RawInputSource {
    fn start(&mut self, sink: EventSink) -> Result<()> {
        if self.thread.is_some() {
            return Ok(());
        }

        // Seed the registry from enumeration so devices get indices in a
        // deterministic order before the first event arrives. An empty list
        // is a valid steady state.
        sink.register_known(enumerate_mouse_handles());

        {
            let mut active = ACTIVE_SINK.lock().unwrap_or_else(|e| e.into_inner());
            *active = Some(sink);
        }

        let hwnd = self.hwnd.clone();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
        let handle = std::thread::Builder::new()
            .name("multimouse-rawinput".into())
            .spawn(move || run_message_loop(hwnd, ready_tx))
            .map_err(|_| Error::StartupFailed)?;
        self.thread = Some(handle);

        // Bounded wait: the thread always reports once, right after window
        // creation and registration.
        match ready_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                self.stop();
                Err(e)
            }
            Err(_) => {
                self.stop();
                Err(Error::StartupFailed)
            }
        }
    }

    fn reacquire(&mut self) -> Result<()> {
        let hwnd = self.hwnd.load(Ordering::Acquire);
        if hwnd == 0 {
            return Err(Error::NotRunning);
        }
        register_mice(hwnd as HWND)
    }

    fn stop(&mut self) {
        let hwnd = self.hwnd.swap(0, Ordering::AcqRel);
        if hwnd != 0 {
            // WM_CLOSE posts the quit that breaks the message loop.
            unsafe { SendMessageW(hwnd as HWND, WM_CLOSE, 0, 0) };
        }
        self.join_thread();

        let mut active = ACTIVE_SINK.lock().unwrap_or_else(|e| e.into_inner());
        *active = None;
    }

    fn name(&self) -> &str {
        "rawinput"
    }
}

impl RawInputSource {
    fn join_thread(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RawInputSource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Registers (or re-registers) the mouse usage against `hwnd`.
fn register_mice(hwnd: HWND) -> Result<()> {
    let device = RAWINPUTDEVICE {
        usUsagePage: HID_USAGE_PAGE_GENERIC,
        usUsage: HID_USAGE_GENERIC_MOUSE,
        dwFlags: RIDEV_INPUTSINK,
        hwndTarget: hwnd,
    };
    let ok = unsafe {
        RegisterRawInputDevices(&device, 1, core::mem::size_of::<RAWINPUTDEVICE>() as u32)
    };
    if ok == 0 {
        return Err(Error::RawInputRegistration(unsafe { GetLastError() }));
    }
    Ok(())
}

fn run_message_loop(hwnd_out: Arc<AtomicUsize>, ready_tx: mpsc::Sender<Result<()>>) {
    unsafe {
        let class_name = to_wide(WINDOW_CLASS);
        let hinstance = GetModuleHandleW(core::ptr::null());

        let mut wc: WNDCLASSEXW = core::mem::zeroed();
        wc.cbSize = core::mem::size_of::<WNDCLASSEXW>() as u32;
        wc.lpfnWndProc = Some(window_proc);
        wc.lpszClassName = class_name.as_ptr();
        wc.hInstance = hinstance;

        if RegisterClassExW(&wc) == 0 {
            let err = GetLastError();
            // The class survives a previous init/kill round; that is fine.
            if err != ERROR_CLASS_ALREADY_EXISTS {
                let _ = ready_tx.send(Err(Error::ClassRegistration(err)));
                return;
            }
        }

        let hwnd = CreateWindowExW(
            0,
            class_name.as_ptr(),
            core::ptr::null(),
            0,
            0,
            0,
            0,
            0,
            HWND_MESSAGE,
            core::ptr::null_mut(),
            hinstance,
            core::ptr::null(),
        );
        if hwnd.is_null() {
            let _ = ready_tx.send(Err(Error::WindowCreation(GetLastError())));
            return;
        }

        if let Err(e) = register_mice(hwnd) {
            let _ = DestroyWindow(hwnd);
            let _ = ready_tx.send(Err(e));
            return;
        }

        hwnd_out.store(hwnd as usize, Ordering::Release);
        let _ = ready_tx.send(Ok(()));

        let mut msg: MSG = core::mem::zeroed();
        loop {
            let r = GetMessageW(&mut msg, core::ptr::null_mut(), 0, 0);
            if r == 0 || r == -1 {
                break;
            }
            DispatchMessageW(&msg);
        }

        hwnd_out.store(0, Ordering::Release);
        let _ = DestroyWindow(hwnd);
    }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_INPUT => {
            if let Some(packet) = raw_input::read_wm_input(lparam) {
                let active = ACTIVE_SINK.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(sink) = active.as_ref() {
                    deliver(sink, &packet);
                }
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        WM_CLOSE | WM_DESTROY => {
            PostQuitMessage(0);
            0
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Translates one parsed packet into aggregator events.
///
/// Raw Input reports positive Y down; the aggregator convention is positive Y
/// up, so the sign flips here.
fn deliver(sink: &EventSink, packet: &MousePacket) {
    if packet.dx != 0 || packet.dy != 0 {
        sink.dispatch(RawMouseEvent::motion(
            packet.device,
            packet.dx,
            packet.dy.saturating_neg(),
        ));
    }

    let flags = packet.button_flags;
    if flags & RI_MOUSE_LEFT_BUTTON_DOWN != 0 {
        sink.dispatch(RawMouseEvent::press(packet.device, MouseButton::Left));
    } else if flags & RI_MOUSE_LEFT_BUTTON_UP != 0 {
        sink.dispatch(RawMouseEvent::release(packet.device, MouseButton::Left));
    }

    if flags & RI_MOUSE_RIGHT_BUTTON_DOWN != 0 {
        sink.dispatch(RawMouseEvent::press(packet.device, MouseButton::Right));
    } else if flags & RI_MOUSE_RIGHT_BUTTON_UP != 0 {
        sink.dispatch(RawMouseEvent::release(packet.device, MouseButton::Right));
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;
    std::ffi::OsStr::new(s)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}
