//! Drives the aggregator with a scripted virtual mouse pair.
//!
//! Runs on any target; useful for eyeballing the poll/reset protocol without
//! real hardware.

use multimouse::backends::virtual_input::VirtualSource;
use multimouse::{MouseButton, MultiMouse, RawHandle};

fn main() {
    let (source, injector) = VirtualSource::new();
    let mut mice = MultiMouse::with_source(Box::new(source));
    mice.init().expect("activate virtual capture");
    mice.set_sensitivity(1, 0.5);

    let a = RawHandle(0xA);
    let b = RawHandle(0xB);

    // Tick 1: both mice move, mouse A clicks.
    injector.motion(a, 3, -2);
    injector.motion(a, 1, 1);
    injector.motion(b, 10, 0);
    injector.press_button(a, MouseButton::Left);
    report(mice.tick());

    // Tick 2: A releases, B drags with the right button.
    injector.release_button(a, MouseButton::Left);
    injector.press_button(b, MouseButton::Right);
    injector.motion(b, 0, 6);
    report(mice.tick());

    // Tick 3: nothing happened; edges are gone, B's right stays held.
    report(mice.tick());

    for mouse in 0..mice.mouse_count() {
        let (dx, dy) = mice.delta(mouse);
        println!(
            "mouse {mouse}: scaled delta ({dx:.1}, {dy:.1}) at sensitivity {}",
            mice.sensitivity(mouse)
        );
    }

    mice.kill();
}

fn report(snapshot: &multimouse::Snapshot) {
    println!("-- {} device(s) --", snapshot.len());
    for (mouse, state) in snapshot.iter().enumerate() {
        println!(
            "mouse {mouse}: delta ({}, {}) L[d{} u{} h{}] R[d{} u{} h{}]",
            state.x,
            state.y,
            state.left.down as u8,
            state.left.up as u8,
            state.left.held as u8,
            state.right.down as u8,
            state.right.up as u8,
            state.right.held as u8,
        );
    }
}
