//! Live multi-mouse poll loop (Windows).
//!
//! Prints per-mouse deltas and button edges once per tick. Move different
//! mice to watch them get distinct logical indices.

#[cfg(all(feature = "rawinput", target_os = "windows"))]
fn main() {
    use multimouse::{MouseButton, MultiMouse};
    use std::time::Duration;

    let mut mice = MultiMouse::new();
    mice.init().expect("activate raw input capture");
    println!("capturing; {} mouse/mice enumerated", {
        mice.poll();
        mice.mouse_count()
    });

    loop {
        mice.tick();
        for mouse in 0..mice.mouse_count() {
            let (dx, dy) = mice.delta(mouse);
            let mut line = String::new();
            if dx != 0.0 || dy != 0.0 {
                line.push_str(&format!("delta ({dx:.0}, {dy:.0}) "));
            }
            for (button, tag) in [(MouseButton::Left, "L"), (MouseButton::Right, "R")] {
                if mice.button_down(mouse, button) {
                    line.push_str(&format!("+{tag} "));
                }
                if mice.button_up(mouse, button) {
                    line.push_str(&format!("-{tag} "));
                }
            }
            if !line.is_empty() {
                println!("mouse {mouse}: {line}");
            }
        }
        // Keep CPU usage sane
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[cfg(not(all(feature = "rawinput", target_os = "windows")))]
fn main() {
    eprintln!("the poll demo needs the Windows rawinput backend; try virtual_demo instead");
}
