//! End-to-end scenarios through the manager and the virtual backend.
//!
//! These exercise the same delivery path a real backend uses: injector ->
//! sink -> shared aggregator -> poll/reset.

use multimouse::backends::virtual_input::{VirtualInjector, VirtualSource};
use multimouse::{MouseButton, MultiMouse, RawHandle};

fn virtual_mice() -> (MultiMouse, VirtualInjector) {
    let (source, injector) = VirtualSource::new();
    let mut mice = MultiMouse::with_source(Box::new(source));
    mice.init().expect("virtual init cannot fail");
    (mice, injector)
}

const M0: RawHandle = RawHandle(100);
const M1: RawHandle = RawHandle(200);

#[test]
fn out_of_range_queries_return_neutral_defaults() {
    let (mut mice, injector) = virtual_mice();
    injector.motion(M0, 5, 5);
    mice.poll();

    assert_eq!(mice.mouse_count(), 1);
    assert_eq!(mice.delta(3), (0.0, 0.0));
    assert_eq!(mice.raw_delta(3), (0, 0));
    assert!(!mice.button(3, MouseButton::Left));
    assert!(!mice.button_down(3, MouseButton::Right));
    assert!(!mice.button_up(3, MouseButton::Left));
}

#[test]
fn motion_deltas_sum_between_polls() {
    let (mut mice, injector) = virtual_mice();
    injector.motion(M0, 3, -2);
    injector.motion(M0, 4, 7);
    mice.poll();
    assert_eq!(mice.raw_delta(0), (7, 5));
}

#[test]
fn click_scenario_from_press_to_release() {
    let (mut mice, injector) = virtual_mice();

    injector.motion(M0, 3, -2);
    injector.press_button(M0, MouseButton::Left);
    let snap = mice.poll();
    assert_eq!(snap.delta(0), (3, -2));
    let left = snap.button(0, MouseButton::Left);
    assert!(left.down && left.held && !left.up);

    mice.reset_states();
    let snap = mice.poll();
    assert_eq!(snap.delta(0), (0, 0));
    let left = snap.button(0, MouseButton::Left);
    assert!(!left.down && left.held && !left.up);

    mice.reset_states();
    injector.release_button(M0, MouseButton::Left);
    let snap = mice.poll();
    let left = snap.button(0, MouseButton::Left);
    assert!(left.up && !left.held && !left.down);
}

#[test]
fn down_and_up_are_never_simultaneous() {
    let (mut mice, injector) = virtual_mice();

    // Press and release inside a single cycle.
    injector.press_button(M0, MouseButton::Right);
    injector.release_button(M0, MouseButton::Right);
    let right = mice.poll().button(0, MouseButton::Right);
    assert!(!(right.down && right.up));
    assert!(!right.held);

    // And across a press held over a cycle boundary.
    mice.reset_states();
    injector.press_button(M0, MouseButton::Right);
    let right = mice.poll().button(0, MouseButton::Right);
    assert!(!(right.down && right.up));
}

#[test]
fn held_persists_across_polls_without_reset() {
    let (mut mice, injector) = virtual_mice();
    injector.press_button(M0, MouseButton::Left);

    for _ in 0..3 {
        assert!(mice.poll().button(0, MouseButton::Left).held);
    }
    mice.reset_states();
    assert!(mice.poll().button(0, MouseButton::Left).held);
}

#[test]
fn devices_get_indices_in_first_seen_order() {
    let (mut mice, injector) = virtual_mice();
    injector.motion(M1, 1, 0);
    injector.motion(M0, 2, 0);
    injector.motion(M1, 1, 0);
    mice.poll();

    assert_eq!(mice.mouse_count(), 2);
    assert_eq!(mice.raw_delta(0), (2, 0));
    assert_eq!(mice.raw_delta(1), (2, 0));
}

#[test]
fn sensitivity_defaults_and_scaling() {
    let (mut mice, injector) = virtual_mice();
    injector.motion(M0, 10, -4);
    mice.poll();

    assert_eq!(mice.sensitivity(0), 1.0);
    assert_eq!(mice.delta(0), (10.0, -4.0));

    mice.set_sensitivity(0, 0.5);
    assert_eq!(mice.delta(0), (5.0, -2.0));
}

#[test]
fn sensitivity_survives_state_reset_and_reacquire() {
    let (mut mice, injector) = virtual_mice();
    injector.motion(M0, 1, 1);
    mice.poll();
    mice.set_sensitivity(0, 2.0);

    mice.reset_states();
    mice.reacquire_handles();
    assert_eq!(mice.sensitivity(0), 2.0);

    mice.reset_device_list();
    assert_eq!(mice.sensitivity(0), 1.0);
}

#[test]
fn reacquire_preserves_count_indices_and_state() {
    let (mut mice, injector) = virtual_mice();
    injector.motion(M0, 1, 0);
    injector.press_button(M1, MouseButton::Left);
    mice.tick();
    mice.set_sensitivity(1, 3.0);

    mice.reacquire_handles();
    injector.motion(M0, 4, 0);
    mice.poll();

    assert_eq!(mice.mouse_count(), 2);
    assert_eq!(mice.raw_delta(0), (4, 0));
    assert!(mice.button(1, MouseButton::Left));
    assert_eq!(mice.sensitivity(1), 3.0);
}

#[test]
fn reset_device_list_starts_a_fresh_session() {
    let (mut mice, injector) = virtual_mice();
    injector.motion(M0, 1, 0);
    injector.motion(M1, 1, 0);
    mice.poll();
    assert_eq!(mice.mouse_count(), 2);

    mice.reset_device_list();
    mice.poll();
    assert_eq!(mice.mouse_count(), 0);

    // First handle to report after the reset takes index 0.
    injector.motion(M1, 9, 9);
    mice.poll();
    assert_eq!(mice.mouse_count(), 1);
    assert_eq!(mice.raw_delta(0), (9, 9));
}

#[test]
fn init_is_idempotent_and_kill_drops_everything() {
    let (mut mice, injector) = virtual_mice();
    mice.init().expect("second init is a no-op");

    injector.motion(M0, 2, 2);
    mice.poll();
    mice.set_sensitivity(0, 0.25);
    assert_eq!(mice.mouse_count(), 1);

    mice.kill();
    assert!(!mice.is_active());
    assert_eq!(mice.mouse_count(), 0);
    assert_eq!(mice.sensitivity(0), 1.0);

    // Events after kill are dropped, not queued.
    injector.motion(M0, 5, 5);
    mice.init().expect("re-init after kill");
    mice.poll();
    assert_eq!(mice.mouse_count(), 0);
}

#[test]
fn reset_closes_the_cycle_even_with_late_events() {
    // Poll-then-reset is two calls by design. An event slipping between them
    // is absorbed by the reset (the reset defines the cycle boundary);
    // everything after the reset accumulates cleanly into the next cycle.
    let (mut mice, injector) = virtual_mice();
    injector.motion(M0, 1, 0);
    let snap = mice.poll();
    assert_eq!(snap.delta(0), (1, 0));

    injector.motion(M0, 6, 0);
    mice.reset_states();
    injector.motion(M0, 2, 0);
    assert_eq!(mice.poll().delta(0), (2, 0));
}

#[test]
fn profile_round_trips_through_manager() {
    use multimouse::SensitivityProfile;

    let (mut mice, injector) = virtual_mice();
    injector.motion(M0, 1, 0);
    mice.poll();
    mice.set_sensitivity(0, 0.75);
    mice.set_sensitivity(2, 1.5);

    let profile = SensitivityProfile::capture(&mice);
    let toml = profile.to_toml_string().expect("encode profile");

    let (mut restored, _injector) = virtual_mice();
    SensitivityProfile::from_toml_str(&toml)
        .expect("decode profile")
        .apply(&mut restored);
    assert_eq!(restored.sensitivity(0), 0.75);
    assert_eq!(restored.sensitivity(1), 1.0);
    assert_eq!(restored.sensitivity(2), 1.5);
}
