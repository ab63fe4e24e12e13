use crate::{
    SessionState, StatusMessage, UserAction,
    session::Affordances,
    tests::support::Harness,
};

use std::time::Duration;

const HOUR: Duration = Duration::from_secs(60 * 60);

/// WHAT: Recording past the maximum auto-stops with a distinct message
/// WHY: Auto-stop must behave like a manual stop but say why
#[test]
fn given_sixty_minute_limit_when_ticking_past_it_then_auto_stopped_at_sixty_minutes() {
    // Given: A recording with the default one-hour maximum
    let mut harness = Harness::new(Harness::settings(HOUR));
    harness.machine.record(harness.at(0));

    // When: The clock ticks just before and at the boundary
    harness.tick(3599);
    assert_eq!(harness.panel.borrow().last_elapsed(), Some("59:59"));
    harness.tick(3600);

    // Then: Stopped, auto-stop status, display at the maximum
    assert_eq!(harness.machine.state(), SessionState::Stopped);
    assert_eq!(
        harness.machine.status(),
        &StatusMessage::AutoStopped { limit: HOUR }
    );
    assert_eq!(harness.panel.borrow().last_elapsed(), Some("60:00"));
    assert_eq!(
        harness.machine.artifact().map(|a| a.duration()),
        Some(HOUR)
    );

    // Then: The ticker is gone, so no second auto-stop can fire
    assert!(!harness.tick(3601));
    let auto_stops = harness
        .panel
        .borrow()
        .statuses
        .iter()
        .filter(|s| matches!(s, StatusMessage::AutoStopped { .. }))
        .count();
    assert_eq!(auto_stops, 1);
}

/// WHAT: A tick landing after the boundary still displays the maximum
/// WHY: Auto-stop may lag by up to one tick; the reading is clamped
#[test]
fn given_tick_after_boundary_when_auto_stopping_then_display_clamped() {
    // Given: A 10s maximum
    let mut harness = Harness::new(Harness::settings(Duration::from_secs(10)));
    harness.machine.record(harness.at(0));

    // When: The first tick past the boundary arrives at 12s
    harness.tick(12);

    // Then: Stopped with 00:10 shown
    assert_eq!(harness.machine.state(), SessionState::Stopped);
    assert_eq!(harness.panel.borrow().last_elapsed(), Some("00:10"));
}

/// WHAT: Auto-stop tears down exactly like a manual stop
/// WHY: Same resource teardown, only the message differs
#[test]
fn given_two_sessions_when_one_auto_stops_and_one_stops_then_same_teardown() {
    // Given: Two identical recordings
    let mut auto = Harness::new(Harness::settings(Duration::from_secs(5)));
    let mut manual = Harness::new(Harness::settings(Duration::from_secs(5)));
    auto.machine.record(auto.at(0));
    manual.machine.record(manual.at(0));

    // When: One reaches the limit, the other is stopped by hand
    auto.tick(5);
    manual.machine.stop(manual.at(5));

    // Then: Identical component state and affordances
    for harness in [&auto, &manual] {
        assert_eq!(harness.machine.state(), SessionState::Stopped);
        assert!(!harness.machine.is_ticker_armed());
        assert!(!harness.machine.is_visualizer_armed());
        assert!(harness.machine.is_capture_open());
        assert!(harness.machine.artifact().is_some());
        assert!(harness.surface.borrow().rects.is_empty());
        assert_eq!(harness.panel.borrow().last_elapsed(), Some("00:05"));
    }
    assert_ne!(auto.machine.status(), manual.machine.status());
}

/// WHAT: Pause time is excluded from the recorded duration
/// WHY: record, pause at 5s, resume at 10s, stop at 15s records 10s
#[test]
fn given_five_second_pause_when_stopping_at_fifteen_then_ten_seconds_recorded() {
    // Given: A recording paused from 5s to 10s
    let mut harness = Harness::new(Harness::settings(HOUR));
    harness.machine.record(harness.at(0));
    harness.tick(1);
    harness.machine.toggle_pause(harness.at(5));
    harness.machine.toggle_pause(harness.at(10));
    harness.tick(11);
    assert_eq!(harness.panel.borrow().last_elapsed(), Some("00:06"));

    // When: Stopped at 15s
    harness.machine.stop(harness.at(15));

    // Then: 10s net
    assert_eq!(harness.machine.elapsed(), Duration::from_secs(10));
    assert_eq!(harness.panel.borrow().last_elapsed(), Some("00:10"));
    assert_eq!(
        harness.machine.artifact().map(|a| a.duration()),
        Some(Duration::from_secs(10))
    );
}

/// WHAT: Stop while idle changes nothing
/// WHY: Invalid requests are silently ignored
#[test]
fn given_idle_when_stop_requested_then_no_state_or_display_change() {
    // Given: An idle machine
    let mut harness = Harness::new(Harness::settings(HOUR));
    let statuses = harness.panel.borrow().statuses.len();
    let affordances = harness.panel.borrow().affordances.len();

    // When: Stop, pause, save and reset are requested
    for action in [
        UserAction::Stop,
        UserAction::TogglePause,
        UserAction::Save,
        UserAction::Reset,
    ] {
        harness.machine.dispatch(action, harness.at(1));
    }

    // Then: Nothing happened
    assert_eq!(harness.machine.state(), SessionState::Idle);
    assert_eq!(harness.panel.borrow().statuses.len(), statuses);
    assert_eq!(harness.panel.borrow().affordances.len(), affordances);
    assert!(!harness.machine.is_capture_open());
}

/// WHAT: A second session reuses the negotiated encoding
/// WHY: Negotiation happens once per pipeline lifetime
#[test]
fn given_completed_session_when_recording_again_then_no_renegotiation() {
    // Given: One full record, stop, reset cycle
    let mut harness = Harness::new(Harness::settings(HOUR));
    harness.machine.record(harness.at(0));
    harness.machine.stop(harness.at(1));
    harness.machine.reset();
    let probes = harness.backend.borrow().probes;

    // When: Recording again
    harness.machine.record(harness.at(2));
    harness.machine.stop(harness.at(3));

    // Then: No new probes, same microphone handle, same suffix
    assert_eq!(harness.backend.borrow().probes, probes);
    assert_eq!(harness.backend.borrow().acquisitions, 1);
    assert_eq!(harness.backend.borrow().encoders_created, 2);
    assert_eq!(harness.machine.artifact().map(|a| a.suffix()), Some("ogg"));
}

/// WHAT: Reset restores the exact initial configuration
/// WHY: Any number of pause cycles must leave no trace after reset
#[test]
fn given_many_pause_cycles_when_reset_then_initial_configuration() {
    // Given: The initial display, then a session with five pause cycles
    let mut harness = Harness::new(Harness::settings(HOUR));
    let initial = {
        let panel = harness.panel.borrow();
        (
            panel.last_status().cloned(),
            panel.last_elapsed().map(str::to_string),
            panel.last_affordances(),
        )
    };
    harness.machine.record(harness.at(0));
    for cycle in 0..5 {
        harness.frame();
        harness.machine.toggle_pause(harness.at(2 * cycle + 1));
        harness.machine.toggle_pause(harness.at(2 * cycle + 2));
    }
    harness.machine.stop(harness.at(20));

    // When: Reset
    harness.machine.dispatch(UserAction::Reset, harness.at(21));

    // Then: Same status, display and affordances as at creation
    let panel = harness.panel.borrow();
    let after = (
        panel.last_status().cloned(),
        panel.last_elapsed().map(str::to_string),
        panel.last_affordances(),
    );
    assert_eq!(after, initial);
    assert_eq!(harness.machine.state(), SessionState::Idle);
    assert!(harness.machine.artifact().is_none());
    assert!(harness.machine.session_id().is_none());
    assert!(harness.surface.borrow().rects.is_empty());
}

/// WHAT: Arbitrary request sequences keep flags consistent with state
/// WHY: The affordances must always match the guard table
#[test]
fn given_pseudo_random_requests_when_dispatched_then_affordances_match_state() {
    // Given: A machine and a deterministic request stream
    let mut harness = Harness::new(Harness::settings(Duration::from_secs(30)));
    let mut seed: u64 = 0x5eed;

    for step in 0..500u64 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let pick = (seed >> 33) % 7;
        let now = harness.at(step);
        let before = harness.machine.state();

        // When: A request, a tick or a frame happens
        match pick {
            0..=4 => harness.machine.dispatch(UserAction::ALL[pick as usize], now),
            5 => {
                harness.tick(step);
            }
            _ => {
                harness.frame();
            }
        }

        // Then: Flags match the current state and invalid requests were no-ops
        let state = harness.machine.state();
        assert_eq!(
            harness.panel.borrow().last_affordances(),
            Some(Affordances::for_state(state))
        );
        if pick <= 4 && !before.accepts(UserAction::ALL[pick as usize]) {
            assert_eq!(state, before);
        }
        assert_eq!(harness.machine.is_ticker_armed(), state == SessionState::Recording);
        if state != SessionState::Recording {
            assert!(!harness.machine.is_visualizer_armed());
        }
    }
}
