/*
 *  tests/indication_scenarios.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Integration tests for the ambient indication engine
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use ambient_indication::indication::mock::{MockHost, MockRenderer, RenderCall};
use ambient_indication::indication::TickerConfig;
use ambient_indication::timer::ManualClock;
use ambient_indication::{AmbientIndication, Anchor, MediaInfo, WakeReason};

struct Rig {
    engine: AmbientIndication,
    renderer: MockRenderer,
    host: MockHost,
    clock: ManualClock,
}

fn rig() -> Rig {
    let renderer = MockRenderer::new();
    let host = MockHost::new();
    let clock = ManualClock::new();
    let engine = AmbientIndication::with_renderer(
        Box::new(renderer.clone()),
        host.host(),
        TickerConfig::default(),
        Box::new(clock.clone()),
    );
    renderer.clear_calls();
    Rig { engine, renderer, host, clock }
}

#[test]
fn test_local_channel_outranks_now_playing() {
    let mut r = rig();
    r.engine.set_dozing(true);
    r.engine.set_indication(None, Some("Local Song"), false);
    r.renderer.clear_calls();

    r.engine.set_indication(None, Some("Ambient Song"), true);
    r.engine.set_now_playing_indication("Another Ambient Song");

    assert!(r.renderer.calls().is_empty());
    assert_eq!(r.renderer.state().lock().unwrap().text.as_deref(), Some("Local Song"));
    assert!(r.engine.is_visible());
}

#[test]
fn test_repeated_update_is_idempotent() {
    let mut r = rig();
    r.engine.set_dozing(true);
    let media = MediaInfo::new("X", "Y", "Z", 65_000);

    r.engine.set_indication(Some(&media), None, false);
    let first_deadline = r.engine.next_deadline();
    assert_eq!(r.host.state().lock().unwrap().wake_count, 1);

    r.clock.advance_ms(500);
    r.renderer.clear_calls();
    r.engine.set_indication(Some(&media), None, false);

    assert_eq!(r.host.state().lock().unwrap().wake_count, 1);
    assert_eq!(r.engine.next_deadline(), first_deadline);
    assert!(!r.renderer.calls().contains(&RenderCall::SetScrolling(false)));
}

#[test]
fn test_same_composed_text_is_same_track() {
    let mut r = rig();
    r.engine.set_dozing(true);

    r.engine.set_indication(Some(&MediaInfo::new("X", "Album One", "Z", 60_000)), None, false);
    r.clock.advance_ms(1600);
    assert!(r.engine.fire_due_timers());

    // different album and length, same line
    r.engine.set_indication(Some(&MediaInfo::new("X", "Album Two", "Z", 90_000)), None, false);
    assert_eq!(r.engine.next_deadline(), None);
    assert!(r.engine.is_scrolling());
    assert_eq!(r.host.state().lock().unwrap().wake_count, 1);
    assert_eq!(r.renderer.state().lock().unwrap().length_text.as_deref(), Some("01:30"));
}

#[test]
fn test_duration_formatting_reaches_renderer() {
    let mut r = rig();
    r.engine.set_indication(Some(&MediaInfo::new("A", "B", "C", 125_000)), None, false);
    assert_eq!(r.renderer.state().lock().unwrap().length_text.as_deref(), Some("02:05"));

    r.engine.set_indication(Some(&MediaInfo::new("A", "B", "C", 0)), None, false);
    let state = r.renderer.state();
    let s = state.lock().unwrap();
    assert_eq!(s.text.as_deref(), Some("A - C"));
    assert_eq!(s.length_text, None);
}

#[test]
fn test_notification_fallback_has_no_length() {
    let mut r = rig();
    let mut media = MediaInfo::new("A", "B", "C", 125_000);
    media.artist = None;
    r.engine.set_indication(Some(&media), Some("Live stream"), false);

    assert_eq!(r.engine.state().current_text.as_deref(), Some("Live stream"));
    assert_eq!(r.engine.state().current_length_text, None);
}

#[derive(Debug, Clone, Copy)]
enum Op {
    DozeOn,
    DozeOff,
    Local,
    LocalEmpty,
    NowPlaying,
    Hide,
    ForcedPulse,
}

const OPS: [Op; 7] = [
    Op::DozeOn,
    Op::DozeOff,
    Op::Local,
    Op::LocalEmpty,
    Op::NowPlaying,
    Op::Hide,
    Op::ForcedPulse,
];

fn run(r: &mut Rig, op: Op) {
    match op {
        Op::DozeOn => r.engine.set_dozing(true),
        Op::DozeOff => r.engine.set_dozing(false),
        Op::Local => r.engine.set_indication(Some(&MediaInfo::new("A", "B", "C", 1000)), None, false),
        Op::LocalEmpty => r.engine.set_indication(None, Some(""), false),
        Op::NowPlaying => r.engine.set_now_playing_indication("Heard nearby"),
        Op::Hide => r.engine.hide_indication(),
        Op::ForcedPulse => r.engine.on_pulse_event(WakeReason::ForcedMediaNotification, true),
    }
}

#[test]
fn test_visibility_invariant_over_all_short_sequences() {
    let n = OPS.len();
    for seq in 0..n.pow(4) {
        let mut r = rig();
        let mut idx = seq;
        for _ in 0..4 {
            let op = OPS[idx % n];
            idx /= n;
            run(&mut r, op);
            r.clock.advance_ms(700);
            r.engine.fire_due_timers();

            let state = r.engine.state().clone();
            let expected = state.dozing
                && (state.local_info_available || state.now_playing_info_available);
            assert_eq!(r.engine.is_visible(), expected, "after {:?} in sequence {}", op, seq);
            assert_eq!(
                r.renderer.state().lock().unwrap().visible,
                expected,
                "renderer out of sync after {:?} in sequence {}",
                op,
                seq
            );
        }
    }
}

#[test]
fn test_scroll_restart_is_single_flight() {
    let mut r = rig();
    r.engine.start_scrolling(false);
    r.clock.advance_ms(1000);
    r.engine.start_scrolling(false);

    // first schedule would be due at 1600
    r.clock.advance_ms(600);
    assert!(!r.engine.fire_due_timers());
    assert_eq!(r.renderer.state().lock().unwrap().scroll_activations, 0);

    r.clock.advance_ms(1000);
    assert!(r.engine.fire_due_timers());
    r.clock.advance_ms(10_000);
    assert!(!r.engine.fire_due_timers());
    assert_eq!(r.renderer.state().lock().unwrap().scroll_activations, 1);
}

#[test]
fn test_metadata_then_doze_scenario() {
    let mut r = rig();
    r.engine.set_indication(Some(&MediaInfo::new("X", "Y", "Z", 65_000)), None, false);
    assert!(!r.renderer.state().lock().unwrap().visible);

    r.engine.set_dozing(true);
    {
        let state = r.renderer.state();
        let s = state.lock().unwrap();
        assert_eq!(s.text.as_deref(), Some("X - Z"));
        assert_eq!(s.length_text.as_deref(), Some("01:05"));
        assert!(s.visible);
        assert_eq!(s.anchor, Some(Anchor::Bottom));
        assert!(!s.scrolling);
    }

    r.clock.advance_ms(1599);
    assert!(!r.engine.fire_due_timers());
    assert!(!r.renderer.state().lock().unwrap().scrolling);

    r.clock.advance_ms(1);
    assert!(r.engine.fire_due_timers());
    let state = r.renderer.state();
    let s = state.lock().unwrap();
    assert!(s.scrolling);
    assert_eq!(s.marquee_repeat_limit, Some(2));
}

#[test]
fn test_forced_media_pulse_extends_once() {
    let mut r = rig();
    r.host.state().lock().unwrap().pulsing = true;
    r.engine.set_dozing(true);
    r.engine.on_pulse_event(WakeReason::ForcedMediaNotification, true);
    assert!(r.engine.is_forced_media_pulse());
    assert_eq!(r.renderer.state().lock().unwrap().anchor, Some(Anchor::Center));

    r.engine.set_indication(Some(&MediaInfo::new("New", "Album", "Track", 200_000)), None, false);
    r.clock.advance_ms(1600);
    assert!(r.engine.fire_due_timers());
    r.clock.advance_ms(5000);
    r.engine.fire_due_timers();

    assert_eq!(r.host.state().lock().unwrap().extend_count, 1);
}

#[test]
fn test_hide_while_pulsing_cancels_marquee() {
    let mut r = rig();
    r.host.state().lock().unwrap().pulsing = true;
    r.engine.set_dozing(true);
    r.engine.on_pulse_event(WakeReason::ForcedMediaNotification, true);

    r.engine.set_indication(Some(&MediaInfo::new("A", "B", "C", 90_000)), None, false);
    r.clock.advance_ms(500);
    r.engine.hide_indication();
    assert_eq!(r.engine.next_deadline(), None);

    r.clock.advance_ms(1600);
    assert!(!r.engine.fire_due_timers());
    assert_eq!(r.host.state().lock().unwrap().extend_count, 0);
    let state = r.renderer.state();
    let s = state.lock().unwrap();
    assert!(!s.visible);
    assert!(!s.scrolling);
    assert_eq!(s.scroll_activations, 0);
}

#[test]
fn test_no_pulse_extension_when_not_pulsing() {
    let mut r = rig();
    r.engine.set_dozing(true);
    r.engine.on_pulse_event(WakeReason::ForcedMediaNotification, true);
    r.engine.set_indication(None, Some("Track"), false);
    r.clock.advance_ms(1600);
    assert!(r.engine.fire_due_timers());
    assert_eq!(r.host.state().lock().unwrap().extend_count, 0);
}

#[test]
fn test_dozing_without_info_stays_hidden_and_bottom() {
    let mut r = rig();
    r.engine.on_pulse_event(WakeReason::ForcedMediaNotification, false);
    assert_eq!(r.renderer.state().lock().unwrap().anchor, Some(Anchor::Center));

    r.engine.set_dozing(true);
    let state = r.renderer.state();
    let s = state.lock().unwrap();
    assert!(!s.visible);
    assert_eq!(s.text, None);
    assert_eq!(s.anchor, Some(Anchor::Bottom));
}

#[test]
fn test_no_wake_without_trigger() {
    let renderer = MockRenderer::new();
    let host = MockHost::new();
    let clock = ManualClock::new();
    let mut engine = AmbientIndication::with_renderer(
        Box::new(renderer.clone()),
        host.host_without_wake(),
        TickerConfig::default(),
        Box::new(clock.clone()),
    );

    engine.set_dozing(true);
    engine.set_indication(None, Some("Track"), false);
    assert_eq!(host.state().lock().unwrap().wake_count, 0);
    // still a new track for the ticker
    clock.advance_ms(1600);
    assert!(engine.fire_due_timers());
}

#[test]
fn test_icon_animation_per_applied_update() {
    let mut r = rig();
    r.engine.set_indication(None, Some("Local"), false);
    r.engine.set_now_playing_indication("ignored");
    r.engine.hide_indication();
    assert_eq!(r.renderer.state().lock().unwrap().animation_count, 2);
}
