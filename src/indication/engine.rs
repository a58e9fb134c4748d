/*
 *  indication/engine.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Ambient indication engine - decides which text is authoritative across
 *  the local and now playing channels, detects track changes and drives
 *  the renderer, ticker and position policy
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

use std::time::Duration;
use log::{debug, info};

use super::composer::{self, Composition, MediaInfo};
use super::position::PositionPolicy;
use super::ticker::{TickerConfig, TickerScheduler};
use super::traits::{AlwaysOnDisplay, BoxedRenderer, DozePulseController, Renderer, WakeTrigger};
use super::{Anchor, WakeReason};
use crate::timer::Clock;

/// Host capabilities injected at construction
pub struct Host {
    pub pulse: Box<dyn DozePulseController>,
    pub always_on: Box<dyn AlwaysOnDisplay>,
    /// Absent when the host cannot wake the ambient surface on its own
    pub wake: Option<Box<dyn WakeTrigger>>,
}

/// Indication state owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicationState {
    /// Text shown, or pending until the next doze
    pub current_text: Option<String>,

    /// `mm:ss` length, only for text composed from metadata
    pub current_length_text: Option<String>,

    /// Local (media session / notification) channel has text
    pub local_info_available: bool,

    /// Now playing channel has text
    pub now_playing_info_available: bool,

    /// Last text rendered while dozing, used for track change detection
    pub last_shown_text: Option<String>,

    pub dozing: bool,
}

impl IndicationState {
    #[inline]
    pub fn any_info_available(&self) -> bool {
        self.local_info_available || self.now_playing_info_available
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.dozing && self.any_info_available()
    }
}

/// The ambient indication engine
///
/// All entry points run on one event thread. Timers are not self driving:
/// the owner sleeps until [`AmbientIndication::next_deadline`] and then calls
/// [`AmbientIndication::fire_due_timers`].
pub struct AmbientIndication {
    renderer: Option<BoxedRenderer>,
    host: Host,
    clock: Box<dyn Clock>,
    ticker: TickerScheduler,
    position: PositionPolicy,
    state: IndicationState,
    scrolling: bool,
}

impl AmbientIndication {
    /// Create an engine with no renderer attached
    pub fn new(host: Host, ticker: TickerConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            renderer: None,
            host,
            clock,
            ticker: TickerScheduler::new(ticker),
            position: PositionPolicy::new(),
            state: IndicationState::default(),
            scrolling: false,
        }
    }

    /// Create an engine and attach `renderer` right away
    pub fn with_renderer(
        renderer: BoxedRenderer,
        host: Host,
        ticker: TickerConfig,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut engine = Self::new(host, ticker, clock);
        engine.attach_renderer(renderer);
        engine
    }

    /// Attach (or replace) the renderer and replay the current state on it
    pub fn attach_renderer(&mut self, renderer: BoxedRenderer) {
        info!("Renderer attached");
        self.renderer = Some(renderer);

        let anchor = self.position.anchor();
        let visible = self.state.is_visible();
        let scrolling = self.scrolling;
        let repeat_limit = self.ticker.config().marquee_repeat_limit;
        let IndicationState { current_text, current_length_text, .. } = &self.state;

        if let Some(r) = self.renderer.as_mut() {
            r.set_anchor(anchor);
            r.set_text(current_text.as_deref());
            r.set_length_text(current_length_text.as_deref());
            r.set_visible(visible);
            if scrolling {
                r.set_marquee_repeat_limit(repeat_limit);
            }
            r.set_scrolling(scrolling);
        }
    }

    /// Detach the renderer, state keeps being tracked
    pub fn detach_renderer(&mut self) -> Option<BoxedRenderer> {
        debug!("Renderer detached");
        self.renderer.take()
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn state(&self) -> &IndicationState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn is_forced_media_pulse(&self) -> bool {
        self.position.is_forced_media_pulse()
    }

    pub fn anchor(&self) -> Anchor {
        self.position.anchor()
    }

    /// Apply a media session or notification update
    ///
    /// `now_playing` selects the lower priority channel: while the local
    /// channel has text, now playing updates are dropped without touching
    /// the renderer.
    pub fn set_indication(
        &mut self,
        media: Option<&MediaInfo>,
        notification: Option<&str>,
        now_playing: bool,
    ) {
        // never override local track info
        if now_playing && self.state.local_info_available {
            debug!("Now playing update ignored, local track info has priority");
            return;
        }

        let Composition { text, length_text } = composer::compose(media, notification);

        if now_playing {
            self.state.now_playing_info_available = text.is_some();
        } else {
            self.state.local_info_available = text.is_some();
        }
        self.state.current_text = text;
        self.state.current_length_text = length_text;

        let visible = self.state.is_visible();
        if visible && self.state.last_shown_text != self.state.current_text {
            info!("New track: {:?}", self.state.current_text);
            self.start_scrolling(true);
            if !self.host.always_on.is_always_on_enabled() {
                if let Some(wake) = self.host.wake.as_mut() {
                    wake.trigger_ambient_wake();
                }
            }
        } else if !visible && self.state.dozing {
            // nothing left to scroll
            self.stop_scrolling();
        }

        if self.state.dozing {
            self.state.last_shown_text = self.state.current_text.clone();
        }

        let IndicationState { current_text, current_length_text, .. } = &self.state;
        if let Some(r) = self.renderer.as_mut() {
            r.set_text(current_text.as_deref());
            r.set_length_text(current_length_text.as_deref());
            r.set_visible(visible);
            r.play_indicator_animation();
        }
    }

    /// Now playing channel entry point
    pub fn set_now_playing_indication(&mut self, track_info: &str) {
        self.set_indication(None, Some(track_info), true);
    }

    /// Clear the local channel
    pub fn hide_indication(&mut self) {
        self.set_indication(None, None, false);
    }

    pub fn set_dozing(&mut self, dozing: bool) {
        if dozing == self.state.dozing {
            return;
        }
        info!("Dozing: {}", dozing);
        self.state.dozing = dozing;

        if dozing {
            self.start_scrolling(false);
        } else {
            self.stop_scrolling();
        }

        if dozing && self.state.any_info_available() {
            self.state.last_shown_text = self.state.current_text.clone();
            let IndicationState { current_text, current_length_text, .. } = &self.state;
            if let Some(r) = self.renderer.as_mut() {
                r.set_text(current_text.as_deref());
                r.set_length_text(current_length_text.as_deref());
                r.set_visible(true);
            }
            self.update_position();
        } else {
            self.set_clean_layout(WakeReason::None);
            if let Some(r) = self.renderer.as_mut() {
                r.set_visible(false);
                r.set_text(None);
                r.set_length_text(None);
            }
        }
    }

    /// Pulse started or ended for `reason`
    pub fn on_pulse_event(&mut self, reason: WakeReason, pulsing: bool) {
        debug!("Pulse event {:?}, pulsing: {}", reason, pulsing);
        self.set_clean_layout(reason);
        if pulsing {
            self.start_scrolling(reason.is_forced_media());
        } else {
            self.stop_scrolling();
        }
    }

    /// Record the wake reason and reposition the indicator
    pub fn set_clean_layout(&mut self, reason: WakeReason) {
        self.position.set_wake_reason(reason);
        self.update_position();
    }

    pub fn update_position(&mut self) {
        let anchor = self.position.anchor();
        if let Some(r) = self.renderer.as_mut() {
            r.set_anchor(anchor);
        }
    }

    /// Stop any marquee and schedule a fresh activation
    pub fn start_scrolling(&mut self, extend_pulse_if_forced: bool) {
        self.stop_scrolling();
        let now = self.clock.now();
        self.ticker.start(now, extend_pulse_if_forced);
    }

    /// Cancel the pending activation and stop the marquee immediately
    pub fn stop_scrolling(&mut self) {
        self.ticker.stop();
        self.scrolling = false;
        if let Some(r) = self.renderer.as_mut() {
            r.set_scrolling(false);
        }
    }

    /// Offset since clock origin at which the pending ticker activation is due
    pub fn next_deadline(&self) -> Option<Duration> {
        self.ticker.next_deadline()
    }

    /// Time left until the pending ticker activation, zero when overdue
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline().map(|at| at.saturating_sub(now))
    }

    /// Run the ticker activation if it is due. Returns true when it ran.
    pub fn fire_due_timers(&mut self) -> bool {
        let Some(activation) = self.ticker.take_due(self.clock.now()) else {
            return false;
        };

        debug!("Ticker activation {:?}", activation);
        self.scrolling = true;
        if let Some(r) = self.renderer.as_mut() {
            r.set_marquee_repeat_limit(activation.repeat_limit);
            r.set_scrolling(true);
        }

        if activation.extend_pulse_if_forced && self.host.pulse.is_pulsing() {
            info!("Extending pulse for music ticker");
            self.host.pulse.extend_pulse_for_music();
        }
        true
    }
}
