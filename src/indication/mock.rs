/*
 *  indication/mock.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Recording renderer and host collaborators for testing without a display
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

use std::sync::{Arc, Mutex, MutexGuard};

use super::Anchor;
use super::engine::Host;
use super::traits::{AlwaysOnDisplay, DozePulseController, Renderer, WakeTrigger};

/// One renderer call, in the order the engine issued it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    SetText(Option<String>),
    SetLengthText(Option<String>),
    SetVisible(bool),
    SetAnchor(Anchor),
    SetScrolling(bool),
    SetMarqueeRepeatLimit(u32),
    PlayAnimation,
}

/// Internal state for the mock renderer (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockRendererState {
    /// Current main line
    pub text: Option<String>,

    /// Current length line
    pub length_text: Option<String>,

    pub visible: bool,

    /// Last anchor applied, `None` until the engine positions the indicator
    pub anchor: Option<Anchor>,

    pub scrolling: bool,

    pub marquee_repeat_limit: Option<u32>,

    /// Number of times scrolling was switched on
    pub scroll_activations: usize,

    pub animation_count: usize,

    /// Every call since the last `clear_calls`
    pub calls: Vec<RenderCall>,
}

/// Mock renderer
///
/// Clones share state, so a test keeps one clone and hands the other to
/// the engine.
#[derive(Debug, Clone, Default)]
pub struct MockRenderer {
    state: Arc<Mutex<MockRendererState>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockRendererState>> {
        Arc::clone(&self.state)
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockRendererState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Renderer for MockRenderer {
    fn set_text(&mut self, text: Option<&str>) {
        let text = text.map(str::to_string);
        let mut state = self.lock();
        state.text = text.clone();
        state.calls.push(RenderCall::SetText(text));
    }

    fn set_length_text(&mut self, text: Option<&str>) {
        let text = text.map(str::to_string);
        let mut state = self.lock();
        state.length_text = text.clone();
        state.calls.push(RenderCall::SetLengthText(text));
    }

    fn set_visible(&mut self, visible: bool) {
        let mut state = self.lock();
        state.visible = visible;
        state.calls.push(RenderCall::SetVisible(visible));
    }

    fn set_anchor(&mut self, anchor: Anchor) {
        let mut state = self.lock();
        state.anchor = Some(anchor);
        state.calls.push(RenderCall::SetAnchor(anchor));
    }

    fn set_scrolling(&mut self, scrolling: bool) {
        let mut state = self.lock();
        if scrolling {
            state.scroll_activations += 1;
        }
        state.scrolling = scrolling;
        state.calls.push(RenderCall::SetScrolling(scrolling));
    }

    fn set_marquee_repeat_limit(&mut self, limit: u32) {
        let mut state = self.lock();
        state.marquee_repeat_limit = Some(limit);
        state.calls.push(RenderCall::SetMarqueeRepeatLimit(limit));
    }

    fn play_indicator_animation(&mut self) {
        let mut state = self.lock();
        state.animation_count += 1;
        state.calls.push(RenderCall::PlayAnimation);
    }
}

/// Host side switches and counters
#[derive(Debug, Default)]
pub struct MockHostState {
    /// Reported by `is_pulsing`
    pub pulsing: bool,

    /// Reported by `is_always_on_enabled`
    pub always_on: bool,

    pub extend_count: usize,

    pub wake_count: usize,
}

/// Mock host capabilities backed by one shared state
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    state: Arc<Mutex<MockHostState>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Arc<Mutex<MockHostState>> {
        Arc::clone(&self.state)
    }

    /// Host bundle with a wake trigger installed
    pub fn host(&self) -> Host {
        Host {
            pulse: Box::new(self.clone()),
            always_on: Box::new(self.clone()),
            wake: Some(Box::new(self.clone())),
        }
    }

    /// Host bundle without a wake trigger
    pub fn host_without_wake(&self) -> Host {
        Host {
            wake: None,
            ..self.host()
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockHostState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DozePulseController for MockHost {
    fn is_pulsing(&self) -> bool {
        self.lock().pulsing
    }

    fn extend_pulse_for_music(&mut self) {
        self.lock().extend_count += 1;
    }
}

impl AlwaysOnDisplay for MockHost {
    fn is_always_on_enabled(&self) -> bool {
        self.lock().always_on
    }
}

impl WakeTrigger for MockHost {
    fn trigger_ambient_wake(&mut self) {
        self.lock().wake_count += 1;
    }
}
