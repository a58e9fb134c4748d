/*
 *  indication/console.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Log-backed renderer and host capabilities used by the daemon
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

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use chrono::Local;
use log::info;

use super::Anchor;
use super::engine::Host;
use super::traits::{AlwaysOnDisplay, DozePulseController, Renderer, WakeTrigger};

/// Renderer that reports every change through the log
#[derive(Debug, Default)]
pub struct LogRenderer {
    text: Option<String>,
    visible: bool,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn stamp() -> String {
        Local::now().format("%H:%M:%S%.3f").to_string()
    }
}

impl Renderer for LogRenderer {
    fn set_text(&mut self, text: Option<&str>) {
        let text = text.map(str::to_string);
        if text != self.text {
            info!("[{}] text: {}", Self::stamp(), text.as_deref().unwrap_or("<none>"));
            self.text = text;
        }
    }

    fn set_length_text(&mut self, text: Option<&str>) {
        log::debug!("[{}] length: {}", Self::stamp(), text.unwrap_or("<none>"));
    }

    fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            info!("[{}] {}", Self::stamp(), if visible { "shown" } else { "hidden" });
            self.visible = visible;
        }
    }

    fn set_anchor(&mut self, anchor: Anchor) {
        log::debug!("[{}] anchor: {:?}", Self::stamp(), anchor);
    }

    fn set_scrolling(&mut self, scrolling: bool) {
        if scrolling {
            info!("[{}] marquee on", Self::stamp());
        } else {
            log::debug!("[{}] marquee off", Self::stamp());
        }
    }

    fn set_marquee_repeat_limit(&mut self, limit: u32) {
        log::debug!("[{}] marquee repeat limit: {}", Self::stamp(), limit);
    }

    fn play_indicator_animation(&mut self) {
        log::trace!("[{}] music note animation", Self::stamp());
    }
}

/// Pulse flag shared with whoever feeds pulse events to the engine
#[derive(Debug, Clone, Default)]
pub struct PulseFlag(Arc<AtomicBool>);

impl PulseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pulsing: bool) {
        self.0.store(pulsing, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Doze controller that only logs pulse extensions
#[derive(Debug, Clone)]
pub struct LogPulseController {
    pulsing: PulseFlag,
    extensions: u32,
}

impl LogPulseController {
    pub fn new(pulsing: PulseFlag) -> Self {
        Self { pulsing, extensions: 0 }
    }
}

impl DozePulseController for LogPulseController {
    fn is_pulsing(&self) -> bool {
        self.pulsing.get()
    }

    fn extend_pulse_for_music(&mut self) {
        self.extensions += 1;
        info!("Pulse extended for music ({} so far)", self.extensions);
    }
}

/// Fixed always-on setting
#[derive(Debug, Clone, Copy)]
pub struct StaticAlwaysOn(pub bool);

impl AlwaysOnDisplay for StaticAlwaysOn {
    fn is_always_on_enabled(&self) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogWakeTrigger;

impl WakeTrigger for LogWakeTrigger {
    fn trigger_ambient_wake(&mut self) {
        info!("Ambient wake requested for new track");
    }
}

/// Host bundle for the daemon
pub fn logging_host(always_on: bool, wake_trigger: bool, pulsing: PulseFlag) -> Host {
    Host {
        pulse: Box::new(LogPulseController::new(pulsing)),
        always_on: Box::new(StaticAlwaysOn(always_on)),
        wake: if wake_trigger {
            Some(Box::new(LogWakeTrigger))
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_flag_shared() {
        let flag = PulseFlag::new();
        let controller = LogPulseController::new(flag.clone());
        assert!(!controller.is_pulsing());
        flag.set(true);
        assert!(controller.is_pulsing());
    }

    #[test]
    fn test_logging_host_wake_optional() {
        let host = logging_host(true, false, PulseFlag::new());
        assert!(host.always_on.is_always_on_enabled());
        assert!(host.wake.is_none());

        let host = logging_host(false, true, PulseFlag::new());
        assert!(!host.always_on.is_always_on_enabled());
        assert!(host.wake.is_some());
    }

    #[test]
    fn test_log_renderer_tracks_changes() {
        let mut renderer = LogRenderer::new();
        renderer.set_text(Some("A - C"));
        renderer.set_visible(true);
        assert_eq!(renderer.text.as_deref(), Some("A - C"));
        assert!(renderer.visible);
    }
}
