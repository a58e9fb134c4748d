/*
 *  indication/ticker.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Debounced marquee activation for the indication line
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
use crate::constants::{MARQUEE_REPEAT_LIMIT, TICKER_DELAY_MS};

/// Ticker timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    /// Wait between a (re)start request and the marquee actually running
    pub delay: Duration,

    /// Marquee passes per activation
    pub marquee_repeat_limit: u32,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(TICKER_DELAY_MS),
            marquee_repeat_limit: MARQUEE_REPEAT_LIMIT,
        }
    }
}

/// What to do when a scheduled activation fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerActivation {
    pub extend_pulse_if_forced: bool,
    pub repeat_limit: u32,
}

/// Single-flight scheduler for marquee activation
///
/// Holds at most one pending activation; `start` overwrites it. The
/// scheduler only tracks time, the engine applies activations to the
/// renderer.
#[derive(Debug)]
pub struct TickerScheduler {
    config: TickerConfig,
    pending: Option<(Duration, TickerActivation)>,
}

impl TickerScheduler {
    pub fn new(config: TickerConfig) -> Self {
        Self { config, pending: None }
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// Schedule an activation `delay` after `now`, replacing any pending one
    pub fn start(&mut self, now: Duration, extend_pulse_if_forced: bool) {
        let activation = TickerActivation {
            extend_pulse_if_forced,
            repeat_limit: self.config.marquee_repeat_limit,
        };
        self.pending = Some((now + self.config.delay, activation));
        log::debug!(
            "Ticker scheduled in {:?} (extend pulse: {})",
            self.config.delay,
            extend_pulse_if_forced
        );
    }

    /// Cancel the pending activation, returns whether one was pending
    pub fn stop(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|(due, _)| due)
    }

    /// Pop the activation if it is due at `now`
    pub fn take_due(&mut self, now: Duration) -> Option<TickerActivation> {
        match self.pending {
            Some((due, activation)) if due <= now => {
                self.pending = None;
                Some(activation)
            }
            _ => None,
        }
    }
}
