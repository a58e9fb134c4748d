/*
 *  indication/position.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Indicator placement driven by the wake reason
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

use super::{Anchor, WakeReason};

/// Tracks whether the current pulse was forced by a media notification
#[derive(Debug, Clone, Default)]
pub struct PositionPolicy {
    forced_media_pulse: bool,
}

impl PositionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest wake reason and return the resulting anchor
    pub fn set_wake_reason(&mut self, reason: WakeReason) -> Anchor {
        self.forced_media_pulse = reason.is_forced_media();
        log::debug!("Wake reason {:?}, forced media pulse: {}", reason, self.forced_media_pulse);
        self.anchor()
    }

    pub fn is_forced_media_pulse(&self) -> bool {
        self.forced_media_pulse
    }

    pub fn anchor(&self) -> Anchor {
        if self.forced_media_pulse {
            Anchor::Center
        } else {
            Anchor::Bottom
        }
    }
}
