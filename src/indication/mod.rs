/*
 *  indication/mod.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Ambient indication subsystem - text composition, channel precedence,
 *  delayed marquee scheduling and wake reason positioning
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

// Collaborator contracts
pub mod traits;

// Engine parts
pub mod composer;
pub mod position;
pub mod ticker;
pub mod engine;

// Collaborators that log instead of drawing (daemon)
pub mod console;

// Recording collaborators for tests
pub mod mock;

// Re-exports for convenience
pub use traits::{Renderer, BoxedRenderer, DozePulseController, AlwaysOnDisplay, WakeTrigger};
pub use composer::{MediaInfo, Composition, compose, format_track_length};
pub use position::PositionPolicy;
pub use ticker::{TickerConfig, TickerScheduler, TickerActivation};
pub use engine::{AmbientIndication, Host, IndicationState};

use crate::constants::*;

/// Where the indicator sits on the ambient surface
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Anchor {
    Center,  // forced media pulse - track info is the point of the wake
    Bottom,  // everything else
}

/// Why the display woke up, as reported with a pulse event
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WakeReason {
    None,
    Intent,
    Notification,
    SignificantMotion,
    Pickup,
    DoubleTap,
    LongPress,
    Docking,
    ForcedMediaNotification,
    Other(i32),
}

impl WakeReason {
    /// Map a host pulse reason code onto a wake reason.
    pub fn from_code(code: i32) -> Self {
        match code {
            PULSE_REASON_NONE => WakeReason::None,
            PULSE_REASON_INTENT => WakeReason::Intent,
            PULSE_REASON_NOTIFICATION => WakeReason::Notification,
            PULSE_REASON_SIGMOTION => WakeReason::SignificantMotion,
            PULSE_REASON_SENSOR_PICKUP => WakeReason::Pickup,
            PULSE_REASON_SENSOR_DOUBLE_TAP => WakeReason::DoubleTap,
            PULSE_REASON_SENSOR_LONG_PRESS => WakeReason::LongPress,
            PULSE_REASON_DOCKING => WakeReason::Docking,
            PULSE_REASON_FORCED_MEDIA_NOTIFICATION => WakeReason::ForcedMediaNotification,
            other => WakeReason::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            WakeReason::None => PULSE_REASON_NONE,
            WakeReason::Intent => PULSE_REASON_INTENT,
            WakeReason::Notification => PULSE_REASON_NOTIFICATION,
            WakeReason::SignificantMotion => PULSE_REASON_SIGMOTION,
            WakeReason::Pickup => PULSE_REASON_SENSOR_PICKUP,
            WakeReason::DoubleTap => PULSE_REASON_SENSOR_DOUBLE_TAP,
            WakeReason::LongPress => PULSE_REASON_SENSOR_LONG_PRESS,
            WakeReason::Docking => PULSE_REASON_DOCKING,
            WakeReason::ForcedMediaNotification => PULSE_REASON_FORCED_MEDIA_NOTIFICATION,
            WakeReason::Other(code) => *code,
        }
    }

    #[inline]
    pub fn is_forced_media(&self) -> bool {
        *self == WakeReason::ForcedMediaNotification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_reason_codes() {
        assert_eq!(WakeReason::from_code(-1), WakeReason::None);
        assert_eq!(WakeReason::from_code(1), WakeReason::Notification);
        assert_eq!(WakeReason::from_code(7), WakeReason::ForcedMediaNotification);
        assert_eq!(WakeReason::from_code(42), WakeReason::Other(42));

        for code in -1..=8 {
            assert_eq!(WakeReason::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_only_forced_media_is_forced() {
        assert!(WakeReason::ForcedMediaNotification.is_forced_media());
        assert!(!WakeReason::Notification.is_forced_media());
        assert!(!WakeReason::None.is_forced_media());
        assert!(!WakeReason::Other(107).is_forced_media());
    }
}
