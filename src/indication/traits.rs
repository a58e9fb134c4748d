/*
 *  indication/traits.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Collaborator contracts consumed by the indication engine
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

use super::Anchor;

/// Surface the engine draws on
///
/// The engine only ever issues these setters; layout, fonts and the actual
/// marquee animation belong to the implementation. Calls are synchronous and
/// must not call back into the engine.
pub trait Renderer: Send {
    /// Main indication line, `None` clears it
    fn set_text(&mut self, text: Option<&str>);

    /// Track length line (`mm:ss`), `None` clears it
    fn set_length_text(&mut self, text: Option<&str>);

    fn set_visible(&mut self, visible: bool);

    fn set_anchor(&mut self, anchor: Anchor);

    /// Enable or disable marquee scrolling of the main line
    ///
    /// Enabling also marks the line selected; most text surfaces refuse to
    /// animate otherwise.
    fn set_scrolling(&mut self, scrolling: bool);

    /// Number of marquee passes before the text settles
    ///
    /// Sent right before scrolling is enabled. Renderers with a fixed
    /// behaviour can ignore it.
    fn set_marquee_repeat_limit(&mut self, _limit: u32) {}

    /// Replay the music note icon animation
    fn play_indicator_animation(&mut self);
}

/// Boxed renderer as held by the engine
pub type BoxedRenderer = Box<dyn Renderer>;

/// Host doze controller
pub trait DozePulseController: Send {
    /// True while the screen is mid-pulse
    fn is_pulsing(&self) -> bool;

    /// Keep the current pulse alive long enough for the music ticker
    fn extend_pulse_for_music(&mut self);
}

/// Always-on display setting of the host
pub trait AlwaysOnDisplay: Send {
    fn is_always_on_enabled(&self) -> bool;
}

/// Wakes the ambient surface for a new track when always-on is off
pub trait WakeTrigger: Send {
    fn trigger_ambient_wake(&mut self);
}
