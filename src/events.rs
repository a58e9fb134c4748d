/*
 *  events.rs
 *
 *  ambient-indication
 *	(c) 2020-26 Stuart Hunter
 *
 *	Inbound host events, one JSON object per line
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
use serde::Deserialize;
use thiserror::Error;

use crate::indication::{AmbientIndication, MediaInfo, WakeReason};

#[derive(Debug, Error)]
pub enum EventError {
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Events the host feeds the engine
///
/// ```json
/// {"event":"media","artist":"X","album":"Y","title":"Z","duration_ms":65000}
/// {"event":"doze","dozing":true}
/// {"event":"pulse","reason":7,"pulsing":true}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Doze {
        dozing: bool,
    },
    Pulse {
        reason: i32,
        pulsing: bool,
    },
    /// Media session metadata, with an optional notification fallback
    Media {
        artist: Option<String>,
        album: Option<String>,
        title: Option<String>,
        #[serde(default)]
        duration_ms: u64,
        notification: Option<String>,
    },
    Notification {
        text: Option<String>,
    },
    NowPlaying {
        text: String,
    },
    Hide,
    /// The renderer (re)inflated and can take output
    RendererReady,
}

/// Decode one line. Blank lines and `#` comments yield `None`.
pub fn parse_event(line: &str) -> Result<Option<Event>, EventError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

impl Event {
    /// Feed the event to the engine
    ///
    /// `RendererReady` is a no-op here: the caller owns renderer creation and
    /// attaches it with [`AmbientIndication::attach_renderer`].
    pub fn apply(self, engine: &mut AmbientIndication) {
        match self {
            Event::Doze { dozing } => engine.set_dozing(dozing),
            Event::Pulse { reason, pulsing } => {
                engine.on_pulse_event(WakeReason::from_code(reason), pulsing)
            }
            Event::Media { artist, album, title, duration_ms, notification } => {
                let media = MediaInfo { artist, album, title, duration_ms };
                engine.set_indication(Some(&media), notification.as_deref(), false);
            }
            Event::Notification { text } => engine.set_indication(None, text.as_deref(), false),
            Event::NowPlaying { text } => engine.set_now_playing_indication(&text),
            Event::Hide => engine.hide_indication(),
            Event::RendererReady => {}
        }
    }
}
