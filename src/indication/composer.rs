/*
 *  indication/composer.rs
 *
 *  ambient-indication
 *  (c) 2020-26 Stuart Hunter
 *
 *  Turns media session metadata or a notification payload into the
 *  indication line and track length
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

use serde::{Deserialize, Serialize};
use crate::constants::ARTIST_TITLE_SEPARATOR;

/// Track metadata as published by a media session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Track length in milliseconds, 0 when unknown
    #[serde(default)]
    pub duration_ms: u64,
}

impl MediaInfo {
    pub fn new(artist: &str, album: &str, title: &str, duration_ms: u64) -> Self {
        Self {
            artist: Some(artist.to_string()),
            album: Some(album.to_string()),
            title: Some(title.to_string()),
            duration_ms,
        }
    }
}

/// Result of composing an indication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub text: Option<String>,
    pub length_text: Option<String>,
}

/// Compose the indication line.
///
/// Metadata wins when artist, album and title are all present; the album is
/// required but left out of the line to keep it short on the ambient surface.
/// Otherwise a non-empty notification string is used verbatim, without a
/// length. Anything else composes to nothing.
pub fn compose(media: Option<&MediaInfo>, notification: Option<&str>) -> Composition {
    if let Some(composed) = media.and_then(compose_media) {
        return composed;
    }

    match notification {
        Some(text) if !text.is_empty() => Composition {
            text: Some(text.to_string()),
            length_text: None,
        },
        _ => Composition::default(),
    }
}

fn compose_media(media: &MediaInfo) -> Option<Composition> {
    let artist = non_empty(&media.artist)?;
    non_empty(&media.album)?;
    let title = non_empty(&media.title)?;

    Some(Composition {
        text: Some(format!("{}{}{}", artist, ARTIST_TITLE_SEPARATOR, title)),
        length_text: format_track_length(media.duration_ms),
    })
}

#[inline]
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// `mm:ss` for a track length in milliseconds, `None` for 0.
///
/// Minutes are not wrapped into hours, a 100 minute mix reads `100:00`.
pub fn format_track_length(duration_ms: u64) -> Option<String> {
    if duration_ms == 0 {
        return None;
    }
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms / 1_000) % 60;
    Some(format!("{:02}:{:02}", minutes, seconds))
}
