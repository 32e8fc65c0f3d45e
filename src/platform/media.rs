//! Currently playing track via MPRIS on the D-Bus session bus.

use std::collections::HashMap;

use zbus::blocking::fdo::DBusProxy;
use zbus::blocking::Connection;
use zbus::dbus_proxy;
use zbus::zvariant::{OwnedValue, Value};

use crate::core::chatbox::sample::{MediaDescriptor, MediaStatus};
use crate::core::config::MediaCapPolicy;
use crate::error::{Result, VrcError};

/// Bus name prefix every MPRIS player registers under
pub const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

#[dbus_proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait Player {
    #[dbus_proxy(property)]
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;
}

/// The parts of a player's `Metadata` property we care about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artists: Vec<String>,
}

impl TrackMetadata {
    /// Cap title and first artist; `None` unless both end up non-empty.
    pub fn describe(&self, caps: MediaCapPolicy) -> Option<MediaDescriptor> {
        let title = cap_chars(self.title.as_deref()?, caps.title_cap());
        let artist = cap_chars(self.artists.first()?, caps.artist_cap());

        if title.is_empty() || artist.is_empty() {
            return None;
        }
        Some(MediaDescriptor { title, artist })
    }
}

fn cap_chars(text: &str, cap: Option<usize>) -> String {
    match cap {
        Some(n) => text.chars().take(n).collect(),
        None => text.to_string(),
    }
}

/// Access to the media sessions on a message bus
pub trait MediaSessions {
    /// All bus names currently registered; an error means the bus is unreachable
    fn list_names(&mut self) -> Result<Vec<String>>;

    fn metadata(&mut self, bus_name: &str) -> Result<TrackMetadata>;
}

/// `MediaSessions` over the user's D-Bus session bus
///
/// The connection is opened lazily and dropped after a bus-level failure, so a
/// bus that comes up after startup is picked up on a later tick.
#[derive(Default)]
pub struct DBusSessions {
    connection: Option<Connection>,
}

impl DBusSessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn connection(&mut self) -> Result<Connection> {
        if let Some(conn) = &self.connection {
            return Ok(conn.clone());
        }
        let conn = Connection::session().map_err(|e| VrcError::media_bus(e.to_string()))?;
        self.connection = Some(conn.clone());
        Ok(conn)
    }
}

impl MediaSessions for DBusSessions {
    fn list_names(&mut self) -> Result<Vec<String>> {
        let conn = self.connection()?;
        let names = DBusProxy::new(&conn).and_then(|proxy| proxy.list_names().map_err(Into::into));

        match names {
            Ok(names) => Ok(names.iter().map(|n| n.to_string()).collect()),
            Err(e) => {
                self.connection = None;
                Err(VrcError::media_bus(e.to_string()))
            }
        }
    }

    fn metadata(&mut self, bus_name: &str) -> Result<TrackMetadata> {
        let conn = self.connection()?;
        let proxy = PlayerProxyBlocking::builder(&conn)
            .destination(bus_name)
            .and_then(|b| b.cache_properties(zbus::CacheProperties::No).build())
            .map_err(|e| VrcError::media_bus(format!("{}: {}", bus_name, e)))?;

        let metadata = proxy
            .metadata()
            .map_err(|e| VrcError::media_bus(format!("{}: {}", bus_name, e)))?;

        Ok(TrackMetadata {
            title: metadata.get("xesam:title").and_then(|v| value_str(v)),
            artists: metadata
                .get("xesam:artist")
                .map(|v| value_strings(v))
                .unwrap_or_default(),
        })
    }
}

fn value_str(value: &Value<'_>) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.as_str().to_string()),
        Value::Value(inner) => value_str(inner),
        _ => None,
    }
}

fn value_strings(value: &Value<'_>) -> Vec<String> {
    match value {
        Value::Array(items) => items.get().iter().filter_map(value_str).collect(),
        // Some players send a bare string instead of a list
        Value::Str(_) => value_str(value).into_iter().collect(),
        Value::Value(inner) => value_strings(inner),
        _ => Vec::new(),
    }
}

/// Picks the first MPRIS session with a usable title and artist.
pub struct MediaAdapter<S: MediaSessions> {
    sessions: S,
    caps: MediaCapPolicy,
}

impl MediaAdapter<DBusSessions> {
    pub fn session_bus(caps: MediaCapPolicy) -> Self {
        Self::new(DBusSessions::new(), caps)
    }
}

impl<S: MediaSessions> MediaAdapter<S> {
    pub fn new(sessions: S, caps: MediaCapPolicy) -> Self {
        Self { sessions, caps }
    }

    pub fn sample(&mut self) -> MediaStatus {
        let names = match self.sessions.list_names() {
            Ok(names) => names,
            Err(e) => {
                log::warn!("DBus error: {}", e);
                return MediaStatus::NoPlayer;
            }
        };

        for name in names.iter().filter(|n| n.starts_with(MPRIS_PREFIX)) {
            match self.sessions.metadata(name) {
                Ok(metadata) => {
                    if let Some(media) = metadata.describe(self.caps) {
                        return MediaStatus::Playing(media);
                    }
                }
                Err(e) => log::debug!("Skipping player: {}", e),
            }
        }

        MediaStatus::NothingPlaying
    }
}
