use vrcstat::core::chatbox::MediaStatus;
use vrcstat::core::config::MediaCapPolicy;
use vrcstat::platform::media::{MediaSessions, TrackMetadata};
use vrcstat::platform::MediaAdapter;
use vrcstat::{Result, VrcError};

/// Bus with a fixed list of players, each either answering or failing
struct Bus(Vec<(&'static str, Option<TrackMetadata>)>);

impl MediaSessions for Bus {
    fn list_names(&mut self) -> Result<Vec<String>> {
        Ok(self.0.iter().map(|(name, _)| name.to_string()).collect())
    }

    fn metadata(&mut self, bus_name: &str) -> Result<TrackMetadata> {
        self.0
            .iter()
            .find(|(name, _)| *name == bus_name)
            .and_then(|(_, m)| m.clone())
            .ok_or_else(|| VrcError::media_bus("org.freedesktop.DBus.Error.ServiceUnknown"))
    }
}

struct NoBus;

impl MediaSessions for NoBus {
    fn list_names(&mut self) -> Result<Vec<String>> {
        Err(VrcError::media_bus("DBUS_SESSION_BUS_ADDRESS not set"))
    }

    fn metadata(&mut self, _bus_name: &str) -> Result<TrackMetadata> {
        unreachable!("metadata must not be read without a bus")
    }
}

fn track(title: &str, artist: &str) -> Option<TrackMetadata> {
    Some(TrackMetadata {
        title: Some(title.to_string()),
        artists: vec![artist.to_string()],
    })
}

#[test]
fn test_zero_sessions() {
    let mut adapter = MediaAdapter::new(Bus(vec![]), MediaCapPolicy::Compact);
    assert_eq!(adapter.sample().to_string(), "🎵 No media playing");
}

#[test]
fn test_unreachable_bus() {
    let mut adapter = MediaAdapter::new(NoBus, MediaCapPolicy::Compact);
    assert_eq!(adapter.sample(), MediaStatus::NoPlayer);
}

#[test]
fn test_non_mpris_names_are_ignored() {
    let bus = Bus(vec![
        (":1.42", track("Not", "A Player")),
        ("org.kde.StatusNotifierWatcher", track("Also", "Not")),
    ]);
    let mut adapter = MediaAdapter::new(bus, MediaCapPolicy::Compact);
    assert_eq!(adapter.sample(), MediaStatus::NothingPlaying);
}

#[test]
fn test_first_usable_session_wins() {
    let bus = Bus(vec![
        ("org.mpris.MediaPlayer2.chromium.instance1234", None),
        (
            "org.mpris.MediaPlayer2.mpv",
            Some(TrackMetadata {
                title: None,
                artists: vec!["Unknown".to_string()],
            }),
        ),
        ("org.mpris.MediaPlayer2.spotify", track("Avril 14th", "Aphex Twin")),
        ("org.mpris.MediaPlayer2.vlc", track("Later", "Ignored")),
    ]);
    let mut adapter = MediaAdapter::new(bus, MediaCapPolicy::Compact);
    assert_eq!(adapter.sample().to_string(), "🎵 Avril 14th - Aphex Twin");
}

#[test]
fn test_compact_policy_caps_lengths() {
    let bus = Bus(vec![(
        "org.mpris.MediaPlayer2.spotify",
        track(
            "Everything In Its Right Place (Live)",
            "Radiohead and Friends",
        ),
    )]);
    let mut adapter = MediaAdapter::new(bus, MediaCapPolicy::Compact);
    assert_eq!(
        adapter.sample().to_string(),
        "🎵 Everything In Its Right P - Radiohead and F"
    );
}
