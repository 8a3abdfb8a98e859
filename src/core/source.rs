//! core/source.rs
//! Playback source selection: the bundled asset vs the remote sample URL.

/// Bundled asset played for [`PlaybackSource::Local`].
pub const LOCAL_ASSET: &str = "assets/videoplayback.mp4";

/// Stream played for the remote source.
pub const REMOTE_SAMPLE_URL: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// The media the player is (or should be) bound to.
///
/// Exactly one source is active at a time. The URL is carried as an opaque
/// string; nothing in the player interprets it beyond handing it to the
/// fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSource {
    /// The asset shipped with the app.
    Local,
    /// A remote URL, fetched before playback.
    Remote(String),
}

impl PlaybackSource {
    pub fn remote_sample() -> Self {
        Self::Remote(REMOTE_SAMPLE_URL.to_string())
    }

    /// The other of the two selectable sources.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Local => Self::remote_sample(),
            Self::Remote(_) => Self::Local,
        }
    }

    /// Short label for the source-toggle button.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Remote(_) => "Remote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips_between_exactly_two_sources() {
        let local = PlaybackSource::Local;
        let remote = local.toggled();

        assert_eq!(remote, PlaybackSource::remote_sample());
        assert_eq!(remote.toggled(), PlaybackSource::Local);
    }

    #[test]
    fn labels_name_the_selector_not_the_url() {
        assert_eq!(PlaybackSource::Local.label(), "Local");
        assert_eq!(
            PlaybackSource::Remote("http://example.com/a.mp4".into()).label(),
            "Remote"
        );
    }
}
