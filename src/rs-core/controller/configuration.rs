const DEFAULT_MANIFEST_EXTENSION: &str = "m3u8";
const DEFAULT_NATIVE_MIME_TYPE: &str = "application/vnd.apple.mpegurl";
const DEFAULT_SCHEME: &str = "https";

/// Inner configuration on which the `PlaybackController` relies.
/// Can be updated at any time through the `config_mut` `PlaybackController`'s method, changes
/// only being considered for the next loaded content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerConfiguration {
    /// Domain (optionally with a scheme and a base path) from which processed videos are
    /// served.
    ///
    /// Has no default: it has to be set before loading a video from its record.
    pub(crate) delivery_base_domain: Option<String>,

    /// Extension of the manifest files, without the leading dot.
    pub(crate) manifest_extension: String,

    /// Mime-type checked on the playback surface to know if it can play the manifest by itself
    /// when no streaming engine is available.
    pub(crate) native_mime_type: String,

    /// Scheme used to build manifest URLs when `delivery_base_domain` does not define one.
    pub(crate) default_scheme: String,
}

impl PlayerConfiguration {
    pub fn with_delivery_base_domain(mut self, domain: impl Into<String>) -> Self {
        self.delivery_base_domain = Some(domain.into());
        self
    }
}

impl Default for PlayerConfiguration {
    fn default() -> Self {
        Self {
            delivery_base_domain: None,
            manifest_extension: DEFAULT_MANIFEST_EXTENSION.to_owned(),
            native_mime_type: DEFAULT_NATIVE_MIME_TYPE.to_owned(),
            default_scheme: DEFAULT_SCHEME.to_owned(),
        }
    }
}
