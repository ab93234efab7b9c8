use super::{EngineFactory, StreamingEngine};
use crate::{
    bindings::SessionId, controller::ControllerError, media_element::PlaybackSurface,
    utils::url::Url, Logger,
};

/// How a `Session`'s content reaches the playback surface.
pub(crate) enum SessionBinding<E: StreamingEngine> {
    /// Through a streaming engine instance owned by the session.
    Engine(E),

    /// The surface resolves the manifest natively, no engine is involved.
    Native,
}

/// The bound lifetime of one engine instance attached to the playback surface for one
/// manifest URL.
pub(crate) struct Session<E: StreamingEngine> {
    id: SessionId,
    manifest_url: Url,
    binding: SessionBinding<E>,
}

impl<E: StreamingEngine> Session<E> {
    /// Create the engine instance for a new session, attach it to the surface and begin
    /// loading the manifest.
    ///
    /// If no engine can be created, fall back to letting the surface play the manifest
    /// natively if it can. Fails with `ControllerError::EngineUnsupported` otherwise.
    pub(crate) fn start<F, S>(
        id: SessionId,
        manifest_url: Url,
        factory: &mut F,
        surface: &mut S,
        native_mime_type: &str,
    ) -> Result<Self, ControllerError>
    where
        F: EngineFactory<Engine = E>,
        S: PlaybackSurface,
    {
        if !manifest_url.is_absolute() {
            Logger::lazy_warn(&|| format!("Session: Relative manifest URL: {manifest_url}"));
        }
        let binding = match factory.create(id) {
            Some(mut engine) => {
                Logger::lazy_info(&|| format!("Session: Starting session {id} with an engine"));
                engine.attach_media();
                engine.load_source(&manifest_url);
                SessionBinding::Engine(engine)
            }
            None if surface.can_play_natively(native_mime_type) => {
                Logger::lazy_info(&|| {
                    format!("Session: No engine available, playing session {id} natively")
                });
                surface.set_native_source(&manifest_url);
                SessionBinding::Native
            }
            None => {
                Logger::error("Session: No engine available and no native support");
                return Err(ControllerError::EngineUnsupported {
                    url: manifest_url.take(),
                });
            }
        };
        Ok(Self {
            id,
            manifest_url,
            binding,
        })
    }

    pub(crate) fn id(&self) -> SessionId {
        self.id
    }

    pub(crate) fn manifest_url(&self) -> &Url {
        &self.manifest_url
    }

    pub(crate) fn is_native(&self) -> bool {
        matches!(self.binding, SessionBinding::Native)
    }

    /// The engine owned by this session, `None` for native playback.
    pub(crate) fn engine_mut(&mut self) -> Option<&mut E> {
        match &mut self.binding {
            SessionBinding::Engine(engine) => Some(engine),
            SessionBinding::Native => None,
        }
    }

    /// Release everything this session holds on the surface and the engine.
    ///
    /// Consuming the session guarantees that this can only happen once for it.
    pub(crate) fn destroy<S: PlaybackSurface>(self, surface: &mut S) {
        Logger::lazy_info(&|| format!("Session: Destroying session {}", self.id));
        match self.binding {
            SessionBinding::Engine(mut engine) => engine.destroy(),
            SessionBinding::Native => surface.remove_native_source(),
        }
    }
}
