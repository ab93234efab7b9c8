//! Spy implementations of the engine and surface seams, recording every command they receive.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    bindings::SessionId,
    controller::{PlaybackController, PlayerConfiguration},
    engine::{EngineFactory, StreamingEngine},
    media_element::{PlaybackSurface, SurfaceError},
    quality::QualitySelection,
    utils::url::Url,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum EngineCommand {
    Create(SessionId),
    AttachMedia(SessionId),
    LoadSource(SessionId, String),
    StartLoad(SessionId),
    RecoverMediaError(SessionId),
    SetLevel(SessionId, QualitySelection),
    Destroy(SessionId),
}

#[derive(Clone, Default)]
pub(crate) struct SpyEngineFactory {
    commands: Rc<RefCell<Vec<EngineCommand>>>,
    unsupported: Rc<Cell<bool>>,
}

impl SpyEngineFactory {
    pub(crate) fn set_unsupported(&self, unsupported: bool) {
        self.unsupported.set(unsupported);
    }

    pub(crate) fn commands(&self) -> Vec<EngineCommand> {
        self.commands.borrow().clone()
    }

    pub(crate) fn count(&self, wanted: &EngineCommand) -> usize {
        self.commands.borrow().iter().filter(|c| *c == wanted).count()
    }

    pub(crate) fn clear(&self) {
        self.commands.borrow_mut().clear();
    }
}

impl EngineFactory for SpyEngineFactory {
    type Engine = SpyEngine;

    fn create(&mut self, session_id: SessionId) -> Option<SpyEngine> {
        if self.unsupported.get() {
            return None;
        }
        self.commands
            .borrow_mut()
            .push(EngineCommand::Create(session_id));
        Some(SpyEngine {
            session_id,
            commands: Rc::clone(&self.commands),
        })
    }
}

pub(crate) struct SpyEngine {
    session_id: SessionId,
    commands: Rc<RefCell<Vec<EngineCommand>>>,
}

impl SpyEngine {
    fn push(&self, command: EngineCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl StreamingEngine for SpyEngine {
    fn load_source(&mut self, url: &Url) {
        self.push(EngineCommand::LoadSource(
            self.session_id,
            url.get_ref().to_owned(),
        ));
    }

    fn attach_media(&mut self) {
        self.push(EngineCommand::AttachMedia(self.session_id));
    }

    fn start_load(&mut self) {
        self.push(EngineCommand::StartLoad(self.session_id));
    }

    fn recover_media_error(&mut self) {
        self.push(EngineCommand::RecoverMediaError(self.session_id));
    }

    fn set_level(&mut self, selection: QualitySelection) {
        self.push(EngineCommand::SetLevel(self.session_id, selection));
    }

    fn destroy(&mut self) {
        self.push(EngineCommand::Destroy(self.session_id));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SurfaceCommand {
    Play,
    Pause,
    Seek(f64),
    SetMuted(bool),
    SetNativeSource(String),
    RemoveNativeSource,
}

#[derive(Default)]
struct SurfaceState {
    current_time: f64,
    commands: Vec<SurfaceCommand>,
    rejects_play: bool,
    plays_natively: bool,
}

/// Cloning a `SpySurface` gives another handle on the same surface.
#[derive(Clone, Default)]
pub(crate) struct SpySurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl SpySurface {
    pub(crate) fn set_current_time(&self, position: f64) {
        self.state.borrow_mut().current_time = position;
    }

    pub(crate) fn set_rejects_play(&self, rejects: bool) {
        self.state.borrow_mut().rejects_play = rejects;
    }

    pub(crate) fn set_plays_natively(&self, plays_natively: bool) {
        self.state.borrow_mut().plays_natively = plays_natively;
    }

    pub(crate) fn commands(&self) -> Vec<SurfaceCommand> {
        self.state.borrow().commands.clone()
    }

    pub(crate) fn last_command(&self) -> Option<SurfaceCommand> {
        self.state.borrow().commands.last().cloned()
    }

    pub(crate) fn clear(&self) {
        self.state.borrow_mut().commands.clear();
    }
}

impl PlaybackSurface for SpySurface {
    fn play(&mut self) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        state.commands.push(SurfaceCommand::Play);
        if state.rejects_play {
            Err(SurfaceError::PlaybackRejected {
                message: "NotAllowedError".to_owned(),
            })
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.state.borrow_mut().commands.push(SurfaceCommand::Pause);
    }

    fn seek(&mut self, position: f64) {
        let mut state = self.state.borrow_mut();
        state.current_time = position;
        state.commands.push(SurfaceCommand::Seek(position));
    }

    fn set_muted(&mut self, muted: bool) {
        self.state
            .borrow_mut()
            .commands
            .push(SurfaceCommand::SetMuted(muted));
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    fn can_play_natively(&self, _mime_type: &str) -> bool {
        self.state.borrow().plays_natively
    }

    fn set_native_source(&mut self, url: &Url) {
        self.state
            .borrow_mut()
            .commands
            .push(SurfaceCommand::SetNativeSource(url.get_ref().to_owned()));
    }

    fn remove_native_source(&mut self) {
        self.state
            .borrow_mut()
            .commands
            .push(SurfaceCommand::RemoveNativeSource);
    }
}

pub(crate) type SpyController = PlaybackController<SpyEngineFactory, SpySurface>;

/// Create a `PlaybackController` with spies, returning handles on both of them.
pub(crate) fn spy_controller() -> (SpyController, SpyEngineFactory, SpySurface) {
    let factory = SpyEngineFactory::default();
    let surface = SpySurface::default();
    let controller = PlaybackController::new(
        factory.clone(),
        surface.clone(),
        PlayerConfiguration::default().with_delivery_base_domain("cdn.example.com"),
    );
    (controller, factory, surface)
}
