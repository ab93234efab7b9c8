use super::{EngineFactory, StreamingEngine};
use crate::{
    bindings::{
        jsCreateEngine, jsEngineAttachMedia, jsEngineDestroy, jsEngineLoadSource,
        jsEngineRecoverMediaError, jsEngineSetLevel, jsEngineStartLoad, SessionId,
    },
    quality::QualitySelection,
    utils::url::Url,
};

/// `StreamingEngine` living on the JavaScript-side, identified by its `SessionId`.
pub struct JsEngine {
    session_id: SessionId,
}

impl StreamingEngine for JsEngine {
    fn load_source(&mut self, url: &Url) {
        jsEngineLoadSource(self.session_id, url.get_ref());
    }

    fn attach_media(&mut self) {
        jsEngineAttachMedia(self.session_id);
    }

    fn start_load(&mut self) {
        jsEngineStartLoad(self.session_id);
    }

    fn recover_media_error(&mut self) {
        jsEngineRecoverMediaError(self.session_id);
    }

    fn set_level(&mut self, selection: QualitySelection) {
        jsEngineSetLevel(self.session_id, selection.as_engine_level());
    }

    fn destroy(&mut self) {
        jsEngineDestroy(self.session_id);
    }
}

/// Creates `JsEngine`s through the `jsCreateEngine` JavaScript function.
#[derive(Default)]
pub struct JsEngineFactory {}

impl EngineFactory for JsEngineFactory {
    type Engine = JsEngine;

    fn create(&mut self, session_id: SessionId) -> Option<JsEngine> {
        if jsCreateEngine(session_id) {
            Some(JsEngine { session_id })
        } else {
            None
        }
    }
}
