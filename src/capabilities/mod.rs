mod playback;

pub use self::playback::{
    Playback, PlaybackError, PlaybackOperation, PlaybackOutput, PlaybackResult,
};

pub use crux_core::render::Render;
pub use crux_http::Http;
pub use crux_kv::KeyValue;

use crate::app::App;
use crate::event::Event;

pub type AppHttp = Http<Event>;
pub type AppKv = KeyValue<Event>;
pub type AppRender = Render<Event>;
pub type AppPlayback = Playback<Event>;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub http: Http<Event>,
    pub key_value: KeyValue<Event>,
    pub playback: Playback<Event>,
    pub render: Render<Event>,
}
