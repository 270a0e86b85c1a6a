use serde::{Deserialize, Serialize};

use crux_kv::error::KeyValueError;

use crate::api::HttpResult;
use crate::capabilities::PlaybackResult;

/// Everything that can happen to the app: shell-originated user actions
/// (serializable, so shells can send them over FFI) and capability
/// responses (`serde(skip)`, boxed where large to keep the enum small).
#[derive(Debug, Serialize, Deserialize)]
pub enum Event {
    // Catalog lifecycle
    AppStarted,
    /// Valid from any state; always re-enters `Loading` and re-issues the
    /// fetch, discarding prior data immediately.
    RetryRequested,
    #[serde(skip)]
    CatalogReceived(Box<HttpResult>),

    // Search & filter
    SearchChanged { text: String },
    LevelSelected { level: Option<String> },

    // Detail view
    DigimonSelected { name: String },
    #[serde(skip)]
    DetailReceived { token: u64, result: Box<HttpResult> },
    #[serde(skip)]
    RelatedReceived { token: u64, result: Box<HttpResult> },
    CloseRequested,
    BackdropClicked,
    /// A click on the detail surface itself; deliberately a no-op, only
    /// the surrounding backdrop dismisses the view.
    SurfaceClicked,
    EscapePressed,

    // Music & preference
    MusicToggled,
    /// First qualifying interaction (any click or key press in the
    /// document); unlocks playback under platform autoplay rules.
    InteractionOccurred,
    #[serde(skip)]
    PreferenceLoaded(Result<Option<Vec<u8>>, KeyValueError>),
    #[serde(skip)]
    PreferenceWritten(Result<Option<Vec<u8>>, KeyValueError>),
    #[serde(skip)]
    PlaybackSettled(PlaybackResult),
}
