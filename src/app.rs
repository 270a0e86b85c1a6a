//! The application core: a single `update` function owning every state
//! transition, and a `view` projection for the shell to render.
//!
//! All shared state is single-owner; the shell serializes events into
//! `update` and never mutates the model directly. Document-level concerns
//! (scroll suspension, the escape-key listener) are shell resources keyed
//! off `ViewModel::scroll_locked`: the core guarantees the flag is set
//! exactly while a detail session exists, so acquire/release stays
//! symmetric across every exit path.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api;
use crate::capabilities::Capabilities;
use crate::catalog::{filter_catalog, level_description, level_vocabulary, Digimon};
use crate::event::Event;
use crate::model::{DetailSession, DetailState, FetchState, Model};
use crate::preferences;
use crate::sampling::sample_related;
use crate::{
    FetchError, FetchErrorKind, CATALOG_LOADING_MESSAGE, DETAIL_FETCH_FAILED_MESSAGE,
    DETAIL_LOADING_MESSAGE, MAX_RELATED, MUSIC_PREF_KEY,
};

#[derive(Default)]
pub struct App;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CatalogView {
    Loading {
        message: String,
    },
    Failed {
        message: String,
        can_retry: bool,
    },
    Ready {
        /// Filtered, order-preserving subset of the loaded catalog.
        entries: Vec<Digimon>,
        levels: Vec<String>,
        shown_count: usize,
        total_count: usize,
        no_results: bool,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DetailView {
    Loading {
        name: String,
        message: String,
    },
    Failed {
        message: String,
    },
    Ready {
        detail: Digimon,
        related: Vec<Digimon>,
        level_description: String,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MusicView {
    pub enabled: bool,
    pub is_playing: bool,
    /// Preference is on but playback is still locked behind the first
    /// user interaction ("click anywhere to start").
    pub awaiting_interaction: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub catalog: CatalogView,
    pub search_text: String,
    pub selected_level: Option<String>,
    pub detail: Option<DetailView>,
    /// True exactly while a detail session is open; the shell suspends
    /// background scrolling and holds the escape-key listener while set.
    pub scroll_locked: bool,
    pub music: MusicView,
}

impl App {
    fn start_catalog_load(model: &mut Model, caps: &Capabilities) {
        model.catalog = FetchState::Loading;
        match api::catalog_url() {
            Ok(url) => {
                caps.http
                    .get(url)
                    .send(|result| Event::CatalogReceived(Box::new(result)));
            }
            Err(error) => model.catalog = FetchState::Failure(error),
        }
    }

    fn open_detail(entry: Digimon, model: &mut Model, caps: &Capabilities) {
        let token = model.next_selection_token();
        model.detail = Some(DetailSession {
            token,
            origin: entry.clone(),
            state: DetailState::Loading,
        });

        match api::by_name_url(&entry.name) {
            Ok(url) => {
                caps.http.get(url).send(move |result| Event::DetailReceived {
                    token,
                    result: Box::new(result),
                });
            }
            Err(error) => {
                if let Some(session) = model.detail.as_mut() {
                    session.state = DetailState::Failed {
                        message: error.user_facing_message(),
                    };
                }
            }
        }
    }

    /// Second enrichment step; only issued once the first has succeeded.
    fn request_related(origin: &Digimon, token: u64, caps: &Capabilities) {
        match api::by_level_url(&origin.level) {
            Ok(url) => {
                caps.http.get(url).send(move |result| Event::RelatedReceived {
                    token,
                    result: Box::new(result),
                });
            }
            Err(error) => warn!(%error, "related lookup URL could not be built"),
        }
    }

    fn load_preference(caps: &Capabilities) {
        caps.key_value
            .get(MUSIC_PREF_KEY.to_string(), Event::PreferenceLoaded);
    }

    fn save_preference(enabled: bool, caps: &Capabilities) {
        caps.key_value.set(
            MUSIC_PREF_KEY.to_string(),
            preferences::encode(enabled),
            Event::PreferenceWritten,
        );
    }

    /// Reconcile the audio element with the desired state. Playback is
    /// wanted only when the preference is on AND the user has interacted
    /// with the page at least once (platform autoplay restriction).
    fn sync_playback(model: &mut Model, caps: &Capabilities) {
        let desired = model.music.should_play();
        if desired == model.music.is_playing {
            return;
        }
        model.music.is_playing = desired;
        if desired {
            caps.playback.play(Event::PlaybackSettled);
        } else {
            caps.playback.pause(Event::PlaybackSettled);
        }
    }

    fn detail_failure_message(error: &FetchError) -> String {
        match error.kind {
            FetchErrorKind::HttpStatus(_) => DETAIL_FETCH_FAILED_MESSAGE.into(),
            FetchErrorKind::NetworkUnreachable | FetchErrorKind::InvalidFormat => {
                error.user_facing_message()
            }
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        match event {
            Event::AppStarted => {
                Self::load_preference(caps);
                Self::start_catalog_load(model, caps);
                caps.render.render();
            }

            Event::RetryRequested => {
                Self::start_catalog_load(model, caps);
                caps.render.render();
            }

            Event::CatalogReceived(result) => {
                model.catalog = match api::decode_catalog(*result) {
                    Ok(entries) => {
                        debug!(count = entries.len(), "catalog loaded");
                        FetchState::Success(entries)
                    }
                    Err(error) => {
                        warn!(%error, "catalog load failed");
                        FetchState::Failure(error)
                    }
                };
                caps.render.render();
            }

            Event::SearchChanged { text } => {
                model.criteria.search_text = text;
                caps.render.render();
            }

            Event::LevelSelected { level } => {
                // An empty selector means "all levels".
                model.criteria.level = level.filter(|l| !l.is_empty());
                caps.render.render();
            }

            Event::DigimonSelected { name } => {
                // Selection is only offered once the catalog has loaded; a
                // stray event for an unknown name is dropped.
                let Some(entry) = model.find_entry(&name).cloned() else {
                    return;
                };
                Self::open_detail(entry, model, caps);
                caps.render.render();
            }

            Event::DetailReceived { token, result } => {
                if !model.detail_is_current(token) {
                    debug!(token, "discarding superseded detail response");
                    return;
                }
                match api::decode_entry(*result) {
                    Ok(found) => {
                        let Some(session) = model.detail.as_mut() else {
                            return;
                        };
                        // An empty lookup is not an error: fall back to the
                        // fields already held for the selected entry.
                        let detail = found.unwrap_or_else(|| session.origin.clone());
                        session.state = DetailState::Ready {
                            detail,
                            related: Vec::new(),
                        };
                        let origin = session.origin.clone();
                        Self::request_related(&origin, token, caps);
                    }
                    Err(error) => {
                        warn!(%error, "detail lookup failed");
                        let Some(session) = model.detail.as_mut() else {
                            return;
                        };
                        session.state = DetailState::Failed {
                            message: Self::detail_failure_message(&error),
                        };
                    }
                }
                caps.render.render();
            }

            Event::RelatedReceived { token, result } => {
                if !model.detail_is_current(token) {
                    debug!(token, "discarding superseded related response");
                    return;
                }
                match api::decode_catalog(*result) {
                    Ok(group) => {
                        let Some(session) = model.detail.as_mut() else {
                            return;
                        };
                        if let DetailState::Ready { related, .. } = &mut session.state {
                            let mut rng = rand::thread_rng();
                            *related =
                                sample_related(&group, &session.origin.name, MAX_RELATED, &mut rng);
                        }
                        caps.render.render();
                    }
                    Err(error) => {
                        // Degrades to zero related items; never user-facing.
                        warn!(%error, "related lookup failed");
                    }
                }
            }

            Event::CloseRequested | Event::BackdropClicked | Event::EscapePressed => {
                if model.detail.take().is_some() {
                    caps.render.render();
                }
            }

            Event::SurfaceClicked => {}

            Event::MusicToggled => {
                model.music.enabled = !model.music.enabled;
                // Toggling the control is itself a qualifying interaction.
                model.music.has_interacted = true;
                Self::save_preference(model.music.enabled, caps);
                Self::sync_playback(model, caps);
                caps.render.render();
            }

            Event::InteractionOccurred => {
                if model.music.has_interacted {
                    return;
                }
                model.music.has_interacted = true;
                Self::sync_playback(model, caps);
                caps.render.render();
            }

            Event::PreferenceLoaded(result) => {
                let stored = match result {
                    Ok(value) => value,
                    Err(error) => {
                        warn!(%error, "music preference could not be read");
                        None
                    }
                };
                model.music.enabled = preferences::decode(stored.as_deref());
                Self::sync_playback(model, caps);
                caps.render.render();
            }

            Event::PreferenceWritten(result) => {
                // Best-effort persistence: a failed write never interrupts
                // the toggle that triggered it.
                if let Err(error) = result {
                    warn!(%error, "music preference could not be persisted");
                }
            }

            Event::PlaybackSettled(result) => match result {
                Ok(output) => debug!(?output, "playback settled"),
                Err(error) => {
                    warn!(%error, "playback request failed");
                    model.music.is_playing = false;
                    caps.render.render();
                }
            },
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        let catalog = match &model.catalog {
            FetchState::Loading => CatalogView::Loading {
                message: CATALOG_LOADING_MESSAGE.into(),
            },
            FetchState::Failure(error) => CatalogView::Failed {
                message: error.user_facing_message(),
                can_retry: true,
            },
            FetchState::Success(entries) => {
                let shown: Vec<Digimon> = filter_catalog(entries, &model.criteria)
                    .into_iter()
                    .cloned()
                    .collect();
                CatalogView::Ready {
                    levels: level_vocabulary(entries),
                    shown_count: shown.len(),
                    total_count: entries.len(),
                    no_results: shown.is_empty(),
                    entries: shown,
                }
            }
        };

        let detail = model.detail.as_ref().map(|session| match &session.state {
            DetailState::Loading => DetailView::Loading {
                name: session.origin.name.clone(),
                message: DETAIL_LOADING_MESSAGE.into(),
            },
            DetailState::Failed { message } => DetailView::Failed {
                message: message.clone(),
            },
            DetailState::Ready { detail, related } => DetailView::Ready {
                detail: detail.clone(),
                related: related.clone(),
                level_description: level_description(&detail.level).into(),
            },
        });

        ViewModel {
            scroll_locked: detail.is_some(),
            detail,
            search_text: model.criteria.search_text.clone(),
            selected_level: model.criteria.level.clone(),
            catalog,
            music: MusicView {
                enabled: model.music.enabled,
                is_playing: model.music.is_playing,
                awaiting_interaction: model.music.awaiting_interaction(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_detail_failures_use_the_fixed_line() {
        let message = App::detail_failure_message(&FetchError::http_status(404));
        assert_eq!(message, DETAIL_FETCH_FAILED_MESSAGE);
    }

    #[test]
    fn other_detail_failures_surface_their_own_message() {
        let network = App::detail_failure_message(&FetchError::network("offline"));
        assert_eq!(network, crate::NETWORK_ERROR_MESSAGE);

        let format = App::detail_failure_message(&FetchError::invalid_format());
        assert_eq!(format, crate::INVALID_FORMAT_MESSAGE);
    }
}
