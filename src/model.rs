use serde::{Deserialize, Serialize};

use crate::catalog::{Digimon, FilterCriteria};
use crate::preferences;
use crate::FetchError;

/// Lifecycle of the primary catalog load. Exactly one variant holds at a
/// time; entering `Loading` discards any previously loaded data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchState {
    #[default]
    Loading,
    Success(Vec<Digimon>),
    Failure(FetchError),
}

impl FetchState {
    #[must_use]
    pub fn entries(&self) -> Option<&[Digimon]> {
        match self {
            Self::Success(entries) => Some(entries),
            Self::Loading | Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Lifecycle of one detail enrichment, scoped to a single selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailState {
    Loading,
    Ready {
        detail: Digimon,
        /// Never contains the selected entry; at most [`crate::MAX_RELATED`].
        related: Vec<Digimon>,
    },
    Failed {
        message: String,
    },
}

/// One open detail view. Discarded wholesale when the view closes or a
/// newer selection supersedes it; `token` is compared against the model's
/// monotone selection counter to drop stale fetch completions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSession {
    pub token: u64,
    pub origin: Digimon,
    pub state: DetailState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicState {
    pub enabled: bool,
    /// Platform autoplay restriction: playback may only start after at
    /// least one user click or key press anywhere in the document.
    pub has_interacted: bool,
    pub is_playing: bool,
}

impl Default for MusicState {
    fn default() -> Self {
        Self {
            enabled: preferences::DEFAULT_ENABLED,
            has_interacted: false,
            is_playing: false,
        }
    }
}

impl MusicState {
    #[must_use]
    pub const fn should_play(self) -> bool {
        self.enabled && self.has_interacted
    }

    #[must_use]
    pub const fn awaiting_interaction(self) -> bool {
        self.enabled && !self.has_interacted
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    pub catalog: FetchState,
    pub criteria: FilterCriteria,
    pub detail: Option<DetailSession>,
    /// Monotone counter stamping each selection; see [`DetailSession::token`].
    pub selection_seq: u64,
    pub music: MusicState,
}

impl Model {
    #[must_use]
    pub fn entries(&self) -> &[Digimon] {
        self.catalog.entries().unwrap_or(&[])
    }

    #[must_use]
    pub fn find_entry(&self, name: &str) -> Option<&Digimon> {
        self.entries().iter().find(|entry| entry.name == name)
    }

    pub fn next_selection_token(&mut self) -> u64 {
        self.selection_seq += 1;
        self.selection_seq
    }

    /// Whether a fetch completion stamped with `token` belongs to the
    /// currently open detail view. Last selection wins: anything else is
    /// stale and must be discarded without effect.
    #[must_use]
    pub fn detail_is_current(&self, token: u64) -> bool {
        self.detail
            .as_ref()
            .is_some_and(|session| session.token == token)
    }
}
