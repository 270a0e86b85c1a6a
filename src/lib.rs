#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod event;
pub mod model;
pub mod preferences;
pub mod sampling;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::{App, CatalogView, DetailView, MusicView, ViewModel};
pub use capabilities::{Capabilities, Effect};
pub use catalog::{filter_catalog, level_description, level_vocabulary, Digimon, FilterCriteria};
pub use event::Event;
pub use model::{DetailSession, DetailState, FetchState, Model, MusicState};

pub const API_BASE_URL: &str = "https://digimon-api.vercel.app";

/// Canonical ordering of the known evolution levels; rank = index.
pub const LEVEL_ORDER: &[&str] = &[
    "Fresh",
    "In Training",
    "Training",
    "Rookie",
    "Champion",
    "Ultimate",
    "Mega",
    "Armor",
];

/// Rank assigned to any level value outside [`LEVEL_ORDER`]; sorts after all known levels.
pub const UNKNOWN_LEVEL_RANK: usize = 999;

/// Upper bound on the related-items sample shown in the detail view.
pub const MAX_RELATED: usize = 4;

/// Storage key for the persisted music preference (a JSON-encoded boolean).
pub const MUSIC_PREF_KEY: &str = "bgMusicEnabled";

pub const CATALOG_LOADING_MESSAGE: &str = "Fetching Digimon data...";
pub const DETAIL_LOADING_MESSAGE: &str = "Loading Digimon data...";
pub const DETAIL_FETCH_FAILED_MESSAGE: &str = "Failed to fetch Digimon details";
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch Digimon data. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid data format received from API";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchErrorKind {
    /// The request never produced a response (DNS, connection, timeout).
    NetworkUnreachable,
    /// The server answered with a non-2xx status.
    HttpStatus(u16),
    /// The transport succeeded but the body was not the expected shape.
    InvalidFormat,
}

impl FetchErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NetworkUnreachable => "NETWORK_UNREACHABLE",
            Self::HttpStatus(_) => "HTTP_STATUS",
            Self::InvalidFormat => "INVALID_FORMAT",
        }
    }

    #[must_use]
    pub const fn is_network(self) -> bool {
        matches!(self, Self::NetworkUnreachable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::NetworkUnreachable,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn http_status(code: u16) -> Self {
        Self {
            kind: FetchErrorKind::HttpStatus(code),
            message: format!("HTTP error! Status: {code}"),
        }
    }

    #[must_use]
    pub fn invalid_format() -> Self {
        Self {
            kind: FetchErrorKind::InvalidFormat,
            message: INVALID_FORMAT_MESSAGE.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Projection shown to the user. Connectivity failures get a
    /// connectivity-specific line; everything else surfaces the underlying
    /// message, or a generic fallback when there is none.
    #[must_use]
    pub fn user_facing_message(&self) -> String {
        if self.kind.is_network() {
            return NETWORK_ERROR_MESSAGE.into();
        }
        if self.message.is_empty() {
            FETCH_FALLBACK_MESSAGE.into()
        } else {
            self.message.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_errors_carry_the_status_line() {
        let error = FetchError::http_status(500);
        assert_eq!(error.kind, FetchErrorKind::HttpStatus(500));
        assert_eq!(error.message, "HTTP error! Status: 500");
        assert_eq!(error.user_facing_message(), "HTTP error! Status: 500");
    }

    #[test]
    fn network_errors_get_the_connectivity_message() {
        let error = FetchError::network("dns lookup failed");
        assert_eq!(error.message, "dns lookup failed");
        assert_eq!(error.user_facing_message(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn invalid_format_has_a_fixed_message() {
        let error = FetchError::invalid_format();
        assert_eq!(error.kind, FetchErrorKind::InvalidFormat);
        assert_eq!(error.user_facing_message(), INVALID_FORMAT_MESSAGE);
    }

    #[test]
    fn empty_messages_fall_back_to_the_generic_line() {
        let error = FetchError {
            kind: FetchErrorKind::InvalidFormat,
            message: String::new(),
        };
        assert_eq!(error.user_facing_message(), FETCH_FALLBACK_MESSAGE);
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(FetchError::network("x").code(), "NETWORK_UNREACHABLE");
        assert_eq!(FetchError::http_status(404).code(), "HTTP_STATUS");
        assert_eq!(FetchError::invalid_format().code(), "INVALID_FORMAT");
    }
}
