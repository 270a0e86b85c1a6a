//! Endpoint construction and response decoding for the public catalog API.
//!
//! Retry policy lives with the caller; this module only builds request
//! URLs and classifies settled responses into the [`FetchError`] taxonomy.

use url::Url;

use crate::catalog::Digimon;
use crate::{FetchError, API_BASE_URL};

/// Raw outcome of an HTTP capability request, before classification.
pub type HttpResult = crux_http::Result<crux_http::Response<Vec<u8>>>;

/// `GET {base}/api/digimon` — the full catalog.
pub fn catalog_url() -> Result<String, FetchError> {
    endpoint(&["api", "digimon"])
}

/// `GET {base}/api/digimon/name/{name}` — 0 or 1 records expected.
pub fn by_name_url(name: &str) -> Result<String, FetchError> {
    endpoint(&["api", "digimon", "name", name])
}

/// `GET {base}/api/digimon/level/{level}` — every record at that level.
pub fn by_level_url(level: &str) -> Result<String, FetchError> {
    endpoint(&["api", "digimon", "level", level])
}

fn endpoint(segments: &[&str]) -> Result<String, FetchError> {
    let mut url = Url::parse(API_BASE_URL)
        .map_err(|error| FetchError::network(format!("invalid API base URL: {error}")))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::network("API base URL cannot carry path segments"))?
        .extend(segments);
    Ok(url.into())
}

/// Decode a catalog response: any JSON array of records, including an
/// empty one, is valid.
pub fn decode_catalog(result: HttpResult) -> Result<Vec<Digimon>, FetchError> {
    let body = successful_body(result)?;
    parse_entries(&body)
}

/// Decode a by-name lookup: the first element of the returned array, or
/// `None` when the array is empty (the caller falls back to the fields it
/// already holds — an empty lookup is not an error).
pub fn decode_entry(result: HttpResult) -> Result<Option<Digimon>, FetchError> {
    let body = successful_body(result)?;
    Ok(parse_entries(&body)?.into_iter().next())
}

fn successful_body(result: HttpResult) -> Result<Vec<u8>, FetchError> {
    match result {
        Ok(mut response) => {
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::http_status(status.into()));
            }
            Ok(response.take_body().unwrap_or_default())
        }
        Err(crux_http::Error::Http(http_err)) => {
            Err(FetchError::http_status(http_err.code.into()))
        }
        Err(error) => Err(FetchError::network(error.to_string())),
    }
}

fn parse_entries(body: &[u8]) -> Result<Vec<Digimon>, FetchError> {
    serde_json::from_slice(body).map_err(|error| {
        tracing::debug!(%error, "response body is not a catalog array");
        FetchError::invalid_format()
    })
}
