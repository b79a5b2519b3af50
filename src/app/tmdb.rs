// src/app/tmdb.rs: TMDB search + detail calls and the record they produce.
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::types::DetailRecord;
use super::utils;
use crate::config::AppConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// Search returned no candidates.
    NotFound,
    /// Non-2xx answer from either endpoint.
    Remote { status: u16, reason: String },
    /// No usable response: connect/timeout failure or an unreadable body.
    Transport(String),
    MissingApiKey,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "Movie not found in TMDB database"),
            Self::Remote { status, reason } if reason.is_empty() => {
                write!(f, "API Error: {status}")
            }
            Self::Remote { status, reason } => write!(f, "API Error: {status} - {reason}"),
            Self::Transport(msg) => write!(f, "{msg}"),
            Self::MissingApiKey => write!(f, "No TMDB API key configured"),
        }
    }
}

impl std::error::Error for LookupError {}

// ---- wire types ----

#[derive(Clone, Debug, Deserialize)]
pub struct SearchCandidate {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchCandidate>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl DetailRecord {
    /// Apply display fallbacks to a detail response. A zero vote average means "unrated".
    pub fn from_tmdb(details: MovieDetails, image_base: &str) -> Self {
        let genres = details
            .genres
            .unwrap_or_default()
            .into_iter()
            .filter_map(|g| utils::non_empty(g.name))
            .collect();
        Self {
            title: utils::non_empty(details.title)
                .unwrap_or_else(|| utils::UNKNOWN_TITLE.to_string()),
            overview: utils::non_empty(details.overview)
                .unwrap_or_else(|| utils::NO_OVERVIEW.to_string()),
            release_date: utils::format_release_date(details.release_date.as_deref()),
            genres,
            rating: details.vote_average.filter(|v| v.is_finite() && *v != 0.0),
            poster_url: utils::compose_poster_url(image_base, details.poster_path.as_deref()),
        }
    }
}

// ---- service seam ----

pub trait MetadataService: Send + Sync {
    /// Candidates in service order; an empty list is a valid answer.
    fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError>;
    fn details(&self, id: u64) -> Result<MovieDetails, LookupError>;
}

/// Stage 1 then stage 2. The first candidate is taken as-is; no scoring.
pub fn resolve_details(
    service: &dyn MetadataService,
    title: &str,
) -> Result<MovieDetails, LookupError> {
    let candidates = service.search(title)?;
    let Some(first) = candidates.into_iter().next() else {
        return Err(LookupError::NotFound);
    };
    debug!(
        "resolved {:?} to TMDB id {} ({:?})",
        title, first.id, first.title
    );
    service.details(first.id)
}

pub fn search_url(api_base: &str, api_key: &str, title: &str) -> String {
    format!(
        "{api_base}/search/movie?api_key={}&query={}",
        urlencoding::encode(api_key),
        urlencoding::encode(title)
    )
}

pub fn detail_url(api_base: &str, api_key: &str, id: u64) -> String {
    format!(
        "{api_base}/movie/{id}?api_key={}",
        urlencoding::encode(api_key)
    )
}

pub struct TmdbClient {
    http: Client,
    api_base: String,
    api_key: Option<String>,
}

impl TmdbClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, String> {
        let http = Client::builder()
            .user_agent(concat!("cinegrid/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|e| format!("http client build failed: {e}"))?;
        Ok(Self {
            http,
            api_base: cfg.tmdb_api_base.clone(),
            api_key: cfg.tmdb_api_key.clone(),
        })
    }

    fn key(&self) -> Result<&str, LookupError> {
        self.api_key.as_deref().ok_or(LookupError::MissingApiKey)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LookupError> {
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| LookupError::Transport(e.without_url().to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Remote {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        resp.json::<T>().map_err(|e| {
            LookupError::Transport(format!("bad response body: {}", e.without_url()))
        })
    }
}

impl MetadataService for TmdbClient {
    fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError> {
        let url = search_url(&self.api_base, self.key()?, title);
        let body: SearchResponse = self.get_json(&url)?;
        Ok(body.results.unwrap_or_default())
    }

    fn details(&self, id: u64) -> Result<MovieDetails, LookupError> {
        let url = detail_url(&self.api_base, self.key()?, id);
        self.get_json(&url)
    }
}

/// Stands in when the HTTP client could not be built; every lookup fails with the build error.
pub struct Unavailable(pub String);

impl MetadataService for Unavailable {
    fn search(&self, _title: &str) -> Result<Vec<SearchCandidate>, LookupError> {
        Err(LookupError::Transport(self.0.clone()))
    }

    fn details(&self, _id: u64) -> Result<MovieDetails, LookupError> {
        Err(LookupError::Transport(self.0.clone()))
    }
}
