//! Catalog API client: search, details, watch providers.
//!
//! Three sequential requests keyed by the same credential. No retries and
//! no pagination; the first search result wins.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::WatchlistConfig;
use crate::error::CatalogError;

const NOT_AVAILABLE: &str = "Not Available";

/// Movie vs. episodic content; drives endpoint choice and duration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("tv") => MediaKind::Tv,
            _ => MediaKind::Movie,
        }
    }

    fn path_segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::Tv => "Tv",
        }
    }
}

/// One fully resolved entry, ready to become a spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub title: String,
    pub kind: MediaKind,
    pub genre: String,
    pub platforms: String,
    pub synopsis: String,
    pub duration: String,
}

impl WatchlistEntry {
    /// The fixed 7-column row: blank, title, type, genre, streaming
    /// platforms, synopsis, duration.
    pub fn to_row(&self) -> [String; 7] {
        [
            String::new(),
            self.title.clone(),
            self.kind.label().to_string(),
            self.genre.clone(),
            self.platforms.clone(),
            self.synopsis.clone(),
            self.duration.clone(),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: u64,
    media_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Details {
    title: Option<String>,
    name: Option<String>,
    #[serde(default)]
    genres: Vec<Genre>,
    overview: Option<String>,
    runtime: Option<u64>,
    number_of_seasons: Option<u64>,
    #[serde(default)]
    episode_run_time: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProvidersResponse {
    #[serde(default)]
    results: HashMap<String, RegionProviders>,
}

#[derive(Debug, Default, Deserialize)]
struct RegionProviders {
    #[serde(default)]
    flatrate: Vec<Provider>,
}

#[derive(Debug, Deserialize)]
struct Provider {
    provider_name: String,
}

/// Blocking client over the catalog API, built once and reused.
pub struct CatalogClient {
    http: Client,
    api_key: String,
    base_url: String,
    region: String,
}

impl CatalogClient {
    pub fn new(config: &WatchlistConfig) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            region: config.region.clone(),
        })
    }

    /// Resolve a free-text query into a watchlist entry: search, then
    /// details, then watch providers.
    pub fn lookup(&self, query: &str) -> Result<WatchlistEntry, CatalogError> {
        let search: SearchResponse = self.get(
            &format!("{}/search/multi", self.base_url),
            &[("query", query), ("include_adult", "false")],
        )?;
        let hit = search
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NoResults(query.to_string()))?;
        let kind = MediaKind::from_api(hit.media_type.as_deref());

        let details: Details = self.get(
            &format!("{}/{}/{}", self.base_url, kind.path_segment(), hit.id),
            &[],
        )?;

        // A dead providers endpoint degrades to "Not Available" instead of
        // failing the whole lookup.
        let platforms = self
            .get::<ProvidersResponse>(
                &format!(
                    "{}/{}/{}/watch/providers",
                    self.base_url,
                    kind.path_segment(),
                    hit.id
                ),
                &[],
            )
            .map(|providers| flatrate_platforms(&providers, &self.region))
            .unwrap_or_else(|_| NOT_AVAILABLE.to_string());

        Ok(build_entry(kind, &details, platforms))
    }

    fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }
        Ok(response.json()?)
    }
}

fn flatrate_platforms(providers: &ProvidersResponse, region: &str) -> String {
    let names: Vec<&str> = providers
        .results
        .get(region)
        .map(|r| r.flatrate.iter().map(|p| p.provider_name.as_str()).collect())
        .unwrap_or_default();
    if names.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        names.join(", ")
    }
}

fn build_entry(kind: MediaKind, details: &Details, platforms: String) -> WatchlistEntry {
    let title = details
        .title
        .clone()
        .or_else(|| details.name.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let genre = if details.genres.is_empty() {
        "Unknown".to_string()
    } else {
        details
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let synopsis = details
        .overview
        .clone()
        .filter(|o| !o.is_empty())
        .unwrap_or_else(|| "No synopsis available.".to_string());

    WatchlistEntry {
        title,
        kind,
        genre,
        platforms,
        synopsis,
        duration: format_duration(kind, details),
    }
}

/// Movies report their runtime; episodic content reports seasons and the
/// average episode length.
fn format_duration(kind: MediaKind, details: &Details) -> String {
    match kind {
        MediaKind::Movie => match details.runtime {
            Some(minutes) => format!("{minutes} minutes"),
            None => "Unknown minutes".to_string(),
        },
        MediaKind::Tv => {
            let seasons = details
                .number_of_seasons
                .map(|n| n.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let average = if details.episode_run_time.is_empty() {
                "Unknown".to_string()
            } else {
                let sum: u64 = details.episode_run_time.iter().sum();
                format!("{} minutes", sum / details.episode_run_time.len() as u64)
            };
            format!("{seasons} season(s), ~{average} per episode")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_api() {
        assert_eq!(MediaKind::from_api(Some("tv")), MediaKind::Tv);
        assert_eq!(MediaKind::from_api(Some("movie")), MediaKind::Movie);
        // Anything unexpected falls back to movie
        assert_eq!(MediaKind::from_api(Some("person")), MediaKind::Movie);
        assert_eq!(MediaKind::from_api(None), MediaKind::Movie);
    }

    #[test]
    fn test_movie_entry_from_canned_response() {
        let details: Details = serde_json::from_str(
            r#"{
                "title": "Blade Runner",
                "genres": [{"name": "Science Fiction"}, {"name": "Drama"}],
                "overview": "A blade runner must pursue replicants.",
                "runtime": 117
            }"#,
        )
        .unwrap();

        let entry = build_entry(MediaKind::Movie, &details, "HBO Max".to_string());
        assert_eq!(entry.title, "Blade Runner");
        assert_eq!(entry.genre, "Science Fiction, Drama");
        assert_eq!(entry.duration, "117 minutes");

        let row = entry.to_row();
        assert_eq!(row[0], "");
        assert_eq!(row[1], "Blade Runner");
        assert_eq!(row[2], "Movie");
        assert_eq!(row[4], "HBO Max");
    }

    #[test]
    fn test_tv_entry_duration_averages_episodes() {
        let details: Details = serde_json::from_str(
            r#"{
                "name": "Severance",
                "genres": [{"name": "Drama"}],
                "overview": "Work-life balance, surgically enforced.",
                "number_of_seasons": 2,
                "episode_run_time": [50, 60]
            }"#,
        )
        .unwrap();

        let entry = build_entry(MediaKind::Tv, &details, NOT_AVAILABLE.to_string());
        assert_eq!(entry.title, "Severance");
        assert_eq!(entry.kind.label(), "Tv");
        assert_eq!(entry.duration, "2 season(s), ~55 minutes per episode");
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let details: Details = serde_json::from_str("{}").unwrap();

        let movie = build_entry(MediaKind::Movie, &details, NOT_AVAILABLE.to_string());
        assert_eq!(movie.title, "N/A");
        assert_eq!(movie.genre, "Unknown");
        assert_eq!(movie.synopsis, "No synopsis available.");
        assert_eq!(movie.duration, "Unknown minutes");

        let tv = build_entry(MediaKind::Tv, &details, NOT_AVAILABLE.to_string());
        assert_eq!(tv.duration, "Unknown season(s), ~Unknown per episode");
    }

    #[test]
    fn test_flatrate_platforms_by_region() {
        let providers: ProvidersResponse = serde_json::from_str(
            r#"{
                "results": {
                    "US": {"flatrate": [
                        {"provider_name": "Netflix"},
                        {"provider_name": "Hulu"}
                    ]},
                    "GB": {"flatrate": []}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(flatrate_platforms(&providers, "US"), "Netflix, Hulu");
        assert_eq!(flatrate_platforms(&providers, "GB"), NOT_AVAILABLE);
        assert_eq!(flatrate_platforms(&providers, "DE"), NOT_AVAILABLE);
    }

    #[test]
    fn test_search_response_tolerates_missing_fields() {
        let search: SearchResponse = serde_json::from_str(
            r#"{"results": [{"id": 78, "media_type": "tv"}, {"id": 79}]}"#,
        )
        .unwrap();
        assert_eq!(search.results.len(), 2);
        assert_eq!(search.results[0].media_type.as_deref(), Some("tv"));
        assert!(search.results[1].media_type.is_none());

        let empty: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.results.is_empty());
    }
}
