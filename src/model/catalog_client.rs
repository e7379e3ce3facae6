//! Read-only client for the remote media catalog (TMDB v3)

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use super::types::{Feed, Item, MediaKind, ResultSet};
use crate::{log_api_request, log_api_result};

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const PLACEHOLDER_IMAGE: &str = "assets/no-image.png";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}")]
    Status { endpoint: String, status: StatusCode },
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

/// Anything that can hand out result sets for feeds and searches
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_feed(&self, feed: Feed) -> Result<ResultSet, CatalogError>;
    async fn search(&self, kind: MediaKind, term: &str) -> Result<ResultSet, CatalogError>;
}

#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    api_base: Url,
    api_key: String,
}

impl CatalogClient {
    pub fn new(api_base: Url, api_key: String) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("reelview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| CatalogError::Transport {
                endpoint: api_base.to_string(),
                source: source.without_url(),
            })?;
        Ok(Self {
            http,
            api_base,
            api_key,
        })
    }

    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, CatalogError> {
        let base = self.api_base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{endpoint}"))?)
    }

    async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        kind: MediaKind,
    ) -> Result<ResultSet, CatalogError> {
        let mut url = self.endpoint_url(endpoint)?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .extend_pairs(query);

        log_api_request!(endpoint, kind = kind.as_str());

        // The request URL carries the api key; keep it out of error text
        let transport = |source: reqwest::Error| CatalogError::Transport {
            endpoint: endpoint.to_string(),
            source: source.without_url(),
        };
        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }
        let body = response.bytes().await.map_err(transport)?;
        parse_page(&body, kind).map_err(|source| CatalogError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_feed(&self, feed: Feed) -> Result<ResultSet, CatalogError> {
        let result = self.get(feed.endpoint(), &[], feed.kind()).await;
        log_api_result!(feed.endpoint(), result);
        result
    }

    async fn search(&self, kind: MediaKind, term: &str) -> Result<ResultSet, CatalogError> {
        let endpoint = match kind {
            MediaKind::Movie => "search/movie",
            MediaKind::Tv => "search/tv",
        };
        let result = self.get(endpoint, &[("query", term)], kind).await;
        log_api_result!(endpoint, result);
        result
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    results: Vec<RawItem>,
    #[serde(default)]
    total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f32>,
}

impl RawItem {
    fn into_item(self, kind: MediaKind) -> Item {
        let title = self.title.or(self.name).unwrap_or_default();
        let date = self.release_date.or(self.first_air_date);
        Item {
            id: self.id,
            title,
            backdrop_path: self.backdrop_path.filter(|p| !p.is_empty()),
            poster_path: self.poster_path.filter(|p| !p.is_empty()),
            overview: self.overview.unwrap_or_default(),
            release_date: date.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
            vote_average: self.vote_average,
            kind,
        }
    }
}

fn parse_page(body: &[u8], kind: MediaKind) -> Result<ResultSet, serde_json::Error> {
    let page: RawPage = serde_json::from_slice(body)?;
    let items: Vec<Item> = page.results.into_iter().map(|raw| raw.into_item(kind)).collect();
    let total_results = page.total_results.unwrap_or(items.len() as u64);
    Ok(ResultSet {
        items,
        total_results,
    })
}

/// Fully qualified image URL for a backdrop or poster path.
///
/// `size` is a catalog size tag such as `w500`; `None` means `original`.
/// A missing path resolves to the bundled placeholder.
pub fn image_url(image_base: &Url, path: Option<&str>, size: Option<&str>) -> String {
    match path.map(|p| p.trim_start_matches('/')).filter(|p| !p.is_empty()) {
        Some(path) => format!(
            "{}/{}/{}",
            image_base.as_str().trim_end_matches('/'),
            size.unwrap_or("original"),
            path
        ),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE_PAGE: &str = r#"{
        "dates": {"maximum": "2024-06-01", "minimum": "2024-05-01"},
        "page": 1,
        "results": [
            {"id": 11, "title": "Alpha", "backdrop_path": "/a.jpg", "overview": "first",
             "release_date": "2024-05-10", "vote_average": 7.5, "genre_ids": [1, 2]},
            {"id": 12, "title": "Beta", "backdrop_path": null, "overview": "second",
             "release_date": ""}
        ],
        "total_pages": 1,
        "total_results": 2
    }"#;

    #[test]
    fn parses_movie_page() {
        let set = parse_page(MOVIE_PAGE.as_bytes(), MediaKind::Movie).unwrap();
        assert_eq!(set.len(), 2);
        let alpha = &set.items[0];
        assert_eq!(alpha.title, "Alpha");
        assert_eq!(alpha.backdrop_path.as_deref(), Some("/a.jpg"));
        assert_eq!(alpha.release_date, NaiveDate::from_ymd_opt(2024, 5, 10));
        assert_eq!(alpha.vote_average, Some(7.5));
        let beta = &set.items[1];
        assert_eq!(beta.backdrop_path, None);
        assert_eq!(beta.release_date, None);
    }

    #[test]
    fn tv_items_use_name_and_first_air_date() {
        let body = r#"{"page": 1, "results": [
            {"id": 3, "name": "Show", "overview": "o", "first_air_date": "2020-01-02"}
        ]}"#;
        let set = parse_page(body.as_bytes(), MediaKind::Tv).unwrap();
        let show = &set.items[0];
        assert_eq!(show.title, "Show");
        assert_eq!(show.kind, MediaKind::Tv);
        assert_eq!(show.release_date, NaiveDate::from_ymd_opt(2020, 1, 2));
        assert_eq!(set.total_results, 1);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_page(b"{\"results\": 5}", MediaKind::Movie).is_err());
        assert!(parse_page(b"<html>", MediaKind::Movie).is_err());
    }

    #[test]
    fn endpoint_url_joins_base_and_path() {
        let client = CatalogClient::new(
            Url::parse("https://api.themoviedb.org/3/").unwrap(),
            "key".into(),
        )
        .unwrap();
        let url = client.endpoint_url("movie/now_playing").unwrap();
        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/movie/now_playing");
    }

    #[test]
    fn image_urls() {
        let base = Url::parse(DEFAULT_IMAGE_BASE).unwrap();
        assert_eq!(
            image_url(&base, Some("/abc.jpg"), Some("w500")),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            image_url(&base, Some("/abc.jpg"), None),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
        assert_eq!(image_url(&base, None, Some("w500")), PLACEHOLDER_IMAGE);
        assert_eq!(image_url(&base, Some(""), None), PLACEHOLDER_IMAGE);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = CatalogClient::new(Url::parse("http://127.0.0.1:9").unwrap(), "key".into())
            .unwrap();
        let err = client.fetch_feed(Feed::PopularMovies).await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport { .. }), "{err}");
    }

    #[tokio::test]
    async fn transport_errors_do_not_carry_the_api_key() {
        let client = CatalogClient::new(
            Url::parse("http://127.0.0.1:9").unwrap(),
            "SECRETKEY123".into(),
        )
        .unwrap();
        let err = client.fetch_feed(Feed::PopularMovies).await.unwrap_err();
        assert!(err.to_string().contains("movie/popular"), "{err}");
        assert!(!err.to_string().contains("SECRETKEY123"), "{err}");
        assert!(!format!("{err:?}").contains("SECRETKEY123"));

        let err = client.search(MediaKind::Tv, "heat").await.unwrap_err();
        assert!(!err.to_string().contains("SECRETKEY123"), "{err}");
    }
}
