//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::model::{Location, DEFAULT_API_BASE, DEFAULT_IMAGE_BASE};

/// Terminal browser for movies and TV shows
#[derive(Parser, Debug)]
#[command(name = "reelview")]
#[command(about = "Browse movie and TV catalogs from the terminal", long_about = None)]
pub struct Config {
    /// Catalog API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Catalog API base URL
    #[arg(long, env = "TMDB_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: Url,

    /// Image CDN base URL
    #[arg(long, env = "TMDB_IMAGE_BASE", default_value = DEFAULT_IMAGE_BASE)]
    pub image_base: Url,

    /// Path to open at startup, e.g. /tv or /search?keyword=dune
    #[arg(long, default_value = "/")]
    pub route: String,

    /// Slide duration for carousel page changes, in milliseconds
    #[arg(long, default_value_t = 400)]
    pub transition_ms: u64,

    /// Directory for rolling log files
    #[arg(long, env = "REELVIEW_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,
}

impl Config {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn start_location(&self) -> Location {
        Location::parse(&self.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::View;

    #[test]
    fn defaults_apply() {
        let config = Config::try_parse_from(["reelview", "--api-key", "abc"]).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.api_base.as_str(), "https://api.themoviedb.org/3");
        assert_eq!(config.transition(), Duration::from_millis(400));
        assert_eq!(config.start_location(), Location::default());
    }

    #[test]
    fn route_and_overrides() {
        let config = Config::try_parse_from([
            "reelview",
            "--api-key",
            "abc",
            "--route",
            "/search?keyword=heat",
            "--transition-ms",
            "0",
            "--image-base",
            "http://localhost:9000/img",
        ])
        .unwrap();
        assert_eq!(config.start_location().view(), View::Search);
        assert_eq!(config.transition(), Duration::ZERO);
        assert_eq!(config.image_base.host_str(), Some("localhost"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Config::try_parse_from(["reelview", "--api-key", "abc", "--api-base", "not a url"]);
        assert!(result.is_err());
    }
}
