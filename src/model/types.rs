//! Core type definitions for the application

use std::fmt;
use std::time::Instant;

use chrono::NaiveDate;

/// Number of cards shown per carousel page
pub const PAGE_SIZE: usize = 5;

/// Whether a catalog entry is a movie or a TV show
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

/// One independently paginated content category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feed {
    NowPlayingMovies,
    UpcomingMovies,
    PopularMovies,
    TopRatedMovies,
    OnTheAirTv,
    AiringTodayTv,
    PopularTv,
    TopRatedTv,
}

impl Feed {
    pub const MOVIES: [Feed; 4] = [
        Feed::NowPlayingMovies,
        Feed::UpcomingMovies,
        Feed::PopularMovies,
        Feed::TopRatedMovies,
    ];

    pub const TV: [Feed; 4] = [
        Feed::OnTheAirTv,
        Feed::AiringTodayTv,
        Feed::PopularTv,
        Feed::TopRatedTv,
    ];

    /// Stable name, also used as the layout identity prefix
    pub fn name(self) -> &'static str {
        match self {
            Feed::NowPlayingMovies => "now_playing_movies",
            Feed::UpcomingMovies => "upcoming_movies",
            Feed::PopularMovies => "popular_movies",
            Feed::TopRatedMovies => "top_rated_movies",
            Feed::OnTheAirTv => "on_the_air_tv",
            Feed::AiringTodayTv => "airing_today_tv",
            Feed::PopularTv => "popular_tv",
            Feed::TopRatedTv => "top_rated_tv",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Feed::NowPlayingMovies => "Now Playing",
            Feed::UpcomingMovies => "Upcoming Movies",
            Feed::PopularMovies => "Popular Movies",
            Feed::TopRatedMovies => "Top Rated Movies",
            Feed::OnTheAirTv => "On Air TV Shows",
            Feed::AiringTodayTv => "Airing Today TV Shows",
            Feed::PopularTv => "Popular TV Shows",
            Feed::TopRatedTv => "Top Rated TV Shows",
        }
    }

    /// Catalog endpoint path, relative to the API base
    pub fn endpoint(self) -> &'static str {
        match self {
            Feed::NowPlayingMovies => "movie/now_playing",
            Feed::UpcomingMovies => "movie/upcoming",
            Feed::PopularMovies => "movie/popular",
            Feed::TopRatedMovies => "movie/top_rated",
            Feed::OnTheAirTv => "tv/on_the_air",
            Feed::AiringTodayTv => "tv/airing_today",
            Feed::PopularTv => "tv/popular",
            Feed::TopRatedTv => "tv/top_rated",
        }
    }

    pub fn kind(self) -> MediaKind {
        match self {
            Feed::NowPlayingMovies
            | Feed::UpcomingMovies
            | Feed::PopularMovies
            | Feed::TopRatedMovies => MediaKind::Movie,
            Feed::OnTheAirTv | Feed::AiringTodayTv | Feed::PopularTv | Feed::TopRatedTv => {
                MediaKind::Tv
            }
        }
    }

    /// The first item of these feeds goes to the banner, not the carousel
    pub fn hero_reserved(self) -> bool {
        matches!(self, Feed::NowPlayingMovies | Feed::OnTheAirTv)
    }

    pub fn page_size(self) -> usize {
        PAGE_SIZE
    }
}

/// Where a result set came from: a named feed or one half of a search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    Feed(Feed),
    Search(MediaKind),
}

impl Source {
    pub fn tag(self) -> &'static str {
        match self {
            Source::Feed(feed) => feed.name(),
            Source::Search(MediaKind::Movie) => "search_movie",
            Source::Search(MediaKind::Tv) => "search_tv",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Source::Feed(feed) => feed.title(),
            Source::Search(MediaKind::Movie) => "Movie Results",
            Source::Search(MediaKind::Tv) => "TV Results",
        }
    }

    pub fn kind(self) -> MediaKind {
        match self {
            Source::Feed(feed) => feed.kind(),
            Source::Search(kind) => kind,
        }
    }

    pub fn hero_reserved(self) -> bool {
        match self {
            Source::Feed(feed) => feed.hero_reserved(),
            Source::Search(_) => false,
        }
    }

    pub fn page_size(self) -> usize {
        match self {
            Source::Feed(feed) => feed.page_size(),
            Source::Search(_) => PAGE_SIZE,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A movie or TV show as returned by the catalog
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub overview: String,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f32>,
    pub kind: MediaKind,
}

/// The full ordered sequence of items from one fetch
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    pub items: Vec<Item>,
    pub total_results: u64,
}

impl ResultSet {
    pub fn new(items: Vec<Item>) -> Self {
        let total_results = items.len() as u64;
        Self { items, total_results }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Which part of the UI receives key input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Carousels,
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_input: String,
    pub focused_row: usize,
    pub focused_slot: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Carousels,
            search_input: String::new(),
            focused_row: 0,
            focused_slot: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64) -> Item {
        Item {
            id,
            title: format!("Item {id}"),
            backdrop_path: None,
            poster_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: None,
            kind: MediaKind::Movie,
        }
    }

    #[test]
    fn only_lead_feeds_reserve_a_hero() {
        let heroes: Vec<Feed> = Feed::MOVIES
            .iter()
            .chain(Feed::TV.iter())
            .copied()
            .filter(|f| f.hero_reserved())
            .collect();
        assert_eq!(heroes, vec![Feed::NowPlayingMovies, Feed::OnTheAirTv]);
        assert!(!Source::Search(MediaKind::Movie).hero_reserved());
    }

    #[test]
    fn source_tags_are_distinct() {
        let mut tags: Vec<&str> = Feed::MOVIES
            .iter()
            .chain(Feed::TV.iter())
            .map(|f| Source::Feed(*f).tag())
            .collect();
        tags.push(Source::Search(MediaKind::Movie).tag());
        tags.push(Source::Search(MediaKind::Tv).tag());
        let count = tags.len();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), count);
    }

    #[test]
    fn result_set_find_is_by_id() {
        let set = ResultSet::new(vec![item(1), item(2)]);
        assert_eq!(set.find(2).map(|i| i.id), Some(2));
        assert!(set.find(99).is_none());
        assert_eq!(set.total_results, 2);
    }
}
