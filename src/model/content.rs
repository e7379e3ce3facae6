//! Content state: carousels for every view plus the navigation history

use std::time::{Duration, Instant};

use url::Url;

use super::carousel::{Carousel, FeedState};
use super::detail::{self, Selection};
use super::navigation::{History, Location, View};
use super::types::{Feed, Item, MediaKind, ResultSet, Source};

/// A fetch the controller should start
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub source: Source,
    pub generation: u64,
    pub term: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ContentState {
    pub history: History,
    pub image_base: Url,
    movies: Vec<Carousel>,
    tv: Vec<Carousel>,
    search: Vec<Carousel>,
    searched_term: Option<String>,
}

impl ContentState {
    pub fn new(start: Location, image_base: Url, transition: Duration) -> Self {
        let rows = |sources: Vec<Source>| -> Vec<Carousel> {
            sources
                .into_iter()
                .map(|source| Carousel::new(source, transition))
                .collect()
        };
        Self {
            history: History::new(start),
            image_base,
            movies: rows(Feed::MOVIES.iter().map(|f| Source::Feed(*f)).collect()),
            tv: rows(Feed::TV.iter().map(|f| Source::Feed(*f)).collect()),
            search: rows(vec![
                Source::Search(MediaKind::Movie),
                Source::Search(MediaKind::Tv),
            ]),
            searched_term: None,
        }
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn view(&self) -> View {
        self.location().view()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.location().selection()
    }

    pub fn carousels_for(&self, view: View) -> &[Carousel] {
        match view {
            View::Movies => &self.movies,
            View::Tv => &self.tv,
            View::Search => &self.search,
        }
    }

    fn carousels_for_mut(&mut self, view: View) -> &mut Vec<Carousel> {
        match view {
            View::Movies => &mut self.movies,
            View::Tv => &mut self.tv,
            View::Search => &mut self.search,
        }
    }

    pub fn carousels(&self) -> &[Carousel] {
        self.carousels_for(self.view())
    }

    pub fn carousel(&self, row: usize) -> Option<&Carousel> {
        self.carousels().get(row)
    }

    pub fn carousel_mut(&mut self, row: usize) -> Option<&mut Carousel> {
        let view = self.view();
        self.carousels_for_mut(view).get_mut(row)
    }

    fn find_mut(&mut self, source: Source) -> Option<&mut Carousel> {
        self.movies
            .iter_mut()
            .chain(self.tv.iter_mut())
            .chain(self.search.iter_mut())
            .find(|c| c.source == source)
    }

    /// The banner item of the current view, if any row reserves one
    pub fn hero(&self) -> Option<&Item> {
        self.carousels().iter().find_map(|c| c.hero())
    }

    /// Item behind the open overlay, resolved against the current view
    pub fn resolve_selection(&self) -> Option<&Item> {
        self.selection()
            .and_then(|selection| detail::resolve(selection, self.carousels()))
    }

    /// Move to `location`; carousels of a newly entered view are remounted.
    pub fn navigate(&mut self, location: Location) {
        let previous = self.view();
        self.history.push(location);
        self.remount_if_changed(previous);
    }

    pub fn open_detail(&mut self, selection: Selection) {
        let next = self.location().with_selection(selection);
        self.history.push(next);
    }

    /// Close the overlay by going back. A selection at the root of the
    /// history (from the start path) is dropped in place instead.
    pub fn close_detail(&mut self) -> bool {
        if self.selection().is_none() {
            return false;
        }
        if !self.history.pop() {
            let cleared = match self.location().clone() {
                Location::Movies { .. } => Location::Movies { selection: None },
                Location::Tv { .. } => Location::Tv { selection: None },
                Location::Search { term, .. } => Location::Search {
                    term,
                    selection: None,
                },
            };
            self.history.replace(cleared);
        }
        true
    }

    pub fn go_back(&mut self) -> bool {
        let previous = self.view();
        let popped = self.history.pop();
        if popped {
            self.remount_if_changed(previous);
        }
        popped
    }

    fn remount_if_changed(&mut self, previous: View) {
        let view = self.view();
        if view != previous {
            for carousel in self.carousels_for_mut(view).iter_mut() {
                carousel.remount();
            }
        }
    }

    /// Fetches needed to show the current view.
    ///
    /// Feeds are requested once; `force` refetches everything on the view.
    /// Search rows are requested whenever the location's term differs from
    /// the one they hold.
    pub fn pending_loads(&mut self, force: bool) -> Vec<LoadRequest> {
        let view = self.view();
        if view == View::Search {
            let term = self.location().search_term().unwrap_or_default().trim().to_string();
            if !force && self.searched_term.as_deref() == Some(term.as_str()) {
                return Vec::new();
            }
            self.searched_term = Some(term.clone());
            if term.is_empty() {
                for carousel in self.search.iter_mut() {
                    let token = carousel.begin_load();
                    carousel.apply(token, Ok(ResultSet::default()));
                }
                return Vec::new();
            }
            return self
                .search
                .iter_mut()
                .map(|carousel| LoadRequest {
                    source: carousel.source,
                    generation: carousel.begin_load(),
                    term: Some(term.clone()),
                })
                .collect();
        }

        self.carousels_for_mut(view)
            .iter_mut()
            .filter(|c| force || c.generation() == 0)
            .map(|carousel| LoadRequest {
                source: carousel.source,
                generation: carousel.begin_load(),
                term: None,
            })
            .collect()
    }

    /// Install a fetch result. Returns false if it was superseded.
    pub fn apply_fetch(
        &mut self,
        source: Source,
        generation: u64,
        result: Result<ResultSet, String>,
    ) -> bool {
        match self.find_mut(source) {
            Some(carousel) => carousel.apply(generation, result),
            None => false,
        }
    }

    /// Release locks of finished slides; true if any finished.
    pub fn poll_transitions(&mut self, now: Instant) -> bool {
        let mut finished = false;
        for carousel in self
            .movies
            .iter_mut()
            .chain(self.tv.iter_mut())
            .chain(self.search.iter_mut())
        {
            finished |= carousel.poll(now);
        }
        finished
    }

    pub fn any_failed(&self) -> bool {
        self.carousels()
            .iter()
            .any(|c| matches!(c.state, FeedState::Failed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog_client::DEFAULT_IMAGE_BASE;

    fn state(start: &str) -> ContentState {
        ContentState::new(
            Location::parse(start),
            Url::parse(DEFAULT_IMAGE_BASE).unwrap(),
            Duration::from_millis(400),
        )
    }

    fn items(ids: &[u64]) -> ResultSet {
        ResultSet::new(
            ids.iter()
                .map(|&id| Item {
                    id,
                    title: format!("Item {id}"),
                    backdrop_path: None,
                    poster_path: None,
                    overview: String::new(),
                    release_date: None,
                    vote_average: None,
                    kind: MediaKind::Movie,
                })
                .collect(),
        )
    }

    #[test]
    fn feeds_load_once_unless_forced() {
        let mut s = state("/");
        let first = s.pending_loads(false);
        assert_eq!(first.len(), 4);
        assert!(first.iter().all(|r| r.term.is_none()));
        assert!(s.pending_loads(false).is_empty());
        assert_eq!(s.pending_loads(true).len(), 4);
    }

    #[test]
    fn search_reloads_when_term_changes() {
        let mut s = state("/search?keyword=dune");
        let loads = s.pending_loads(false);
        assert_eq!(loads.len(), 2);
        assert!(loads.iter().all(|r| r.term.as_deref() == Some("dune")));
        assert!(s.pending_loads(false).is_empty());

        s.navigate(Location::Search { term: "alien".into(), selection: None });
        assert_eq!(s.pending_loads(false).len(), 2);
    }

    #[test]
    fn empty_search_needs_no_fetch() {
        let mut s = state("/search");
        assert!(s.pending_loads(false).is_empty());
        assert!(s.carousels().iter().all(|c| c.result_set().is_some_and(|r| r.is_empty())));
    }

    #[test]
    fn detail_opens_and_closes_via_history() {
        let mut s = state("/");
        let loads = s.pending_loads(false);
        let popular = loads
            .iter()
            .find(|r| r.source == Source::Feed(Feed::PopularMovies))
            .unwrap();
        assert!(s.apply_fetch(popular.source, popular.generation, Ok(items(&[1, 2]))));

        s.open_detail(Selection::new(Source::Feed(Feed::PopularMovies), 2));
        assert_eq!(s.location().path(), "/movies/2");
        assert_eq!(s.resolve_selection().map(|i| i.id), Some(2));

        assert!(s.close_detail());
        assert_eq!(s.location().path(), "/");
        assert!(!s.close_detail());
    }

    #[test]
    fn start_path_overlay_closes_in_place() {
        let mut s = state("/tv/5");
        assert!(s.close_detail());
        assert_eq!(s.location().path(), "/tv");
        assert_eq!(s.history.depth(), 1);
    }

    #[test]
    fn entering_a_view_remounts_its_rows() {
        let mut s = state("/");
        let loads = s.pending_loads(false);
        for r in &loads {
            s.apply_fetch(r.source, r.generation, Ok(items(&(1..=20).collect::<Vec<_>>())));
        }
        let now = Instant::now();
        s.carousel_mut(1).unwrap().request_advance(crate::model::Direction::Forward, now);
        assert_eq!(s.carousel(1).unwrap().cursor.page, 1);

        s.navigate(Location::Tv { selection: None });
        assert!(s.go_back());
        assert_eq!(s.carousel(1).unwrap().cursor.page, 0);
        assert!(s.carousel(1).unwrap().result_set().is_some());
    }
}
