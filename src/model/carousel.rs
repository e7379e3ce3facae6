//! One paginated content row bound to a single source

use std::time::{Duration, Instant};

use super::pagination::{self, Direction, PageCursor, PAGINATION_DISABLED};
use super::transition::{AdvanceOutcome, TransitionCoordinator, TransitionState};
use super::types::{Item, ResultSet, Source};

/// Fetch status of a carousel's result set
#[derive(Clone, Debug, PartialEq)]
pub enum FeedState {
    Loading,
    Loaded(ResultSet),
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct Carousel {
    pub source: Source,
    pub state: FeedState,
    pub cursor: PageCursor,
    transition: TransitionCoordinator,
    generation: u64,
}

impl Carousel {
    pub fn new(source: Source, transition: Duration) -> Self {
        Self {
            source,
            state: FeedState::Loading,
            cursor: PageCursor::default(),
            transition: TransitionCoordinator::new(transition),
            generation: 0,
        }
    }

    pub fn result_set(&self) -> Option<&ResultSet> {
        match &self.state {
            FeedState::Loaded(set) => Some(set),
            _ => None,
        }
    }

    pub fn transition(&self) -> &TransitionCoordinator {
        &self.transition
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark the carousel as loading and return the token a fetch must
    /// present to [`Carousel::apply`].
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.state = FeedState::Loading;
        self.generation
    }

    /// Install a fetch result. Results from a superseded load are dropped.
    pub fn apply(&mut self, generation: u64, result: Result<ResultSet, String>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                source = %self.source,
                generation,
                current = self.generation,
                "Discarding stale fetch result"
            );
            return false;
        }
        self.state = match result {
            Ok(set) => FeedState::Loaded(set),
            Err(message) => FeedState::Failed(message),
        };
        self.cursor = PageCursor::default();
        self.transition.reset();
        true
    }

    /// Reset page position and lock, keeping the fetched data.
    pub fn remount(&mut self) {
        self.cursor = PageCursor::default();
        self.transition.reset();
    }

    pub fn max_index(&self) -> i64 {
        match self.result_set() {
            Some(set) => pagination::compute_max_index(
                set.len(),
                self.source.page_size(),
                self.source.hero_reserved(),
            ),
            None => PAGINATION_DISABLED,
        }
    }

    pub fn pagination_enabled(&self) -> bool {
        self.max_index() != PAGINATION_DISABLED
    }

    /// Number of pages a user can step through, at least one.
    pub fn page_count(&self) -> usize {
        (self.max_index() + 1).max(1) as usize
    }

    /// The hero item shown in the banner, if this source reserves one.
    pub fn hero(&self) -> Option<&Item> {
        if !self.source.hero_reserved() {
            return None;
        }
        self.result_set().and_then(|set| set.items.first())
    }

    /// Items on the current page
    pub fn visible(&self) -> &[Item] {
        match self.result_set() {
            Some(set) => pagination::slice_for_page(
                &set.items,
                self.cursor,
                self.source.page_size(),
                self.source.hero_reserved(),
            ),
            None => &[],
        }
    }

    /// Items of the page being slid away, while a slide is running.
    pub fn outgoing(&self) -> &[Item] {
        let TransitionState::Transitioning { direction, .. } = self.transition.state() else {
            return &[];
        };
        let Some(set) = self.result_set() else {
            return &[];
        };
        let previous = self.cursor.advance(direction.opposite(), self.max_index());
        pagination::slice_for_page(
            &set.items,
            previous,
            self.source.page_size(),
            self.source.hero_reserved(),
        )
    }

    /// Change page unless a slide is already running.
    pub fn request_advance(&mut self, direction: Direction, now: Instant) -> AdvanceOutcome {
        if self.result_set().is_none() || self.transition.is_locked() {
            return AdvanceOutcome::Ignored;
        }
        let max_index = self.max_index();
        if max_index == PAGINATION_DISABLED {
            return AdvanceOutcome::Disabled;
        }
        self.transition.begin(direction, now);
        self.cursor = self.cursor.advance(direction, max_index);
        tracing::debug!(
            source = %self.source,
            page = self.cursor.page,
            ?direction,
            "Carousel advanced"
        );
        AdvanceOutcome::Advanced { page: self.cursor.page }
    }

    /// Drive the animation clock; true when a slide just finished.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.transition.poll(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{Feed, MediaKind};

    fn set(n: u64) -> ResultSet {
        ResultSet::new(
            (1..=n)
                .map(|id| Item {
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

    fn loaded(source: Source, n: u64) -> Carousel {
        let mut carousel = Carousel::new(source, Duration::from_millis(400));
        let token = carousel.begin_load();
        carousel.apply(token, Ok(set(n)));
        carousel
    }

    fn visible_ids(c: &Carousel) -> Vec<u64> {
        c.visible().iter().map(|i| i.id).collect()
    }

    #[test]
    fn request_while_transitioning_is_ignored() {
        let now = Instant::now();
        let mut c = loaded(Source::Feed(Feed::PopularMovies), 20);
        assert_eq!(
            c.request_advance(Direction::Forward, now),
            AdvanceOutcome::Advanced { page: 1 }
        );
        let before = c.cursor;
        assert_eq!(
            c.request_advance(Direction::Forward, now + Duration::from_millis(50)),
            AdvanceOutcome::Ignored
        );
        assert_eq!(c.cursor, before);
    }

    #[test]
    fn round_trip_once_lock_is_released() {
        let now = Instant::now();
        let mut c = loaded(Source::Feed(Feed::UpcomingMovies), 20);
        c.request_advance(Direction::Forward, now);
        let later = now + Duration::from_millis(400);
        assert!(c.poll(later));
        c.request_advance(Direction::Backward, later);
        assert_eq!(c.cursor.page, 0);
        assert_eq!(c.cursor.direction, Direction::Backward);
    }

    #[test]
    fn popular_movies_scenario() {
        let now = Instant::now();
        let mut c = loaded(Source::Feed(Feed::PopularMovies), 12);
        assert_eq!(c.max_index(), 1);
        assert_eq!(visible_ids(&c), vec![1, 2, 3, 4, 5]);

        c.request_advance(Direction::Forward, now);
        assert_eq!(visible_ids(&c), vec![6, 7, 8, 9, 10]);

        let later = now + Duration::from_millis(400);
        c.poll(later);
        c.request_advance(Direction::Forward, later);
        assert_eq!(c.cursor.page, 0);
        assert_eq!(visible_ids(&c), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn outgoing_page_is_held_only_while_sliding() {
        let now = Instant::now();
        let mut c = loaded(Source::Feed(Feed::PopularMovies), 12);
        assert!(c.outgoing().is_empty());

        c.request_advance(Direction::Forward, now);
        let outgoing: Vec<u64> = c.outgoing().iter().map(|i| i.id).collect();
        assert_eq!(outgoing, vec![1, 2, 3, 4, 5]);

        c.poll(now + Duration::from_millis(400));
        assert!(c.outgoing().is_empty());

        // wrapping forward from the last page slides it out
        let later = now + Duration::from_millis(400);
        c.request_advance(Direction::Forward, later);
        let outgoing: Vec<u64> = c.outgoing().iter().map(|i| i.id).collect();
        assert_eq!(outgoing, vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_ids(&c), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn hero_is_excluded_from_pages() {
        let c = loaded(Source::Feed(Feed::NowPlayingMovies), 20);
        assert_eq!(c.hero().map(|i| i.id), Some(1));
        assert_eq!(visible_ids(&c), vec![2, 3, 4, 5, 6]);
        assert_eq!(c.page_count(), 3);
    }

    #[test]
    fn small_feed_disables_pagination() {
        let mut c = loaded(Source::Search(MediaKind::Tv), 4);
        assert!(!c.pagination_enabled());
        assert_eq!(visible_ids(&c), vec![1, 2, 3, 4]);
        assert_eq!(
            c.request_advance(Direction::Forward, Instant::now()),
            AdvanceOutcome::Disabled
        );
        assert!(!c.transition().is_locked());
    }

    #[test]
    fn nothing_loaded_ignores_requests() {
        let mut c = Carousel::new(Source::Feed(Feed::TopRatedTv), Duration::from_millis(400));
        assert_eq!(c.request_advance(Direction::Forward, Instant::now()), AdvanceOutcome::Ignored);
        assert!(c.visible().is_empty());
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut c = Carousel::new(Source::Search(MediaKind::Movie), Duration::from_millis(400));
        let first = c.begin_load();
        let second = c.begin_load();
        assert!(!c.apply(first, Ok(set(3))));
        assert_eq!(c.state, FeedState::Loading);
        assert!(c.apply(second, Err("timeout".into())));
        assert_eq!(c.state, FeedState::Failed("timeout".into()));
    }

    #[test]
    fn remount_resets_cursor_but_keeps_data() {
        let now = Instant::now();
        let mut c = loaded(Source::Feed(Feed::PopularTv), 20);
        c.request_advance(Direction::Forward, now);
        c.remount();
        assert_eq!(c.cursor.page, 0);
        assert!(!c.transition().is_locked());
        assert!(c.result_set().is_some());
    }
}
