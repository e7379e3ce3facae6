//! Navigable locations and the back-stack

use url::form_urlencoded;

use super::detail::Selection;

/// The three top-level views
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Movies,
    Tv,
    Search,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Movies => "Movies",
            View::Tv => "TV",
            View::Search => "Search",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Movies { selection: Option<Selection> },
    Tv { selection: Option<Selection> },
    Search { term: String, selection: Option<Selection> },
}

impl Default for Location {
    fn default() -> Self {
        Location::Movies { selection: None }
    }
}

impl Location {
    pub fn view(&self) -> View {
        match self {
            Location::Movies { .. } => View::Movies,
            Location::Tv { .. } => View::Tv,
            Location::Search { .. } => View::Search,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Location::Movies { selection }
            | Location::Tv { selection }
            | Location::Search { selection, .. } => selection.as_ref(),
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        match self {
            Location::Search { term, .. } => Some(term),
            _ => None,
        }
    }

    /// Same view, with the given overlay open
    pub fn with_selection(&self, selection: Selection) -> Location {
        let selection = Some(selection);
        match self {
            Location::Movies { .. } => Location::Movies { selection },
            Location::Tv { .. } => Location::Tv { selection },
            Location::Search { term, .. } => Location::Search {
                term: term.clone(),
                selection,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Location::Movies { selection: None } => "/".to_string(),
            Location::Movies { selection: Some(sel) } => format!("/movies/{}", sel.item_id),
            Location::Tv { selection: None } => "/tv".to_string(),
            Location::Tv { selection: Some(sel) } => format!("/tv/{}", sel.item_id),
            Location::Search { term, selection } => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("keyword", term)
                    .finish();
                match selection {
                    None => format!("/search?{query}"),
                    Some(sel) => format!("/search/{}?{query}", sel.item_id),
                }
            }
        }
    }

    /// Parse a path; anything unrecognised lands on the movies view.
    pub fn parse(input: &str) -> Location {
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, query),
            None => (input, ""),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let id = |s: Option<&&str>| s.and_then(|s| s.parse::<u64>().ok()).map(Selection::from_path);

        match segments.first().copied() {
            None => Location::Movies { selection: None },
            Some("movies") => Location::Movies { selection: id(segments.get(1)) },
            Some("tv") => Location::Tv { selection: id(segments.get(1)) },
            Some("search") => {
                let term = form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == "keyword")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();
                Location::Search {
                    term,
                    selection: id(segments.get(1)),
                }
            }
            Some(other) => {
                tracing::warn!(path = other, "Unknown route, falling back to movies");
                Location::default()
            }
        }
    }
}

/// Browser-style history; the first entry is never popped.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<Location>,
}

impl History {
    pub fn new(start: Location) -> Self {
        Self { entries: vec![start] }
    }

    pub fn current(&self) -> &Location {
        // entries is never empty
        &self.entries[self.entries.len() - 1]
    }

    pub fn push(&mut self, location: Location) {
        tracing::debug!(path = %location.path(), "Navigate");
        self.entries.push(location);
    }

    /// Go back one entry. Returns false at the root.
    pub fn pop(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop();
        true
    }

    pub fn replace(&mut self, location: Location) {
        if let Some(last) = self.entries.last_mut() {
            *last = location;
        }
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{Feed, Source};

    #[test]
    fn paths_round_trip_through_parse() {
        for path in ["/", "/movies/42", "/tv", "/tv/7", "/search?keyword=dune", "/search/3?keyword=the+wire"] {
            assert_eq!(Location::parse(path).path(), path);
        }
    }

    #[test]
    fn search_term_is_url_decoded() {
        let loc = Location::parse("/search?keyword=star%20wars%26more");
        assert_eq!(loc.search_term(), Some("star wars&more"));
        assert_eq!(loc.view(), View::Search);
    }

    #[test]
    fn unknown_and_malformed_paths() {
        assert_eq!(Location::parse("/nowhere"), Location::default());
        assert_eq!(Location::parse("/movies/abc"), Location::Movies { selection: None });
    }

    #[test]
    fn parsed_selection_has_no_source() {
        let loc = Location::parse("/tv/12");
        assert_eq!(loc.selection(), Some(&Selection::from_path(12)));
    }

    #[test]
    fn with_selection_keeps_view_and_term() {
        let loc = Location::Search { term: "alien".into(), selection: None };
        let sel = Selection::new(Source::Feed(Feed::PopularMovies), 9);
        let opened = loc.with_selection(sel);
        assert_eq!(opened.search_term(), Some("alien"));
        assert_eq!(opened.selection(), Some(&sel));
    }

    #[test]
    fn history_pops_back_but_not_past_root() {
        let mut history = History::default();
        let sel = Selection::new(Source::Feed(Feed::NowPlayingMovies), 1);
        history.push(history.current().with_selection(sel));
        assert_eq!(history.current().path(), "/movies/1");
        assert!(history.pop());
        assert_eq!(history.current().path(), "/");
        assert!(!history.pop());
        assert_eq!(history.depth(), 1);
    }
}
