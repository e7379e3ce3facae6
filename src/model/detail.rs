//! Detail overlay selection and resolution

use super::carousel::Carousel;
use super::types::{Item, Source};

/// The item an open overlay refers to.
///
/// `source` is absent when the selection came from a typed path such as
/// `/movies/42`, which names an id but not the row it was picked from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub source: Option<Source>,
    pub item_id: u64,
}

impl Selection {
    pub fn new(source: Source, item_id: u64) -> Self {
        Self {
            source: Some(source),
            item_id,
        }
    }

    pub fn from_path(item_id: u64) -> Self {
        Self {
            source: None,
            item_id,
        }
    }

    /// Shared identity of the card and its expanded overlay
    pub fn layout_key(&self) -> String {
        match self.source {
            Some(source) => layout_key(source, self.item_id),
            None => format!("path/{}", self.item_id),
        }
    }
}

pub fn layout_key(source: Source, item_id: u64) -> String {
    format!("{}/{}", source.tag(), item_id)
}

/// Find the selected item among the carousels' fetched result sets.
///
/// Returns `None` when the source has not loaded or holds no such id; the
/// overlay then shows its dimmed background only.
pub fn resolve<'a>(selection: &Selection, carousels: &'a [Carousel]) -> Option<&'a Item> {
    carousels
        .iter()
        .filter(|c| selection.source.is_none_or(|source| c.source == source))
        .filter_map(|c| c.result_set())
        .find_map(|set| set.find(selection.item_id))
}
