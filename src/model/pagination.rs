//! Page index arithmetic shared by every carousel

use super::types::Item;

/// Returned by [`compute_max_index`] when there is nothing to page through
pub const PAGINATION_DISABLED: i64 = -1;

/// Direction of the most recent page change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Current page of one carousel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PageCursor {
    pub page: usize,
    pub direction: Direction,
}

impl PageCursor {
    /// Step one page in `direction`, wrapping at both ends.
    ///
    /// `max_index` must be non-negative; callers check for
    /// [`PAGINATION_DISABLED`] first.
    pub fn advance(self, direction: Direction, max_index: i64) -> PageCursor {
        let max = max_index.max(0) as usize;
        let page = match direction {
            Direction::Forward => {
                if self.page >= max {
                    0
                } else {
                    self.page + 1
                }
            }
            Direction::Backward => {
                if self.page == 0 {
                    max
                } else {
                    self.page.min(max + 1) - 1
                }
            }
        };
        PageCursor { page, direction }
    }
}

/// Highest page index reachable for `count` items.
///
/// `floor((count - hero - 1) / page_size) - 1`, never below
/// [`PAGINATION_DISABLED`]. Items past the last full page are not reachable.
pub fn compute_max_index(count: usize, page_size: usize, hero_reserved: bool) -> i64 {
    if page_size == 0 {
        return PAGINATION_DISABLED;
    }
    let hero = i64::from(hero_reserved);
    let span = count as i64 - hero - 1;
    (span.div_euclid(page_size as i64) - 1).max(PAGINATION_DISABLED)
}

/// The items visible on the cursor's page, clipped to what exists.
pub fn slice_for_page<'a>(
    items: &'a [Item],
    cursor: PageCursor,
    page_size: usize,
    hero_reserved: bool,
) -> &'a [Item] {
    let offset = usize::from(hero_reserved);
    let start = (offset + cursor.page * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    &items[start..end]
}
