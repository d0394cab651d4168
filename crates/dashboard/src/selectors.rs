//! Read-side helpers for the posts list
//!
//! Pure functions over slices of posts: free-text search, pagination and the
//! row selection used to build a bulk delete.

use dashboard_api::{Post, PostId};
use std::collections::HashSet;

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Posts whose title or body contains `query`, ignoring case.
/// A blank query matches everything.
pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle) || post.body.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Items on zero-based `page`; empty past the last page
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Row selection in the posts list
///
/// `Exclude` is what "select all" produces: every row except the listed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSelection {
    Include(HashSet<PostId>),
    Exclude(HashSet<PostId>),
}

impl Default for PostSelection {
    fn default() -> Self {
        PostSelection::Include(HashSet::new())
    }
}

impl PostSelection {
    pub fn all() -> Self {
        PostSelection::Exclude(HashSet::new())
    }

    pub fn contains(&self, id: PostId) -> bool {
        match self {
            PostSelection::Include(ids) => ids.contains(&id),
            PostSelection::Exclude(ids) => !ids.contains(&id),
        }
    }

    pub fn toggle(&mut self, id: PostId) {
        let ids = match self {
            PostSelection::Include(ids) | PostSelection::Exclude(ids) => ids,
        };
        if !ids.remove(&id) {
            ids.insert(id);
        }
    }

    /// Selected posts in collection order
    pub fn resolve(&self, posts: &[Post]) -> Vec<PostId> {
        posts
            .iter()
            .map(|post| post.id)
            .filter(|id| self.contains(*id))
            .collect()
    }

    pub fn count(&self, posts: &[Post]) -> usize {
        match self {
            PostSelection::Include(ids) => ids.len(),
            PostSelection::Exclude(ids) => posts.len().saturating_sub(ids.len()),
        }
    }
}

/// Up to two initials from a display name, `"U"` when there is none
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn post(id: PostId, title: &str, body: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_body() {
        let posts = vec![
            post(1, "Rust tips", "ownership"),
            post(2, "Cooking", "a RUSTIC bread"),
            post(3, "Travel", "mountains"),
        ];
        let ids: Vec<PostId> = search_posts(&posts, "rust").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(search_posts(&posts, "  ").len(), 3);
    }

    #[test]
    fn pagination_edges() {
        let items: Vec<u32> = (0..12).collect();
        assert_eq!(paginate(&items, 0, 5), &items[0..5]);
        assert_eq!(paginate(&items, 2, 5), &items[10..12]);
        assert!(paginate(&items, 3, 5).is_empty());
        assert_eq!(page_count(12, 5), 3);
        assert_eq!(page_count(0, 5), 0);
    }

    #[test]
    fn exclude_selection_resolves_against_collection() {
        let posts: Vec<Post> = (1..=4).map(|id| post(id, "t", "b")).collect();
        let mut selection = PostSelection::all();
        selection.toggle(2);

        assert_eq!(selection.resolve(&posts), vec![1, 3, 4]);
        assert_eq!(selection.count(&posts), 3);

        let mut selection = PostSelection::default();
        selection.toggle(4);
        selection.toggle(1);
        selection.toggle(4);
        assert_eq!(selection.resolve(&posts), vec![1]);
    }

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("Leanne Graham"), "LG");
        assert_eq!(initials("Jane Smith Johnson"), "JS");
        assert_eq!(initials("madonna"), "M");
        assert_eq!(initials("   "), "U");
    }

    proptest! {
        #[test]
        fn pages_cover_every_item_once(len in 0usize..200, size_idx in 0usize..5) {
            let size = PAGE_SIZE_OPTIONS[size_idx];
            let items: Vec<usize> = (0..len).collect();
            let mut seen = Vec::new();
            for page in 0..page_count(len, size) {
                seen.extend_from_slice(paginate(&items, page, size));
            }
            prop_assert_eq!(seen, items);
        }
    }
}
