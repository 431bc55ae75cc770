//! Filter/sort engine for post lists.
//!
//! Pure functions over an in-memory candidate list: given the full list and
//! a filter, derive an ordered view. Callers re-run this whenever either
//! input changes; nothing here touches the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Post;

/// How to order filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    TitleAsc,
    TitleDesc,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "title-asc" => Ok(SortKey::TitleAsc),
            "title-desc" => Ok(SortKey::TitleDesc),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// The transient filter specification driving the engine. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilter {
    /// Case-insensitive substring over title, content, and author name.
    /// Empty matches all.
    pub search: String,
    /// Exact category match. `None` matches all.
    pub category: Option<Uuid>,
    /// Post must carry every tag (case-sensitive exact match).
    pub tags: Vec<String>,
    pub sort: SortKey,
}

impl PostFilter {
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.category.is_some()
            || !self.tags.is_empty()
            || self.sort != SortKey::Newest
    }
}

/// Status facet for the admin moderation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl StatusFilter {
    fn matches(self, post: &Post) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Published => post.published,
            StatusFilter::Draft => !post.published,
        }
    }
}

/// Result of filtering, distinguishing "nothing matched" from "nothing exists".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    Results,
    NoMatches,
    NoContent,
}

/// Apply a filter to a candidate list, returning the derived ordered view.
///
/// Output is always a subset of the input; ties under `Newest`/`Oldest`
/// keep their input order (the sort is stable).
pub fn apply(posts: &[Post], filter: &PostFilter) -> Vec<Post> {
    let needle = filter.search.to_lowercase();

    let mut out: Vec<Post> = posts
        .iter()
        .filter(|post| matches_search(post, &needle))
        .filter(|post| filter.category.is_none_or(|id| post.category_id == id))
        .filter(|post| filter.tags.iter().all(|tag| post.tags.contains(tag)))
        .cloned()
        .collect();

    sort(&mut out, filter.sort);
    out
}

/// Classify a filtered view against its unfiltered candidate count.
pub fn outcome(filtered_len: usize, candidate_len: usize) -> FilterOutcome {
    if candidate_len == 0 {
        FilterOutcome::NoContent
    } else if filtered_len == 0 {
        FilterOutcome::NoMatches
    } else {
        FilterOutcome::Results
    }
}

fn matches_search(post: &Post, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    post.title.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
        || post.author_name.to_lowercase().contains(needle)
}

fn sort(posts: &mut [Post], key: SortKey) {
    match key {
        SortKey::Newest => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => posts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::TitleAsc => posts.sort_by(title_cmp),
        SortKey::TitleDesc => {
            // Exact reversal of the ascending order, equal titles included.
            posts.sort_by(title_cmp);
            posts.reverse();
        }
    }
}

fn title_cmp(a: &Post, b: &Post) -> std::cmp::Ordering {
    title_key(a).cmp(&title_key(b))
}

// Case-insensitive stand-in for locale collation.
fn title_key(post: &Post) -> String {
    post.title.to_lowercase()
}

/// How many results the home view surfaces in the large "featured" layout.
pub const FEATURED_COUNT: usize = 3;
/// How many further results the home view surfaces as "recent".
pub const RECENT_COUNT: usize = 9;

/// Split an ordered view into featured and recent slices for the home page.
/// Purely presentational; applied after filtering and sorting.
pub fn featured_split(posts: &[Post]) -> (&[Post], &[Post]) {
    let featured_end = posts.len().min(FEATURED_COUNT);
    let recent_end = posts.len().min(FEATURED_COUNT + RECENT_COUNT);
    (&posts[..featured_end], &posts[featured_end..recent_end])
}

/// Filter the admin moderation list: status facet plus a free-text search
/// over title, author name, and category name.
pub fn apply_admin(posts: &[Post], status: StatusFilter, search: &str) -> Vec<Post> {
    let needle = search.to_lowercase();

    posts
        .iter()
        .filter(|post| status.matches(post))
        .filter(|post| {
            needle.is_empty()
                || post.title.to_lowercase().contains(&needle)
                || post.author_name.to_lowercase().contains(&needle)
                || post.category_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Derived counts for the admin moderation header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModerationStats {
    pub total: usize,
    pub published: usize,
    pub draft: usize,
    pub today: usize,
}

pub fn moderation_stats(posts: &[Post]) -> ModerationStats {
    let now = chrono::Utc::now();
    ModerationStats {
        total: posts.len(),
        published: posts.iter().filter(|p| p.published).count(),
        draft: posts.iter().filter(|p| !p.published).count(),
        today: posts.iter().filter(|p| p.created_on(now)).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn post(title: &str, author: &str, tags: &[&str], age_hours: i64, published: bool) -> Post {
        let created = Utc::now() - Duration::hours(age_hours);
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author_name: author.to_string(),
            category_id: Uuid::new_v4(),
            category_name: "General".to_string(),
            title: title.to_string(),
            content: format!("Body of {title}"),
            published,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_url: None,
            views: 0,
            created_at: created,
            updated_at: created,
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post("Banana bread basics", "Alice", &["baking", "food"], 1, true),
            post("A tour of sourdough", "Bob", &["baking"], 2, true),
            post("Compilers for fun", "Carol", &["rust"], 3, true),
            post("gardening in autumn", "Dave", &["garden"], 4, true),
            post("Zero-cost abstractions", "Erin", &["rust"], 5, true),
        ]
    }

    #[test]
    fn output_is_subset_of_input() {
        let posts = sample();
        let filter = PostFilter {
            search: "a".to_string(),
            ..Default::default()
        };
        let out = apply(&posts, &filter);
        for p in &out {
            assert!(posts.iter().any(|q| q.id == p.id));
        }
    }

    #[test]
    fn empty_filter_newest_returns_all_ordered_desc() {
        let posts = sample();
        let out = apply(&posts, &PostFilter::default());
        assert_eq!(out.len(), 5);
        for pair in out.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn search_matches_title_content_and_author_case_insensitive() {
        let posts = sample();
        let by_title = apply(
            &posts,
            &PostFilter {
                search: "SOURDOUGH".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "A tour of sourdough");

        let by_author = apply(
            &posts,
            &PostFilter {
                search: "carol".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_author.len(), 1);

        let by_content = apply(
            &posts,
            &PostFilter {
                search: "body of gardening".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_content.len(), 1);
    }

    #[test]
    fn category_filter_exact_match() {
        let posts = sample();
        let wanted = posts[2].category_id;
        let out = apply(
            &posts,
            &PostFilter {
                category: Some(wanted),
                ..Default::default()
            },
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category_id, wanted);
    }

    #[test]
    fn tag_filter_requires_every_tag() {
        let posts = sample();
        let both = apply(
            &posts,
            &PostFilter {
                tags: vec!["baking".to_string(), "food".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "Banana bread basics");

        // Case-sensitive: "Baking" is not "baking".
        let miss = apply(
            &posts,
            &PostFilter {
                tags: vec!["Baking".to_string()],
                ..Default::default()
            },
        );
        assert!(miss.is_empty());
    }

    #[test]
    fn tag_filter_is_idempotent() {
        let posts = sample();
        let filter = PostFilter {
            tags: vec!["rust".to_string()],
            ..Default::default()
        };
        let once = apply(&posts, &filter);
        let twice = apply(&once, &filter);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn title_asc_reversed_equals_title_desc() {
        let posts = sample();
        let mut asc = apply(
            &posts,
            &PostFilter {
                sort: SortKey::TitleAsc,
                ..Default::default()
            },
        );
        let desc = apply(
            &posts,
            &PostFilter {
                sort: SortKey::TitleDesc,
                ..Default::default()
            },
        );
        asc.reverse();
        let asc_ids: Vec<_> = asc.iter().map(|p| p.id).collect();
        let desc_ids: Vec<_> = desc.iter().map(|p| p.id).collect();
        assert_eq!(asc_ids, desc_ids);
    }

    #[test]
    fn title_sorts_reverse_exactly_on_equal_titles() {
        let mut posts = sample();
        posts.push(post("A tour of sourdough", "Frank", &[], 6, true));
        posts.push(post("A tour of sourdough", "Grace", &[], 7, true));

        let mut asc = apply(
            &posts,
            &PostFilter {
                sort: SortKey::TitleAsc,
                ..Default::default()
            },
        );
        let desc = apply(
            &posts,
            &PostFilter {
                sort: SortKey::TitleDesc,
                ..Default::default()
            },
        );
        asc.reverse();
        let asc_ids: Vec<_> = asc.iter().map(|p| p.id).collect();
        let desc_ids: Vec<_> = desc.iter().map(|p| p.id).collect();
        assert_eq!(asc_ids, desc_ids);
    }

    #[test]
    fn title_sort_ignores_case() {
        let posts = sample();
        let out = apply(
            &posts,
            &PostFilter {
                sort: SortKey::TitleAsc,
                ..Default::default()
            },
        );
        let titles: Vec<_> = out.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "A tour of sourdough",
                "Banana bread basics",
                "Compilers for fun",
                "gardening in autumn",
                "Zero-cost abstractions",
            ]
        );
    }

    #[test]
    fn outcome_distinguishes_no_matches_from_no_content() {
        assert_eq!(outcome(0, 0), FilterOutcome::NoContent);
        assert_eq!(outcome(0, 5), FilterOutcome::NoMatches);
        assert_eq!(outcome(3, 5), FilterOutcome::Results);
    }

    #[test]
    fn featured_split_takes_three_then_nine() {
        let many: Vec<Post> = (0..15)
            .map(|i| post(&format!("Post {i}"), "Alice", &[], i, true))
            .collect();
        let (featured, recent) = featured_split(&many);
        assert_eq!(featured.len(), 3);
        assert_eq!(recent.len(), 9);

        let two = sample()[..2].to_vec();
        let (featured, recent) = featured_split(&two);
        assert_eq!(featured.len(), 2);
        assert!(recent.is_empty());
    }

    #[test]
    fn admin_filter_by_status_and_search() {
        let mut posts = sample();
        posts[0].published = false;

        let drafts = apply_admin(&posts, StatusFilter::Draft, "");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Banana bread basics");

        let published = apply_admin(&posts, StatusFilter::Published, "");
        assert_eq!(published.len(), 4);

        let by_category = apply_admin(&posts, StatusFilter::All, "general");
        assert_eq!(by_category.len(), 5);
    }

    #[test]
    fn moderation_stats_counts() {
        let mut posts = vec![
            post("One", "Alice", &[], 0, true),
            post("Two", "Bob", &[], 0, true),
            post("Three", "Carol", &[], 24 * 30, true),
        ];
        posts[1].published = false;
        let stats = moderation_stats(&posts);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.published, 2);
        assert_eq!(stats.draft, 1);
        assert_eq!(stats.today, 2);
    }
}
