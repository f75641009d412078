// Read models produced by the query layer. Counts are explicit fields filled
// in by the repository, never derived on access.
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// A tag annotated with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagWithCount {
    pub id: i64,
    pub title: String,
    pub posts_count: i64,
}

/// A post with everything a listing needs: author, counts and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// Author's username
    pub author: String,
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub comments_count: i64,
    pub likes_count: i64,
    /// Ordered by tag title
    pub tags: Vec<TagWithCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}

/// Ranking candidate: a post id and its engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostPopularity {
    pub post_id: i64,
    pub likes_count: i64,
}

impl PostPopularity {
    /// Popularity order: more likes first, then lower id first.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .likes_count
            .cmp(&self.likes_count)
            .then_with(|| self.post_id.cmp(&other.post_id))
    }
}

/// Order candidates by popularity and keep the first `limit` post ids.
/// `SqliteBlogRepository::popular_posts` applies the same order in SQL.
pub fn rank_popular_posts(mut candidates: Vec<PostPopularity>, limit: usize) -> Vec<i64> {
    candidates.sort_by(PostPopularity::rank_cmp);
    candidates
        .into_iter()
        .take(limit)
        .map(|c| c.post_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(post_id: i64, likes_count: i64) -> PostPopularity {
        PostPopularity {
            post_id,
            likes_count,
        }
    }

    #[test]
    fn most_liked_posts_come_first() {
        let ranked = rank_popular_posts(
            vec![candidate(1, 2), candidate(2, 7), candidate(3, 0), candidate(4, 5)],
            10,
        );
        assert_eq!(ranked, vec![2, 4, 1, 3]);
    }

    #[test]
    fn ties_break_by_lower_id() {
        let ranked = rank_popular_posts(
            vec![candidate(9, 3), candidate(2, 3), candidate(5, 3), candidate(7, 4)],
            10,
        );
        assert_eq!(ranked, vec![7, 2, 5, 9]);
    }

    #[test]
    fn limit_truncates_after_ranking() {
        let ranked = rank_popular_posts(
            vec![candidate(1, 0), candidate(2, 1), candidate(3, 2)],
            2,
        );
        assert_eq!(ranked, vec![3, 2]);
    }

    #[test]
    fn empty_snapshot_ranks_to_nothing() {
        assert!(rank_popular_posts(Vec::new(), 5).is_empty());
    }

    #[test]
    fn ranking_is_independent_of_input_order() {
        let forward = vec![candidate(1, 1), candidate(2, 1), candidate(3, 2)];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(
            rank_popular_posts(forward, 3),
            rank_popular_posts(backward, 3)
        );
    }
}
