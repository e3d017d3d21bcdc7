/*
 * Responsibility
 * - Aggregations over an in-memory list of blogs (total / favourite / most per author)
 * - Pure functions: no HTTP, no persistence
 * - Ties always resolve to the entry encountered first in input order
 */
use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

/// Anything that looks like a blog for aggregation purposes.
pub trait LikedEntry {
    fn title(&self) -> &str;
    fn author(&self) -> Option<&str>;
    fn likes(&self) -> i64;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    #[error("cannot aggregate an empty list of blogs")]
    EmptyInput,
    #[error("like count does not fit in i64")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavouriteBlog {
    pub title: String,
    pub author: Option<String>,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogCount {
    pub author: Option<String>,
    pub blogs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: i64,
}

/// Sum of likes. Empty input sums to 0; a sum past `i64::MAX` is `Overflow`.
pub fn total_likes<B: LikedEntry>(blogs: &[B]) -> Result<i64, StatsError> {
    blogs
        .iter()
        .try_fold(0i64, |sum, blog| sum.checked_add(blog.likes()))
        .ok_or(StatsError::Overflow)
}

/// The blog with the most likes; the earliest one wins a tie.
pub fn favourite_blog<B: LikedEntry>(blogs: &[B]) -> Result<FavouriteBlog, StatsError> {
    let best = blogs
        .iter()
        .reduce(|best, blog| if blog.likes() > best.likes() { blog } else { best })
        .ok_or(StatsError::EmptyInput)?;

    Ok(FavouriteBlog {
        title: best.title().to_string(),
        author: best.author().map(str::to_string),
        likes: best.likes(),
    })
}

/// The author with the most blogs.
pub fn most_blogs<B: LikedEntry>(blogs: &[B]) -> Result<AuthorBlogCount, StatsError> {
    let (author, blogs) = max_by_author(blogs, |_| 1)?;
    Ok(AuthorBlogCount { author, blogs })
}

/// The author whose blogs have the most likes in total.
pub fn most_likes<B: LikedEntry>(blogs: &[B]) -> Result<AuthorLikes, StatsError> {
    let (author, likes) = max_by_author(blogs, LikedEntry::likes)?;
    Ok(AuthorLikes { author, likes })
}

// Groups by author (first-seen order), sums `weight` per group and picks the
// largest group. Blogs without an author share the `None` group.
fn max_by_author<B, F>(blogs: &[B], weight: F) -> Result<(Option<String>, i64), StatsError>
where
    B: LikedEntry,
    F: Fn(&B) -> i64,
{
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut groups: Vec<(Option<&str>, i64)> = Vec::new();

    for blog in blogs {
        let author = blog.author();
        match index.get(&author) {
            Some(&i) => {
                groups[i].1 = groups[i]
                    .1
                    .checked_add(weight(blog))
                    .ok_or(StatsError::Overflow)?;
            }
            None => {
                index.insert(author, groups.len());
                groups.push((author, weight(blog)));
            }
        }
    }

    groups
        .into_iter()
        .reduce(|best, group| if group.1 > best.1 { group } else { best })
        .map(|(author, total)| (author.map(str::to_string), total))
        .ok_or(StatsError::EmptyInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        title: &'static str,
        author: Option<&'static str>,
        likes: i64,
    }

    impl LikedEntry for Entry {
        fn title(&self) -> &str {
            self.title
        }
        fn author(&self) -> Option<&str> {
            self.author
        }
        fn likes(&self) -> i64 {
            self.likes
        }
    }

    fn entry(title: &'static str, author: &'static str, likes: i64) -> Entry {
        Entry {
            title,
            author: Some(author),
            likes,
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("React patterns", "Michael Chan", 7),
            entry("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
            entry("Canonical string reduction", "Edsger W. Dijkstra", 12),
            entry("First class tests", "Robert C. Martin", 10),
            entry("TDD harms architecture", "Robert C. Martin", 0),
            entry("Type wars", "Robert C. Martin", 2),
        ]
    }

    #[test]
    fn total_likes_of_empty_list_is_zero() {
        let empty: Vec<Entry> = Vec::new();
        assert_eq!(total_likes(&empty), Ok(0));
    }

    #[test]
    fn total_likes_sums_every_blog() {
        let blogs = vec![entry("a", "x", 5), entry("b", "y", 3)];
        assert_eq!(total_likes(&blogs), Ok(8));
        assert_eq!(total_likes(&sample()), Ok(36));
    }

    #[test]
    fn favourite_blog_picks_the_most_liked() {
        let blogs = vec![entry("A", "x", 5), entry("B", "y", 9)];
        assert_eq!(
            favourite_blog(&blogs),
            Ok(FavouriteBlog {
                title: "B".into(),
                author: Some("y".into()),
                likes: 9,
            })
        );
    }

    #[test]
    fn favourite_blog_tie_goes_to_first() {
        let blogs = vec![entry("A", "x", 9), entry("B", "y", 9), entry("C", "z", 1)];
        assert_eq!(favourite_blog(&blogs).map(|b| b.title), Ok("A".to_string()));
    }

    #[test]
    fn favourite_blog_of_empty_list_is_an_error() {
        let empty: Vec<Entry> = Vec::new();
        assert_eq!(favourite_blog(&empty), Err(StatsError::EmptyInput));
    }

    #[test]
    fn most_blogs_counts_per_author() {
        let blogs = vec![
            entry("1", "X", 0),
            entry("2", "Y", 0),
            entry("3", "X", 0),
            entry("4", "X", 0),
        ];
        assert_eq!(
            most_blogs(&blogs),
            Ok(AuthorBlogCount {
                author: Some("X".into()),
                blogs: 3,
            })
        );
        assert_eq!(
            most_blogs(&sample()),
            Ok(AuthorBlogCount {
                author: Some("Robert C. Martin".into()),
                blogs: 3,
            })
        );
    }

    #[test]
    fn most_blogs_tie_goes_to_first_seen_author() {
        let blogs = vec![
            entry("1", "Y", 0),
            entry("2", "X", 0),
            entry("3", "X", 0),
            entry("4", "Y", 0),
        ];
        assert_eq!(most_blogs(&blogs).map(|m| m.author), Ok(Some("Y".into())));
    }

    #[test]
    fn most_likes_sums_per_author() {
        let blogs = vec![entry("1", "X", 2), entry("2", "X", 3), entry("3", "Y", 10)];
        assert_eq!(
            most_likes(&blogs),
            Ok(AuthorLikes {
                author: Some("Y".into()),
                likes: 10,
            })
        );
        assert_eq!(
            most_likes(&sample()),
            Ok(AuthorLikes {
                author: Some("Edsger W. Dijkstra".into()),
                likes: 17,
            })
        );
    }

    #[test]
    fn most_likes_tie_goes_to_first_seen_author() {
        let blogs = vec![entry("1", "Y", 5), entry("2", "X", 3), entry("3", "X", 2)];
        assert_eq!(
            most_likes(&blogs),
            Ok(AuthorLikes {
                author: Some("Y".into()),
                likes: 5,
            })
        );
    }

    #[test]
    fn sums_past_i64_max_are_an_error() {
        let blogs = vec![entry("1", "X", i64::MAX), entry("2", "X", 1), entry("3", "Y", 5)];
        assert_eq!(total_likes(&blogs), Err(StatsError::Overflow));
        assert_eq!(most_likes(&blogs), Err(StatsError::Overflow));

        // Per-author counts stay small, so only the like sums overflow.
        assert_eq!(most_blogs(&blogs).map(|m| m.blogs), Ok(2));
        assert_eq!(favourite_blog(&blogs).map(|b| b.likes), Ok(i64::MAX));
    }

    #[test]
    fn blogs_without_author_are_grouped_together() {
        let blogs = vec![
            Entry {
                title: "anon 1",
                author: None,
                likes: 4,
            },
            Entry {
                title: "anon 2",
                author: None,
                likes: 4,
            },
            entry("named", "X", 5),
        ];
        assert_eq!(
            most_likes(&blogs),
            Ok(AuthorLikes {
                author: None,
                likes: 8,
            })
        );
        assert_eq!(most_blogs(&blogs).map(|m| m.blogs), Ok(2));
    }

    #[test]
    fn max_helpers_reject_empty_input() {
        let empty: Vec<Entry> = Vec::new();
        assert_eq!(most_blogs(&empty), Err(StatsError::EmptyInput));
        assert_eq!(most_likes(&empty), Err(StatsError::EmptyInput));
    }

    #[test]
    fn helpers_are_idempotent() {
        let blogs = sample();
        assert_eq!(total_likes(&blogs), total_likes(&blogs));
        assert_eq!(favourite_blog(&blogs), favourite_blog(&blogs));
        assert_eq!(most_blogs(&blogs), most_blogs(&blogs));
        assert_eq!(most_likes(&blogs), most_likes(&blogs));
    }
}
