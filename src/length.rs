use crate::reviews::Review;
use anyhow::{ensure, Result};
use log::info;
use std::collections::BTreeMap;

pub const DEFAULT_PERCENTILE: f64 = 0.85;

/// Percentile without interpolation: the sorted value at `floor(q * (n - 1))`.
pub fn percentile_lower(values: &[usize], q: f64) -> Result<usize> {
    ensure!(!values.is_empty(), "cannot take a percentile of no values");
    ensure!(q > 0.0 && q <= 1.0, "percentile must be in (0, 1], got {q}");

    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let rank = (q * (sorted.len() - 1) as f64).floor() as usize;
    Ok(sorted[rank.min(sorted.len() - 1)])
}

/// Whitespace token count of each group's joined reviews, keyed by group id.
pub fn group_token_counts<F>(reviews: &[Review], key: F) -> BTreeMap<&str, usize>
where
    F: Fn(&Review) -> &str,
{
    let mut counts = BTreeMap::new();
    for row in reviews {
        *counts.entry(key(row)).or_insert(0) += row.review.split_whitespace().count();
    }
    counts
}

/// Padding length shared by users and items: the larger of the two
/// per-group percentiles.
pub fn max_review_length(reviews: &[Review], percentile: f64) -> Result<usize> {
    let by_user = group_token_counts(reviews, |r| r.user_id.as_str());
    let by_item = group_token_counts(reviews, |r| r.item_id.as_str());

    let user_len = percentile_lower(&by_user.into_values().collect::<Vec<_>>(), percentile)?;
    let item_len = percentile_lower(&by_item.into_values().collect::<Vec<_>>(), percentile)?;

    info!("Review length at p{percentile}: user={user_len} item={item_len}");
    Ok(user_len.max(item_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(user: &str, item: &str, text: &str) -> Review {
        Review {
            user_id: user.into(),
            item_id: item.into(),
            review: text.into(),
            rating: 5.0,
        }
    }

    #[test]
    fn lower_percentile_picks_observed_value() {
        assert_eq!(percentile_lower(&[1, 2, 3, 4, 10], 0.85).unwrap(), 4);
        assert_eq!(percentile_lower(&[10, 4, 3, 2, 1], 0.85).unwrap(), 4);
        assert_eq!(percentile_lower(&[7], 0.85).unwrap(), 7);
        assert_eq!(percentile_lower(&[1, 2, 3], 1.0).unwrap(), 3);
    }

    #[test]
    fn percentile_rejects_empty_and_bad_rank() {
        assert!(percentile_lower(&[], 0.85).is_err());
        assert!(percentile_lower(&[1], 0.0).is_err());
        assert!(percentile_lower(&[1], 1.5).is_err());
    }

    #[test]
    fn groups_sum_tokens_across_reviews() {
        let rows = vec![
            review("u1", "i1", "a b"),
            review("u1", "i2", "c"),
            review("u2", "i1", ""),
        ];
        let counts = group_token_counts(&rows, |r| r.user_id.as_str());
        assert_eq!(counts["u1"], 3);
        assert_eq!(counts["u2"], 0);
    }

    #[test]
    fn max_length_takes_larger_axis() {
        // one user with everything, items with one review each
        let rows = vec![
            review("u1", "i1", "a b"),
            review("u1", "i2", "c d e"),
            review("u1", "i3", "f"),
        ];
        assert_eq!(max_review_length(&rows, 0.85).unwrap(), 6);

        // every user and item owns one review of 1..=5 tokens, then one outlier
        let rows: Vec<Review> = ["a", "a b", "a b c", "a b c d", "a b c d e f g h i j"]
            .iter()
            .enumerate()
            .map(|(i, t)| review(&format!("u{i}"), &format!("i{i}"), t))
            .collect();
        assert_eq!(max_review_length(&rows, 0.85).unwrap(), 4);
    }

    #[test]
    fn empty_dataset_has_no_length() {
        assert!(max_review_length(&[], 0.85).is_err());
    }
}
