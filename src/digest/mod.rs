//! Category-balanced digest selection
//!
//! Turns an unordered pool of discovered articles into the bounded list a
//! newsletter renders: grouped by category, capped per category so one busy
//! desk cannot crowd out the rest, with the category order randomized so the
//! same section does not lead every edition.

use crate::crawler::Article;
use rand::seq::SliceRandom;
use rand::Rng;

/// Maximum number of articles any single category may contribute
pub const CATEGORY_CAP: usize = 3;

/// Selects a bounded, category-balanced, order-randomized article list
///
/// - Articles are grouped by category in first-seen order, and each group
///   keeps its first [`CATEGORY_CAP`] members in pool order.
/// - The category order is a uniform random permutation drawn from `rng`.
/// - Groups are concatenated whole until the output reaches `total_limit`;
///   the group that crosses the limit is cut mid-group.
///
/// Guarantees: output length ≤ `total_limit`; no category contributes more
/// than [`CATEGORY_CAP`] articles; each category's articles appear
/// consecutively in their original pool order.
pub fn select<R: Rng + ?Sized>(
    pool: Vec<Article>,
    total_limit: usize,
    rng: &mut R,
) -> Vec<Article> {
    // Group by category, preserving first-seen category order and
    // pool order within each group
    let mut groups: Vec<(String, Vec<Article>)> = Vec::new();
    for article in pool {
        match groups.iter_mut().find(|(cat, _)| *cat == article.category) {
            Some((_, members)) => {
                if members.len() < CATEGORY_CAP {
                    members.push(article);
                }
            }
            None => groups.push((article.category.clone(), vec![article])),
        }
    }

    groups.shuffle(rng);

    let mut selected = Vec::with_capacity(total_limit);
    for (_, members) in groups {
        for article in members {
            if selected.len() >= total_limit {
                return selected;
            }
            selected.push(article);
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn article(id: u64, category: &str) -> Article {
        Article {
            id: format!("A{:011}", id),
            ordinal: id,
            title: format!("기사 {}", id),
            description: String::new(),
            thumbnail: String::new(),
            category: category.to_string(),
            url: format!("https://news.example.com/article/A{:011}", id),
            discovered_at: Utc::now(),
        }
    }

    /// Asserts the selector invariants: bounded length, per-category cap,
    /// and category adjacency
    fn assert_invariants(selected: &[Article], total_limit: usize) {
        assert!(selected.len() <= total_limit);

        let mut seen: Vec<&str> = Vec::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for article in selected {
            let cat = article.category.as_str();
            match seen.last() {
                Some(last) if *last == cat => {}
                _ => {
                    // A category may only begin once; reappearing later
                    // breaks adjacency
                    assert!(!seen.contains(&cat), "category {} not adjacent", cat);
                    seen.push(cat);
                }
            }
            match counts.iter_mut().find(|(c, _)| *c == cat) {
                Some((_, n)) => *n += 1,
                None => counts.push((cat, 1)),
            }
        }
        for (cat, n) in counts {
            assert!(n <= CATEGORY_CAP, "category {} contributed {}", cat, n);
        }
    }

    #[test]
    fn test_output_bounded_by_total_limit() {
        let pool: Vec<Article> = (0..50).map(|i| article(i, "정치")).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select(pool, 10, &mut rng);
        assert_invariants(&selected, 10);
    }

    #[test]
    fn test_category_cap() {
        let pool: Vec<Article> = (0..10)
            .map(|i| article(i, if i % 2 == 0 { "정치" } else { "스포츠" }))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select(pool, 100, &mut rng);
        assert_invariants(&selected, 100);
        assert_eq!(selected.len(), 6);
    }

    #[test]
    fn test_within_category_order_is_pool_order() {
        let pool = vec![
            article(5, "경제"),
            article(3, "경제"),
            article(9, "경제"),
            article(1, "경제"),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let selected = select(pool, 10, &mut rng);
        let ordinals: Vec<u64> = selected.iter().map(|a| a.ordinal).collect();
        assert_eq!(ordinals, vec![5, 3, 9]);
    }

    #[test]
    fn test_example_scenario() {
        // politics: A(1), B(2), D(4); sports: C(3), E(5); limit 4.
        // The permutation decides which category leads; the invariants must
        // hold for every draw.
        let pool = vec![
            article(1, "정치"),
            article(2, "정치"),
            article(3, "스포츠"),
            article(4, "정치"),
            article(5, "스포츠"),
        ];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = select(pool.clone(), 4, &mut rng);
            assert_eq!(selected.len(), 4);
            assert_invariants(&selected, 4);

            // Whichever category leads, it appears complete and in order
            let lead: Vec<u64> = selected
                .iter()
                .take_while(|a| a.category == selected[0].category)
                .map(|a| a.ordinal)
                .collect();
            if selected[0].category == "정치" {
                assert_eq!(lead, vec![1, 2, 4]);
            } else {
                assert_eq!(lead, vec![3, 5]);
            }
        }
    }

    #[test]
    fn test_seeded_permutation_is_deterministic() {
        let pool = vec![
            article(1, "정치"),
            article(2, "스포츠"),
            article(3, "경제"),
            article(4, "국제"),
        ];

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = select(pool.clone(), 10, &mut rng_a);
        let b = select(pool, 10, &mut rng_b);
        let ids_a: Vec<&str> = a.iter().map(|x| x.id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_shuffle_actually_permutes() {
        // Over many seeds, at least two different leading categories occur
        let pool = vec![
            article(1, "정치"),
            article(2, "스포츠"),
            article(3, "경제"),
        ];

        let mut leads = std::collections::HashSet::new();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = select(pool.clone(), 3, &mut rng);
            leads.insert(selected[0].category.clone());
        }
        assert!(leads.len() > 1);
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select(Vec::new(), 10, &mut rng).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        let pool = vec![article(1, "정치")];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select(pool, 0, &mut rng).is_empty());
    }
}
