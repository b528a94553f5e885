///! Uniqueness ranking: top-N / bottom-N extraction
use super::error::ExplorerError;
use orbit_common::Satellite;
use std::cmp::Ordering;

/// Default table size for the most/least unique lists
pub const DEFAULT_RANKING_SIZE: usize = 5;

/// Top and bottom windows of a ranked subset
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    /// Most unique first
    pub top: Vec<&'a Satellite>,
    /// Least unique first
    pub bottom: Vec<&'a Satellite>,
}

/// Ascending by score, unknown scores after every known one.
fn compare_uniqueness(a: &Satellite, b: &Satellite) -> Ordering {
    match (a.uniqueness, b.uniqueness) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank `entities` by uniqueness and cut the top and bottom `n`.
///
/// The sort is stable, so equal scores keep their collection order. Fewer
/// than `n` entities is an error and nothing is returned.
pub fn rank_top_bottom<'a>(entities: &[&'a Satellite], n: usize) -> Result<Ranking<'a>, ExplorerError> {
    if entities.len() < n {
        return Err(ExplorerError::InsufficientEntities {
            need: n,
            have: entities.len(),
        });
    }

    let mut sorted: Vec<&Satellite> = entities.to_vec();
    sorted.sort_by(|a, b| compare_uniqueness(a, b));

    let bottom = sorted[..n].to_vec();
    let top = sorted[sorted.len() - n..].iter().rev().copied().collect();

    Ok(Ranking { top, bottom })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, score: f64) -> Satellite {
        Satellite::new(id, id).with_uniqueness(score)
    }

    fn ids(list: &[&Satellite]) -> Vec<String> {
        list.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_ranking_with_tie() {
        let sats = vec![
            scored("A", 0.9),
            scored("B", 0.1),
            scored("C", 0.5),
            scored("D", 0.5),
            scored("E", 0.2),
            scored("F", 0.8),
        ];
        let refs: Vec<&Satellite> = sats.iter().collect();

        let ranking = rank_top_bottom(&refs, 3).unwrap();
        // Stable sort gives B, E, C, D, F, A
        assert_eq!(ids(&ranking.top), vec!["A", "F", "D"]);
        assert_eq!(ids(&ranking.bottom), vec!["B", "E", "C"]);
    }

    #[test]
    fn test_insufficient_entities() {
        let sats: Vec<Satellite> = (0..4).map(|i| scored(&i.to_string(), i as f64)).collect();
        let refs: Vec<&Satellite> = sats.iter().collect();

        let err = rank_top_bottom(&refs, 5).unwrap_err();
        assert_eq!(err, ExplorerError::InsufficientEntities { need: 5, have: 4 });
        assert_eq!(err.to_string(), "insufficient entities for ranking: need 5, have 4");
    }

    #[test]
    fn test_empty_class_is_insufficient() {
        let err = rank_top_bottom(&[], 5).unwrap_err();
        assert_eq!(err, ExplorerError::InsufficientEntities { need: 5, have: 0 });
    }

    #[test]
    fn test_orders_and_sizes() {
        for size in 5..=20 {
            // Scrambled but distinct scores
            let sats: Vec<Satellite> = (0..size)
                .map(|i| scored(&format!("S{}", i), ((i * 7) % size) as f64 / size as f64))
                .collect();
            let refs: Vec<&Satellite> = sats.iter().collect();
            let ranking = rank_top_bottom(&refs, 5).unwrap();

            assert_eq!(ranking.top.len(), 5);
            assert_eq!(ranking.bottom.len(), 5);
            assert!(ranking.top.windows(2).all(|w| w[0].uniqueness >= w[1].uniqueness));
            assert!(ranking.bottom.windows(2).all(|w| w[0].uniqueness <= w[1].uniqueness));
        }
    }

    #[test]
    fn test_overlap_boundary() {
        let overlap_for = |size: usize| {
            let sats: Vec<Satellite> = (0..size).map(|i| scored(&i.to_string(), i as f64)).collect();
            let refs: Vec<&Satellite> = sats.iter().collect();
            let ranking = rank_top_bottom(&refs, 5).unwrap();
            ranking
                .top
                .iter()
                .filter(|t| ranking.bottom.iter().any(|b| b.id == t.id))
                .count()
        };

        assert_eq!(overlap_for(5), 5);
        assert_eq!(overlap_for(9), 1);
        assert_eq!(overlap_for(10), 0);
        assert_eq!(overlap_for(11), 0);
    }

    #[test]
    fn test_unknown_scores_sort_last() {
        let sats = vec![
            Satellite::new("X", "no score"),
            scored("A", 0.3),
            scored("B", 0.1),
            Satellite::new("Y", "no score"),
            scored("C", 0.2),
        ];
        let refs: Vec<&Satellite> = sats.iter().collect();

        let ranking = rank_top_bottom(&refs, 2).unwrap();
        assert_eq!(ids(&ranking.bottom), vec!["B", "C"]);
        // Unknowns sit at the end of the ascending order, later one first after reversal
        assert_eq!(ids(&ranking.top), vec!["Y", "X"]);
    }

    #[test]
    fn test_does_not_reorder_input() {
        let sats = vec![scored("A", 0.9), scored("B", 0.1)];
        let refs: Vec<&Satellite> = sats.iter().collect();
        rank_top_bottom(&refs, 1).unwrap();
        assert_eq!(ids(&refs), vec!["A", "B"]);
    }
}
