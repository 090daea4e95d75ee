use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Highest,
    Lowest,
}

/// Returns up to `n` rows ordered by `key`. The sort is stable, so rows with
/// equal keys keep their input order and the first one seen ranks first.
pub fn rank_by<T, F>(rows: &[T], n: usize, direction: Direction, key: F) -> Vec<&T>
where
    F: Fn(&T) -> f64,
{
    let mut ranked: Vec<&T> = rows.iter().collect();
    ranked.sort_by(|a, b| {
        let ordering = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match direction {
            Direction::Highest => ordering.reverse(),
            Direction::Lowest => ordering,
        }
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_and_lowest_take_n() {
        let rows = [3.0, 9.0, 1.0, 7.0];
        let top: Vec<f64> = rank_by(&rows, 2, Direction::Highest, |v| *v)
            .into_iter()
            .copied()
            .collect();
        assert_eq!(top, vec![9.0, 7.0]);

        let bottom: Vec<f64> = rank_by(&rows, 2, Direction::Lowest, |v| *v)
            .into_iter()
            .copied()
            .collect();
        assert_eq!(bottom, vec![1.0, 3.0]);
    }

    fn names<'a>(ranked: Vec<&(&'a str, f64)>) -> Vec<&'a str> {
        ranked.into_iter().map(|(name, _)| *name).collect()
    }

    #[test]
    fn ties_keep_first_seen_order_in_both_directions() {
        let rows = [("a", 2.0), ("b", 5.0), ("c", 2.0), ("d", 5.0)];
        assert_eq!(
            names(rank_by(&rows, 4, Direction::Highest, |row| row.1)),
            vec!["b", "d", "a", "c"]
        );
        assert_eq!(
            names(rank_by(&rows, 4, Direction::Lowest, |row| row.1)),
            vec!["a", "c", "b", "d"]
        );
    }

    #[test]
    fn n_larger_than_input_returns_everything() {
        let rows = [1.0];
        assert_eq!(rank_by(&rows, 5, Direction::Highest, |v| *v).len(), 1);
        let empty: [f64; 0] = [];
        assert!(rank_by(&empty, 5, Direction::Lowest, |v| *v).is_empty());
    }
}
