//! Positional reordering used by drag-and-drop.
//!
//! The engine only rearranges ids. Order numbers are assigned later by the
//! reverse transform in [`super::session`].

/// Move the element at `source` so that it ends up at index `dest`.
///
/// Returns an unchanged copy when the drag was cancelled (`dest` is `None`),
/// when `source == dest`, or when `source` is out of range. A `dest` past the
/// end is clamped to the last position.
pub fn move_item<T: Clone>(order: &[T], source: usize, dest: Option<usize>) -> Vec<T> {
    let Some(dest) = dest else {
        return order.to_vec();
    };
    if source == dest || source >= order.len() {
        return order.to_vec();
    }

    let mut moved = order.to_vec();
    let item = moved.remove(source);
    let dest = dest.min(moved.len());
    moved.insert(dest, item);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_move_last_to_front() {
        let order = ids(&["A", "B", "C"]);
        assert_eq!(move_item(&order, 2, Some(0)), ids(&["C", "A", "B"]));
    }

    #[test]
    fn test_move_front_to_last() {
        let order = ids(&["A", "B", "C"]);
        assert_eq!(move_item(&order, 0, Some(2)), ids(&["B", "C", "A"]));
    }

    #[test]
    fn test_move_to_middle() {
        let order = ids(&["A", "B", "C", "D"]);
        assert_eq!(move_item(&order, 3, Some(1)), ids(&["A", "D", "B", "C"]));
    }

    #[test]
    fn test_cancelled_drag_is_noop() {
        let order = ids(&["A", "B", "C"]);
        assert_eq!(move_item(&order, 1, None), order);
    }

    #[test]
    fn test_same_index_is_noop() {
        let order = ids(&["A", "B", "C"]);
        assert_eq!(move_item(&order, 1, Some(1)), order);
    }

    #[test]
    fn test_out_of_range_source_is_noop() {
        let order = ids(&["A", "B"]);
        assert_eq!(move_item(&order, 5, Some(0)), order);
    }

    #[test]
    fn test_dest_past_end_is_clamped() {
        let order = ids(&["A", "B", "C"]);
        assert_eq!(move_item(&order, 0, Some(10)), ids(&["B", "C", "A"]));
    }

    #[test]
    fn test_empty_list() {
        let order: Vec<String> = vec![];
        assert!(move_item(&order, 0, Some(0)).is_empty());
    }

    #[test]
    fn test_every_move_is_a_permutation() {
        for n in 1..=6usize {
            let order: Vec<usize> = (0..n).collect();
            for source in 0..n {
                for dest in 0..n {
                    let moved = move_item(&order, source, Some(dest));
                    assert_eq!(moved.len(), n);
                    let mut sorted = moved.clone();
                    sorted.sort_unstable();
                    assert_eq!(sorted, order, "n={n} source={source} dest={dest}");
                    assert_eq!(moved[dest], source);
                }
            }
        }
    }

    #[test]
    fn test_other_elements_keep_relative_order() {
        let order: Vec<usize> = (0..5).collect();
        let moved = move_item(&order, 1, Some(3));
        let rest: Vec<usize> = moved.into_iter().filter(|&x| x != 1).collect();
        assert_eq!(rest, vec![0, 2, 3, 4]);
    }
}
