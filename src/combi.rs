use indexmap::IndexMap;

use crate::types::{Item, Itemset};

/// Self-join of the frequent (k-1)-itemsets into k-itemset candidates.
///
/// Two itemsets join when they share their first k-2 items; the candidate is
/// the shared prefix plus both last items, in canonical order. Itemsets are
/// grouped by prefix first so each one is only compared against its own
/// group, but candidates come out in the same order as a plain pairwise scan
/// `for i { for j > i { .. } }` over `itemsets` would produce them.
///
/// There is no subset check: a candidate is emitted even if some other
/// (k-1)-subset of it is not in `itemsets`.
pub fn join_step(itemsets: &[Itemset]) -> Vec<Itemset> {
    let prefix_len = match itemsets.first() {
        Some(itemset) => itemset.len().saturating_sub(1),
        None => return vec![],
    };

    // positions within each group ascend since they are pushed in order
    let mut groups: IndexMap<&[Item], Vec<usize>> = IndexMap::with_capacity(itemsets.len());
    for (i, itemset) in itemsets.iter().enumerate() {
        groups.entry(itemset.prefix(prefix_len)).or_default().push(i);
    }

    let mut final_itemsets: Vec<Itemset> = Vec::with_capacity(itemsets.len());
    let mut joined: Vec<Item> = Vec::with_capacity(prefix_len + 2);

    for (i, itemset) in itemsets.iter().enumerate() {
        let group = &groups[itemset.prefix(prefix_len)];
        let later = group.partition_point(|&j| j <= i);

        for &j in &group[later..] {
            joined.clear();
            joined.extend_from_slice(itemset.items());
            joined.extend(itemsets[j].last());
            final_itemsets.push(Itemset::new(joined.clone()));
        }
    }

    final_itemsets
}

#[cfg(test)]
mod test {
    use super::*;

    fn itemsets(raw: Vec<Vec<Item>>) -> Vec<Itemset> {
        raw.into_iter().map(Itemset::new).collect()
    }

    /// The quadratic reference the grouped join must agree with.
    fn pairwise_join(itemsets: &[Itemset]) -> Vec<Itemset> {
        let mut joined = vec![];
        for i in 0..itemsets.len() {
            for j in (i + 1)..itemsets.len() {
                let (a, b) = (&itemsets[i], &itemsets[j]);
                let prefix_len = a.len() - 1;
                if a.prefix(prefix_len) == b.prefix(prefix_len) {
                    let mut items = a.items().to_vec();
                    items.push(b.last().unwrap());
                    joined.push(Itemset::new(items));
                }
            }
        }
        joined
    }

    #[test]
    fn test_join_step() {
        let y = join_step(&itemsets(vec![
            vec![1, 2, 3],
            vec![1, 2, 4],
            vec![1, 3, 4],
            vec![1, 3, 5],
            vec![2, 3, 4],
        ]));
        assert_eq!(y, itemsets(vec![vec![1, 2, 3, 4], vec![1, 3, 4, 5]]));
    }

    #[test]
    fn test_join_step_singletons() {
        let y = join_step(&itemsets(vec![vec![3], vec![1], vec![2]]));
        assert_eq!(y, itemsets(vec![vec![1, 3], vec![2, 3], vec![1, 2]]));
    }

    #[test]
    fn test_join_step_unsorted_input() {
        let y = join_step(&itemsets(vec![
            vec![1, 2],
            vec![2, 3],
            vec![1, 3],
            vec![1, 4],
            vec![3, 4],
        ]));
        assert_eq!(
            y,
            itemsets(vec![vec![1, 2, 3], vec![1, 2, 4], vec![1, 3, 4]])
        );
    }

    #[test]
    fn test_join_step_keeps_unsupported_subsets() {
        // {2, 3} is missing but {1, 2, 3} is still a candidate
        let y = join_step(&itemsets(vec![vec![1, 2], vec![1, 3]]));
        assert_eq!(y, itemsets(vec![vec![1, 2, 3]]));
    }

    #[test]
    fn test_join_step_interleaved_groups() {
        let input = itemsets(vec![
            vec![1, 5],
            vec![2, 5],
            vec![1, 6],
            vec![2, 7],
            vec![1, 7],
            vec![3, 4],
        ]);
        assert_eq!(join_step(&input), pairwise_join(&input));
    }

    #[test]
    fn test_join_step_empty() {
        assert!(join_step(&[]).is_empty());
        assert!(join_step(&itemsets(vec![vec![4, 5]])).is_empty());
    }
}
