use std::collections::HashMap;
use std::io::Write;

use apriori::{
    generate_frequent_itemsets, mine_file, output::save_patterns, AprioriError, Count,
    CountingMode, Item, MemoryDatabase, MinerConfig, Threshold, TransactionSource,
};
use itertools::Itertools;
use proptest::prelude::*;
use tempfile::NamedTempFile;

fn database_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn config(threshold: f64) -> MinerConfig {
    MinerConfig::new(Threshold::new(threshold).unwrap())
}

fn support_count(itemset: &[Item], transactions: &[Vec<Item>]) -> Count {
    transactions
        .iter()
        .filter(|transaction| itemset.iter().all(|item| transaction.contains(item)))
        .count() as Count
}

/// Every frequent itemset by direct enumeration of all subsets.
fn brute_force(transactions: &[Vec<Item>], min_count: Count) -> HashMap<Vec<Item>, Count> {
    let items: Vec<Item> = transactions.iter().flatten().copied().sorted().dedup().collect();
    (1..=items.len())
        .flat_map(|k| items.iter().copied().combinations(k))
        .filter_map(|itemset| {
            let count = support_count(&itemset, transactions);
            (count >= min_count && count > 0).then(|| (itemset, count))
        })
        .collect()
}

#[test]
fn four_transaction_file() {
    let input = database_file("4\n0\t0\t1 2 3\n1\t1\t1 2\n2\t2\t2 3 4\n3\t3\t1 3 4\n");
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("MiningResult.txt");

    let result = mine_file(input.path(), &config(0.5)).unwrap();
    save_patterns(&output, &result.patterns).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "|FPs| = 8\n\
         1 : 3\n\
         2 : 3\n\
         3 : 3\n\
         4 : 2\n\
         1, 2 : 2\n\
         1, 3 : 2\n\
         2, 3 : 2\n\
         3, 4 : 2\n"
    );
    assert_eq!(result.levels.last().unwrap().num_frequent, 0);
}

#[test]
fn empty_file_database() {
    let input = database_file("0\n");
    let result = mine_file(input.path(), &config(0.5)).unwrap();

    assert!(result.is_empty());
    assert_eq!(result.levels.len(), 1);
}

#[test]
fn zero_header_count_finds_nothing() {
    let input = database_file("0\nx\ty\t1 2 3 4 5 6\nx\ty\t7 8\n");
    let result = mine_file(input.path(), &config(0.5)).unwrap();

    assert!(result.is_empty());
    assert_eq!(result.levels.len(), 1);
    assert_eq!(result.levels[0].num_candidates, 8);
}

#[test]
fn level_one_follows_file_order() {
    let input = database_file("2\nx\ty\t3 1\nx\ty\t3 1\n");
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("MiningResult.txt");

    let result = mine_file(input.path(), &config(0.5)).unwrap();
    save_patterns(&output, &result.patterns).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "|FPs| = 3\n3 : 2\n1 : 2\n1, 3 : 2\n"
    );
}

#[test]
fn blank_line_between_records_is_malformed() {
    let input = database_file("2\nx\ty\t1 2\n\nx\ty\t1\n");
    let err = mine_file(input.path(), &config(0.5)).unwrap_err();
    assert!(matches!(err, AprioriError::MalformedRecord { line: 3, .. }));
}

#[test]
fn header_count_sets_the_threshold() {
    // 4 records but N = 8, so min count is 4 and only {1} reaches it
    let input = database_file("8\nx\ty\t1 2\nx\ty\t1 2\nx\ty\t1 2\nx\ty\t1\n");
    let result = mine_file(input.path(), &config(0.5)).unwrap();
    assert_eq!(result.support.min_count, 4);
    assert_eq!(result.len(), 1);
    assert_eq!(result.at_level(1).collect::<Vec<_>>().len(), 1);
}

#[test]
fn malformed_record_aborts_the_run() {
    let input = database_file("3\nx\ty\t1 2\nbroken line\nx\ty\t2\n");
    let err = mine_file(input.path(), &config(0.5)).unwrap_err();
    assert!(matches!(err, AprioriError::MalformedRecord { line: 3, .. }));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = mine_file(dir.path().join("absent.txt"), &config(0.5)).unwrap_err();
    assert!(matches!(err, AprioriError::FileNotFound { .. }));
}

#[test]
fn threshold_boundary() {
    // N = 10, threshold 0.25: min count ceil(2.5) = 3
    let mut transactions = vec![vec![1, 2], vec![1, 2], vec![1]];
    transactions.extend(std::iter::repeat(vec![9]).take(7));
    let database = MemoryDatabase::from(transactions);

    let result = generate_frequent_itemsets(&database, &config(0.25)).unwrap();
    let found: HashMap<Vec<Item>, Count> = result
        .patterns
        .iter()
        .map(|(itemset, &count)| (itemset.items().to_vec(), count))
        .collect();

    assert_eq!(found.get(&vec![1]), Some(&3));
    assert_eq!(found.get(&vec![2]), None);
    assert_eq!(found.get(&vec![9]), Some(&7));
    assert_eq!(found.len(), 2);
}

#[test]
fn file_and_memory_sources_agree() {
    let raw = vec![vec![3, 1], vec![1, 2, 3], vec![2, 5], vec![1, 2, 3, 5], vec![1, 5]];
    let contents = std::iter::once(raw.len().to_string())
        .chain(raw.iter().map(|t| format!("id\t0\t{}", t.iter().join(" "))))
        .join("\n");
    let input = database_file(&contents);

    let memory = MemoryDatabase::from(raw);
    assert_eq!(memory.num_transactions(), 5);

    let from_file = mine_file(input.path(), &config(0.4)).unwrap();
    let from_memory = generate_frequent_itemsets(&memory, &config(0.4)).unwrap();
    assert!(from_file.patterns.iter().eq(from_memory.patterns.iter()));
}

fn transactions() -> impl Strategy<Value = Vec<Vec<Item>>> {
    prop::collection::vec(prop::collection::vec(0u32..7, 0..6), 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_brute_force(raw in transactions(), threshold in 0.01f64..0.99) {
        let database = MemoryDatabase::from(raw.clone());
        let result = generate_frequent_itemsets(&database, &config(threshold)).unwrap();

        let found: HashMap<Vec<Item>, Count> = result
            .patterns
            .iter()
            .map(|(itemset, &count)| (itemset.items().to_vec(), count))
            .collect();
        prop_assert_eq!(found, brute_force(&raw, result.support.min_count));
    }

    #[test]
    fn subsets_are_frequent(raw in transactions(), threshold in 0.01f64..0.99) {
        let database = MemoryDatabase::from(raw.clone());
        let result = generate_frequent_itemsets(&database, &config(threshold)).unwrap();

        for itemset in result.patterns.keys().filter(|itemset| itemset.len() > 1) {
            for subset in itemset.items().iter().copied().combinations(itemset.len() - 1) {
                prop_assert!(result.support.is_frequent(support_count(&subset, &raw)));
            }
        }
    }

    #[test]
    fn canonical_and_level_ordered(raw in transactions(), threshold in 0.01f64..0.99) {
        let database = MemoryDatabase::from(raw);
        let result = generate_frequent_itemsets(&database, &config(threshold)).unwrap();

        for itemset in result.patterns.keys() {
            prop_assert!(itemset.items().windows(2).all(|pair| pair[0] < pair[1]));
        }
        let sizes: Vec<usize> = result.patterns.keys().map(|itemset| itemset.len()).collect();
        prop_assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn terminates_within_longest_transaction(raw in transactions(), threshold in 0.01f64..0.99) {
        let longest = raw.iter().map(|t| t.iter().unique().count()).max().unwrap_or(0);
        let database = MemoryDatabase::from(raw);
        let result = generate_frequent_itemsets(&database, &config(threshold)).unwrap();

        prop_assert!(result.levels.len() <= longest + 1);
        prop_assert_eq!(result.levels.last().unwrap().num_frequent, 0);
    }

    #[test]
    fn parallel_counting_is_transparent(raw in transactions(), threshold in 0.01f64..0.99) {
        let database = MemoryDatabase::from(raw);
        let sequential = generate_frequent_itemsets(&database, &config(threshold)).unwrap();
        let parallel = generate_frequent_itemsets(
            &database,
            &config(threshold).with_counting(CountingMode::Parallel),
        )
        .unwrap();

        prop_assert!(sequential.patterns.iter().eq(parallel.patterns.iter()));
    }
}
