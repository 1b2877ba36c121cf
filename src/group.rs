use std::collections::BTreeMap;

/// Buckets `records` by the key computed for each one.
///
/// The returned map iterates its keys in ascending order, and every bucket
/// keeps its records in their original relative order, so concatenating the
/// buckets in key order yields a stable regrouping of the input. An empty
/// input yields an empty map.
pub fn group_by<R, K, F>(records: impl IntoIterator<Item = R>, mut key: F) -> BTreeMap<K, Vec<R>>
where
    K: Ord,
    F: FnMut(&R) -> K,
{
    let mut groups: BTreeMap<K, Vec<R>> = BTreeMap::new();
    for record in records {
        groups.entry(key(&record)).or_default().push(record);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Rec {
        n: u32,
        tag: &'static str,
    }

    fn rec(n: u32, tag: &'static str) -> Rec {
        Rec { n, tag }
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let groups = group_by(Vec::<Rec>::new(), |r| r.n);
        assert!(groups.is_empty());
    }

    #[test]
    fn keys_come_back_ascending() {
        let input = vec![rec(2, "a"), rec(1, "b"), rec(2, "c"), rec(3, "d")];
        let groups = group_by(input, |r| r.n);
        let keys: Vec<u32> = groups.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn buckets_preserve_input_order() {
        let input = vec![rec(2, "a"), rec(1, "b"), rec(2, "c"), rec(3, "d")];
        let groups = group_by(input, |r| r.n);
        let twos: Vec<&str> = groups[&2].iter().map(|r| r.tag).collect();
        assert_eq!(twos, vec!["a", "c"], "within-group order must match input order");
    }

    #[test]
    fn concatenated_buckets_cover_the_input_exactly() {
        let input = vec![
            rec(3, "u"),
            rec(1, "v"),
            rec(3, "w"),
            rec(2, "x"),
            rec(1, "y"),
            rec(3, "z"),
        ];
        let groups = group_by(input.clone(), |r| r.n);
        let flattened: Vec<Rec> = groups.into_values().flatten().collect();
        assert_eq!(flattened.len(), input.len(), "every record appears exactly once");
        for record in &input {
            assert!(flattened.contains(record));
        }
    }

    #[test]
    fn missing_attribute_forms_its_own_group() {
        let input = vec![Some(1u32), None, Some(1), None, Some(2)];
        let groups = group_by(input, |r| *r);
        assert_eq!(groups[&None].len(), 2);
        assert_eq!(groups[&Some(1)].len(), 2);
        assert_eq!(groups[&Some(2)].len(), 1);
    }

    #[test]
    fn string_keys_sort_lexically() {
        let input = vec!["banana", "apple", "blueberry", "cherry"];
        let groups = group_by(input, |s| s.chars().next().unwrap_or_default());
        let keys: Vec<char> = groups.keys().copied().collect();
        assert_eq!(keys, vec!['a', 'b', 'c']);
        assert_eq!(groups[&'b'], vec!["banana", "blueberry"]);
    }
}
