/// Extracts a value from each item in order, keeping the first occurrence of
/// each distinct value and discarding later repeats. Order-preserving, not
/// sorting.
pub fn unique_by<T, K, F>(items: &[T], extract: F) -> Vec<K>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut used = Vec::new();
    for item in items {
        let value = extract(item);
        if !used.contains(&value) {
            used.push(value);
        }
    }
    used
}
