/// First `n` items sorted by value descending. The sort is stable, so
/// equal-valued items keep their original relative order; the alert metrics
/// downstream depend on that determinism. Fewer than `n` items returns all of
/// them.
pub fn top_n_by<T: Clone>(items: &[T], n: usize, value: impl Fn(&T) -> f64) -> Vec<T> {
    let mut sorted: Vec<T> = items.to_vec();
    sorted.sort_by(|a, b| value(b).total_cmp(&value(a)));
    sorted.truncate(n);
    sorted
}
