//! One-dimensional coordinate clustering.

/// Merge near-duplicate coordinates into representative positions.
///
/// Values are sorted ascending and grouped left to right. A value joins the
/// open group when it lies within `tolerance` of the value added to the group
/// just before it; each group is emitted as the arithmetic mean of its
/// members. The chaining means a dense run can spread further than
/// `tolerance` from its first member and still form a single group.
///
/// Non-finite values are dropped.
pub fn cluster(coords: &[f64], tolerance: f64) -> Vec<f64> {
    let mut sorted: Vec<f64> = coords.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let mut clusters = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return clusters;
    };

    let mut sum = first;
    let mut count = 1usize;
    let mut last = first;
    for value in iter {
        if value - last <= tolerance {
            sum += value;
            count += 1;
        } else {
            clusters.push(sum / count as f64);
            sum = value;
            count = 1;
        }
        last = value;
    }
    clusters.push(sum / count as f64);

    clusters
}
