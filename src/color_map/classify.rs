use super::{ColorMapError, EndpointPolicy, check_colors, check_edges};

/// Number of edges less than or equal to `value`, i.e. the bucket holding
/// `value` among the `edges.len() + 1` buckets.
///
/// A value equal to an edge belongs to the bucket above it. `edges` must be
/// sorted ascending; NaN lands in bucket 0.
pub fn bucket_index(value: f64, edges: &[f64]) -> usize {
    edges.partition_point(|&edge| edge <= value)
}

/// Color of the bucket holding `value`.
///
/// Under `in_range` and `lower_in_range` the bucket below the first edge is
/// folded into the lowest visible bucket; under `in_range` and
/// `upper_in_range` the bucket at/above the last edge is folded into the
/// highest visible one. `colors` must hold exactly one color per visible
/// bucket, otherwise [`ColorMapError::ColorCountMismatch`] is returned.
pub fn apply_color_map<'a, S: AsRef<str>>(
    value: f64,
    edges: &[f64],
    colors: &'a [S],
    policy: EndpointPolicy,
) -> Result<&'a str, ColorMapError> {
    check_edges(edges)?;
    check_colors(edges.len(), colors.len(), policy)?;
    let index = visible_index(value, edges, policy)?;
    Ok(colors[index].as_ref())
}

/// Position of `value` among the visible buckets. Callers have already
/// checked that the policy leaves at least one bucket visible.
pub(super) fn visible_index(
    value: f64,
    edges: &[f64],
    policy: EndpointPolicy,
) -> Result<usize, ColorMapError> {
    if value.is_nan() {
        return Err(ColorMapError::NotANumber);
    }
    let visible = policy.visible_buckets(edges.len());
    let bucket = bucket_index(value, edges).clamp(visible.start, visible.end - 1);
    Ok(bucket - visible.start)
}
