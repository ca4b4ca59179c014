use super::{ColorMapError, EndpointPolicy, check_edges};

/// Prefix of the label of the bucket below the first edge. The leading spaces
/// keep the `<` aligned with the ` - ` of the middle rows in a left-aligned
/// legend.
const BELOW_PREFIX: &str = "   < ";

/// Labels for all `edges.len() + 1` buckets, extremes included.
pub fn make_legend_labels_out_of_range(
    edges: &[f64],
    decimal_places: usize,
) -> Result<Vec<String>, ColorMapError> {
    check_edges(edges)?;
    Ok(all_labels(edges, decimal_places))
}

/// Labels for the buckets that stay visible under `policy`, lowest first.
pub fn make_legend_labels(
    edges: &[f64],
    policy: EndpointPolicy,
    decimal_places: usize,
) -> Result<Vec<String>, ColorMapError> {
    check_edges(edges)?;
    Ok(visible_labels(edges, policy, decimal_places))
}

/// `edges` must already be validated.
pub(super) fn visible_labels(
    edges: &[f64],
    policy: EndpointPolicy,
    decimal_places: usize,
) -> Vec<String> {
    let visible = policy.visible_buckets(edges.len());
    all_labels(edges, decimal_places)
        .into_iter()
        .skip(visible.start)
        .take(visible.len())
        .collect()
}

fn all_labels(edges: &[f64], decimal_places: usize) -> Vec<String> {
    let fmt = |edge: f64| format!("{edge:.decimal_places$}");
    let last = edges.len();
    (0..=last)
        .map(|idx| {
            if idx == 0 {
                format!("{BELOW_PREFIX}{}", fmt(edges[0]))
            } else if idx == last {
                format!("{} <", fmt(edges[last - 1]))
            } else {
                format!("{} - {}", fmt(edges[idx - 1]), fmt(edges[idx]))
            }
        })
        .collect()
}
