//! Discrete color maps: classify scalar values into colored buckets and label
//! those buckets for a legend.
//!
//! A color map is defined by `N` strictly ascending edges, which split the
//! real line into `N + 1` buckets. An [`EndpointPolicy`] decides whether the
//! two extreme buckets are shown. Colors are supplied for the visible buckets
//! only, so the color list and the legend label list always have the same
//! length, and the classifier clamps hidden buckets onto their nearest visible
//! neighbour.

mod classify;
mod endpoint;
mod labels;

use serde::Serialize;
use thiserror::Error;

pub use classify::{apply_color_map, bucket_index};
pub use endpoint::EndpointPolicy;
pub use labels::{make_legend_labels, make_legend_labels_out_of_range};

/// Errors raised when a color map is built from, or applied to, invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorMapError {
    /// No edges were supplied.
    #[error("color map needs at least one edge")]
    EmptyEdges,
    /// An edge is NaN or infinite.
    #[error("edge {index} is not finite ({value})")]
    NonFiniteEdge {
        /// Position of the offending edge.
        index: usize,
        /// Value found at that position.
        value: f64,
    },
    /// Edges are not strictly increasing.
    #[error("edges must be strictly increasing: edge {index} ({value}) follows {previous}")]
    UnsortedEdges {
        /// Position of the first edge breaking the order.
        index: usize,
        /// Edge preceding the offending one.
        previous: f64,
        /// Offending edge.
        value: f64,
    },
    /// The policy leaves no bucket to display.
    #[error("policy {policy} leaves no visible bucket for {edges} edge(s)")]
    NoVisibleBucket {
        /// Policy in use.
        policy: EndpointPolicy,
        /// Number of edges supplied.
        edges: usize,
    },
    /// The color list does not have one color per visible bucket.
    #[error("policy {policy} with {edges} edge(s) needs {expected} colors, got {actual}")]
    ColorCountMismatch {
        /// Policy in use.
        policy: EndpointPolicy,
        /// Number of edges supplied.
        edges: usize,
        /// Number of visible buckets.
        expected: usize,
        /// Number of colors supplied.
        actual: usize,
    },
    /// The value to classify is NaN.
    #[error("cannot classify NaN")]
    NotANumber,
    /// A policy name did not match any known policy.
    #[error("unknown endpoint policy `{0}`")]
    UnknownPolicy(String),
}

/// A single legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Human readable range, e.g. `0.5 - 1.5`.
    pub label: String,
    /// Color identifier drawn next to the label.
    pub color: String,
}

/// Validated edges, colors and policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    edges: Vec<f64>,
    colors: Vec<String>,
    policy: EndpointPolicy,
    decimal_places: usize,
}

impl ColorMap {
    /// Build a color map, rejecting unsorted edges and color lists whose length
    /// does not match the number of visible buckets.
    pub fn new(
        edges: Vec<f64>,
        colors: Vec<String>,
        policy: EndpointPolicy,
        decimal_places: usize,
    ) -> Result<Self, ColorMapError> {
        check_edges(&edges)?;
        check_colors(edges.len(), colors.len(), policy)?;
        Ok(Self {
            edges,
            colors,
            policy,
            decimal_places,
        })
    }

    /// Bucket edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// One color per visible bucket.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Endpoint policy.
    pub fn policy(&self) -> EndpointPolicy {
        self.policy
    }

    /// Digits printed after the decimal point in labels.
    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    /// Index of the visible bucket holding `value`. Indexes both
    /// [`Self::colors`] and [`Self::labels`].
    pub fn classify_index(&self, value: f64) -> Result<usize, ColorMapError> {
        classify::visible_index(value, &self.edges, self.policy)
    }

    /// Color of the visible bucket holding `value`.
    pub fn classify(&self, value: f64) -> Result<&str, ColorMapError> {
        let index = self.classify_index(value)?;
        Ok(&self.colors[index])
    }

    /// Labels of the visible buckets.
    pub fn labels(&self) -> Vec<String> {
        labels::visible_labels(&self.edges, self.policy, self.decimal_places)
    }

    /// Labels zipped with their colors, lowest bucket first.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.labels()
            .into_iter()
            .zip(&self.colors)
            .map(|(label, color)| LegendEntry {
                label,
                color: color.clone(),
            })
            .collect()
    }
}

/// Edges must be non-empty, finite and strictly increasing.
pub(crate) fn check_edges(edges: &[f64]) -> Result<(), ColorMapError> {
    if edges.is_empty() {
        return Err(ColorMapError::EmptyEdges);
    }
    if let Some((index, &value)) = edges.iter().enumerate().find(|(_, edge)| !edge.is_finite()) {
        return Err(ColorMapError::NonFiniteEdge { index, value });
    }
    if let Some(index) = edges.windows(2).position(|pair| pair[0] >= pair[1]) {
        return Err(ColorMapError::UnsortedEdges {
            index: index + 1,
            previous: edges[index],
            value: edges[index + 1],
        });
    }
    Ok(())
}

pub(crate) fn check_colors(
    edges: usize,
    colors: usize,
    policy: EndpointPolicy,
) -> Result<(), ColorMapError> {
    let expected = policy.expected_colors(edges);
    if expected == 0 {
        return Err(ColorMapError::NoVisibleBucket { policy, edges });
    }
    if colors != expected {
        return Err(ColorMapError::ColorCountMismatch {
            policy,
            edges,
            expected,
            actual: colors,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn colors(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("#{i:06x}")).collect()
    }

    #[test]
    fn rejects_empty_edges() {
        assert_eq!(
            ColorMap::new(vec![], colors(1), EndpointPolicy::OutOfRange, 0),
            Err(ColorMapError::EmptyEdges)
        );
    }

    #[test]
    fn rejects_unsorted_and_duplicate_edges() {
        let err = ColorMap::new(vec![1.0, 3.0, 2.0], colors(4), EndpointPolicy::OutOfRange, 0)
            .unwrap_err();
        assert_eq!(
            err,
            ColorMapError::UnsortedEdges {
                index: 2,
                previous: 3.0,
                value: 2.0
            }
        );

        let err = ColorMap::new(vec![1.0, 1.0], colors(3), EndpointPolicy::OutOfRange, 0)
            .unwrap_err();
        assert!(matches!(err, ColorMapError::UnsortedEdges { index: 1, .. }));
    }

    #[test]
    fn rejects_non_finite_edges() {
        let err = ColorMap::new(
            vec![0.0, f64::INFINITY],
            colors(3),
            EndpointPolicy::OutOfRange,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, ColorMapError::NonFiniteEdge { index: 1, .. }));
    }

    #[test]
    fn rejects_mismatched_color_count() {
        // Six colors for seven edges under lower_in_range: one short.
        let edges = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let err = ColorMap::new(edges, colors(6), EndpointPolicy::LowerInRange, 0).unwrap_err();
        assert_eq!(
            err,
            ColorMapError::ColorCountMismatch {
                policy: EndpointPolicy::LowerInRange,
                edges: 7,
                expected: 7,
                actual: 6
            }
        );
    }

    #[test]
    fn rejects_policy_without_visible_bucket() {
        let err = ColorMap::new(vec![1.0], vec![], EndpointPolicy::InRange, 0).unwrap_err();
        assert_eq!(
            err,
            ColorMapError::NoVisibleBucket {
                policy: EndpointPolicy::InRange,
                edges: 1
            }
        );
    }

    #[test]
    fn legend_pairs_labels_with_colors() {
        let map = ColorMap::new(
            vec![0.0, 10.0, 25.0, 50.0, 100.0, 200.0],
            colors(6),
            EndpointPolicy::LowerInRange,
            0,
        )
        .unwrap();

        let legend = map.legend();
        assert_eq!(legend.len(), 6);
        assert_eq!(legend[0].label, "0 - 10");
        assert_eq!(legend[0].color, "#000000");
        assert_eq!(legend[5].label, "200 <");
        assert_eq!(legend[5].color, "#000005");
    }

    #[test]
    fn classify_agrees_with_legend_row() {
        let map = ColorMap::new(
            vec![0.5, 1.5, 5.0],
            colors(2),
            EndpointPolicy::InRange,
            1,
        )
        .unwrap();
        let legend = map.legend();

        let index = map.classify_index(1.0).unwrap();
        assert_eq!(legend[index].label, "0.5 - 1.5");
        let index = map.classify_index(3.0).unwrap();
        assert_eq!(legend[index].label, "1.5 - 5.0");
        // Hidden extremes fold onto the nearest visible bucket.
        assert_eq!(map.classify(-100.0).unwrap(), "#000000");
        assert_eq!(map.classify(100.0).unwrap(), "#000001");
    }

    #[test]
    fn classify_rejects_nan() {
        let map = ColorMap::new(vec![1.0], colors(2), EndpointPolicy::OutOfRange, 0).unwrap();
        assert_eq!(map.classify(f64::NAN), Err(ColorMapError::NotANumber));
    }

    fn ascending_edges() -> impl Strategy<Value = Vec<f64>> {
        (-1000.0f64..1000.0, prop::collection::vec(0.01f64..100.0, 1..12)).prop_map(
            |(start, steps)| {
                steps
                    .iter()
                    .scan(start, |edge, step| {
                        let current = *edge;
                        *edge += step;
                        Some(current)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Property: every policy needs exactly as many colors as it shows labels.
        #[test]
        fn labels_and_colors_have_same_length(edges in ascending_edges(), decimal_places in 0usize..4) {
            for policy in EndpointPolicy::ALL {
                let expected = policy.expected_colors(edges.len());
                if expected == 0 {
                    continue;
                }
                let labels = make_legend_labels(&edges, policy, decimal_places).unwrap();
                prop_assert_eq!(labels.len(), expected);

                let map = ColorMap::new(edges.clone(), colors(expected), policy, decimal_places).unwrap();
                prop_assert_eq!(map.labels().len(), map.colors().len());
            }
        }

        /// Property: classification is monotonic and always lands on a visible bucket.
        #[test]
        fn classification_is_monotonic(
            edges in ascending_edges(),
            a in -2000.0f64..2000.0,
            b in -2000.0f64..2000.0,
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            for policy in EndpointPolicy::ALL {
                let expected = policy.expected_colors(edges.len());
                if expected == 0 {
                    continue;
                }
                let map = ColorMap::new(edges.clone(), colors(expected), policy, 0).unwrap();
                let low_index = map.classify_index(low).unwrap();
                let high_index = map.classify_index(high).unwrap();
                prop_assert!(low_index <= high_index);
                prop_assert!(high_index < expected);
            }
        }

        /// Property: a value sitting on an edge belongs to the bucket above it.
        #[test]
        fn edges_are_inclusive_lower_bounds(edges in ascending_edges()) {
            for (i, edge) in edges.iter().enumerate() {
                prop_assert_eq!(bucket_index(*edge, &edges), i + 1);
            }
        }
    }
}
