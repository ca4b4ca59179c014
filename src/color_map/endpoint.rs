use std::{fmt, ops::Range, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ColorMapError;

/// Rule deciding whether the buckets below the first edge and at/above the
/// last edge are part of the visible legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointPolicy {
    /// Both extreme buckets are hidden; out-of-domain values are clamped.
    InRange,
    /// The bucket below the first edge is hidden.
    LowerInRange,
    /// The bucket at/above the last edge is hidden.
    UpperInRange,
    /// Every bucket, including both extremes, is shown.
    #[default]
    OutOfRange,
}

impl EndpointPolicy {
    /// All policies, in declaration order.
    pub const ALL: [EndpointPolicy; 4] = [
        EndpointPolicy::InRange,
        EndpointPolicy::LowerInRange,
        EndpointPolicy::UpperInRange,
        EndpointPolicy::OutOfRange,
    ];

    /// Wire name used by the metadata document.
    pub fn as_str(self) -> &'static str {
        match self {
            EndpointPolicy::InRange => "in_range",
            EndpointPolicy::LowerInRange => "lower_in_range",
            EndpointPolicy::UpperInRange => "upper_in_range",
            EndpointPolicy::OutOfRange => "out_of_range",
        }
    }

    /// Range of bucket indices (out of the `edge_count + 1` buckets) that stay
    /// visible under this policy.
    ///
    /// `edge_count` must be at least 1.
    pub fn visible_buckets(self, edge_count: usize) -> Range<usize> {
        let buckets = edge_count + 1;
        match self {
            EndpointPolicy::InRange => 1..buckets - 1,
            EndpointPolicy::LowerInRange => 1..buckets,
            EndpointPolicy::UpperInRange => 0..buckets - 1,
            EndpointPolicy::OutOfRange => 0..buckets,
        }
    }

    /// Number of colors a caller must supply for `edge_count` edges.
    pub fn expected_colors(self, edge_count: usize) -> usize {
        self.visible_buckets(edge_count).len()
    }
}

impl fmt::Display for EndpointPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointPolicy {
    type Err = ColorMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EndpointPolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| ColorMapError::UnknownPolicy(s.to_string()))
    }
}
