//! Candidate corrections for a transposed or sign-flipped coordinate.

use serde::Serialize;

use crate::geodesy::Coordinate;

/// A way a coordinate can have been mistyped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    FlipLatitude,
    FlipLongitude,
    FlipBoth,
    Swap,
    SwapFlipLatitude,
    SwapFlipLongitude,
    SwapFlipBoth,
}

impl Transform {
    /// All transforms, in the order alternatives are tried.
    pub const ALL: [Transform; 7] = [
        Transform::FlipLatitude,
        Transform::FlipLongitude,
        Transform::FlipBoth,
        Transform::Swap,
        Transform::SwapFlipLatitude,
        Transform::SwapFlipLongitude,
        Transform::SwapFlipBoth,
    ];

    /// Apply the transform. Sign flips after a swap apply to the swapped axes.
    pub fn apply(&self, original: &Coordinate) -> Coordinate {
        match self {
            Transform::FlipLatitude => original.with_latitude_negated(),
            Transform::FlipLongitude => original.with_longitude_negated(),
            Transform::FlipBoth => original.with_latitude_negated().with_longitude_negated(),
            Transform::Swap => original.swapped(),
            Transform::SwapFlipLatitude => original.swapped().with_latitude_negated(),
            Transform::SwapFlipLongitude => original.swapped().with_longitude_negated(),
            Transform::SwapFlipBoth => original
                .swapped()
                .with_latitude_negated()
                .with_longitude_negated(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transform::FlipLatitude => "sign-flip latitude",
            Transform::FlipLongitude => "sign-flip longitude",
            Transform::FlipBoth => "sign-flip both",
            Transform::Swap => "swap latitude/longitude",
            Transform::SwapFlipLatitude => "swap latitude/longitude, sign-flip latitude",
            Transform::SwapFlipLongitude => "swap latitude/longitude, sign-flip longitude",
            Transform::SwapFlipBoth => "swap latitude/longitude, sign-flip both",
        }
    }
}

/// A coordinate derived from the original by a [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateAlternative {
    pub coordinate: Coordinate,
    pub transform: Transform,
}

impl CoordinateAlternative {
    /// Human-readable description of how the alternative was derived.
    pub fn label(&self) -> &'static str {
        self.transform.label()
    }
}

/// Alternatives to `original` in trial order, skipping any that are out of
/// range or identical to the original (a zero axis flips onto itself).
pub fn alternatives(original: &Coordinate) -> Vec<CoordinateAlternative> {
    let mut result: Vec<CoordinateAlternative> = Vec::with_capacity(Transform::ALL.len());
    for transform in Transform::ALL {
        let coordinate = transform.apply(original);
        if !coordinate.is_in_range() || coordinate == *original {
            continue;
        }
        result.push(CoordinateAlternative {
            coordinate,
            transform,
        });
    }
    result
}
