// SPDX-License-Identifier: MPL-2.0
//! Frequency coordinates and the deterministic order in which they are visited.
//!
//! A real-valued image has a conjugate-symmetric spectrum, so only the
//! non-negative horizontal half `x ∈ [0, ceil(N/2))` is visited. The vertical
//! axis spans `y ∈ [-floor(N/2), ceil(N/2))`.

use super::newtypes::ImageSize;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Bias added to the vertical distance of positive-`y` coordinates so that
/// ties on a Chebyshev ring resolve toward non-positive `y` first.
pub const POSITIVE_Y_BIAS: f64 = 0.1;

/// One basis sinusoid, identified by its signed frequency pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrequencyCoord {
    pub x: i64,
    pub y: i64,
}

impl FrequencyCoord {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns true for the zero-frequency (average brightness) term.
    #[must_use]
    pub fn is_dc(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// The coordinate reflected across the vertical axis.
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self::new(-self.x, self.y)
    }
}

impl fmt::Display for FrequencyCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={} y={}", self.x, self.y)
    }
}

impl From<(i64, i64)> for FrequencyCoord {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

/// Distance key used to sort the frequency domain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingStrategy {
    /// Square rings of increasing Chebyshev distance, positive `y` last on ties.
    #[default]
    ChebyshevBiased,
    /// Discs of increasing squared Euclidean distance.
    Euclidean,
}

impl OrderingStrategy {
    /// Sort key for one coordinate. Lower keys are visited first.
    #[must_use]
    pub fn key(self, coord: FrequencyCoord) -> f64 {
        let x = coord.x as f64;
        let y = coord.y as f64;
        match self {
            Self::ChebyshevBiased => {
                let biased_y = if coord.y > 0 {
                    y.abs() + POSITIVE_Y_BIAS
                } else {
                    y.abs()
                };
                x.abs().max(biased_y)
            }
            Self::Euclidean => x * x + y * y,
        }
    }

    /// All available strategies, in declaration order.
    pub const ALL: [OrderingStrategy; 2] = [Self::ChebyshevBiased, Self::Euclidean];
}

/// The full visiting sequence for one image size.
///
/// Built once per session and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyOrder {
    size: ImageSize,
    strategy: OrderingStrategy,
    coords: Vec<FrequencyCoord>,
}

impl FrequencyOrder {
    /// Enumerates the domain (`x` outermost, `y` innermost) and sorts it
    /// stably by the strategy key.
    #[must_use]
    pub fn build(size: ImageSize, strategy: OrderingStrategy) -> Self {
        let n = size.get() as i64;
        let x_count = size.horizontal_frequencies() as i64;
        let y_offset = size.half() as i64;

        let mut coords: Vec<FrequencyCoord> = (0..x_count)
            .flat_map(|x| (0..n).map(move |y| FrequencyCoord::new(x, y - y_offset)))
            .collect();

        // `sort_by` is stable, which keeps the enumeration order among equal keys.
        coords.sort_by(|a, b| {
            strategy
                .key(*a)
                .partial_cmp(&strategy.key(*b))
                .unwrap_or(Ordering::Equal)
        });

        Self {
            size,
            strategy,
            coords,
        }
    }

    #[must_use]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    #[must_use]
    pub fn strategy(&self) -> OrderingStrategy {
        self.strategy
    }

    /// Number of reconstruction steps, `ceil(N/2) * N`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<FrequencyCoord> {
        self.coords.get(index).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FrequencyCoord] {
        &self.coords
    }

    pub fn iter(&self) -> impl Iterator<Item = FrequencyCoord> + '_ {
        self.coords.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn order(n: usize) -> FrequencyOrder {
        FrequencyOrder::build(
            ImageSize::new(n).expect("valid size"),
            OrderingStrategy::default(),
        )
    }

    #[test]
    fn size_four_matches_reference_sequence() {
        let expected: Vec<FrequencyCoord> = [
            (0, 0),
            (0, -1),
            (1, -1),
            (1, 0),
            (0, 1),
            (1, 1),
            (0, -2),
            (1, -2),
        ]
        .into_iter()
        .map(FrequencyCoord::from)
        .collect();

        assert_eq!(order(4).as_slice(), expected.as_slice());
    }

    #[test]
    fn length_is_half_width_times_height() {
        for n in 1..=17 {
            assert_eq!(order(n).len(), n.div_ceil(2) * n, "size {}", n);
        }
    }

    #[test]
    fn every_coordinate_is_distinct_and_inside_domain() {
        for n in [1, 2, 3, 6, 9, 16] {
            let order = order(n);
            let unique: HashSet<_> = order.iter().collect();
            assert_eq!(unique.len(), order.len());

            let half = (n / 2) as i64;
            let x_end = n.div_ceil(2) as i64;
            let y_end = n.div_ceil(2) as i64;
            for coord in order.iter() {
                assert!((0..x_end).contains(&coord.x), "{coord} out of x range");
                assert!((-half..y_end).contains(&coord.y), "{coord} out of y range");
            }
        }
    }

    #[test]
    fn dc_term_always_comes_first() {
        for n in [1, 2, 5, 8] {
            assert_eq!(order(n).get(0), Some(FrequencyCoord::new(0, 0)));
        }
    }

    #[test]
    fn keys_never_decrease_along_the_order() {
        let order = order(12);
        let keys: Vec<f64> = order
            .iter()
            .map(|c| OrderingStrategy::ChebyshevBiased.key(c))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn positive_y_is_biased_behind_its_ring() {
        let strategy = OrderingStrategy::ChebyshevBiased;
        assert!(strategy.key(FrequencyCoord::new(1, 0)) < strategy.key(FrequencyCoord::new(0, 1)));
        assert!(strategy.key(FrequencyCoord::new(0, 1)) > strategy.key(FrequencyCoord::new(0, -1)));
        assert_eq!(strategy.key(FrequencyCoord::new(0, -3)), 3.0);
    }

    #[test]
    fn euclidean_strategy_covers_same_domain() {
        let size = ImageSize::new(7).unwrap();
        let chebyshev: HashSet<_> = FrequencyOrder::build(size, OrderingStrategy::ChebyshevBiased)
            .iter()
            .collect();
        let euclidean = FrequencyOrder::build(size, OrderingStrategy::Euclidean);
        let euclidean_set: HashSet<_> = euclidean.iter().collect();

        assert_eq!(chebyshev, euclidean_set);
        assert_eq!(euclidean.strategy(), OrderingStrategy::Euclidean);
    }

    #[test]
    fn building_twice_is_reproducible() {
        assert_eq!(order(10), order(10));
    }

    #[test]
    fn mirrored_flips_horizontal_frequency_only() {
        let coord = FrequencyCoord::new(3, -2);
        assert_eq!(coord.mirrored(), FrequencyCoord::new(-3, -2));
        assert!(FrequencyCoord::new(0, 0).is_dc());
        assert!(!coord.is_dc());
    }

    #[test]
    fn strategy_round_trips_through_kebab_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            strategy: OrderingStrategy,
        }

        let text = toml::to_string(&Wrapper {
            strategy: OrderingStrategy::ChebyshevBiased,
        })
        .unwrap();
        assert!(text.contains("chebyshev-biased"));

        let parsed: Wrapper = toml::from_str("strategy = \"euclidean\"").unwrap();
        assert_eq!(parsed.strategy, OrderingStrategy::Euclidean);
    }
}
