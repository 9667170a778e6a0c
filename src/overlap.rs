//! Overlap rate between adjacent tiles.

use crate::config::OverlapConfig;

/// Overlap rate for tiles whose shorter edge is `short_edge`, given the total
/// tile count and the worse of the two axis uniformity ratios.
///
/// ```
/// use tileplan::OverlapConfig;
/// use tileplan::overlap::overlap_rate;
///
/// let c = OverlapConfig::default();
/// assert_eq!(overlap_rate(2048, 2, 1.0, &c), 0.05);
/// assert_eq!(overlap_rate(1000, 9, 1.0, &c), 0.04);
/// ```
pub fn overlap_rate(
    short_edge: u32,
    tile_count: u64,
    uniformity: f64,
    config: &OverlapConfig,
) -> f64 {
    let mut rate = if short_edge >= config.large_tile_edge || tile_count <= config.few_tiles {
        config.large_rate
    } else if short_edge >= config.medium_tile_edge {
        config.medium_rate
    } else {
        config.small_rate
    };
    if uniformity < config.uneven_threshold {
        rate += config.uneven_boost;
    }
    rate.max(config.min_rate).min(config.max_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c() -> OverlapConfig {
        OverlapConfig::default()
    }

    #[test]
    fn large_tiles() {
        assert_eq!(overlap_rate(1800, 20, 1.0, &c()), 0.05);
        assert_eq!(overlap_rate(2176, 20, 1.0, &c()), 0.05);
    }

    #[test]
    fn few_tiles_regardless_of_size() {
        assert_eq!(overlap_rate(500, 4, 1.0, &c()), 0.05);
        assert_eq!(overlap_rate(500, 5, 1.0, &c()), 0.04);
    }

    #[test]
    fn medium_tiles() {
        assert_eq!(overlap_rate(1400, 9, 1.0, &c()), 0.045);
        assert_eq!(overlap_rate(1799, 9, 1.0, &c()), 0.045);
    }

    #[test]
    fn small_tiles() {
        assert_eq!(overlap_rate(1399, 9, 1.0, &c()), 0.04);
    }

    #[test]
    fn uneven_boost() {
        assert!((overlap_rate(1000, 9, 0.85, &c()) - 0.045).abs() < 1e-12);
        assert!((overlap_rate(1500, 9, 0.85, &c()) - 0.05).abs() < 1e-12);
        assert!((overlap_rate(2000, 9, 0.5, &c()) - 0.055).abs() < 1e-12);
        // Threshold itself is not uneven.
        assert_eq!(overlap_rate(1000, 9, 0.9, &c()), 0.04);
    }

    #[test]
    fn clamped_to_range() {
        let hot = OverlapConfig {
            large_rate: 0.2,
            small_rate: 0.0,
            ..c()
        };
        assert_eq!(overlap_rate(2000, 9, 1.0, &hot), 0.06);
        assert_eq!(overlap_rate(100, 9, 1.0, &hot), 0.03);
    }

    #[test]
    fn always_within_bounds() {
        for s in [1u32, 500, 1399, 1400, 1799, 1800, 5000] {
            for n in [2u64, 4, 5, 100] {
                for u in [0.0, 0.5, 0.89, 0.9, 1.0] {
                    let r = overlap_rate(s, n, u, &c());
                    assert!((0.03..=0.06).contains(&r), "s={s} n={n} u={u}: {r}");
                }
            }
        }
    }
}
