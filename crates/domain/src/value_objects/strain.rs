//! Strain cost lookup
//!
//! Strain is the homebrew resource pool consumed by casting. Costs rise
//! in asymmetric tiers: paired at low levels, then steepening sharply at
//! the top end.

/// Strain cost per spell level, indexed 0 (cantrip) through 9.
pub const STRAIN_COSTS: [i32; 10] = [0, 1, 1, 2, 2, 4, 4, 7, 10, 14];

/// Cost to cast a spell of the given level.
///
/// Levels outside 0-9 cost 0; an out-of-range level is a fail-safe
/// default, not an error.
pub fn strain_cost(level: i32) -> i32 {
    usize::try_from(level)
        .ok()
        .and_then(|index| STRAIN_COSTS.get(index))
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cantrips_are_free() {
        assert_eq!(strain_cost(0), 0);
    }

    #[test]
    fn costs_follow_the_tier_table() {
        assert_eq!(strain_cost(1), 1);
        assert_eq!(strain_cost(2), 1);
        assert_eq!(strain_cost(3), 2);
        assert_eq!(strain_cost(4), 2);
        assert_eq!(strain_cost(5), 4);
        assert_eq!(strain_cost(6), 4);
        assert_eq!(strain_cost(7), 7);
        assert_eq!(strain_cost(8), 10);
        assert_eq!(strain_cost(9), 14);
    }

    #[test]
    fn out_of_range_levels_cost_nothing() {
        assert_eq!(strain_cost(10), 0);
        assert_eq!(strain_cost(-1), 0);
        assert_eq!(strain_cost(i32::MAX), 0);
        assert_eq!(strain_cost(i32::MIN), 0);
    }
}
