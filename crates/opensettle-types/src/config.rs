//! Configuration for the settlement engine.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunable parameters of the settlement engine's rent economy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Storage deposit debited from the rent pool per replay record.
    pub record_rent: u64,
    /// Fraction of a reclaimed deposit paid to the garbage collector,
    /// in basis points.
    pub gc_reward_bps: u16,
}

impl SettlementConfig {
    /// Create a config with explicit parameters.
    ///
    /// # Panics
    /// Panics if `gc_reward_bps` exceeds 10,000 (100%).
    #[must_use]
    pub fn new(record_rent: u64, gc_reward_bps: u16) -> Self {
        assert!(
            gc_reward_bps <= constants::MAX_BPS,
            "gc_reward_bps must be <= 10_000"
        );
        Self {
            record_rent,
            gc_reward_bps,
        }
    }

    /// Collector reward for a reclaimed deposit. Always `<= reclaimed`.
    #[must_use]
    pub fn gc_reward(&self, reclaimed: u64) -> u64 {
        let reward = u128::from(reclaimed) * u128::from(self.gc_reward_bps)
            / u128::from(constants::MAX_BPS);
        u64::try_from(reward).expect("reward never exceeds reclaimed")
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            record_rent: constants::DEFAULT_RECORD_RENT,
            gc_reward_bps: constants::DEFAULT_GC_REWARD_BPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SettlementConfig::default();
        assert_eq!(cfg.record_rent, constants::DEFAULT_RECORD_RENT);
        assert_eq!(cfg.gc_reward_bps, 1_000);
    }

    #[test]
    fn gc_reward_is_ten_percent_by_default() {
        let cfg = SettlementConfig::default();
        assert_eq!(cfg.gc_reward(1_000), 100);
        assert_eq!(cfg.gc_reward(0), 0);
    }

    #[test]
    fn gc_reward_rounds_down() {
        let cfg = SettlementConfig::new(100, 1_000);
        assert_eq!(cfg.gc_reward(9), 0);
        assert_eq!(cfg.gc_reward(19), 1);
    }

    #[test]
    fn gc_reward_never_exceeds_reclaimed() {
        let cfg = SettlementConfig::new(100, 10_000);
        assert_eq!(cfg.gc_reward(u64::MAX), u64::MAX);
    }

    #[test]
    #[should_panic(expected = "gc_reward_bps must be <= 10_000")]
    fn reward_rate_over_100_percent_panics() {
        let _ = SettlementConfig::new(100, 10_001);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = SettlementConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SettlementConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.record_rent, back.record_rent);
        assert_eq!(cfg.gc_reward_bps, back.gc_reward_bps);
    }
}
