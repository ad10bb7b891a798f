//! Tiered upgrade catalog
//!
//! Every upgrade has a tier in `[0, max_tier]`. Buying costs
//! `cost_table()[tier]` and raises the tier by exactly one; the effect of the
//! current tier is `value_table()[tier]`. Point balances live with the caller.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Random picks tried per requested offer slot before giving up
pub const OFFER_ATTEMPTS_PER_SLOT: usize = 16;

/// The closed set of upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    MaxVelocity,
    Acceleration,
    RotationSpeed,
    CanSlowDown,
    GrabberSpeed,
    GrabberLength,
    Shield,
    PointMultiplier,
    AltSkin,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 9] = [
        UpgradeKind::MaxVelocity,
        UpgradeKind::Acceleration,
        UpgradeKind::RotationSpeed,
        UpgradeKind::CanSlowDown,
        UpgradeKind::GrabberSpeed,
        UpgradeKind::GrabberLength,
        UpgradeKind::Shield,
        UpgradeKind::PointMultiplier,
        UpgradeKind::AltSkin,
    ];

    /// Save-file key
    pub fn key(self) -> &'static str {
        match self {
            UpgradeKind::MaxVelocity => "max_velocity",
            UpgradeKind::Acceleration => "acceleration",
            UpgradeKind::RotationSpeed => "rotation_speed",
            UpgradeKind::CanSlowDown => "can_slow_down",
            UpgradeKind::GrabberSpeed => "grabber_speed",
            UpgradeKind::GrabberLength => "grabber_length",
            UpgradeKind::Shield => "shield",
            UpgradeKind::PointMultiplier => "point_multiplier",
            UpgradeKind::AltSkin => "ee",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Shop card title
    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::MaxVelocity => "Top Speed",
            UpgradeKind::Acceleration => "Thrusters",
            UpgradeKind::RotationSpeed => "Gyros",
            UpgradeKind::CanSlowDown => "Brakes",
            UpgradeKind::GrabberSpeed => "Arm Motor",
            UpgradeKind::GrabberLength => "Arm Reach",
            UpgradeKind::Shield => "Shield",
            UpgradeKind::PointMultiplier => "Salvage Broker",
            UpgradeKind::AltSkin => "Paint Job",
        }
    }

    /// Cost of the tier about to be bought, indexed by current tier
    pub fn cost_table(self) -> &'static [u64] {
        match self {
            UpgradeKind::MaxVelocity => &[100, 130, 185, 234],
            UpgradeKind::Acceleration => &[240, 315],
            UpgradeKind::RotationSpeed => &[310, 420],
            UpgradeKind::CanSlowDown => &[560],
            UpgradeKind::GrabberSpeed => &[60, 100],
            UpgradeKind::GrabberLength => &[145, 187, 252, 301],
            UpgradeKind::Shield => &[200, 350, 520],
            UpgradeKind::PointMultiplier => &[400, 800],
            UpgradeKind::AltSkin => &[1000],
        }
    }

    /// Effect of each tier, indexed by current tier
    pub fn value_table(self) -> &'static [f32] {
        match self {
            UpgradeKind::MaxVelocity => &[3.0, 3.5, 4.0, 4.5, 5.0],
            UpgradeKind::Acceleration => &[0.5, 0.65, 0.8],
            UpgradeKind::RotationSpeed => &[2.0, 2.5, 3.0],
            UpgradeKind::CanSlowDown => &[0.0, 1.0],
            UpgradeKind::GrabberSpeed => &[6.0, 8.0, 10.0],
            UpgradeKind::GrabberLength => &[150.0, 190.0, 230.0, 270.0, 310.0],
            UpgradeKind::Shield => &[0.0, 1.0, 2.0, 3.0],
            UpgradeKind::PointMultiplier => &[1.0, 1.5, 2.0],
            UpgradeKind::AltSkin => &[0.0, 1.0],
        }
    }

    pub fn max_tier(self) -> u32 {
        self.cost_table().len() as u32
    }
}

/// Check that every cost table has one entry per tier and every value table
/// one more. Panics on a malformed catalog.
pub fn validate_catalog() {
    for kind in UpgradeKind::ALL {
        let costs = kind.cost_table().len();
        let values = kind.value_table().len();
        assert!(costs > 0, "upgrade {:?} has no tiers", kind);
        assert_eq!(
            values,
            costs + 1,
            "upgrade {:?} needs {} values, has {}",
            kind,
            costs + 1,
            values
        );
    }
}

/// Effective tunables for the current tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeValues {
    pub max_velocity: f32,
    pub acceleration: f32,
    pub rotation_speed: f32,
    pub can_slow_down: bool,
    pub grabber_speed: f32,
    pub grabber_length: f32,
    pub shield: u32,
    pub point_multiplier: f32,
    pub alt_skin: bool,
}

/// One shop card: what it is, where it stands, what the next tier costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferEntry {
    pub kind: UpgradeKind,
    pub tier: u32,
    /// `None` when maxed
    pub next_cost: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeManager {
    tiers: BTreeMap<UpgradeKind, u32>,
}

impl Default for UpgradeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UpgradeManager {
    /// All upgrades at tier 0
    pub fn new() -> Self {
        validate_catalog();
        Self {
            tiers: UpgradeKind::ALL.into_iter().map(|kind| (kind, 0)).collect(),
        }
    }

    /// Rebuild from a saved `{key: tier}` map
    ///
    /// Unknown keys are ignored, missing keys stay at 0, tiers outside
    /// `[0, max_tier]` are clamped into range.
    pub fn from_tiers(saved: &BTreeMap<String, i64>) -> Self {
        let mut manager = Self::new();
        for (key, &tier) in saved {
            let Some(kind) = UpgradeKind::from_key(key) else {
                log::debug!("Ignoring unknown upgrade key '{}'", key);
                continue;
            };
            let max = i64::from(kind.max_tier());
            if !(0..=max).contains(&tier) {
                log::warn!("Saved tier {} for '{}' out of range, clamping", tier, key);
            }
            manager.set_tier(kind, tier.clamp(0, max) as u32);
        }
        manager
    }

    /// Flat `{key: tier}` map for the save file
    pub fn to_tiers(&self) -> BTreeMap<String, i64> {
        self.tiers
            .iter()
            .map(|(kind, tier)| (kind.key().to_string(), i64::from(*tier)))
            .collect()
    }

    pub fn tier(&self, kind: UpgradeKind) -> u32 {
        self.tiers.get(&kind).copied().unwrap_or(0)
    }

    /// Force a tier (clamped to the maximum)
    pub fn set_tier(&mut self, kind: UpgradeKind, tier: u32) {
        self.tiers.insert(kind, tier.min(kind.max_tier()));
    }

    pub fn is_maxed(&self, kind: UpgradeKind) -> bool {
        self.tier(kind) >= kind.max_tier()
    }

    /// Cost of the next tier, `None` when maxed
    pub fn next_cost(&self, kind: UpgradeKind) -> Option<u64> {
        kind.cost_table().get(self.tier(kind) as usize).copied()
    }

    pub fn can_buy(&self, kind: UpgradeKind, points: u64) -> bool {
        match self.next_cost(kind) {
            Some(cost) => points >= cost,
            None => false,
        }
    }

    /// Buy the next tier. Returns the cost to deduct, or 0 if rejected.
    pub fn try_buy(&mut self, kind: UpgradeKind, points: u64) -> u64 {
        if !self.can_buy(kind, points) {
            return 0;
        }
        let cost = self.next_cost(kind).unwrap_or(0);
        let tier = self.tier(kind) + 1;
        self.tiers.insert(kind, tier);
        log::info!("Bought {:?} tier {} for {}", kind, tier, cost);
        cost
    }

    /// Effect value of the current tier
    pub fn value(&self, kind: UpgradeKind) -> f32 {
        let table = kind.value_table();
        let idx = (self.tier(kind) as usize).min(table.len() - 1);
        table[idx]
    }

    pub fn values(&self) -> UpgradeValues {
        UpgradeValues {
            max_velocity: self.value(UpgradeKind::MaxVelocity),
            acceleration: self.value(UpgradeKind::Acceleration),
            rotation_speed: self.value(UpgradeKind::RotationSpeed),
            can_slow_down: self.value(UpgradeKind::CanSlowDown) > 0.0,
            grabber_speed: self.value(UpgradeKind::GrabberSpeed),
            grabber_length: self.value(UpgradeKind::GrabberLength),
            shield: self.value(UpgradeKind::Shield) as u32,
            point_multiplier: self.value(UpgradeKind::PointMultiplier),
            alt_skin: self.value(UpgradeKind::AltSkin) > 0.0,
        }
    }

    /// Up to `n` distinct, non-maxed upgrades picked at random
    ///
    /// Picks are drawn with a bounded number of attempts, so fewer than `n`
    /// come back when not enough upgrades remain.
    pub fn random_offer(&self, n: usize, rng: &mut impl Rng) -> Vec<UpgradeKind> {
        let mut offer = Vec::with_capacity(n);
        let attempts = n * OFFER_ATTEMPTS_PER_SLOT;
        for _ in 0..attempts {
            if offer.len() == n {
                break;
            }
            let kind = UpgradeKind::ALL[rng.random_range(0..UpgradeKind::ALL.len())];
            if !self.is_maxed(kind) && !offer.contains(&kind) {
                offer.push(kind);
            }
        }
        offer
    }

    /// Shop card data for the given upgrades
    pub fn offer_entries(&self, kinds: &[UpgradeKind]) -> Vec<OfferEntry> {
        kinds
            .iter()
            .map(|&kind| OfferEntry {
                kind,
                tier: self.tier(kind),
                next_cost: self.next_cost(kind),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_catalog_is_consistent() {
        validate_catalog();
        for kind in UpgradeKind::ALL {
            assert_eq!(UpgradeKind::from_key(kind.key()), Some(kind));
        }
    }

    #[test]
    fn test_buy_uses_current_tier_cost() {
        let mut m = UpgradeManager::new();
        m.set_tier(UpgradeKind::MaxVelocity, 2);
        assert!(!m.can_buy(UpgradeKind::MaxVelocity, 150));
        assert_eq!(m.try_buy(UpgradeKind::MaxVelocity, 150), 0);
        assert_eq!(m.tier(UpgradeKind::MaxVelocity), 2);

        assert!(m.can_buy(UpgradeKind::MaxVelocity, 185));
        assert_eq!(m.try_buy(UpgradeKind::MaxVelocity, 200), 185);
        assert_eq!(m.tier(UpgradeKind::MaxVelocity), 3);
    }

    #[test]
    fn test_maxed_upgrade_rejected() {
        let mut m = UpgradeManager::new();
        m.set_tier(UpgradeKind::CanSlowDown, 1);
        assert!(m.is_maxed(UpgradeKind::CanSlowDown));
        assert_eq!(m.try_buy(UpgradeKind::CanSlowDown, u64::MAX), 0);
        assert_eq!(m.tier(UpgradeKind::CanSlowDown), 1);
        assert_eq!(m.next_cost(UpgradeKind::CanSlowDown), None);
    }

    #[test]
    fn test_from_tiers_ignores_unknown_and_clamps() {
        let mut saved = BTreeMap::new();
        saved.insert("max_velocity".to_string(), 99);
        saved.insert("warp_drive".to_string(), 3);
        saved.insert("shield".to_string(), 1);
        saved.insert("acceleration".to_string(), -3);
        let m = UpgradeManager::from_tiers(&saved);
        assert_eq!(m.tier(UpgradeKind::MaxVelocity), 4);
        assert_eq!(m.tier(UpgradeKind::Acceleration), 0);
        assert_eq!(m.tier(UpgradeKind::Shield), 1);
        assert_eq!(m.tier(UpgradeKind::GrabberLength), 0);
        assert!(!m.to_tiers().contains_key("warp_drive"));
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let mut m = UpgradeManager::new();
        m.set_tier(UpgradeKind::GrabberLength, 3);
        m.set_tier(UpgradeKind::PointMultiplier, 1);
        m.set_tier(UpgradeKind::AltSkin, 1);
        let restored = UpgradeManager::from_tiers(&m.to_tiers());
        assert_eq!(restored.values(), m.values());
        assert_eq!(restored, m);
    }

    #[test]
    fn test_default_values_match_base_tuning() {
        let v = UpgradeManager::new().values();
        assert_eq!(v.max_velocity, crate::consts::SHIP_MAX_SPEED);
        assert_eq!(v.acceleration, crate::consts::SHIP_ACCELERATION);
        assert_eq!(v.grabber_length, crate::consts::GRABBER_MAX_LENGTH);
        assert!(!v.can_slow_down);
        assert_eq!(v.shield, 0);
        assert_eq!(v.point_multiplier, 1.0);
    }

    #[test]
    fn test_random_offer_distinct_and_not_maxed() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut m = UpgradeManager::new();
        m.set_tier(UpgradeKind::CanSlowDown, 1);
        for _ in 0..50 {
            let offer = m.random_offer(3, &mut rng);
            assert_eq!(offer.len(), 3);
            assert!(!offer.contains(&UpgradeKind::CanSlowDown));
            for (i, kind) in offer.iter().enumerate() {
                assert!(!offer[i + 1..].contains(kind));
            }
        }
    }

    #[test]
    fn test_random_offer_when_few_remain() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut m = UpgradeManager::new();
        for kind in UpgradeKind::ALL {
            m.set_tier(kind, kind.max_tier());
        }
        m.set_tier(UpgradeKind::Shield, 0);
        let offer = m.random_offer(3, &mut rng);
        assert!(offer.len() <= 1);
        assert!(offer.iter().all(|k| *k == UpgradeKind::Shield));

        m.set_tier(UpgradeKind::Shield, 3);
        assert!(m.random_offer(3, &mut rng).is_empty());
    }

    proptest! {
        #[test]
        fn prop_purchase_laws(kind_idx in 0usize..9, tier in 0u32..6, points in 0u64..2000) {
            let kind = UpgradeKind::ALL[kind_idx];
            let mut m = UpgradeManager::new();
            m.set_tier(kind, tier);
            let before = m.tier(kind);
            let expected_cost = m.next_cost(kind);
            let charged = m.try_buy(kind, points);
            match expected_cost {
                Some(cost) if points >= cost => {
                    prop_assert_eq!(charged, cost);
                    prop_assert_eq!(m.tier(kind), before + 1);
                }
                _ => {
                    prop_assert_eq!(charged, 0);
                    prop_assert_eq!(m.tier(kind), before);
                }
            }
            prop_assert!(m.tier(kind) <= kind.max_tier());
        }
    }
}
