//! D&D 5e reference tables for encounter building
//!
//! All tables are fixed at compile time. Range lookups walk sorted arrays,
//! ratings are matched exactly against the published values.

use serde::{Deserialize, Serialize};

/// Per-character XP thresholds for a single character level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpThresholds {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub deadly: u32,
}

impl XpThresholds {
    const fn new(easy: u32, medium: u32, hard: u32, deadly: u32) -> Self {
        Self {
            easy,
            medium,
            hard,
            deadly,
        }
    }

    /// Scale per-character thresholds to a whole party, saturating at `u32::MAX`
    pub fn scaled(&self, party_size: u32) -> Self {
        Self {
            easy: self.easy.saturating_mul(party_size),
            medium: self.medium.saturating_mul(party_size),
            hard: self.hard.saturating_mul(party_size),
            deadly: self.deadly.saturating_mul(party_size),
        }
    }
}

pub const MIN_PARTY_LEVEL: u32 = 1;
pub const MAX_PARTY_LEVEL: u32 = 20;

/// Thresholds indexed by character level - 1
const XP_THRESHOLDS_BY_LEVEL: [XpThresholds; 20] = [
    XpThresholds::new(25, 50, 75, 100),
    XpThresholds::new(50, 100, 150, 200),
    XpThresholds::new(75, 150, 225, 400),
    XpThresholds::new(125, 250, 375, 500),
    XpThresholds::new(250, 500, 750, 1100),
    XpThresholds::new(300, 600, 900, 1400),
    XpThresholds::new(350, 750, 1100, 1700),
    XpThresholds::new(450, 900, 1400, 2100),
    XpThresholds::new(550, 1100, 1600, 2400),
    XpThresholds::new(600, 1200, 1900, 2800),
    XpThresholds::new(800, 1600, 2400, 3600),
    XpThresholds::new(1000, 2000, 3000, 4500),
    XpThresholds::new(1100, 2200, 3400, 5100),
    XpThresholds::new(1250, 2500, 3800, 5700),
    XpThresholds::new(1400, 2800, 4300, 6400),
    XpThresholds::new(1600, 3200, 4800, 7200),
    XpThresholds::new(1850, 3700, 5500, 8300),
    XpThresholds::new(2100, 4200, 6300, 9500),
    XpThresholds::new(2400, 4900, 7300, 10900),
    XpThresholds::new(2800, 5700, 8500, 12700),
];

/// Base XP awarded per creature of a given challenge rating
const XP_BY_CHALLENGE_RATING: [(f64, u32); 34] = [
    (0.0, 0),
    (0.125, 25),
    (0.25, 50),
    (0.5, 100),
    (1.0, 200),
    (2.0, 450),
    (3.0, 700),
    (4.0, 1100),
    (5.0, 1800),
    (6.0, 2300),
    (7.0, 2900),
    (8.0, 3900),
    (9.0, 5000),
    (10.0, 5900),
    (11.0, 7200),
    (12.0, 8400),
    (13.0, 10000),
    (14.0, 11500),
    (15.0, 13000),
    (16.0, 15000),
    (17.0, 18000),
    (18.0, 20000),
    (19.0, 22000),
    (20.0, 25000),
    (21.0, 33000),
    (22.0, 41000),
    (23.0, 50000),
    (24.0, 62000),
    (25.0, 75000),
    (26.0, 90000),
    (27.0, 105000),
    (28.0, 120000),
    (29.0, 135000),
    (30.0, 155000),
];

/// Encounter multiplier tiers keyed by the smallest monster count of the tier
const MONSTER_COUNT_MULTIPLIERS: [(u32, f64); 6] = [
    (1, 1.0),
    (2, 1.5),
    (3, 2.0),
    (7, 2.5),
    (11, 3.0),
    (15, 4.0),
];

/// XP for a challenge rating. Ratings not in the table are worth nothing.
pub fn xp_for_rating(challenge_rating: f64) -> u32 {
    XP_BY_CHALLENGE_RATING
        .iter()
        .find(|(rating, _)| (rating - challenge_rating).abs() < f64::EPSILON)
        .map(|(_, xp)| *xp)
        .unwrap_or(0)
}

/// Per-character thresholds for a level. Levels outside 1-20 use level 20.
pub fn thresholds_for_level(level: u32) -> XpThresholds {
    if (MIN_PARTY_LEVEL..=MAX_PARTY_LEVEL).contains(&level) {
        XP_THRESHOLDS_BY_LEVEL[(level - 1) as usize]
    } else {
        XP_THRESHOLDS_BY_LEVEL[(MAX_PARTY_LEVEL - 1) as usize]
    }
}

/// Monster-count multiplier.
///
/// Counts past the last tier use the highest multiplier. A count of zero has no
/// tier of its own and resolves to the highest multiplier as well; with zero
/// base XP the adjusted total is zero either way.
pub fn multiplier_for_count(total_monsters: u32) -> f64 {
    let highest = MONSTER_COUNT_MULTIPLIERS[MONSTER_COUNT_MULTIPLIERS.len() - 1].1;
    if total_monsters == 0 {
        return highest;
    }
    MONSTER_COUNT_MULTIPLIERS
        .iter()
        .rev()
        .find(|(min_count, _)| total_monsters >= *min_count)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(highest)
}
