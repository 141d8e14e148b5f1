//! Pure yield, cost and spoilage curves. Nothing in here reads an account.

use crate::season::DAY;

pub const BPS_DENOMINATOR: u16 = 10_000;

const YEAR: u128 = 365 * DAY as u128;
const MONTH: i64 = 30 * DAY;

pub const BASE_MAX_GRAPES: u64 = 10_000;
/// Experience at which the bonus reaches half of `BASE_MAX_GRAPES`
pub const EXPERIENCE_HALF_BONUS: u64 = 1_000;
pub const GRAPES_PER_EXPERIENCE: u64 = 100;
pub const HARVEST_EXPERIENCE: u64 = 100;

pub const WITHER_BASE_COST: u64 = 1_000;
pub const WITHER_MIN_COST: u64 = 100;

/// (first day of plateau, spoil chance in bps), sorted by day
const SPOIL_TABLE: [(u64, u16); 16] = [
    (0, 8600),
    (7, 8000),
    (14, 7500),
    (21, 6900),
    (30, 6000),
    (60, 5200),
    (90, 4400),
    (120, 3700),
    (150, 3000),
    (180, 2100),
    (210, 1700),
    (240, 1300),
    (270, 900),
    (300, 750),
    (330, 600),
    (360, 500),
];

/// Nominal age in years reached at the start of each 30 day month in the cellar.
/// The last entry is the ceiling.
const AGING_MARKS: [u128; 13] = [
    0,
    100,
    250,
    500,
    1_000,
    1_600,
    2_700,
    5_000,
    10_000,
    1_000_000,
    100_000_000,
    4_000_000_000,
    13_000_000_000,
];

/// Chance in basis points that a bottle staked for `days` spoils on withdrawal
pub fn spoil_chance(days: u64) -> u16 {
    SPOIL_TABLE
        .iter()
        .rev()
        .find(|(from, _)| days >= *from)
        .map(|(_, bps)| *bps)
        .unwrap_or(SPOIL_TABLE[0].1)
}

/// Seconds of nominal age gained by `seconds` spent in the cellar.
/// Linear inside each month, accelerating month over month, flat after the
/// twelfth month.
pub fn cellar_aged(seconds: i64) -> u64 {
    if seconds <= 0 {
        return 0;
    }
    let month = (seconds / MONTH) as usize;
    let ceiling = AGING_MARKS[AGING_MARKS.len() - 1] * YEAR;
    if month + 1 >= AGING_MARKS.len() {
        return ceiling as u64;
    }

    let from = AGING_MARKS[month] * YEAR;
    let span = (AGING_MARKS[month + 1] - AGING_MARKS[month]) * YEAR;
    let into = (seconds % MONTH) as u128;
    (from + span * into / MONTH as u128).min(ceiling) as u64
}

/// Grape capacity of a cycle, growing with experience with diminishing returns
pub fn max_grapes(experience: u64) -> u64 {
    let xp = experience as u128;
    let base = BASE_MAX_GRAPES as u128;
    let bonus = base * xp / (xp + EXPERIENCE_HALF_BONUS as u128);
    (base + bonus) as u64
}

/// Total grapes grown `elapsed` seconds into a cycle of `cycle_length`
pub fn grapes_grown(cycle_max: u64, elapsed: i64, cycle_length: i64) -> u64 {
    if elapsed <= 0 || cycle_length <= 0 {
        return 0;
    }
    let elapsed = elapsed.min(cycle_length) as u128;
    (cycle_max as u128 * elapsed / cycle_length as u128) as u64
}

/// Chance in bps that a bottle harvest fails, proportional to the share of the
/// cycle already taken as grapes
pub fn harvest_failure_chance(grapes_harvested: u64, cycle_max: u64) -> u16 {
    if cycle_max == 0 {
        return 0;
    }
    let bps = grapes_harvested as u128 * BPS_DENOMINATOR as u128 / cycle_max as u128;
    bps.min(BPS_DENOMINATOR as u128) as u16
}

/// Ferment cost of withering a vineyard `elapsed` seconds into its cycle.
/// A vineyard close to maturity is cheaper to attack.
pub fn wither_cost(elapsed: i64, cycle_length: i64, vitalized: bool) -> u64 {
    let cost = if cycle_length <= 0 {
        WITHER_MIN_COST
    } else {
        let remaining = (cycle_length - elapsed.max(0)).max(0) as u128;
        let linear = WITHER_BASE_COST as u128 * remaining / cycle_length as u128;
        (linear as u64).max(WITHER_MIN_COST)
    };
    if vitalized {
        cost.saturating_mul(2)
    } else {
        cost
    }
}

/// Lamport price of the next vineyard given the current supply.
/// Free below `free_supply`, then one `price_step` more per `tier_size` minted.
pub fn sale_price(supply: u32, free_supply: u32, price_step: u64, tier_size: u32) -> u64 {
    if supply < free_supply || tier_size == 0 {
        return 0;
    }
    let tier = u64::from((supply - free_supply) / tier_size) + 1;
    tier.saturating_mul(price_step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spoil_chance_plateaus() {
        let days = [1, 24, 163, 180, 270, 360, 362, 364, 365, 366, 370];
        let chances: Vec<u16> = days.iter().map(|d| spoil_chance(*d)).collect();
        assert_eq!(
            chances,
            vec![8600, 6900, 3000, 2100, 900, 500, 500, 500, 500, 500, 500]
        );
    }

    #[test]
    fn test_spoil_chance_never_increases() {
        let mut previous = spoil_chance(0);
        for day in 1..1_000 {
            let chance = spoil_chance(day);
            assert!(chance <= previous, "day {}", day);
            previous = chance;
        }
        assert_eq!(spoil_chance(u64::MAX), 500);
    }

    #[test]
    fn test_cellar_aged_values() {
        let day = DAY;
        let month = 30 * day;
        let inputs = [
            15 * day,
            5 * month + day,
            11 * month,
            11 * month + day,
            11 * month + 29 * day,
            11 * month + 30 * day,
            11 * month + 31 * day,
            11 * month + 67 * day,
        ];
        let aged: Vec<u64> = inputs.iter().map(|s| cellar_aged(*s)).collect();
        assert_eq!(
            aged,
            vec![
                1_576_800_000,
                51_613_920_000,
                126_144_000_000_000_000,
                135_604_800_000_000_000,
                400_507_200_000_000_000,
                409_968_000_000_000_000,
                409_968_000_000_000_000,
                409_968_000_000_000_000,
            ]
        );
    }

    #[test]
    fn test_cellar_aged_monotonic() {
        assert_eq!(cellar_aged(-5), 0);
        let mut previous = 0;
        for hour in 0..(400 * 24) {
            let aged = cellar_aged(hour * 3600);
            assert!(aged >= previous);
            previous = aged;
        }
    }

    #[test]
    fn test_max_grapes_diminishing() {
        assert_eq!(max_grapes(0), 10_000);
        assert_eq!(max_grapes(1_000), 15_000);
        assert!(max_grapes(100) > 10_000);
        let early = max_grapes(200) - max_grapes(100);
        let late = max_grapes(5_100) - max_grapes(5_000);
        assert!(early > late);
        assert!(max_grapes(u64::MAX) <= 20_000);
    }

    #[test]
    fn test_grapes_grown_matches_first_season() {
        let season = 21 * DAY;
        assert_eq!(grapes_grown(10_000, 5 * DAY, season), 2_380);
        assert_eq!(grapes_grown(10_000, 19 * DAY, season), 9_047);
        assert_eq!(grapes_grown(10_000, 30 * DAY, season), 10_000);
        assert_eq!(grapes_grown(10_000, -1, season), 0);
    }

    #[test]
    fn test_harvest_failure_chance() {
        assert_eq!(harvest_failure_chance(0, 10_000), 0);
        assert_eq!(harvest_failure_chance(9_047, 10_000), 9_047);
        assert_eq!(harvest_failure_chance(20_000, 10_000), 10_000);
        assert_eq!(harvest_failure_chance(5, 0), 0);
    }

    #[test]
    fn test_wither_cost_decreases_over_cycle() {
        let cycle = 84 * DAY;
        assert_eq!(wither_cost(0, cycle, false), 1_000);
        assert_eq!(wither_cost(42 * DAY, cycle, false), 500);
        assert_eq!(wither_cost(83 * DAY, cycle, false), 100);
        assert_eq!(wither_cost(90 * DAY, cycle, false), 100);
        assert_eq!(wither_cost(42 * DAY, cycle, true), 1_000);
    }

    #[test]
    fn test_sale_price_tiers() {
        let step = 10_000_000;
        let supplies = [999, 1000, 1500, 2000, 2500, 3000, 3500, 4000, 4500, 5000, 5499, 5500];
        let prices: Vec<u64> = supplies.iter().map(|s| sale_price(*s, 1_000, step, 500)).collect();
        let expected: Vec<u64> = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 10].iter().map(|t| t * step).collect();
        assert_eq!(prices, expected);
    }
}
