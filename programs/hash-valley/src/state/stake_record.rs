use anchor_lang::prelude::*;
use crate::curves::{cellar_aged, spoil_chance};
use crate::errors::HashValleyError;
use crate::season::DAY;
use crate::utils::elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakeOutcome {
    /// Bottle is burned and `reward` ferment base units go to the staker
    Spoiled { days: u64, reward: u64 },
    /// Bottle goes back to the staker having matured for `staked_for` seconds
    Matured { days: u64, staked_for: i64 },
}

#[account]
#[derive(InitSpace)]
pub struct StakeRecord {
    pub bottle_asset: Pubkey,
    pub bottle_id: u32,
    pub staker: Pubkey,
    pub staked_at: i64,
    pub bump: u8,
}

impl StakeRecord {
    pub const SEED: &'static [u8] = b"stake";

    pub fn days_staked(&self, now: i64) -> Result<u64> {
        Ok((elapsed(self.staked_at, now)? / DAY) as u64)
    }

    /// Settles the stake against a roll in basis points. A spoiled bottle pays
    /// for the nominal age it gained, in days.
    pub fn resolve(&self, now: i64, roll: u16, ferment_per_aged_day: u64) -> Result<StakeOutcome> {
        let staked_for = elapsed(self.staked_at, now)?;
        let days = (staked_for / DAY) as u64;

        if roll < spoil_chance(days) {
            let aged_days = cellar_aged(staked_for) / DAY as u64;
            let reward = aged_days
                .checked_mul(ferment_per_aged_day)
                .ok_or(HashValleyError::Overflow)?;
            Ok(StakeOutcome::Spoiled { days, reward })
        } else {
            Ok(StakeOutcome::Matured { days, staked_for })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{code_of, error_code};
    use crate::state::{Bottle, BottleStatus};
    use crate::utils::roll_bps;

    const STAKED: i64 = 1_700_000_000;
    const PER_AGED_DAY: u64 = 1;
    /// Twelve 30 day months, where cellar aging tops out
    const CELLAR_YEAR: i64 = 31_104_000;
    /// 13 billion years, in days
    const FULL_AGING_DAYS: u64 = 4_745_000_000_000;

    fn record() -> StakeRecord {
        StakeRecord {
            bottle_asset: Pubkey::new_unique(),
            bottle_id: 0,
            staker: Pubkey::new_unique(),
            staked_at: STAKED,
            bump: 255,
        }
    }

    #[test]
    fn test_days_staked() {
        let r = record();
        assert_eq!(r.days_staked(STAKED + DAY - 1).unwrap(), 0);
        assert_eq!(r.days_staked(STAKED + 24 * DAY + 5).unwrap(), 24);
        let err = r.days_staked(STAKED - 1).unwrap_err();
        assert_eq!(error_code(err), code_of(HashValleyError::NegativeDuration));
    }

    #[test]
    fn test_roll_against_spoil_chance() {
        let r = record();
        let now = STAKED + 24 * DAY;
        // 24 days in the cellar age a bottle 80 years
        assert_eq!(
            r.resolve(now, 6_899, PER_AGED_DAY).unwrap(),
            StakeOutcome::Spoiled { days: 24, reward: 80 * 365 }
        );
        assert_eq!(
            r.resolve(now, 6_900, PER_AGED_DAY).unwrap(),
            StakeOutcome::Matured { days: 24, staked_for: 24 * DAY }
        );
    }

    #[test]
    fn test_reward_follows_cellar_aging() {
        let r = record();
        assert_eq!(
            r.resolve(STAKED + DAY - 1, 0, PER_AGED_DAY).unwrap(),
            StakeOutcome::Spoiled { days: 0, reward: 1_216 }
        );
        assert_eq!(
            r.resolve(STAKED + CELLAR_YEAR, 0, 3).unwrap(),
            StakeOutcome::Spoiled { days: 360, reward: 3 * FULL_AGING_DAYS }
        );
        let err = r.resolve(STAKED + CELLAR_YEAR, 0, u64::MAX).unwrap_err();
        assert_eq!(error_code(err), code_of(HashValleyError::Overflow));
    }

    #[test]
    fn test_withdraw_is_exactly_one_outcome() {
        for roll in [0u16, 499, 500, 5_000, 9_999] {
            let r = record();
            let mut b = Bottle::new(0, r.bottle_asset, 0, vec![0, 0, 0], 1, STAKED - DAY, 255);
            b.cellar().unwrap();

            match r.resolve(STAKED + 400 * DAY, roll, PER_AGED_DAY).unwrap() {
                StakeOutcome::Spoiled { reward, .. } => {
                    b.spoil().unwrap();
                    assert_eq!(reward, FULL_AGING_DAYS);
                    assert_eq!(b.status, BottleStatus::Spoiled);
                    assert_eq!(b.cellared_for, 0);
                }
                StakeOutcome::Matured { staked_for, .. } => {
                    b.mature(staked_for).unwrap();
                    assert_eq!(b.status, BottleStatus::Corked);
                    assert_eq!(b.cellared_for, 400 * DAY);
                }
            }
            assert_eq!(roll < 500, b.status == BottleStatus::Spoiled);
        }
    }

    #[test]
    fn test_year_in_cellar_aggregate_reward() {
        let reward_per_year = cellar_aged(CELLAR_YEAR) / DAY as u64 * PER_AGED_DAY;
        assert_eq!(reward_per_year, FULL_AGING_DAYS);
        let mut spoiled = 0u64;
        let mut total_reward = 0u64;

        for id in 0u32..3 {
            let r = StakeRecord { bottle_id: id, ..record() };
            let roll = roll_bps(&[&b"withdraw"[..], &id.to_le_bytes()[..]]);
            match r.resolve(STAKED + CELLAR_YEAR, roll, PER_AGED_DAY).unwrap() {
                StakeOutcome::Spoiled { days, reward } => {
                    assert_eq!(days, 360);
                    assert!(roll < 500);
                    spoiled += 1;
                    total_reward += reward;
                }
                StakeOutcome::Matured { staked_for, .. } => {
                    assert!(roll >= 500);
                    assert_eq!(staked_for, CELLAR_YEAR);
                }
            }
        }
        assert_eq!(total_reward, spoiled * reward_per_year);
    }
}
