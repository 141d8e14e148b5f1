use anchor_lang::prelude::*;
use crate::curves::cellar_aged;
use crate::errors::HashValleyError;
use crate::utils::elapsed;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum BottleStatus {
    /// Held by a player
    Corked,
    /// In the cellar under a stake record
    Cellared,
    /// Burned on withdrawal, waiting to be rejuvenated
    Spoiled,
    /// Spent by a rejuvenation
    Rejuvenated,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct Bottle {
    pub id: u32,
    pub asset: Pubkey,
    pub vineyard_id: u32,
    #[max_len(4)]
    pub attributes: Vec<u8>,
    pub season: u32,
    pub harvested_at: i64,
    /// Total seconds spent maturing in the cellar
    pub cellared_for: i64,
    pub status: BottleStatus,
    pub bump: u8,
    pub _reserved: [u8; 16],
}

impl Bottle {
    pub const SEED: &'static [u8] = b"bottle";

    pub fn new(
        id: u32,
        asset: Pubkey,
        vineyard_id: u32,
        attributes: Vec<u8>,
        season: u32,
        harvested_at: i64,
        bump: u8,
    ) -> Self {
        Self {
            id,
            asset,
            vineyard_id,
            attributes,
            season,
            harvested_at,
            cellared_for: 0,
            status: BottleStatus::Corked,
            bump,
            _reserved: [0u8; 16],
        }
    }

    /// Seconds since harvest
    pub fn age(&self, now: i64) -> Result<i64> {
        elapsed(self.harvested_at, now)
    }

    /// Age plus the accelerated aging earned in the cellar
    pub fn nominal_age(&self, now: i64) -> Result<u64> {
        let age = u64::try_from(self.age(now)?).map_err(|_| HashValleyError::Overflow)?;
        age.checked_add(cellar_aged(self.cellared_for))
            .ok_or_else(|| error!(HashValleyError::Overflow))
    }

    pub fn cellar(&mut self) -> Result<()> {
        match self.status {
            BottleStatus::Corked => {
                self.status = BottleStatus::Cellared;
                Ok(())
            }
            BottleStatus::Cellared => err!(HashValleyError::AlreadyStaked),
            BottleStatus::Spoiled | BottleStatus::Rejuvenated => {
                err!(HashValleyError::BottleSpoiled)
            }
        }
    }

    pub fn spoil(&mut self) -> Result<()> {
        require!(
            self.status == BottleStatus::Cellared,
            HashValleyError::NotStaker
        );
        self.status = BottleStatus::Spoiled;
        Ok(())
    }

    /// Returns the bottle from the cellar, crediting the time it spent there
    pub fn mature(&mut self, staked_for: i64) -> Result<()> {
        require!(
            self.status == BottleStatus::Cellared,
            HashValleyError::NotStaker
        );
        self.cellared_for = self
            .cellared_for
            .checked_add(staked_for)
            .ok_or(HashValleyError::Overflow)?;
        self.status = BottleStatus::Corked;
        Ok(())
    }

    /// Consumes a spoiled record and returns the replacement bottle
    pub fn rejuvenate(&mut self, id: u32, asset: Pubkey, now: i64, bump: u8) -> Result<Bottle> {
        require!(
            self.status == BottleStatus::Spoiled,
            HashValleyError::CannotRejuvenate
        );
        self.status = BottleStatus::Rejuvenated;
        Ok(Bottle::new(
            id,
            asset,
            self.vineyard_id,
            self.attributes.clone(),
            self.season,
            now,
            bump,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{code_of, error_code};
    use crate::season::DAY;

    const HARVESTED: i64 = 1_700_000_000;

    fn bottle() -> Bottle {
        Bottle::new(0, Pubkey::new_unique(), 3, vec![12, 13, 4], 1, HARVESTED, 254)
    }

    #[test]
    fn test_age_is_linear_and_uncapped() {
        let b = bottle();
        assert_eq!(b.age(HARVESTED).unwrap(), 0);
        assert_eq!(b.age(HARVESTED + 400 * DAY).unwrap(), 400 * DAY);
        let err = b.age(HARVESTED - 1).unwrap_err();
        assert_eq!(error_code(err), code_of(HashValleyError::NegativeDuration));
    }

    #[test]
    fn test_nominal_age_adds_cellar_time() {
        let mut b = bottle();
        b.cellar().unwrap();
        b.mature(15 * DAY).unwrap();
        assert_eq!(b.cellared_for, 15 * DAY);
        assert_eq!(
            b.nominal_age(HARVESTED + 20 * DAY).unwrap(),
            20 * DAY as u64 + 1_576_800_000
        );
    }

    #[test]
    fn test_cellar_status_transitions() {
        let mut b = bottle();
        b.cellar().unwrap();
        assert_eq!(b.status, BottleStatus::Cellared);
        assert_eq!(
            error_code(b.cellar().unwrap_err()),
            code_of(HashValleyError::AlreadyStaked)
        );

        b.spoil().unwrap();
        assert_eq!(
            error_code(b.cellar().unwrap_err()),
            code_of(HashValleyError::BottleSpoiled)
        );
        assert_eq!(
            error_code(b.mature(DAY).unwrap_err()),
            code_of(HashValleyError::NotStaker)
        );
    }

    #[test]
    fn test_rejuvenate_once() {
        let mut b = bottle();
        let asset = Pubkey::new_unique();
        assert_eq!(
            error_code(b.rejuvenate(1, asset, HARVESTED + DAY, 250).unwrap_err()),
            code_of(HashValleyError::CannotRejuvenate)
        );

        b.cellar().unwrap();
        b.spoil().unwrap();
        let fresh = b.rejuvenate(1, asset, HARVESTED + DAY, 250).unwrap();
        assert_eq!(b.status, BottleStatus::Rejuvenated);
        assert_eq!(fresh.id, 1);
        assert_eq!(fresh.asset, asset);
        assert_eq!(fresh.attributes, b.attributes);
        assert_eq!(fresh.season, b.season);
        assert_eq!(fresh.harvested_at, HARVESTED + DAY);
        assert_eq!(fresh.status, BottleStatus::Corked);

        assert_eq!(
            error_code(b.rejuvenate(2, asset, HARVESTED + DAY, 250).unwrap_err()),
            code_of(HashValleyError::CannotRejuvenate)
        );
    }
}
