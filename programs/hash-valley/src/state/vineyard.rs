use anchor_lang::prelude::*;
use crate::climate;
use crate::curves::{
    self, grapes_grown, harvest_failure_chance, GRAPES_PER_EXPERIENCE, HARVEST_EXPERIENCE,
};
use crate::errors::HashValleyError;
use crate::season::{SeasonClock, DAY};
use crate::utils::elapsed;

/// How long a withered vineyard survives without being defended
pub const WITHER_KILL_TIME: i64 = DAY;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HarvestOutcome {
    Bottled { season: u32 },
    Failed { season: u32 },
}

impl HarvestOutcome {
    pub fn season(&self) -> u32 {
        match self {
            HarvestOutcome::Bottled { season } | HarvestOutcome::Failed { season } => *season,
        }
    }
}

#[account]
#[derive(InitSpace)]
pub struct Vineyard {
    pub id: u32,
    /// Metaplex Core asset backing this vineyard
    pub asset: Pubkey,
    /// location, elevation, soil and (islands only) exposure
    #[max_len(4)]
    pub attributes: Vec<u8>,
    /// 0 = never planted
    pub planted_at: i64,
    pub planted_season: u32,
    pub watered_at: i64,
    pub last_season_harvested: u32,
    pub experience: u64,
    /// max_grapes snapshot taken at planting
    pub cycle_max_grapes: u64,
    pub grapes_harvested: u64,
    /// 0 = no sprinkler
    pub sprinkler_expiry: i64,
    pub wither_attacker: Pubkey,
    /// 0 = not under attack
    pub wither_started_at: i64,
    /// Season the latest attack was cast in
    pub wither_season: u32,
    pub vitalized_season: u32,
    pub bump: u8,
    pub _reserved: [u8; 28],
}

impl Vineyard {
    pub const SEED: &'static [u8] = b"vineyard";

    pub fn new(id: u32, asset: Pubkey, attributes: Vec<u8>, bump: u8) -> Self {
        Self {
            id,
            asset,
            attributes,
            planted_at: 0,
            planted_season: 0,
            watered_at: 0,
            last_season_harvested: 0,
            experience: 0,
            cycle_max_grapes: 0,
            grapes_harvested: 0,
            sprinkler_expiry: 0,
            wither_attacker: Pubkey::default(),
            wither_started_at: 0,
            wither_season: 0,
            vitalized_season: 0,
            bump,
            _reserved: [0u8; 28],
        }
    }

    pub fn min_water_time(&self) -> i64 {
        climate::min_water_time(&self.attributes)
    }

    pub fn water_window(&self) -> i64 {
        climate::water_window(&self.attributes)
    }

    pub fn max_grapes(&self) -> u64 {
        curves::max_grapes(self.experience)
    }

    pub fn is_planted_in(&self, season: u32) -> bool {
        season != 0 && self.planted_at != 0 && self.planted_season == season
    }

    pub fn is_under_attack(&self) -> bool {
        self.wither_started_at != 0
    }

    pub fn has_sprinkler(&self, now: i64) -> bool {
        self.sprinkler_expiry > now
    }

    /// An attack that has run its course
    pub fn is_withered(&self, now: i64) -> Result<bool> {
        if !self.is_under_attack() {
            return Ok(false);
        }
        Ok(elapsed(self.wither_started_at, now)? >= WITHER_KILL_TIME)
    }

    pub fn is_alive(&self, now: i64) -> Result<bool> {
        if self.planted_at == 0 || self.is_withered(now)? {
            return Ok(false);
        }
        if self.has_sprinkler(now) {
            return Ok(true);
        }
        let dry_for = elapsed(self.watered_at, now)?;
        Ok(dry_for <= self.min_water_time() + self.water_window())
    }

    pub fn plant(&mut self, clock: &SeasonClock, now: i64) -> Result<u32> {
        let season = clock.current_season(now);
        require!(
            season != 0 && clock.is_planting_time(now)?,
            HashValleyError::NotPlantingTime
        );
        require!(!self.is_planted_in(season), HashValleyError::AlreadyPlanted);

        self.planted_at = now;
        self.planted_season = season;
        self.watered_at = now;
        self.grapes_harvested = 0;
        self.cycle_max_grapes = self.max_grapes();
        if self.wither_season != season {
            self.wither_attacker = Pubkey::default();
            self.wither_started_at = 0;
        }
        Ok(season)
    }

    pub fn water(&mut self, now: i64) -> Result<()> {
        require!(self.planted_at != 0, HashValleyError::NotPlanted);
        require!(!self.is_withered(now)?, HashValleyError::VineyardNotAlive);

        let since = elapsed(self.watered_at, now)?;
        let min = self.min_water_time();
        require!(
            since >= min && since <= min + self.water_window(),
            HashValleyError::CannotWater
        );

        self.watered_at = now;
        Ok(())
    }

    /// Claims this season's harvest. `roll` is a uniform draw in basis points;
    /// rolls under the failure chance produce no bottle.
    pub fn harvest(&mut self, clock: &SeasonClock, now: i64, roll: u16) -> Result<HarvestOutcome> {
        let season = clock.current_season(now);
        require!(
            self.is_planted_in(season) && clock.is_harvest_time(season, now)?,
            HashValleyError::NotHarvestTime
        );
        require!(
            self.last_season_harvested != season,
            HashValleyError::AlreadyHarvested
        );
        require!(self.is_alive(now)?, HashValleyError::VineyardNotAlive);

        self.last_season_harvested = season;

        if roll < harvest_failure_chance(self.grapes_harvested, self.cycle_max_grapes) {
            return Ok(HarvestOutcome::Failed { season });
        }

        let gained = if self.vitalized_season == season {
            HARVEST_EXPERIENCE * 2
        } else {
            HARVEST_EXPERIENCE
        };
        self.experience = self
            .experience
            .checked_add(gained)
            .ok_or(HashValleyError::Overflow)?;
        Ok(HarvestOutcome::Bottled { season })
    }

    /// Takes every grape grown since the last grape harvest, returning the amount
    pub fn harvest_grapes(&mut self, clock: &SeasonClock, now: i64) -> Result<u64> {
        let season = clock.current_season(now);
        require!(self.is_planted_in(season), HashValleyError::NotPlanted);
        require!(
            self.last_season_harvested != season,
            HashValleyError::AlreadyHarvested
        );
        require!(self.is_alive(now)?, HashValleyError::VineyardNotAlive);

        let grown = grapes_grown(
            self.cycle_max_grapes,
            elapsed(self.planted_at, now)?,
            clock.length_of(season),
        );
        let amount = grown.saturating_sub(self.grapes_harvested);
        require!(amount > 0, HashValleyError::NothingToHarvest);

        self.grapes_harvested = self
            .grapes_harvested
            .checked_add(amount)
            .ok_or(HashValleyError::Overflow)?;
        self.experience = self
            .experience
            .checked_add(amount / GRAPES_PER_EXPERIENCE)
            .ok_or(HashValleyError::Overflow)?;
        Ok(amount)
    }

    pub fn wither_cost(&self, clock: &SeasonClock, now: i64) -> Result<u64> {
        let season = clock.current_season(now);
        Ok(curves::wither_cost(
            elapsed(self.planted_at, now)?,
            clock.length_of(self.planted_season),
            self.vitalized_season == season,
        ))
    }

    /// Starts an attack, returning the ferment cost the attacker owes.
    ///
    /// A vineyard that is not planted yet can be hit at full price. The attack
    /// lands if it gets planted later in the same season and is dropped by a
    /// planting in any later one.
    pub fn wither(&mut self, attacker: Pubkey, clock: &SeasonClock, now: i64) -> Result<u64> {
        let season = clock.current_season(now);
        require!(season != 0, HashValleyError::NotPlanted);
        require!(
            !self.is_under_attack() || self.wither_season != season,
            HashValleyError::AlreadyWithering
        );

        let cost = if self.is_planted_in(season) {
            require!(
                self.last_season_harvested != season,
                HashValleyError::AlreadyHarvested
            );
            require!(self.is_alive(now)?, HashValleyError::VineyardNotAlive);
            self.wither_cost(clock, now)?
        } else {
            curves::wither_cost(0, clock.length_of(season), self.vitalized_season == season)
        };

        self.wither_attacker = attacker;
        self.wither_started_at = now;
        self.wither_season = season;
        Ok(cost)
    }

    pub fn defend(&mut self, now: i64) -> Result<()> {
        require!(self.is_under_attack(), HashValleyError::NotWithering);
        require!(!self.is_withered(now)?, HashValleyError::AlreadyWithered);

        self.wither_attacker = Pubkey::default();
        self.wither_started_at = 0;
        Ok(())
    }

    pub fn vitalize(&mut self, clock: &SeasonClock, now: i64) -> Result<u32> {
        let season = clock.current_season(now);
        require!(self.is_planted_in(season), HashValleyError::NotPlanted);
        require!(
            self.vitalized_season != season,
            HashValleyError::AlreadyVitalized
        );
        require!(self.is_alive(now)?, HashValleyError::VineyardNotAlive);

        self.vitalized_season = season;
        Ok(season)
    }

    pub fn install_sprinkler(&mut self, now: i64, duration: i64) -> Result<i64> {
        require!(!self.has_sprinkler(now), HashValleyError::SprinklerActive);
        self.sprinkler_expiry = now
            .checked_add(duration)
            .ok_or(HashValleyError::Overflow)?;
        Ok(self.sprinkler_expiry)
    }
}
