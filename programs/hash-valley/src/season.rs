use anchor_lang::prelude::*;
use crate::errors::HashValleyError;

pub const DAY: i64 = 24 * 60 * 60;
pub const WEEK: i64 = 7 * DAY;

/// Planting is only allowed during the first week of a season
pub const PLANTING_WINDOW: i64 = WEEK;
/// Harvest is only allowed during the final week of a season
pub const HARVEST_WINDOW: i64 = WEEK;

pub const DEFAULT_FIRST_SEASON_LENGTH: i64 = 3 * WEEK;
pub const DEFAULT_SEASON_LENGTH: i64 = 12 * WEEK;

/// Derives seasons from the game start timestamp. Nothing here is stored:
/// every answer is recomputed from `now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeasonClock {
    pub game_start: i64,
    pub first_season_length: i64,
    pub season_length: i64,
}

impl SeasonClock {
    pub fn started(&self) -> bool {
        self.game_start != 0
    }

    /// Season 0 is pre-game, season 1 is the short opening season
    pub fn current_season(&self, now: i64) -> u32 {
        if !self.started() || now < self.game_start {
            return 0;
        }
        let elapsed = now - self.game_start;
        if elapsed < self.first_season_length {
            return 1;
        }
        let later = (elapsed - self.first_season_length) / self.season_length;
        u32::try_from(later)
            .ok()
            .and_then(|s| s.checked_add(2))
            .unwrap_or(u32::MAX)
    }

    pub fn length_of(&self, season: u32) -> i64 {
        if season <= 1 {
            self.first_season_length
        } else {
            self.season_length
        }
    }

    pub fn season_start(&self, season: u32) -> Result<i64> {
        match season {
            0 => err!(HashValleyError::NotPlantingTime),
            1 => Ok(self.game_start),
            n => {
                let offset = self
                    .season_length
                    .checked_mul(i64::from(n - 2))
                    .ok_or(HashValleyError::Overflow)?;
                self.game_start
                    .checked_add(self.first_season_length)
                    .and_then(|t| t.checked_add(offset))
                    .ok_or_else(|| error!(HashValleyError::Overflow))
            }
        }
    }

    pub fn season_end(&self, season: u32) -> Result<i64> {
        self.season_start(season)?
            .checked_add(self.length_of(season))
            .ok_or_else(|| error!(HashValleyError::Overflow))
    }

    pub fn is_planting_time(&self, now: i64) -> Result<bool> {
        let season = self.current_season(now);
        if season == 0 {
            return Ok(false);
        }
        let start = self.season_start(season)?;
        Ok(now - start < PLANTING_WINDOW)
    }

    /// True when `now` falls in the final week of `season`
    pub fn is_harvest_time(&self, season: u32, now: i64) -> Result<bool> {
        if season == 0 || self.current_season(now) != season {
            return Ok(false);
        }
        let end = self.season_end(season)?;
        Ok(now >= end - HARVEST_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000;

    fn clock() -> SeasonClock {
        SeasonClock {
            game_start: START,
            first_season_length: DEFAULT_FIRST_SEASON_LENGTH,
            season_length: DEFAULT_SEASON_LENGTH,
        }
    }

    #[test]
    fn test_season_zero_before_start() {
        let unstarted = SeasonClock { game_start: 0, ..clock() };
        assert_eq!(unstarted.current_season(START), 0);
        assert_eq!(clock().current_season(START - 1), 0);
        assert!(!unstarted.is_planting_time(START).unwrap());
    }

    #[test]
    fn test_first_season_three_weeks_then_twelve() {
        let c = clock();
        assert_eq!(c.current_season(START), 1);
        assert_eq!(c.current_season(START + 3 * WEEK - 1), 1);
        assert_eq!(c.current_season(START + 3 * WEEK), 2);
        assert_eq!(c.current_season(START + 3 * WEEK + 12 * WEEK - 1), 2);
        assert_eq!(c.current_season(START + 3 * WEEK + 12 * WEEK + 1), 3);
        assert_eq!(c.current_season(START + 3 * WEEK + 24 * WEEK + 1), 4);
    }

    #[test]
    fn test_season_boundaries() {
        let c = clock();
        assert_eq!(c.season_start(1).unwrap(), START);
        assert_eq!(c.season_end(1).unwrap(), START + 3 * WEEK);
        assert_eq!(c.season_start(2).unwrap(), START + 3 * WEEK);
        assert_eq!(c.season_start(4).unwrap(), START + 27 * WEEK);
        assert_eq!(c.season_end(4).unwrap(), START + 39 * WEEK);
    }

    #[test]
    fn test_planting_window_is_first_week() {
        let c = clock();
        assert!(c.is_planting_time(START).unwrap());
        assert!(c.is_planting_time(START + WEEK - 1).unwrap());
        assert!(!c.is_planting_time(START + WEEK).unwrap());

        let second = c.season_start(2).unwrap();
        assert!(!c.is_planting_time(second - 1).unwrap());
        assert!(c.is_planting_time(second).unwrap());
        assert!(c.is_planting_time(second + 6 * DAY).unwrap());
        assert!(!c.is_planting_time(second + 8 * DAY).unwrap());
    }

    #[test]
    fn test_harvest_window_is_final_week() {
        let c = clock();
        assert!(!c.is_harvest_time(1, START + 13 * DAY).unwrap());
        assert!(c.is_harvest_time(1, START + 14 * DAY).unwrap());
        assert!(c.is_harvest_time(1, START + 21 * DAY - 1).unwrap());
        // day 21 is already season 2
        assert!(!c.is_harvest_time(1, START + 21 * DAY).unwrap());

        let second = c.season_start(2).unwrap();
        assert!(!c.is_harvest_time(2, second + 76 * DAY).unwrap());
        assert!(c.is_harvest_time(2, second + 77 * DAY).unwrap());
        assert!(!c.is_harvest_time(2, second + 84 * DAY).unwrap());
    }
}
