use anchor_lang::prelude::*;
use crate::curves::sale_price;
use crate::season::{SeasonClock, DEFAULT_FIRST_SEASON_LENGTH, DEFAULT_SEASON_LENGTH};

pub const CELLAR_SEED: &[u8] = b"cellar";

pub const DEFAULT_MAX_VINEYARDS: u32 = 5_500;
pub const DEFAULT_FREE_VINEYARDS: u32 = 1_000;
pub const DEFAULT_PRICE_TIER_SIZE: u32 = 500;
/// 0.01 SOL
pub const DEFAULT_PRICE_STEP: u64 = 10_000_000;
pub const DEFAULT_SPRINKLER_PRICE: u64 = 10_000_000;
pub const DEFAULT_SPRINKLER_SEASONS: i64 = 12;
/// Ferment base units per day of nominal age a spoiled bottle earned in the cellar
pub const DEFAULT_FERMENT_PER_AGED_DAY: u64 = 1;
pub const DEFAULT_REJUVENATION_COST: u64 = 3_600;

/// Product constants supplied once at initialization
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameParams {
    pub first_season_length: i64,
    pub season_length: i64,
    pub sprinkler_duration: i64,
    pub sprinkler_price: u64,
    pub max_vineyards: u32,
    pub free_vineyards: u32,
    pub price_step: u64,
    pub price_tier_size: u32,
    pub ferment_per_aged_day: u64,
    pub rejuvenation_cost: u64,
    pub vineyard_uri_base: String,
    pub bottle_uri_base: String,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            first_season_length: DEFAULT_FIRST_SEASON_LENGTH,
            season_length: DEFAULT_SEASON_LENGTH,
            sprinkler_duration: DEFAULT_SPRINKLER_SEASONS * DEFAULT_SEASON_LENGTH,
            sprinkler_price: DEFAULT_SPRINKLER_PRICE,
            max_vineyards: DEFAULT_MAX_VINEYARDS,
            free_vineyards: DEFAULT_FREE_VINEYARDS,
            price_step: DEFAULT_PRICE_STEP,
            price_tier_size: DEFAULT_PRICE_TIER_SIZE,
            ferment_per_aged_day: DEFAULT_FERMENT_PER_AGED_DAY,
            rejuvenation_cost: DEFAULT_REJUVENATION_COST,
            vineyard_uri_base: String::new(),
            bottle_uri_base: String::new(),
        }
    }
}

#[account]
#[derive(InitSpace)]
pub struct GameConfig {
    pub authority: Pubkey,
    /// Receives vineyard sale and sprinkler lamports
    pub treasury: Pubkey,
    pub grape_mint: Pubkey,
    pub ferment_mint: Pubkey,
    /// Metaplex Core collections, update authority is this PDA
    pub vineyard_collection: Pubkey,
    pub bottle_collection: Pubkey,
    #[max_len(128)]
    pub vineyard_uri_base: String,
    #[max_len(128)]
    pub bottle_uri_base: String,
    /// 0 until `start_game`
    pub game_start: i64,
    pub first_season_length: i64,
    pub season_length: i64,
    pub sprinkler_duration: i64,
    pub sprinkler_price: u64,
    pub max_vineyards: u32,
    pub free_vineyards: u32,
    pub price_step: u64,
    pub price_tier_size: u32,
    pub ferment_per_aged_day: u64,
    pub rejuvenation_cost: u64,
    pub next_vineyard_id: u32,
    pub next_bottle_id: u32,
    pub bump: u8,
    pub cellar_bump: u8,
    pub _reserved: [u8; 64],
}

impl GameConfig {
    pub const SEED: &'static [u8] = b"game_config";

    pub fn season_clock(&self) -> SeasonClock {
        SeasonClock {
            game_start: self.game_start,
            first_season_length: self.first_season_length,
            season_length: self.season_length,
        }
    }

    /// Lamport price of the next vineyard
    pub fn vineyard_price(&self) -> u64 {
        sale_price(
            self.next_vineyard_id,
            self.free_vineyards,
            self.price_step,
            self.price_tier_size,
        )
    }
}
