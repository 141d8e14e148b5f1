use anchor_lang::prelude::*;

pub mod assets;
pub mod climate;
pub mod curves;
pub mod errors;
pub mod events;
pub mod season;
pub mod state;
pub mod utils;
pub mod instructions;

use instructions::*;
use state::GameParams;

declare_id!("9TCGzdPyyAgSYAcEoMQCXVQ2EuFzjQWS1sk6QEamNkkx");

#[program]
pub mod hash_valley {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, params: GameParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        treasury: Option<Pubkey>,
        vineyard_collection: Option<Pubkey>,
        bottle_collection: Option<Pubkey>,
        vineyard_uri_base: Option<String>,
        bottle_uri_base: Option<String>,
        sprinkler_price: Option<u64>,
        price_step: Option<u64>,
        ferment_per_aged_day: Option<u64>,
        rejuvenation_cost: Option<u64>,
    ) -> Result<()> {
        instructions::update_config::handler(
            ctx,
            treasury,
            vineyard_collection,
            bottle_collection,
            vineyard_uri_base,
            bottle_uri_base,
            sprinkler_price,
            price_step,
            ferment_per_aged_day,
            rejuvenation_cost,
        )
    }

    pub fn transfer_collection_authority(
        ctx: Context<TransferCollectionAuthority>,
    ) -> Result<()> {
        instructions::transfer_collection_authority::handler(ctx)
    }

    pub fn start_game(ctx: Context<StartGame>) -> Result<()> {
        instructions::start_game::handler(ctx)
    }

    pub fn new_vineyard(ctx: Context<NewVineyard>, attributes: Vec<u8>) -> Result<()> {
        instructions::new_vineyard::handler(ctx, attributes)
    }

    pub fn buy_sprinkler(ctx: Context<BuySprinkler>) -> Result<()> {
        instructions::buy_sprinkler::handler(ctx)
    }

    pub fn plant(ctx: Context<Plant>) -> Result<()> {
        instructions::plant::handler(ctx)
    }

    pub fn plant_multiple<'info>(
        ctx: Context<'_, '_, 'info, 'info, PlantMultiple<'info>>,
    ) -> Result<()> {
        instructions::plant::handler_multiple(ctx)
    }

    pub fn water(ctx: Context<Water>) -> Result<()> {
        instructions::water::handler(ctx)
    }

    pub fn water_multiple<'info>(
        ctx: Context<'_, '_, 'info, 'info, WaterMultiple<'info>>,
    ) -> Result<()> {
        instructions::water::handler_multiple(ctx)
    }

    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        instructions::harvest::handler(ctx)
    }

    pub fn harvest_multiple<'info>(
        ctx: Context<'_, '_, 'info, 'info, HarvestMultiple<'info>>,
    ) -> Result<()> {
        instructions::harvest::handler_multiple(ctx)
    }

    pub fn harvest_grapes(ctx: Context<HarvestGrapes>) -> Result<()> {
        instructions::harvest_grapes::handler(ctx)
    }

    pub fn wither(ctx: Context<Wither>) -> Result<()> {
        instructions::spells::wither_handler(ctx)
    }

    pub fn defend(ctx: Context<TendVineyard>) -> Result<()> {
        instructions::spells::defend_handler(ctx)
    }

    pub fn vitality(ctx: Context<TendVineyard>) -> Result<()> {
        instructions::spells::vitality_handler(ctx)
    }

    pub fn batch_spell<'info>(
        ctx: Context<'_, '_, 'info, 'info, BatchSpell<'info>>,
        spell: Spell,
    ) -> Result<()> {
        instructions::spells::batch_handler(ctx, spell)
    }

    pub fn stake(ctx: Context<Stake>) -> Result<()> {
        instructions::stake::handler(ctx)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    pub fn rejuvenate(ctx: Context<Rejuvenate>) -> Result<()> {
        instructions::rejuvenate::handler(ctx)
    }
}
