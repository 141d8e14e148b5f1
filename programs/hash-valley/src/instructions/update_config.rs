use anchor_lang::prelude::*;
use crate::state::GameConfig;
use crate::errors::HashValleyError;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = authority.key() == game_config.authority @ HashValleyError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,
}

#[allow(clippy::too_many_arguments)]
pub fn handler(
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
    let config = &mut ctx.accounts.game_config;

    if let Some(treasury) = treasury {
        config.treasury = treasury;
        msg!("Updated treasury to {}", treasury);
    }

    if let Some(coll) = vineyard_collection {
        config.vineyard_collection = coll;
        msg!("Updated vineyard_collection to {}", coll);
    }

    if let Some(coll) = bottle_collection {
        config.bottle_collection = coll;
        msg!("Updated bottle_collection to {}", coll);
    }

    if let Some(uri) = vineyard_uri_base {
        require!(uri.len() <= 128, HashValleyError::InvalidGameParams);
        config.vineyard_uri_base = uri;
        msg!("Updated vineyard_uri_base");
    }

    if let Some(uri) = bottle_uri_base {
        require!(uri.len() <= 128, HashValleyError::InvalidGameParams);
        config.bottle_uri_base = uri;
        msg!("Updated bottle_uri_base");
    }

    if let Some(price) = sprinkler_price {
        config.sprinkler_price = price;
        msg!("Updated sprinkler_price to {}", price);
    }

    if let Some(step) = price_step {
        config.price_step = step;
        msg!("Updated price_step to {}", step);
    }

    if let Some(amount) = ferment_per_aged_day {
        config.ferment_per_aged_day = amount;
        msg!("Updated ferment_per_aged_day to {}", amount);
    }

    if let Some(cost) = rejuvenation_cost {
        config.rejuvenation_cost = cost;
        msg!("Updated rejuvenation_cost to {}", cost);
    }

    Ok(())
}
