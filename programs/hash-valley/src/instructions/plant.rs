use anchor_lang::prelude::*;
use crate::errors::HashValleyError;
use crate::events::Planted;
use crate::instructions::batch::owned_vineyards;
use crate::state::{GameConfig, Vineyard};
use crate::utils::require_owner;

#[derive(Accounts)]
pub struct Plant<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    #[account(
        mut,
        seeds = [Vineyard::SEED, &vineyard.id.to_le_bytes()],
        bump = vineyard.bump
    )]
    pub vineyard: Account<'info, Vineyard>,

    /// CHECK: Owner parsed from the Core asset
    #[account(
        constraint = asset.key() == vineyard.asset @ HashValleyError::AssetMismatch
    )]
    pub asset: UncheckedAccount<'info>,
}

/// Same as `Plant` with `[vineyard, asset]` pairs in remaining accounts
#[derive(Accounts)]
pub struct PlantMultiple<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,
}

fn plant_one(vineyard: &mut Vineyard, config: &GameConfig, now: i64) -> Result<()> {
    let season = vineyard.plant(&config.season_clock(), now)?;
    emit!(Planted {
        vineyard_id: vineyard.id,
        season,
    });
    msg!("Vineyard {} planted in season {}", vineyard.id, season);
    Ok(())
}

pub fn handler(ctx: Context<Plant>) -> Result<()> {
    require_owner(&ctx.accounts.asset, &ctx.accounts.owner.key())?;
    let now = Clock::get()?.unix_timestamp;
    plant_one(&mut ctx.accounts.vineyard, &ctx.accounts.game_config, now)
}

pub fn handler_multiple<'info>(
    ctx: Context<'_, '_, 'info, 'info, PlantMultiple<'info>>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let entries = owned_vineyards(ctx.remaining_accounts, 2, &ctx.accounts.owner.key())?;
    let count = entries.len();

    for (mut vineyard, _) in entries {
        plant_one(&mut vineyard, &ctx.accounts.game_config, now)?;
        vineyard.exit(&crate::ID)?;
    }

    msg!("Planted {} vineyards", count);
    Ok(())
}
