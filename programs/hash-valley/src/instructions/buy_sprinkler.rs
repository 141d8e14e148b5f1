use anchor_lang::prelude::*;
use crate::assets::pay_lamports;
use crate::errors::HashValleyError;
use crate::events::SprinklerPurchased;
use crate::state::{GameConfig, Vineyard};
use crate::utils::require_owner;

#[derive(Accounts)]
pub struct BuySprinkler<'info> {
    #[account(mut)]
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

    /// CHECK: Only receives lamports
    #[account(
        mut,
        address = game_config.treasury @ HashValleyError::Unauthorized
    )]
    pub treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<BuySprinkler>) -> Result<()> {
    require_owner(&ctx.accounts.asset, &ctx.accounts.owner.key())?;
    let now = Clock::get()?.unix_timestamp;

    let price = ctx.accounts.game_config.sprinkler_price;
    let duration = ctx.accounts.game_config.sprinkler_duration;
    let expiry = ctx.accounts.vineyard.install_sprinkler(now, duration)?;

    require!(
        ctx.accounts.owner.lamports() >= price,
        HashValleyError::InsufficientBalance
    );
    pay_lamports(
        &ctx.accounts.system_program.to_account_info(),
        &ctx.accounts.owner.to_account_info(),
        &ctx.accounts.treasury.to_account_info(),
        price,
    )?;

    let vineyard_id = ctx.accounts.vineyard.id;
    emit!(SprinklerPurchased { vineyard_id, expiry });
    msg!(
        "Sprinkler installed on vineyard {} until {}, paid {} lamports",
        vineyard_id,
        expiry,
        price
    );
    Ok(())
}
