use anchor_lang::prelude::*;
use crate::assets::{CoreCpi, MPL_CORE_ID};
use crate::errors::HashValleyError;
use crate::events::BottleStaked;
use crate::state::{Bottle, GameConfig, StakeRecord, CELLAR_SEED};
use crate::utils::core_asset_owner;

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    #[account(
        mut,
        seeds = [Bottle::SEED, bottle.asset.as_ref()],
        bump = bottle.bump
    )]
    pub bottle: Account<'info, Bottle>,

    /// CHECK: Owner parsed from the Core asset, moved by Metaplex Core
    #[account(
        mut,
        constraint = bottle_asset.key() == bottle.asset @ HashValleyError::AssetMismatch
    )]
    pub bottle_asset: UncheckedAccount<'info>,

    /// One record per bottle: a second stake fails on init
    #[account(
        init,
        payer = owner,
        space = 8 + StakeRecord::INIT_SPACE,
        seeds = [StakeRecord::SEED, bottle_asset.key().as_ref()],
        bump
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: Cellar PDA, holds staked bottles
    #[account(
        seeds = [CELLAR_SEED],
        bump = game_config.cellar_bump
    )]
    pub cellar: UncheckedAccount<'info>,

    /// CHECK: Validated by constraint and Metaplex Core program
    #[account(
        mut,
        constraint = bottle_collection.key() == game_config.bottle_collection @ HashValleyError::InvalidCollection
    )]
    pub bottle_collection: UncheckedAccount<'info>,

    /// CHECK: Metaplex Core program
    #[account(address = MPL_CORE_ID)]
    pub mpl_core_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Stake>) -> Result<()> {
    let owner_key = ctx.accounts.owner.key();
    let holder = core_asset_owner(&ctx.accounts.bottle_asset)?;
    require_keys_eq!(holder, owner_key, HashValleyError::BottleNotOwned);

    ctx.accounts.bottle.cellar()?;

    let owner = ctx.accounts.owner.to_account_info();
    let core = CoreCpi {
        mpl_core_program: &ctx.accounts.mpl_core_program.to_account_info(),
        collection: &ctx.accounts.bottle_collection.to_account_info(),
        game_config: &ctx.accounts.game_config.to_account_info(),
        payer: &owner,
        system_program: &ctx.accounts.system_program.to_account_info(),
        config_bump: ctx.accounts.game_config.bump,
    };
    core.transfer(
        &ctx.accounts.bottle_asset.to_account_info(),
        &owner,
        &ctx.accounts.cellar.to_account_info(),
        &[],
    )?;

    let now = Clock::get()?.unix_timestamp;
    let bottle_id = ctx.accounts.bottle.id;
    ctx.accounts.stake_record.set_inner(StakeRecord {
        bottle_asset: ctx.accounts.bottle_asset.key(),
        bottle_id,
        staker: owner_key,
        staked_at: now,
        bump: ctx.bumps.stake_record,
    });

    emit!(BottleStaked {
        bottle_id,
        staker: owner_key,
        staked_at: now,
    });
    msg!("Bottle {} staked in the cellar by {}", bottle_id, owner_key);
    Ok(())
}
