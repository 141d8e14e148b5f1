use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::assets::{CoreCpi, RewardCpi, MPL_CORE_ID};
use crate::errors::HashValleyError;
use crate::events::{BottleMatured, BottleSpoiled};
use crate::state::{Bottle, GameConfig, StakeOutcome, StakeRecord, CELLAR_SEED};
use crate::utils::clock_roll;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

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

    /// CHECK: Moved or burned by Metaplex Core
    #[account(
        mut,
        constraint = bottle_asset.key() == bottle.asset @ HashValleyError::AssetMismatch
    )]
    pub bottle_asset: UncheckedAccount<'info>,

    #[account(
        mut,
        close = staker,
        seeds = [StakeRecord::SEED, bottle_asset.key().as_ref()],
        bump = stake_record.bump,
        constraint = stake_record.staker == staker.key() @ HashValleyError::NotStaker
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: Cellar PDA, current owner of the bottle
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

    #[account(
        mut,
        address = game_config.ferment_mint @ HashValleyError::InvalidMint
    )]
    pub ferment_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = ferment_mint,
        associated_token::authority = staker,
        associated_token::token_program = token_program,
    )]
    pub staker_ferment_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Metaplex Core program
    #[account(address = MPL_CORE_ID)]
    pub mpl_core_program: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
    let clock = Clock::get()?;
    let staker_key = ctx.accounts.staker.key();
    let roll = clock_roll(&clock, &[&ctx.accounts.bottle.asset, &staker_key]);
    let outcome = ctx.accounts.stake_record.resolve(
        clock.unix_timestamp,
        roll,
        ctx.accounts.game_config.ferment_per_aged_day,
    )?;

    let staker = ctx.accounts.staker.to_account_info();
    let cellar = ctx.accounts.cellar.to_account_info();
    let bottle_asset = ctx.accounts.bottle_asset.to_account_info();
    let core = CoreCpi {
        mpl_core_program: &ctx.accounts.mpl_core_program.to_account_info(),
        collection: &ctx.accounts.bottle_collection.to_account_info(),
        game_config: &ctx.accounts.game_config.to_account_info(),
        payer: &staker,
        system_program: &ctx.accounts.system_program.to_account_info(),
        config_bump: ctx.accounts.game_config.bump,
    };

    let cellar_bump = ctx.accounts.game_config.cellar_bump;
    let seeds: &[&[u8]] = &[CELLAR_SEED, &[cellar_bump]];
    let signer_seeds: &[&[&[u8]]] = &[seeds];
    let bottle_id = ctx.accounts.bottle.id;

    match outcome {
        StakeOutcome::Spoiled { days, reward } => {
            ctx.accounts.bottle.spoil()?;
            core.burn(&bottle_asset, &cellar, signer_seeds)?;

            if reward > 0 {
                let rewards = RewardCpi {
                    token_program: &ctx.accounts.token_program.to_account_info(),
                    mint: &ctx.accounts.ferment_mint.to_account_info(),
                    game_config: &ctx.accounts.game_config.to_account_info(),
                    config_bump: ctx.accounts.game_config.bump,
                };
                rewards.mint(&ctx.accounts.staker_ferment_account.to_account_info(), reward)?;
            }

            emit!(BottleSpoiled {
                bottle_id,
                staker: staker_key,
                days,
                reward,
            });
            msg!(
                "Bottle {} spoiled after {} days, {} ferment base units to {}",
                bottle_id,
                days,
                reward,
                staker_key
            );
        }
        StakeOutcome::Matured { days, staked_for } => {
            ctx.accounts.bottle.mature(staked_for)?;
            core.transfer(&bottle_asset, &cellar, &staker, signer_seeds)?;

            emit!(BottleMatured {
                bottle_id,
                staker: staker_key,
                days,
            });
            msg!("Bottle {} matured after {} days", bottle_id, days);
        }
    }
    Ok(())
}
