use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::assets::{CoreCpi, RewardCpi, MPL_CORE_ID};
use crate::errors::HashValleyError;
use crate::events::BottleRejuvenated;
use crate::state::{Bottle, GameConfig};
use crate::utils::to_base_units;

#[derive(Accounts)]
pub struct Rejuvenate<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    /// Record of the spoiled bottle, its asset is already burned
    #[account(
        mut,
        seeds = [Bottle::SEED, old_bottle.asset.as_ref()],
        bump = old_bottle.bump
    )]
    pub old_bottle: Account<'info, Bottle>,

    /// New Core asset - must be a signer (keypair generated client-side)
    #[account(mut)]
    pub new_bottle_asset: Signer<'info>,

    #[account(
        init,
        payer = holder,
        space = 8 + Bottle::INIT_SPACE,
        seeds = [Bottle::SEED, new_bottle_asset.key().as_ref()],
        bump
    )]
    pub new_bottle: Account<'info, Bottle>,

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
        associated_token::authority = holder,
        associated_token::token_program = token_program,
    )]
    pub holder_ferment_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Metaplex Core program
    #[account(address = MPL_CORE_ID)]
    pub mpl_core_program: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Rejuvenate>) -> Result<()> {
    let cost = to_base_units(
        ctx.accounts.game_config.rejuvenation_cost,
        ctx.accounts.ferment_mint.decimals,
    )?;
    require!(
        ctx.accounts.holder_ferment_account.amount >= cost,
        HashValleyError::CannotRejuvenate
    );

    let now = Clock::get()?.unix_timestamp;
    let new_id = ctx.accounts.game_config.next_bottle_id;
    let new_asset = ctx.accounts.new_bottle_asset.key();
    let fresh = ctx
        .accounts
        .old_bottle
        .rejuvenate(new_id, new_asset, now, ctx.bumps.new_bottle)?;

    let holder = ctx.accounts.holder.to_account_info();
    let game_config = ctx.accounts.game_config.to_account_info();
    let rewards = RewardCpi {
        token_program: &ctx.accounts.token_program.to_account_info(),
        mint: &ctx.accounts.ferment_mint.to_account_info(),
        game_config: &game_config,
        config_bump: ctx.accounts.game_config.bump,
    };
    rewards.burn(
        &ctx.accounts.holder_ferment_account.to_account_info(),
        &holder,
        cost,
    )?;

    let core = CoreCpi {
        mpl_core_program: &ctx.accounts.mpl_core_program.to_account_info(),
        collection: &ctx.accounts.bottle_collection.to_account_info(),
        game_config: &game_config,
        payer: &holder,
        system_program: &ctx.accounts.system_program.to_account_info(),
        config_bump: ctx.accounts.game_config.bump,
    };
    core.create(
        &ctx.accounts.new_bottle_asset.to_account_info(),
        &holder,
        format!("Bottle #{}", new_id),
        format!("{}{}", ctx.accounts.game_config.bottle_uri_base, new_id),
    )?;

    ctx.accounts.new_bottle.set_inner(fresh);
    let config = &mut ctx.accounts.game_config;
    config.next_bottle_id = new_id
        .checked_add(1)
        .ok_or(HashValleyError::Overflow)?;

    let old_id = ctx.accounts.old_bottle.id;
    emit!(BottleRejuvenated {
        old_bottle_id: old_id,
        new_bottle_id: new_id,
        owner: holder.key(),
    });
    msg!("Bottle {} rejuvenated as bottle {}", old_id, new_id);
    Ok(())
}
