use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::assets::RewardCpi;
use crate::errors::HashValleyError;
use crate::events::GrapesHarvested;
use crate::state::{GameConfig, Vineyard};
use crate::utils::{require_owner, to_base_units};

#[derive(Accounts)]
pub struct HarvestGrapes<'info> {
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

    #[account(
        mut,
        address = game_config.grape_mint @ HashValleyError::InvalidMint
    )]
    pub grape_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = grape_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_grape_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<HarvestGrapes>) -> Result<()> {
    require_owner(&ctx.accounts.asset, &ctx.accounts.owner.key())?;
    let now = Clock::get()?.unix_timestamp;

    let season_clock = ctx.accounts.game_config.season_clock();
    let amount = ctx.accounts.vineyard.harvest_grapes(&season_clock, now)?;

    let rewards = RewardCpi {
        token_program: &ctx.accounts.token_program.to_account_info(),
        mint: &ctx.accounts.grape_mint.to_account_info(),
        game_config: &ctx.accounts.game_config.to_account_info(),
        config_bump: ctx.accounts.game_config.bump,
    };
    rewards.mint(
        &ctx.accounts.owner_grape_account.to_account_info(),
        to_base_units(amount, ctx.accounts.grape_mint.decimals)?,
    )?;

    let vineyard = &ctx.accounts.vineyard;
    emit!(GrapesHarvested {
        vineyard_id: vineyard.id,
        amount,
    });
    msg!(
        "Vineyard {} yielded {} grapes, {} of {} this cycle",
        vineyard.id,
        amount,
        vineyard.grapes_harvested,
        vineyard.cycle_max_grapes
    );
    Ok(())
}
