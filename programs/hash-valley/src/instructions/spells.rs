use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::assets::RewardCpi;
use crate::errors::HashValleyError;
use crate::events::{Defended, Vitalized, Withered};
use crate::instructions::batch::vineyard_groups;
use crate::season::SeasonClock;
use crate::state::{GameConfig, Vineyard};
use crate::utils::{core_asset_owner, to_base_units};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spell {
    Wither,
    Defend,
    Vitality,
}

#[derive(Accounts)]
pub struct Wither<'info> {
    pub attacker: Signer<'info>,

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
        address = game_config.ferment_mint @ HashValleyError::InvalidMint
    )]
    pub ferment_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = ferment_mint,
        associated_token::authority = attacker,
        associated_token::token_program = token_program,
    )]
    pub attacker_ferment_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Shared by `defend` and `vitality`
#[derive(Accounts)]
pub struct TendVineyard<'info> {
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

/// `[vineyard, asset]` pairs in remaining accounts. The ferment accounts are
/// only needed for withering.
#[derive(Accounts)]
pub struct BatchSpell<'info> {
    pub caster: Signer<'info>,

    #[account(
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    #[account(
        mut,
        address = game_config.ferment_mint @ HashValleyError::InvalidMint
    )]
    pub ferment_mint: Option<InterfaceAccount<'info, Mint>>,

    /// Checked against the caster and mint when the cast costs ferment
    #[account(mut)]
    pub caster_ferment_account: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Applies one spell, returning the ferment it costs the caster
fn cast(
    spell: Spell,
    vineyard: &mut Vineyard,
    caster: Pubkey,
    owner: Pubkey,
    clock: &SeasonClock,
    now: i64,
) -> Result<u64> {
    match spell {
        Spell::Wither => {
            require_keys_neq!(caster, owner, HashValleyError::OwnVineyard);
            let cost = vineyard.wither(caster, clock, now)?;
            emit!(Withered {
                vineyard_id: vineyard.id,
                attacker: caster,
                cost,
            });
            msg!("Vineyard {} withered by {} for {} ferment", vineyard.id, caster, cost);
            Ok(cost)
        }
        Spell::Defend => {
            require_keys_eq!(caster, owner, HashValleyError::NotOwner);
            vineyard.defend(now)?;
            emit!(Defended {
                vineyard_id: vineyard.id,
            });
            msg!("Vineyard {} defended", vineyard.id);
            Ok(0)
        }
        Spell::Vitality => {
            require_keys_eq!(caster, owner, HashValleyError::NotOwner);
            let season = vineyard.vitalize(clock, now)?;
            emit!(Vitalized {
                vineyard_id: vineyard.id,
                season,
            });
            msg!("Vineyard {} vitalized for season {}", vineyard.id, season);
            Ok(0)
        }
    }
}

/// Mint and token account a batch pays from, demanded only when it costs ferment
fn ferment_payment<'a, M, T>(
    cost: u64,
    mint: Option<&'a M>,
    from: Option<&'a T>,
) -> Result<Option<(&'a M, &'a T)>> {
    if cost == 0 {
        return Ok(None);
    }
    match (mint, from) {
        (Some(mint), Some(from)) => Ok(Some((mint, from))),
        _ => err!(HashValleyError::FermentAccountsRequired),
    }
}

fn burn_ferment<'info>(
    token_program: &AccountInfo<'info>,
    mint: &InterfaceAccount<'info, Mint>,
    from: &InterfaceAccount<'info, TokenAccount>,
    authority: &AccountInfo<'info>,
    game_config: &Account<'info, GameConfig>,
    cost: u64,
) -> Result<()> {
    let amount = to_base_units(cost, mint.decimals)?;
    require!(from.amount >= amount, HashValleyError::InsufficientBalance);

    let rewards = RewardCpi {
        token_program,
        mint: &mint.to_account_info(),
        game_config: &game_config.to_account_info(),
        config_bump: game_config.bump,
    };
    rewards.burn(&from.to_account_info(), authority, amount)
}

pub fn wither_handler(ctx: Context<Wither>) -> Result<()> {
    let owner = core_asset_owner(&ctx.accounts.asset)?;
    let now = Clock::get()?.unix_timestamp;
    let season_clock = ctx.accounts.game_config.season_clock();

    let cost = cast(
        Spell::Wither,
        &mut ctx.accounts.vineyard,
        ctx.accounts.attacker.key(),
        owner,
        &season_clock,
        now,
    )?;

    burn_ferment(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.ferment_mint,
        &ctx.accounts.attacker_ferment_account,
        &ctx.accounts.attacker.to_account_info(),
        &ctx.accounts.game_config,
        cost,
    )
}

pub fn defend_handler(ctx: Context<TendVineyard>) -> Result<()> {
    tend(ctx, Spell::Defend)
}

pub fn vitality_handler(ctx: Context<TendVineyard>) -> Result<()> {
    tend(ctx, Spell::Vitality)
}

fn tend(ctx: Context<TendVineyard>, spell: Spell) -> Result<()> {
    let owner = core_asset_owner(&ctx.accounts.asset)?;
    let now = Clock::get()?.unix_timestamp;
    let season_clock = ctx.accounts.game_config.season_clock();

    cast(
        spell,
        &mut ctx.accounts.vineyard,
        ctx.accounts.owner.key(),
        owner,
        &season_clock,
        now,
    )?;
    Ok(())
}

pub fn batch_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, BatchSpell<'info>>,
    spell: Spell,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let season_clock = ctx.accounts.game_config.season_clock();
    let caster = ctx.accounts.caster.key();
    let entries = vineyard_groups(ctx.remaining_accounts, 2)?;
    let count = entries.len();

    let mut total_cost: u64 = 0;
    for (mut vineyard, group) in entries {
        let owner = core_asset_owner(&group[1])?;
        let cost = cast(spell, &mut vineyard, caster, owner, &season_clock, now)?;
        total_cost = total_cost
            .checked_add(cost)
            .ok_or(HashValleyError::Overflow)?;
        vineyard.exit(&crate::ID)?;
    }

    let payment = ferment_payment(
        total_cost,
        ctx.accounts.ferment_mint.as_ref(),
        ctx.accounts.caster_ferment_account.as_ref(),
    )?;
    if let Some((mint, from)) = payment {
        require_keys_eq!(from.mint, mint.key(), HashValleyError::InvalidMint);
        require_keys_eq!(from.owner, caster, HashValleyError::NotOwner);
        burn_ferment(
            &ctx.accounts.token_program.to_account_info(),
            mint,
            from,
            &ctx.accounts.caster.to_account_info(),
            &ctx.accounts.game_config,
            total_cost,
        )?;
    }

    msg!("Cast {:?} on {} vineyards for {} ferment", spell, count, total_cost);
    Ok(())
}
