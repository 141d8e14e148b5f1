use anchor_lang::prelude::*;
use crate::errors::HashValleyError;
use crate::events::Watered;
use crate::instructions::batch::owned_vineyards;
use crate::state::Vineyard;
use crate::utils::require_owner;

#[derive(Accounts)]
pub struct Water<'info> {
    pub owner: Signer<'info>,

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

/// `[vineyard, asset]` pairs in remaining accounts
#[derive(Accounts)]
pub struct WaterMultiple<'info> {
    pub owner: Signer<'info>,
}

fn water_one(vineyard: &mut Vineyard, now: i64) -> Result<()> {
    vineyard.water(now)?;
    emit!(Watered {
        vineyard_id: vineyard.id,
        watered_at: now,
    });
    Ok(())
}

pub fn handler(ctx: Context<Water>) -> Result<()> {
    require_owner(&ctx.accounts.asset, &ctx.accounts.owner.key())?;
    let now = Clock::get()?.unix_timestamp;
    water_one(&mut ctx.accounts.vineyard, now)?;
    msg!("Vineyard {} watered", ctx.accounts.vineyard.id);
    Ok(())
}

pub fn handler_multiple<'info>(
    ctx: Context<'_, '_, 'info, 'info, WaterMultiple<'info>>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let entries = owned_vineyards(ctx.remaining_accounts, 2, &ctx.accounts.owner.key())?;
    let count = entries.len();

    for (mut vineyard, _) in entries {
        water_one(&mut vineyard, now)?;
        vineyard.exit(&crate::ID)?;
    }

    msg!("Watered {} vineyards", count);
    Ok(())
}
