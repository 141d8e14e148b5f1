use anchor_lang::prelude::*;
use crate::assets::{create_bottle_record, CoreCpi, MPL_CORE_ID};
use crate::errors::HashValleyError;
use crate::events::{HarvestFailure, Harvested};
use crate::instructions::batch::owned_vineyards;
use crate::state::{Bottle, GameConfig, HarvestOutcome, Vineyard};
use crate::utils::{clock_roll, require_owner};

#[derive(Accounts)]
pub struct Harvest<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
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

    /// Bottle asset keypair, only used when the harvest succeeds
    #[account(mut)]
    pub bottle_asset: Signer<'info>,

    /// CHECK: `["bottle", bottle_asset]`, created only when the harvest succeeds
    #[account(mut)]
    pub bottle: UncheckedAccount<'info>,

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

/// `[vineyard, asset, bottle_asset, bottle]` groups in remaining accounts
#[derive(Accounts)]
pub struct HarvestMultiple<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

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

/// Takes the next bottle id from `next_bottle_id` when the harvest produced a
/// bottle. A failed harvest leaves the counter alone.
fn reserve_bottle_id(outcome: HarvestOutcome, next_bottle_id: &mut u32) -> Result<Option<u32>> {
    match outcome {
        HarvestOutcome::Failed { .. } => Ok(None),
        HarvestOutcome::Bottled { .. } => {
            let bottle_id = *next_bottle_id;
            *next_bottle_id = bottle_id
                .checked_add(1)
                .ok_or(HashValleyError::Overflow)?;
            Ok(Some(bottle_id))
        }
    }
}

fn harvest_one<'info>(
    vineyard: &mut Vineyard,
    config: &mut GameConfig,
    core: &CoreCpi<'_, 'info>,
    bottle_asset: &AccountInfo<'info>,
    bottle_record: &AccountInfo<'info>,
    clock: &Clock,
) -> Result<()> {
    let now = clock.unix_timestamp;
    let roll = clock_roll(clock, &[&vineyard.asset, core.payer.key]);
    let outcome = vineyard.harvest(&config.season_clock(), now, roll)?;
    let season = outcome.season();

    let Some(bottle_id) = reserve_bottle_id(outcome, &mut config.next_bottle_id)? else {
        emit!(HarvestFailure {
            vineyard_id: vineyard.id,
            season,
        });
        msg!("Vineyard {} harvest failed in season {}", vineyard.id, season);
        return Ok(());
    };
    require!(bottle_asset.is_signer, HashValleyError::InvalidBatch);

    let name = format!("Bottle #{}", bottle_id);
    let uri = format!("{}{}", config.bottle_uri_base, bottle_id);
    core.create(bottle_asset, core.payer, name, uri)?;

    create_bottle_record(
        bottle_record,
        core.payer,
        core.system_program,
        Bottle::new(
            bottle_id,
            bottle_asset.key(),
            vineyard.id,
            vineyard.attributes.clone(),
            season,
            now,
            0,
        ),
    )?;

    emit!(Harvested {
        vineyard_id: vineyard.id,
        season,
        bottle_id,
    });
    msg!(
        "Vineyard {} harvested bottle {} in season {}",
        vineyard.id,
        bottle_id,
        season
    );
    Ok(())
}

pub fn handler(ctx: Context<Harvest>) -> Result<()> {
    require!(
        ctx.accounts.game_config.bottle_collection != Pubkey::default(),
        HashValleyError::CollectionNotSet
    );
    require_owner(&ctx.accounts.asset, &ctx.accounts.owner.key())?;
    let clock = Clock::get()?;

    let mpl_core_program = ctx.accounts.mpl_core_program.to_account_info();
    let collection = ctx.accounts.bottle_collection.to_account_info();
    let game_config = ctx.accounts.game_config.to_account_info();
    let owner = ctx.accounts.owner.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let core = CoreCpi {
        mpl_core_program: &mpl_core_program,
        collection: &collection,
        game_config: &game_config,
        payer: &owner,
        system_program: &system_program,
        config_bump: ctx.accounts.game_config.bump,
    };

    let bottle_asset = ctx.accounts.bottle_asset.to_account_info();
    let bottle = ctx.accounts.bottle.to_account_info();
    harvest_one(
        &mut ctx.accounts.vineyard,
        &mut ctx.accounts.game_config,
        &core,
        &bottle_asset,
        &bottle,
        &clock,
    )
}

pub fn handler_multiple<'info>(
    ctx: Context<'_, '_, 'info, 'info, HarvestMultiple<'info>>,
) -> Result<()> {
    require!(
        ctx.accounts.game_config.bottle_collection != Pubkey::default(),
        HashValleyError::CollectionNotSet
    );
    let clock = Clock::get()?;
    let entries = owned_vineyards(ctx.remaining_accounts, 4, &ctx.accounts.owner.key())?;
    let count = entries.len();

    let mpl_core_program = ctx.accounts.mpl_core_program.to_account_info();
    let collection = ctx.accounts.bottle_collection.to_account_info();
    let game_config = ctx.accounts.game_config.to_account_info();
    let owner = ctx.accounts.owner.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let core = CoreCpi {
        mpl_core_program: &mpl_core_program,
        collection: &collection,
        game_config: &game_config,
        payer: &owner,
        system_program: &system_program,
        config_bump: ctx.accounts.game_config.bump,
    };

    for (mut vineyard, group) in entries {
        harvest_one(
            &mut vineyard,
            &mut ctx.accounts.game_config,
            &core,
            &group[2],
            &group[3],
            &clock,
        )?;
        vineyard.exit(&crate::ID)?;
    }

    msg!("Harvested {} vineyards", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{code_of, error_code};

    #[test]
    fn test_failed_harvest_keeps_bottle_id() {
        let mut next = 7;
        let failed = HarvestOutcome::Failed { season: 3 };
        assert_eq!(reserve_bottle_id(failed, &mut next).unwrap(), None);
        assert_eq!(next, 7);
    }

    #[test]
    fn test_bottled_harvest_takes_next_id() {
        let mut next = 7;
        let bottled = HarvestOutcome::Bottled { season: 3 };
        assert_eq!(reserve_bottle_id(bottled, &mut next).unwrap(), Some(7));
        assert_eq!(reserve_bottle_id(bottled, &mut next).unwrap(), Some(8));
        assert_eq!(next, 9);
    }

    #[test]
    fn test_bottle_id_overflow() {
        let mut next = u32::MAX;
        let err = reserve_bottle_id(HarvestOutcome::Bottled { season: 1 }, &mut next).unwrap_err();
        assert_eq!(error_code(err), code_of(HashValleyError::Overflow));
        assert_eq!(next, u32::MAX);
    }
}
