use anchor_lang::prelude::*;
use crate::assets::{CoreCpi, MPL_CORE_ID};
use crate::errors::HashValleyError;
use crate::state::GameConfig;

#[derive(Accounts)]
pub struct TransferCollectionAuthority<'info> {
    #[account(
        mut,
        constraint = authority.key() == game_config.authority @ HashValleyError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    /// Either the vineyard or the bottle collection
    /// CHECK: Validated by constraint and Metaplex Core program
    #[account(
        mut,
        constraint = collection.key() != Pubkey::default() @ HashValleyError::CollectionNotSet,
        constraint = collection.key() == game_config.vineyard_collection
            || collection.key() == game_config.bottle_collection @ HashValleyError::InvalidCollection
    )]
    pub collection: UncheckedAccount<'info>,

    /// CHECK: Can be any valid pubkey
    pub new_collection_authority: UncheckedAccount<'info>,

    /// CHECK: Metaplex Core program
    #[account(address = MPL_CORE_ID)]
    pub mpl_core_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Clears whichever collection slot holds `collection`, returning true when
/// it was the vineyard collection
fn forget_collection(config: &mut GameConfig, collection: &Pubkey) -> Result<bool> {
    if config.vineyard_collection == *collection {
        config.vineyard_collection = Pubkey::default();
        Ok(true)
    } else if config.bottle_collection == *collection {
        config.bottle_collection = Pubkey::default();
        Ok(false)
    } else {
        err!(HashValleyError::InvalidCollection)
    }
}

/// Hands a collection to another update authority and detaches it from the
/// game. Minting into that slot fails with `CollectionNotSet` until
/// `update_config` points it at a new collection.
pub fn handler(ctx: Context<TransferCollectionAuthority>) -> Result<()> {
    let collection_key = ctx.accounts.collection.key();
    let new_authority = ctx.accounts.new_collection_authority.key();

    let core = CoreCpi {
        mpl_core_program: &ctx.accounts.mpl_core_program.to_account_info(),
        collection: &ctx.accounts.collection.to_account_info(),
        game_config: &ctx.accounts.game_config.to_account_info(),
        payer: &ctx.accounts.authority.to_account_info(),
        system_program: &ctx.accounts.system_program.to_account_info(),
        config_bump: ctx.accounts.game_config.bump,
    };
    core.release_collection(&ctx.accounts.new_collection_authority.to_account_info())?;

    let was_vineyards = forget_collection(&mut ctx.accounts.game_config, &collection_key)?;
    msg!(
        "Released {} collection {} to {}",
        if was_vineyards { "vineyard" } else { "bottle" },
        collection_key,
        new_authority
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{code_of, error_code};

    fn config(vineyards: Pubkey, bottles: Pubkey) -> GameConfig {
        GameConfig {
            authority: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            grape_mint: Pubkey::new_unique(),
            ferment_mint: Pubkey::new_unique(),
            vineyard_collection: vineyards,
            bottle_collection: bottles,
            vineyard_uri_base: String::new(),
            bottle_uri_base: String::new(),
            game_start: 0,
            first_season_length: 0,
            season_length: 0,
            sprinkler_duration: 0,
            sprinkler_price: 0,
            max_vineyards: 0,
            free_vineyards: 0,
            price_step: 0,
            price_tier_size: 0,
            ferment_per_aged_day: 0,
            rejuvenation_cost: 0,
            next_vineyard_id: 0,
            next_bottle_id: 0,
            bump: 255,
            cellar_bump: 254,
            _reserved: [0u8; 64],
        }
    }

    #[test]
    fn test_forget_releases_only_matching_slot() {
        let vineyards = Pubkey::new_unique();
        let bottles = Pubkey::new_unique();

        let mut c = config(vineyards, bottles);
        assert!(!forget_collection(&mut c, &bottles).unwrap());
        assert_eq!(c.bottle_collection, Pubkey::default());
        assert_eq!(c.vineyard_collection, vineyards);

        let mut c = config(vineyards, bottles);
        assert!(forget_collection(&mut c, &vineyards).unwrap());
        assert_eq!(c.vineyard_collection, Pubkey::default());
        assert_eq!(c.bottle_collection, bottles);

        let err = forget_collection(&mut c, &Pubkey::new_unique()).unwrap_err();
        assert_eq!(error_code(err), code_of(HashValleyError::InvalidCollection));
    }
}
