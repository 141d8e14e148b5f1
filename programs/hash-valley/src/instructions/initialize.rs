use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token_interface::Mint;
use crate::errors::HashValleyError;
use crate::state::{GameConfig, GameParams, CELLAR_SEED};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + GameConfig::INIT_SPACE,
        seeds = [GameConfig::SEED],
        bump
    )]
    pub game_config: Account<'info, GameConfig>,

    /// CHECK: Only receives lamports
    pub treasury: UncheckedAccount<'info>,

    /// Grape mint, mint authority must already be the config PDA
    #[account(
        constraint = grape_mint.mint_authority == COption::Some(game_config.key()) @ HashValleyError::InvalidMint
    )]
    pub grape_mint: InterfaceAccount<'info, Mint>,

    /// Ferment mint, mint authority must already be the config PDA
    #[account(
        constraint = ferment_mint.mint_authority == COption::Some(game_config.key()) @ HashValleyError::InvalidMint,
        constraint = ferment_mint.key() != grape_mint.key() @ HashValleyError::InvalidMint
    )]
    pub ferment_mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

fn validate_params(params: &GameParams) -> Result<()> {
    require!(
        params.first_season_length > 0 && params.season_length > 0,
        HashValleyError::InvalidGameParams
    );
    require!(params.sprinkler_duration > 0, HashValleyError::InvalidGameParams);
    require!(params.price_tier_size > 0, HashValleyError::InvalidGameParams);
    require!(
        params.free_vineyards <= params.max_vineyards,
        HashValleyError::InvalidGameParams
    );
    require!(
        params.vineyard_uri_base.len() <= 128 && params.bottle_uri_base.len() <= 128,
        HashValleyError::InvalidGameParams
    );
    Ok(())
}

pub fn handler(ctx: Context<Initialize>, params: GameParams) -> Result<()> {
    validate_params(&params)?;

    let (_, cellar_bump) = Pubkey::find_program_address(&[CELLAR_SEED], &crate::ID);
    let config = &mut ctx.accounts.game_config;

    config.authority = ctx.accounts.authority.key();
    config.treasury = ctx.accounts.treasury.key();
    config.grape_mint = ctx.accounts.grape_mint.key();
    config.ferment_mint = ctx.accounts.ferment_mint.key();
    // Collections are created off-chain and set via update_config
    config.vineyard_collection = Pubkey::default();
    config.bottle_collection = Pubkey::default();
    config.vineyard_uri_base = params.vineyard_uri_base;
    config.bottle_uri_base = params.bottle_uri_base;
    config.game_start = 0;
    config.first_season_length = params.first_season_length;
    config.season_length = params.season_length;
    config.sprinkler_duration = params.sprinkler_duration;
    config.sprinkler_price = params.sprinkler_price;
    config.max_vineyards = params.max_vineyards;
    config.free_vineyards = params.free_vineyards;
    config.price_step = params.price_step;
    config.price_tier_size = params.price_tier_size;
    config.ferment_per_aged_day = params.ferment_per_aged_day;
    config.rejuvenation_cost = params.rejuvenation_cost;
    config.next_vineyard_id = 0;
    config.next_bottle_id = 0;
    config.bump = ctx.bumps.game_config;
    config.cellar_bump = cellar_bump;
    config._reserved = [0u8; 64];

    msg!(
        "Hash Valley initialized: {} vineyards max, first season {}s, seasons {}s",
        config.max_vineyards,
        config.first_season_length,
        config.season_length
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{code_of, error_code};

    #[test]
    fn test_default_params_are_valid() {
        assert!(validate_params(&GameParams::default()).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_params() {
        let cases = [
            GameParams { season_length: 0, ..GameParams::default() },
            GameParams { price_tier_size: 0, ..GameParams::default() },
            GameParams { free_vineyards: 6_000, ..GameParams::default() },
            GameParams { bottle_uri_base: "x".repeat(129), ..GameParams::default() },
        ];
        for params in cases {
            let err = validate_params(&params).unwrap_err();
            assert_eq!(error_code(err), code_of(HashValleyError::InvalidGameParams));
        }
    }
}
