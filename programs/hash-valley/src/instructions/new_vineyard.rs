use anchor_lang::prelude::*;
use crate::assets::{pay_lamports, CoreCpi, MPL_CORE_ID};
use crate::climate::{climate_name, validate_attributes};
use crate::errors::HashValleyError;
use crate::events::VineyardMinted;
use crate::state::{GameConfig, Vineyard};

#[derive(Accounts)]
#[instruction(attributes: Vec<u8>)]
pub struct NewVineyard<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    #[account(
        init,
        payer = owner,
        space = 8 + Vineyard::INIT_SPACE,
        seeds = [Vineyard::SEED, &game_config.next_vineyard_id.to_le_bytes()],
        bump
    )]
    pub vineyard: Account<'info, Vineyard>,

    /// New Core asset - must be a signer (keypair generated client-side)
    #[account(mut)]
    pub asset: Signer<'info>,

    /// CHECK: Validated by constraint and Metaplex Core program
    #[account(
        mut,
        constraint = collection.key() == game_config.vineyard_collection @ HashValleyError::InvalidCollection
    )]
    pub collection: UncheckedAccount<'info>,

    /// CHECK: Only receives lamports
    #[account(
        mut,
        address = game_config.treasury @ HashValleyError::Unauthorized
    )]
    pub treasury: UncheckedAccount<'info>,

    /// CHECK: Metaplex Core program
    #[account(address = MPL_CORE_ID)]
    pub mpl_core_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<NewVineyard>, attributes: Vec<u8>) -> Result<()> {
    require!(
        ctx.accounts.game_config.vineyard_collection != Pubkey::default(),
        HashValleyError::CollectionNotSet
    );
    validate_attributes(&attributes)?;

    let vineyard_id = ctx.accounts.game_config.next_vineyard_id;
    require!(
        vineyard_id < ctx.accounts.game_config.max_vineyards,
        HashValleyError::MaxVineyardsMinted
    );

    let price = ctx.accounts.game_config.vineyard_price();
    require!(
        ctx.accounts.owner.lamports() >= price,
        HashValleyError::InsufficientBalance
    );

    let owner = ctx.accounts.owner.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    pay_lamports(
        &system_program,
        &owner,
        &ctx.accounts.treasury.to_account_info(),
        price,
    )?;

    let name = format!("Vineyard #{}", vineyard_id);
    let uri = format!("{}{}", ctx.accounts.game_config.vineyard_uri_base, vineyard_id);

    let core = CoreCpi {
        mpl_core_program: &ctx.accounts.mpl_core_program.to_account_info(),
        collection: &ctx.accounts.collection.to_account_info(),
        game_config: &ctx.accounts.game_config.to_account_info(),
        payer: &owner,
        system_program: &system_program,
        config_bump: ctx.accounts.game_config.bump,
    };
    core.create(&ctx.accounts.asset.to_account_info(), &owner, name, uri)?;

    let asset = ctx.accounts.asset.key();
    ctx.accounts.vineyard.set_inner(Vineyard::new(
        vineyard_id,
        asset,
        attributes.clone(),
        ctx.bumps.vineyard,
    ));

    let config = &mut ctx.accounts.game_config;
    config.next_vineyard_id = vineyard_id
        .checked_add(1)
        .ok_or(HashValleyError::Overflow)?;

    emit!(VineyardMinted {
        vineyard_id,
        asset,
        owner: ctx.accounts.owner.key(),
        attributes: attributes.clone(),
        price,
    });
    msg!(
        "Vineyard {} minted in {} for {} lamports",
        vineyard_id,
        climate_name(&attributes),
        price
    );
    Ok(())
}
