//! Thin wrappers over the collaborator programs: Metaplex Core for vineyards
//! and bottles, the token interface for grape and ferment, and the system
//! program for lamport payments and lazily created bottle records.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, CreateAccount, Transfer};
use anchor_spl::token_interface::{self, Burn, MintTo};
use mpl_core::instructions::{
    BurnV1CpiBuilder, CreateV2CpiBuilder, TransferV1CpiBuilder, UpdateCollectionV1CpiBuilder,
};
use crate::errors::HashValleyError;
use crate::state::{Bottle, GameConfig};

// Metaplex Core program ID
pub const MPL_CORE_ID: Pubkey = pubkey!("CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d");

/// Core calls made with the game config PDA as collection update authority
pub struct CoreCpi<'a, 'info> {
    pub mpl_core_program: &'a AccountInfo<'info>,
    pub collection: &'a AccountInfo<'info>,
    pub game_config: &'a AccountInfo<'info>,
    pub payer: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
    pub config_bump: u8,
}

impl<'a, 'info> CoreCpi<'a, 'info> {
    pub fn create(
        &self,
        asset: &AccountInfo<'info>,
        owner: &AccountInfo<'info>,
        name: String,
        uri: String,
    ) -> Result<()> {
        let bump = [self.config_bump];
        let seeds: &[&[u8]] = &[GameConfig::SEED, &bump];
        let signer_seeds: &[&[&[u8]]] = &[seeds];

        CreateV2CpiBuilder::new(self.mpl_core_program)
            .asset(asset)
            .collection(Some(self.collection))
            .authority(Some(self.game_config))
            .payer(self.payer)
            .owner(Some(owner))
            .system_program(self.system_program)
            .name(name)
            .uri(uri)
            .invoke_signed(signer_seeds)?;
        Ok(())
    }

    /// Moves an asset. `authority` is the current owner; pass its seeds when it is a PDA.
    pub fn transfer(
        &self,
        asset: &AccountInfo<'info>,
        authority: &AccountInfo<'info>,
        new_owner: &AccountInfo<'info>,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        TransferV1CpiBuilder::new(self.mpl_core_program)
            .asset(asset)
            .collection(Some(self.collection))
            .payer(self.payer)
            .authority(Some(authority))
            .new_owner(new_owner)
            .system_program(Some(self.system_program))
            .invoke_signed(signer_seeds)?;
        Ok(())
    }

    pub fn burn(
        &self,
        asset: &AccountInfo<'info>,
        authority: &AccountInfo<'info>,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        BurnV1CpiBuilder::new(self.mpl_core_program)
            .asset(asset)
            .collection(Some(self.collection))
            .payer(self.payer)
            .authority(Some(authority))
            .system_program(Some(self.system_program))
            .invoke_signed(signer_seeds)?;
        Ok(())
    }

    /// Gives up update authority over `collection`, after which the game can
    /// no longer mint into it
    pub fn release_collection(&self, new_authority: &AccountInfo<'info>) -> Result<()> {
        let bump = [self.config_bump];
        let seeds: &[&[u8]] = &[GameConfig::SEED, &bump];
        let signer_seeds: &[&[&[u8]]] = &[seeds];

        UpdateCollectionV1CpiBuilder::new(self.mpl_core_program)
            .collection(self.collection)
            .authority(Some(self.game_config))
            .payer(self.payer)
            .new_update_authority(Some(new_authority))
            .system_program(self.system_program)
            .invoke_signed(signer_seeds)?;
        Ok(())
    }
}

/// Grape or ferment mint whose mint authority is the game config PDA
pub struct RewardCpi<'a, 'info> {
    pub token_program: &'a AccountInfo<'info>,
    pub mint: &'a AccountInfo<'info>,
    pub game_config: &'a AccountInfo<'info>,
    pub config_bump: u8,
}

impl<'a, 'info> RewardCpi<'a, 'info> {
    pub fn mint(&self, to: &AccountInfo<'info>, amount: u64) -> Result<()> {
        let bump = [self.config_bump];
        let seeds: &[&[u8]] = &[GameConfig::SEED, &bump];
        let signer_seeds: &[&[&[u8]]] = &[seeds];

        let cpi_accounts = MintTo {
            mint: self.mint.clone(),
            to: to.clone(),
            authority: self.game_config.clone(),
        };
        token_interface::mint_to(
            CpiContext::new_with_signer(self.token_program.clone(), cpi_accounts, signer_seeds),
            amount,
        )
    }

    pub fn burn(
        &self,
        from: &AccountInfo<'info>,
        authority: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let cpi_accounts = Burn {
            mint: self.mint.clone(),
            from: from.clone(),
            authority: authority.clone(),
        };
        token_interface::burn(
            CpiContext::new(self.token_program.clone(), cpi_accounts),
            amount,
        )
    }
}

pub fn pay_lamports<'info>(
    system_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    system_program::transfer(
        CpiContext::new(
            system_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
            },
        ),
        amount,
    )
}

/// Creates and writes the `["bottle", asset]` record.
///
/// Harvest only knows whether a bottle exists after the roll, so the record
/// cannot be an `init` account on the instruction.
pub fn create_bottle_record<'info>(
    record: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    mut bottle: Bottle,
) -> Result<()> {
    let asset = bottle.asset;
    let (expected, bump) =
        Pubkey::find_program_address(&[Bottle::SEED, asset.as_ref()], &crate::ID);
    require_keys_eq!(record.key(), expected, HashValleyError::AssetMismatch);
    bottle.bump = bump;

    let space = 8 + Bottle::INIT_SPACE;
    let lamports = Rent::get()?.minimum_balance(space);
    let bump_seed = [bump];
    let seeds: &[&[u8]] = &[Bottle::SEED, asset.as_ref(), &bump_seed];
    let signer_seeds: &[&[&[u8]]] = &[seeds];

    system_program::create_account(
        CpiContext::new_with_signer(
            system_program.clone(),
            CreateAccount {
                from: payer.clone(),
                to: record.clone(),
            },
            signer_seeds,
        ),
        lamports,
        space as u64,
        &crate::ID,
    )?;

    let mut data = record.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data;
    bottle.try_serialize(&mut writer)?;
    Ok(())
}
