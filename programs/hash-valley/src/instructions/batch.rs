use anchor_lang::prelude::*;
use crate::errors::HashValleyError;
use crate::state::Vineyard;
use crate::utils::require_owner;

/// Loads a vineyard record and checks it points at `asset`
pub fn load_vineyard<'info>(
    record: &'info AccountInfo<'info>,
    asset: &AccountInfo<'info>,
) -> Result<Account<'info, Vineyard>> {
    let vineyard = Account::<Vineyard>::try_from(record)?;
    require_keys_eq!(vineyard.asset, asset.key(), HashValleyError::AssetMismatch);
    Ok(vineyard)
}

/// Splits remaining accounts into groups of `width`, each led by a vineyard
/// record and its Core asset. A vineyard may appear only once.
pub fn vineyard_groups<'info>(
    remaining: &'info [AccountInfo<'info>],
    width: usize,
) -> Result<Vec<(Account<'info, Vineyard>, &'info [AccountInfo<'info>])>> {
    require!(
        width >= 2 && !remaining.is_empty() && remaining.len() % width == 0,
        HashValleyError::InvalidBatch
    );

    let mut seen: Vec<u32> = Vec::with_capacity(remaining.len() / width);
    let mut entries = Vec::with_capacity(remaining.len() / width);
    for group in remaining.chunks_exact(width) {
        let vineyard = load_vineyard(&group[0], &group[1])?;
        require!(!seen.contains(&vineyard.id), HashValleyError::InvalidBatch);
        seen.push(vineyard.id);
        entries.push((vineyard, group));
    }
    Ok(entries)
}

/// `vineyard_groups` where every vineyard must be owned by `owner`
pub fn owned_vineyards<'info>(
    remaining: &'info [AccountInfo<'info>],
    width: usize,
    owner: &Pubkey,
) -> Result<Vec<(Account<'info, Vineyard>, &'info [AccountInfo<'info>])>> {
    let entries = vineyard_groups(remaining, width)?;
    for (_, group) in &entries {
        require_owner(&group[1], owner)?;
    }
    Ok(entries)
}
