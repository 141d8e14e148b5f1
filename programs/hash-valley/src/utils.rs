use anchor_lang::prelude::*;
use crate::assets::MPL_CORE_ID;
use crate::curves::BPS_DENOMINATOR;
use crate::errors::HashValleyError;

/// Seconds between `since` and `now`, refusing negative durations
pub fn elapsed(since: i64, now: i64) -> Result<i64> {
    require!(now >= since, HashValleyError::NegativeDuration);
    now.checked_sub(since).ok_or_else(|| error!(HashValleyError::Overflow))
}

/// Parse a Metaplex Core asset account to extract the owner
pub fn core_asset_owner(asset_info: &AccountInfo) -> Result<Pubkey> {
    require_keys_eq!(*asset_info.owner, MPL_CORE_ID, HashValleyError::InvalidCoreAsset);
    let asset_data = asset_info.try_borrow_data()?;

    // BaseAssetV1 layout: key (1 byte) then owner (32 bytes)
    if asset_data.len() < 33 {
        return Err(HashValleyError::InvalidCoreAsset.into());
    }

    let owner_bytes: [u8; 32] = asset_data[1..33]
        .try_into()
        .map_err(|_| HashValleyError::InvalidCoreAsset)?;

    Ok(Pubkey::new_from_array(owner_bytes))
}

pub fn require_owner(asset_info: &AccountInfo, owner: &Pubkey) -> Result<()> {
    let actual = core_asset_owner(asset_info)?;
    require_keys_eq!(actual, *owner, HashValleyError::NotOwner);
    Ok(())
}

/// Uniform roll in `[0, 10_000)` derived from the given seed material.
///
/// On-chain the seed is built from the clock and the participating keys, which
/// a caller can compute ahead of submitting. Anything with real value riding
/// on the outcome needs a verifiable randomness source instead.
pub fn roll_bps(seed_parts: &[&[u8]]) -> u16 {
    let mut hasher = blake3::Hasher::new();
    for part in seed_parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest.as_bytes()[..8]);
    (u64::from_le_bytes(word) % BPS_DENOMINATOR as u64) as u16
}

/// Roll from the current clock plus the keys involved in the call
pub fn clock_roll(clock: &Clock, keys: &[&Pubkey]) -> u16 {
    let slot = clock.slot.to_le_bytes();
    let timestamp = clock.unix_timestamp.to_le_bytes();
    let mut parts: Vec<&[u8]> = vec![&slot[..], &timestamp[..]];
    parts.extend(keys.iter().map(|k| k.as_ref()));
    roll_bps(&parts)
}

/// Convert whole tokens to base units of a mint
pub fn to_base_units(whole: u64, decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(u32::from(decimals))
        .and_then(|scale| whole.checked_mul(scale))
        .ok_or_else(|| error!(HashValleyError::Overflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{code_of, error_code};

    #[test]
    fn test_elapsed_rejects_negative() {
        assert_eq!(elapsed(100, 160).unwrap(), 60);
        assert_eq!(elapsed(100, 100).unwrap(), 0);
        let err = elapsed(160, 100).unwrap_err();
        assert_eq!(error_code(err), code_of(HashValleyError::NegativeDuration));
    }

    #[test]
    fn test_roll_is_deterministic_and_bounded() {
        let a = roll_bps(&[&b"bottle"[..], &7u32.to_le_bytes()[..]]);
        let b = roll_bps(&[&b"bottle"[..], &7u32.to_le_bytes()[..]]);
        assert_eq!(a, b);
        for i in 0u32..500 {
            assert!(roll_bps(&[&i.to_le_bytes()[..]]) < BPS_DENOMINATOR);
        }
    }

    #[test]
    fn test_roll_spreads_over_range() {
        let rolls: Vec<u16> = (0u32..2_000).map(|i| roll_bps(&[&i.to_le_bytes()[..]])).collect();
        let low = rolls.iter().filter(|r| **r < 5_000).count();
        assert!(low > 800 && low < 1_200, "low half count {}", low);
    }

    #[test]
    fn test_to_base_units() {
        assert_eq!(to_base_units(2_380, 0).unwrap(), 2_380);
        assert_eq!(to_base_units(2_380, 9).unwrap(), 2_380_000_000_000);
        let err = to_base_units(u64::MAX, 9).unwrap_err();
        assert_eq!(error_code(err), code_of(HashValleyError::Overflow));
    }
}
