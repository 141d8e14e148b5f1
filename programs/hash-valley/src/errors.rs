use anchor_lang::prelude::*;

#[error_code]
pub enum HashValleyError {
    #[msg("wrong #params")]
    WrongParamCount,

    #[msg("Attribute out of range")]
    AttributeOutOfRange,

    #[msg("Max vineyards minted")]
    MaxVineyardsMinted,

    #[msg("Game already started")]
    GameAlreadyStarted,

    #[msg("Not planting time")]
    NotPlantingTime,

    #[msg("Vineyard already planted this season")]
    AlreadyPlanted,

    #[msg("Vineyard not planted this season")]
    NotPlanted,

    #[msg("Vineyard can't be watered")]
    CannotWater,

    #[msg("Not harvest time")]
    NotHarvestTime,

    #[msg("Vineyard already harvested")]
    AlreadyHarvested,

    #[msg("Vineyard not alive")]
    VineyardNotAlive,

    #[msg("No grapes to harvest")]
    NothingToHarvest,

    #[msg("Sprinkler already active")]
    SprinklerActive,

    #[msg("Vineyard already under attack")]
    AlreadyWithering,

    #[msg("Vineyard not under attack")]
    NotWithering,

    #[msg("Vineyard already withered")]
    AlreadyWithered,

    #[msg("Cannot wither own vineyard")]
    OwnVineyard,

    #[msg("Vineyard already vitalized this season")]
    AlreadyVitalized,

    #[msg("Not owner")]
    NotOwner,

    #[msg("Bottle not owned")]
    BottleNotOwned,

    #[msg("Bottle spoiled")]
    BottleSpoiled,

    #[msg("Bottle already in cellar")]
    AlreadyStaked,

    #[msg("Not staker")]
    NotStaker,

    #[msg("cannot rejuve")]
    CannotRejuvenate,

    #[msg("Insufficient token balance")]
    InsufficientBalance,

    #[msg("Negative duration")]
    NegativeDuration,

    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Collection not set")]
    CollectionNotSet,

    #[msg("Invalid collection")]
    InvalidCollection,

    #[msg("Asset does not match record")]
    AssetMismatch,

    #[msg("Invalid Core asset data")]
    InvalidCoreAsset,

    #[msg("Invalid mint")]
    InvalidMint,

    #[msg("Batch accounts malformed")]
    InvalidBatch,

    #[msg("Invalid game parameters")]
    InvalidGameParams,

    #[msg("Ferment accounts required to pay for withering")]
    FermentAccountsRequired,
}

#[cfg(test)]
pub(crate) fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(e) => panic!("unexpected program error: {:?}", e),
    }
}

#[cfg(test)]
pub(crate) fn code_of(err: HashValleyError) -> u32 {
    err as u32 + anchor_lang::error::ERROR_CODE_OFFSET
}
