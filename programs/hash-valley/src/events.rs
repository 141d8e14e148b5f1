use anchor_lang::prelude::*;

#[event]
pub struct GameStarted {
    pub game_start: i64,
}

#[event]
pub struct VineyardMinted {
    pub vineyard_id: u32,
    pub asset: Pubkey,
    pub owner: Pubkey,
    pub attributes: Vec<u8>,
    pub price: u64,
}

#[event]
pub struct SprinklerPurchased {
    pub vineyard_id: u32,
    pub expiry: i64,
}

#[event]
pub struct Planted {
    pub vineyard_id: u32,
    pub season: u32,
}

#[event]
pub struct Watered {
    pub vineyard_id: u32,
    pub watered_at: i64,
}

#[event]
pub struct Harvested {
    pub vineyard_id: u32,
    pub season: u32,
    pub bottle_id: u32,
}

#[event]
pub struct HarvestFailure {
    pub vineyard_id: u32,
    pub season: u32,
}

#[event]
pub struct GrapesHarvested {
    pub vineyard_id: u32,
    pub amount: u64,
}

#[event]
pub struct Withered {
    pub vineyard_id: u32,
    pub attacker: Pubkey,
    pub cost: u64,
}

#[event]
pub struct Defended {
    pub vineyard_id: u32,
}

#[event]
pub struct Vitalized {
    pub vineyard_id: u32,
    pub season: u32,
}

#[event]
pub struct BottleStaked {
    pub bottle_id: u32,
    pub staker: Pubkey,
    pub staked_at: i64,
}

#[event]
pub struct BottleSpoiled {
    pub bottle_id: u32,
    pub staker: Pubkey,
    pub days: u64,
    pub reward: u64,
}

#[event]
pub struct BottleMatured {
    pub bottle_id: u32,
    pub staker: Pubkey,
    pub days: u64,
}

#[event]
pub struct BottleRejuvenated {
    pub old_bottle_id: u32,
    pub new_bottle_id: u32,
    pub owner: Pubkey,
}
