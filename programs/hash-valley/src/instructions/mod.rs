#![allow(ambiguous_glob_reexports)]

pub(crate) mod batch;

pub mod initialize;
pub mod update_config;
pub mod transfer_collection_authority;
pub mod start_game;
pub mod new_vineyard;
pub mod buy_sprinkler;
pub mod plant;
pub mod water;
pub mod harvest;
pub mod harvest_grapes;
pub mod spells;
pub mod stake;
pub mod withdraw;
pub mod rejuvenate;

pub use initialize::*;
pub use update_config::*;
pub use transfer_collection_authority::*;
pub use start_game::*;
pub use new_vineyard::*;
pub use buy_sprinkler::*;
pub use plant::*;
pub use water::*;
pub use harvest::*;
pub use harvest_grapes::*;
pub use spells::*;
pub use stake::*;
pub use withdraw::*;
pub use rejuvenate::*;
