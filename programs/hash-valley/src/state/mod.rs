pub mod game_config;
pub mod vineyard;
pub mod bottle;
pub mod stake_record;

pub use game_config::*;
pub use vineyard::*;
pub use bottle::*;
pub use stake_record::*;
