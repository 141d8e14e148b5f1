use anchor_lang::prelude::*;
use crate::errors::HashValleyError;
use crate::events::GameStarted;
use crate::state::GameConfig;

#[derive(Accounts)]
pub struct StartGame<'info> {
    #[account(
        constraint = authority.key() == game_config.authority @ HashValleyError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GameConfig::SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,
}

pub fn handler(ctx: Context<StartGame>) -> Result<()> {
    let config = &mut ctx.accounts.game_config;
    require!(!config.season_clock().started(), HashValleyError::GameAlreadyStarted);

    let now = Clock::get()?.unix_timestamp;
    config.game_start = now;

    emit!(GameStarted { game_start: now });
    msg!("Game started at {}", now);
    Ok(())
}
