use anchor_lang::prelude::*;

use crate::state::{Pool, ReserveLedger, SwapDirection};
use crate::constants::*;

/// Read-only view of a pool
#[derive(Accounts)]
pub struct Quote<'info> {
    #[account(
        seeds = [POOL_SEED, pool.token_a_mint.as_ref(), pool.token_b_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

pub fn get_reserves(ctx: Context<Quote>) -> Result<ReserveLedger> {
    Ok(ctx.accounts.pool.reserves())
}

pub fn get_amount_out(ctx: Context<Quote>, amount_in: u64, direction: SwapDirection) -> Result<u64> {
    ctx.accounts.pool.get_amount_out(amount_in, direction)
}
