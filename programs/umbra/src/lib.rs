use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod guard;
pub mod instructions;
pub mod math;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use instructions::*;
pub use state::{ReserveLedger, SwapDirection};

declare_id!("A9RkjmYBSdnS556MseBVN6zoJqSb44qt1PCzzTM5DrsD");

#[program]
pub mod umbra {
    use super::*;

    pub fn initialize_pool(ctx: Context<InitializePool>) -> Result<()> {
        instructions::initialize_pool::handler(ctx)
    }

    pub fn add_liquidity(ctx: Context<AddLiquidity>, amount_a: u64, amount_b: u64) -> Result<u128> {
        instructions::add_liquidity::handler(ctx, amount_a, amount_b)
    }

    pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, liquidity: u128) -> Result<WithdrawnAmounts> {
        instructions::remove_liquidity::handler(ctx, liquidity)
    }

    pub fn swap_a_for_b(ctx: Context<Swap>, amount_in: u64, min_amount_out: u64) -> Result<u64> {
        instructions::swap::handler(ctx, SwapDirection::AToB, amount_in, min_amount_out)
    }

    pub fn swap_b_for_a(ctx: Context<Swap>, amount_in: u64, min_amount_out: u64) -> Result<u64> {
        instructions::swap::handler(ctx, SwapDirection::BToA, amount_in, min_amount_out)
    }

    pub fn get_reserves(ctx: Context<Quote>) -> Result<ReserveLedger> {
        instructions::quote::get_reserves(ctx)
    }

    pub fn get_amount_out(ctx: Context<Quote>, amount_in: u64, direction: SwapDirection) -> Result<u64> {
        instructions::quote::get_amount_out(ctx, amount_in, direction)
    }
}
