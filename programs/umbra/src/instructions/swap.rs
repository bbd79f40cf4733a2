use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::state::{Pool, SwapDirection};
use crate::constants::*;
use crate::errors::AmmError;
use crate::events::SwapExecuted;
use crate::gateway::{TokenRoute, VaultGateway};

#[derive(Accounts)]
pub struct Swap<'info> {
    /// User performing swap
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Pool state
    #[account(
        mut,
        seeds = [POOL_SEED, pool.token_a_mint.as_ref(), pool.token_b_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_a_mint @ AmmError::InvalidTokenMint)]
    pub token_a_mint: InterfaceAccount<'info, Mint>,

    #[account(address = pool.token_b_mint @ AmmError::InvalidTokenMint)]
    pub token_b_mint: InterfaceAccount<'info, Mint>,

    /// Token A vault
    #[account(
        mut,
        seeds = [VAULT_A_SEED, pool.key().as_ref()],
        bump,
        constraint = token_a_vault.key() == pool.token_a_vault @ AmmError::InvalidVault
    )]
    pub token_a_vault: InterfaceAccount<'info, TokenAccount>,

    /// Token B vault
    #[account(
        mut,
        seeds = [VAULT_B_SEED, pool.key().as_ref()],
        bump,
        constraint = token_b_vault.key() == pool.token_b_vault @ AmmError::InvalidVault
    )]
    pub token_b_vault: InterfaceAccount<'info, TokenAccount>,

    /// User's token A account
    #[account(
        mut,
        constraint = user_token_a.mint == pool.token_a_mint @ AmmError::InvalidTokenMint
    )]
    pub user_token_a: InterfaceAccount<'info, TokenAccount>,

    /// User's token B account
    #[account(
        mut,
        constraint = user_token_b.mint == pool.token_b_mint @ AmmError::InvalidTokenMint
    )]
    pub user_token_b: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(
    ctx: Context<Swap>,
    direction: SwapDirection,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let trader_key = ctx.accounts.trader.key();

    let token_a_mint = ctx.accounts.pool.token_a_mint;
    let token_b_mint = ctx.accounts.pool.token_b_mint;
    let bump = ctx.accounts.pool.bump;

    let seeds = &[
        POOL_SEED,
        token_a_mint.as_ref(),
        token_b_mint.as_ref(),
        &[bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let accounts = &mut *ctx.accounts;
    let mut gateway = VaultGateway {
        token_program: accounts.token_program.to_account_info(),
        signer: accounts.trader.to_account_info(),
        pool: accounts.pool.to_account_info(),
        pool_signer_seeds: signer_seeds,
        route_a: TokenRoute::new(&accounts.token_a_mint, &accounts.token_a_vault, &accounts.user_token_a),
        route_b: TokenRoute::new(&accounts.token_b_mint, &accounts.token_b_vault, &accounts.user_token_b),
    };

    let receipt = accounts
        .pool
        .swap(&trader_key, direction, amount_in, min_amount_out, &mut gateway)?;

    // Update pool stats
    let clock = Clock::get()?;
    let pool = &mut accounts.pool;
    pool.record_swap(&receipt, clock.unix_timestamp, clock.slot);
    let reserves = pool.reserves();

    emit!(SwapExecuted {
        pool: pool_key,
        trader: trader_key,
        token_in: pool.mint(direction.token_in()),
        token_out: pool.mint(direction.token_out()),
        amount_in,
        amount_out: receipt.amount_out,
        fee_amount: receipt.fee_amount,
        reserve_a: reserves.reserve_a,
        reserve_b: reserves.reserve_b,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Swapped {} for {}, fee: {}",
        amount_in,
        receipt.amount_out,
        receipt.fee_amount
    );

    Ok(receipt.amount_out)
}
