use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::state::{LiquidityPosition, Pool};
use crate::constants::*;
use crate::errors::AmmError;
use crate::events::LiquidityAdded;
use crate::gateway::{TokenRoute, VaultGateway};

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    /// Liquidity provider
    #[account(mut)]
    pub provider: Signer<'info>,

    /// Pool state
    #[account(
        mut,
        seeds = [POOL_SEED, pool.token_a_mint.as_ref(), pool.token_b_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Provider's share balance, created on first deposit
    #[account(
        init_if_needed,
        payer = provider,
        space = 8 + LiquidityPosition::INIT_SPACE,
        seeds = [POSITION_SEED, pool.key().as_ref(), provider.key().as_ref()],
        bump
    )]
    pub position: Account<'info, LiquidityPosition>,

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

    /// Provider's token A account
    #[account(
        mut,
        constraint = user_token_a.mint == pool.token_a_mint @ AmmError::InvalidTokenMint
    )]
    pub user_token_a: InterfaceAccount<'info, TokenAccount>,

    /// Provider's token B account
    #[account(
        mut,
        constraint = user_token_b.mint == pool.token_b_mint @ AmmError::InvalidTokenMint
    )]
    pub user_token_b: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<AddLiquidity>, amount_a: u64, amount_b: u64) -> Result<u128> {
    let pool_key = ctx.accounts.pool.key();
    let provider_key = ctx.accounts.provider.key();

    if !ctx.accounts.position.is_initialized() {
        ctx.accounts.position.set_inner(LiquidityPosition::new(
            pool_key,
            provider_key,
            ctx.bumps.position,
        ));
    }

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
        signer: accounts.provider.to_account_info(),
        pool: accounts.pool.to_account_info(),
        pool_signer_seeds: signer_seeds,
        route_a: TokenRoute::new(&accounts.token_a_mint, &accounts.token_a_vault, &accounts.user_token_a),
        route_b: TokenRoute::new(&accounts.token_b_mint, &accounts.token_b_vault, &accounts.user_token_b),
    };

    let liquidity = accounts
        .pool
        .add_liquidity(&mut accounts.position, amount_a, amount_b, &mut gateway)?;

    let clock = Clock::get()?;
    let pool = &mut accounts.pool;
    pool.last_update_slot = clock.slot;
    let reserves = pool.reserves();

    emit!(LiquidityAdded {
        pool: pool_key,
        provider: provider_key,
        amount_a,
        amount_b,
        liquidity_minted: liquidity,
        reserve_a: reserves.reserve_a,
        reserve_b: reserves.reserve_b,
        timestamp: clock.unix_timestamp,
    });

    msg!("Added liquidity: {} A, {} B, minted {} shares", amount_a, amount_b, liquidity);

    Ok(liquidity)
}
