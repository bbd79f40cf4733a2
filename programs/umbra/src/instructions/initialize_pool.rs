use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::state::Pool;
use crate::constants::*;
use crate::errors::AmmError;
use crate::events::PoolCreated;

#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Pays for the pool and vault accounts
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Token A mint
    pub token_a_mint: InterfaceAccount<'info, Mint>,

    /// Token B mint
    #[account(
        constraint = token_b_mint.key() != token_a_mint.key() @ AmmError::IdenticalTokenMints
    )]
    pub token_b_mint: InterfaceAccount<'info, Mint>,

    /// Pool state account
    #[account(
        init,
        payer = payer,
        space = 8 + Pool::INIT_SPACE,
        seeds = [POOL_SEED, token_a_mint.key().as_ref(), token_b_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// Token A vault
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_A_SEED, pool.key().as_ref()],
        bump,
        token::mint = token_a_mint,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub token_a_vault: InterfaceAccount<'info, TokenAccount>,

    /// Token B vault
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_B_SEED, pool.key().as_ref()],
        bump,
        token::mint = token_b_mint,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub token_b_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializePool>) -> Result<()> {
    let clock = Clock::get()?;

    let pool = &mut ctx.accounts.pool;
    pool.set_inner(Pool::new(
        ctx.bumps.pool,
        ctx.accounts.token_a_mint.key(),
        ctx.accounts.token_b_mint.key(),
        ctx.accounts.token_a_vault.key(),
        ctx.accounts.token_b_vault.key(),
        clock.unix_timestamp,
        clock.slot,
    ));

    emit!(PoolCreated {
        pool: pool.key(),
        token_a_mint: pool.token_a_mint,
        token_b_mint: pool.token_b_mint,
        timestamp: clock.unix_timestamp,
    });

    msg!("Pool initialized: {}", pool.key());

    Ok(())
}
