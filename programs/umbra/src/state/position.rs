use anchor_lang::prelude::*;

/// A provider's claim on the pool's liquidity shares
/// PDA Seeds: ["position", pool, owner]
#[account]
#[derive(InitSpace)]
pub struct LiquidityPosition {
    /// Pool the shares belong to
    pub pool: Pubkey,

    /// Liquidity provider
    pub owner: Pubkey,

    /// Share balance
    pub shares: u128,

    /// Bump seed for PDA
    pub bump: u8,
}

impl LiquidityPosition {
    pub fn new(pool: Pubkey, owner: Pubkey, bump: u8) -> Self {
        Self {
            pool,
            owner,
            shares: 0,
            bump,
        }
    }

    /// Freshly allocated accounts are zeroed
    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }
}
