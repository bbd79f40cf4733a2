use anchor_lang::prelude::*;

use crate::errors::AmmError;
use crate::gateway::PoolToken;

/// Cleartext reserves held by the pool
#[derive(
    AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq,
)]
pub struct ReserveLedger {
    /// Reserve of token A
    pub reserve_a: u64,

    /// Reserve of token B
    pub reserve_b: u64,
}

impl ReserveLedger {
    pub fn get(&self, token: PoolToken) -> u64 {
        match token {
            PoolToken::A => self.reserve_a,
            PoolToken::B => self.reserve_b,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reserve_a == 0 && self.reserve_b == 0
    }

    /// Ledger after `amount` of `token` comes in; fails if the reserve would exceed u64
    pub fn credited(self, token: PoolToken, amount: u64) -> Result<Self> {
        let reserve = self.get(token).checked_add(amount).ok_or(AmmError::Overflow)?;
        Ok(self.with(token, reserve))
    }

    /// Ledger after `amount` of `token` goes out
    pub fn debited(self, token: PoolToken, amount: u64) -> Result<Self> {
        let reserve = self.get(token).checked_sub(amount).ok_or(AmmError::Underflow)?;
        Ok(self.with(token, reserve))
    }

    /// Calculate invariant k = reserve_a * reserve_b
    pub fn k(&self) -> u128 {
        (self.reserve_a as u128) * (self.reserve_b as u128)
    }

    fn with(mut self, token: PoolToken, reserve: u64) -> Self {
        match token {
            PoolToken::A => self.reserve_a = reserve,
            PoolToken::B => self.reserve_b = reserve,
        }
        self
    }
}
