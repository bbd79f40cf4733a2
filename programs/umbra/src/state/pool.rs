use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::AmmError;
use crate::gateway::{ConfidentialTransferer, PoolToken};
use crate::guard::ReentrancyGuard;
use crate::math::{
    calculate_amounts_for_liquidity, calculate_bootstrap_liquidity, calculate_liquidity_to_mint,
    fee_amount, get_amount_out, verify_invariant,
};
use crate::state::{LiquidityPosition, ReserveLedger};

/// Direction of a swap
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    AToB,
    BToA,
}

impl SwapDirection {
    pub fn token_in(self) -> PoolToken {
        match self {
            SwapDirection::AToB => PoolToken::A,
            SwapDirection::BToA => PoolToken::B,
        }
    }

    pub fn token_out(self) -> PoolToken {
        self.token_in().other()
    }
}

/// Result of a committed swap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapReceipt {
    pub direction: SwapDirection,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_amount: u64,
}

/// Reserves plus the shares issued against them.
///
/// Everything a mutating operation may change on the pool lives here, so
/// it can be snapshotted and restored as one value.
#[derive(
    AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq,
)]
pub struct LiquidityBook {
    pub reserves: ReserveLedger,

    /// Total outstanding liquidity shares
    pub total_shares: u128,
}

impl LiquidityBook {
    pub fn is_empty(&self) -> bool {
        self.total_shares == 0 && self.reserves.is_empty()
    }

    fn add_liquidity<G: ConfidentialTransferer>(
        &mut self,
        position: &mut LiquidityPosition,
        amount_a: u64,
        amount_b: u64,
        gateway: &mut G,
    ) -> Result<u128> {
        require!(amount_a > 0 && amount_b > 0, AmmError::ZeroAmount);

        let liquidity = if self.is_empty() {
            calculate_bootstrap_liquidity(amount_a, amount_b)?
        } else {
            calculate_liquidity_to_mint(
                amount_a,
                amount_b,
                self.reserves.reserve_a,
                self.reserves.reserve_b,
                self.total_shares,
            )?
        };

        let reserves = self
            .reserves
            .credited(PoolToken::A, amount_a)?
            .credited(PoolToken::B, amount_b)?;
        let total_shares = self
            .total_shares
            .checked_add(liquidity)
            .ok_or(AmmError::Overflow)?;
        let shares = position
            .shares
            .checked_add(liquidity)
            .ok_or(AmmError::Overflow)?;

        gateway.pull(PoolToken::A, &position.owner, amount_a)?;
        gateway.pull(PoolToken::B, &position.owner, amount_b)?;

        self.reserves = reserves;
        self.total_shares = total_shares;
        position.shares = shares;

        Ok(liquidity)
    }

    fn remove_liquidity<G: ConfidentialTransferer>(
        &mut self,
        position: &mut LiquidityPosition,
        liquidity: u128,
        gateway: &mut G,
    ) -> Result<(u64, u64)> {
        require!(liquidity > 0, AmmError::ZeroLiquidity);
        require!(!self.is_empty(), AmmError::NoLiquidity);
        require!(liquidity <= position.shares, AmmError::InsufficientShares);

        let (amount_a, amount_b) = calculate_amounts_for_liquidity(
            liquidity,
            self.reserves.reserve_a,
            self.reserves.reserve_b,
            self.total_shares,
        )?;

        let reserves = self
            .reserves
            .debited(PoolToken::A, amount_a)?
            .debited(PoolToken::B, amount_b)?;

        // Burn before anything leaves the pool
        position.shares -= liquidity;
        self.total_shares = self
            .total_shares
            .checked_sub(liquidity)
            .ok_or(AmmError::Underflow)?;
        self.reserves = reserves;

        gateway.push(PoolToken::A, &position.owner, amount_a)?;
        gateway.push(PoolToken::B, &position.owner, amount_b)?;

        Ok((amount_a, amount_b))
    }

    fn swap<G: ConfidentialTransferer>(
        &mut self,
        trader: &Pubkey,
        direction: SwapDirection,
        amount_in: u64,
        min_amount_out: u64,
        gateway: &mut G,
    ) -> Result<u64> {
        let (token_in, token_out) = (direction.token_in(), direction.token_out());
        let reserve_out = self.reserves.get(token_out);

        let amount_out = get_amount_out(amount_in, self.reserves.get(token_in), reserve_out)?;

        require!(amount_out >= min_amount_out, AmmError::SlippageExceeded);
        // Holds for the 997/1000 fee; asserted so a drained side never commits
        require!(amount_out < reserve_out, AmmError::InsufficientReserves);

        let reserves = self
            .reserves
            .credited(token_in, amount_in)?
            .debited(token_out, amount_out)?;

        verify_invariant(
            self.reserves.reserve_a,
            self.reserves.reserve_b,
            reserves.reserve_a,
            reserves.reserve_b,
        )?;

        gateway.pull(token_in, trader, amount_in)?;
        self.reserves = reserves;
        gateway.push(token_out, trader, amount_out)?;

        Ok(amount_out)
    }
}

/// Liquidity pool state
/// PDA Seeds: ["pool", token_a_mint, token_b_mint]
#[account]
#[derive(InitSpace)]
pub struct Pool {
    /// Version for future upgrades
    pub version: u8,

    /// Bump seed for PDA
    pub bump: u8,

    /// Token A mint
    pub token_a_mint: Pubkey,

    /// Token B mint
    pub token_b_mint: Pubkey,

    /// Token A vault (PDA-owned)
    pub token_a_vault: Pubkey,

    /// Token B vault (PDA-owned)
    pub token_b_vault: Pubkey,

    /// Reserves and total shares
    pub book: LiquidityBook,

    /// Set while a mutating operation is in flight
    pub locked: bool,

    /// Total number of swaps
    pub total_swaps: u64,

    /// Cumulative volume in token A
    pub cumulative_volume_a: u64,

    /// Cumulative volume in token B
    pub cumulative_volume_b: u64,

    /// Cumulative fees in token A
    pub cumulative_fees_a: u64,

    /// Cumulative fees in token B
    pub cumulative_fees_b: u64,

    /// Pool creation timestamp
    pub created_at: i64,

    /// Last swap timestamp
    pub last_swap_timestamp: i64,

    /// Last update slot
    pub last_update_slot: u64,

    /// Reserved for future upgrades (128 bytes)
    pub _reserved: [u8; 128],
}

impl Pool {
    pub fn new(
        bump: u8,
        token_a_mint: Pubkey,
        token_b_mint: Pubkey,
        token_a_vault: Pubkey,
        token_b_vault: Pubkey,
        created_at: i64,
        slot: u64,
    ) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            bump,
            token_a_mint,
            token_b_mint,
            token_a_vault,
            token_b_vault,
            book: LiquidityBook::default(),
            locked: false,
            total_swaps: 0,
            cumulative_volume_a: 0,
            cumulative_volume_b: 0,
            cumulative_fees_a: 0,
            cumulative_fees_b: 0,
            created_at,
            last_swap_timestamp: 0,
            last_update_slot: slot,
            _reserved: [0; 128],
        }
    }

    /// Snapshot of current reserves
    pub fn reserves(&self) -> ReserveLedger {
        self.book.reserves
    }

    pub fn total_shares(&self) -> u128 {
        self.book.total_shares
    }

    pub fn is_empty(&self) -> bool {
        self.book.is_empty()
    }

    pub fn mint(&self, token: PoolToken) -> Pubkey {
        match token {
            PoolToken::A => self.token_a_mint,
            PoolToken::B => self.token_b_mint,
        }
    }

    /// Get current price of token B per token A (Q64 format)
    pub fn price_a(&self) -> u128 {
        let reserves = self.reserves();
        if reserves.reserve_a == 0 {
            return 0;
        }
        (reserves.reserve_b as u128)
            .saturating_mul(Q64)
            .saturating_div(reserves.reserve_a as u128)
    }

    /// Get current price of token A per token B (Q64 format)
    pub fn price_b(&self) -> u128 {
        let reserves = self.reserves();
        if reserves.reserve_b == 0 {
            return 0;
        }
        (reserves.reserve_a as u128)
            .saturating_mul(Q64)
            .saturating_div(reserves.reserve_b as u128)
    }

    /// Quote a swap against current reserves without touching state
    pub fn get_amount_out(&self, amount_in: u64, direction: SwapDirection) -> Result<u64> {
        let reserves = self.reserves();
        get_amount_out(
            amount_in,
            reserves.get(direction.token_in()),
            reserves.get(direction.token_out()),
        )
    }

    /// Deposit both tokens from `position.owner`, minting shares to the position
    pub fn add_liquidity<G: ConfidentialTransferer>(
        &mut self,
        position: &mut LiquidityPosition,
        amount_a: u64,
        amount_b: u64,
        gateway: &mut G,
    ) -> Result<u128> {
        let shares = position.shares;
        let result = self.transact(|book| book.add_liquidity(position, amount_a, amount_b, gateway));
        if result.is_err() {
            position.shares = shares;
        }
        result
    }

    /// Burn `liquidity` shares from the position and pay out both tokens
    pub fn remove_liquidity<G: ConfidentialTransferer>(
        &mut self,
        position: &mut LiquidityPosition,
        liquidity: u128,
        gateway: &mut G,
    ) -> Result<(u64, u64)> {
        let shares = position.shares;
        let result = self.transact(|book| book.remove_liquidity(position, liquidity, gateway));
        if result.is_err() {
            position.shares = shares;
        }
        result
    }

    pub fn swap<G: ConfidentialTransferer>(
        &mut self,
        trader: &Pubkey,
        direction: SwapDirection,
        amount_in: u64,
        min_amount_out: u64,
        gateway: &mut G,
    ) -> Result<SwapReceipt> {
        let amount_out = self.transact(|book| {
            book.swap(trader, direction, amount_in, min_amount_out, gateway)
        })?;

        Ok(SwapReceipt {
            direction,
            amount_in,
            amount_out,
            fee_amount: fee_amount(amount_in),
        })
    }

    /// Record swap statistics
    pub fn record_swap(&mut self, receipt: &SwapReceipt, timestamp: i64, slot: u64) {
        let (volume_a, volume_b, fee_a, fee_b) = match receipt.direction {
            SwapDirection::AToB => (receipt.amount_in, receipt.amount_out, receipt.fee_amount, 0),
            SwapDirection::BToA => (receipt.amount_out, receipt.amount_in, 0, receipt.fee_amount),
        };

        self.total_swaps = self.total_swaps.saturating_add(1);
        self.cumulative_volume_a = self.cumulative_volume_a.saturating_add(volume_a);
        self.cumulative_volume_b = self.cumulative_volume_b.saturating_add(volume_b);
        self.cumulative_fees_a = self.cumulative_fees_a.saturating_add(fee_a);
        self.cumulative_fees_b = self.cumulative_fees_b.saturating_add(fee_b);
        self.last_swap_timestamp = timestamp;
        self.last_update_slot = slot;
    }

    /// Run `op` under the reentrancy guard; the book is restored if it fails
    fn transact<T>(&mut self, op: impl FnOnce(&mut LiquidityBook) -> Result<T>) -> Result<T> {
        let _guard = ReentrancyGuard::acquire(&mut self.locked)?;
        let committed = self.book;

        let result = op(&mut self.book);
        if result.is_err() {
            self.book = committed;
        }
        result
    }
}
