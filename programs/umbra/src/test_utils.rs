use std::collections::{HashMap, HashSet};

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::errors::AmmError;
use crate::gateway::{BalanceHandle, ConfidentialTransferer, PoolToken};
use crate::state::{LiquidityPosition, Pool};

pub fn assert_amm_error<T>(result: Result<T>, expected: AmmError) {
    match result {
        Ok(_) => panic!("expected {:?}, operation succeeded", expected),
        Err(err) => assert_eq!(err, anchor_lang::error::Error::from(expected)),
    }
}

/// Plain-balance stand-in for the confidential token program
#[derive(Clone, Debug)]
pub struct MockGateway {
    pub pool: Pubkey,
    balances: HashMap<(PoolToken, Pubkey), u64>,
    operators: HashSet<Pubkey>,
    failing_recipient: Option<Pubkey>,
}

impl MockGateway {
    pub fn new(pool: Pubkey) -> Self {
        Self {
            pool,
            balances: HashMap::new(),
            operators: HashSet::new(),
            failing_recipient: None,
        }
    }

    pub fn fund(&mut self, token: PoolToken, owner: Pubkey, amount: u64) {
        *self.balances.entry((token, owner)).or_default() += amount;
    }

    /// Authorize the pool to pull from `owner`
    pub fn approve(&mut self, owner: Pubkey) {
        self.operators.insert(owner);
    }

    /// Make every push to `recipient` fail
    pub fn reject_pushes_to(&mut self, recipient: Pubkey) {
        self.failing_recipient = Some(recipient);
    }

    pub fn balance(&self, token: PoolToken, owner: &Pubkey) -> u64 {
        self.balances.get(&(token, *owner)).copied().unwrap_or(0)
    }

    /// Funded and approved trader or provider
    pub fn user(&mut self, amount_a: u64, amount_b: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.fund(PoolToken::A, user, amount_a);
        self.fund(PoolToken::B, user, amount_b);
        self.approve(user);
        user
    }

    fn transfer(&mut self, token: PoolToken, from: Pubkey, to: Pubkey, amount: u64) -> Result<()> {
        let from_balance = self.balance(token, &from);
        require!(from_balance >= amount, AmmError::InsufficientConfidentialBalance);
        self.balances.insert((token, from), from_balance - amount);
        *self.balances.entry((token, to)).or_default() += amount;
        Ok(())
    }
}

impl ConfidentialTransferer for MockGateway {
    fn pull(&mut self, token: PoolToken, from: &Pubkey, amount: u64) -> Result<()> {
        require!(self.operators.contains(from), AmmError::OperatorNotAuthorized);
        let pool = self.pool;
        self.transfer(token, *from, pool, amount)
    }

    fn push(&mut self, token: PoolToken, to: &Pubkey, amount: u64) -> Result<()> {
        require!(
            self.failing_recipient != Some(*to),
            AmmError::TransferRecipientMismatch
        );
        let pool = self.pool;
        self.transfer(token, pool, *to, amount)
    }

    fn balance_of(&self, token: PoolToken, owner: &Pubkey) -> Result<BalanceHandle> {
        let balance = self.balance(token, owner);
        let tag = [token as u8];
        let digest = hashv(&[&tag[..], owner.as_ref(), &balance.to_le_bytes()[..]]);
        Ok(BalanceHandle(digest.to_bytes()))
    }
}

/// Runs `op` with transaction semantics for token balances too: a failed
/// operation leaves the mock exactly as it was.
pub fn in_transaction<T>(
    gateway: &mut MockGateway,
    op: impl FnOnce(&mut MockGateway) -> Result<T>,
) -> Result<T> {
    let before = gateway.clone();
    let result = op(gateway);
    if result.is_err() {
        *gateway = before;
    }
    result
}

pub fn new_pool() -> Pool {
    Pool::new(
        255,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        0,
        0,
    )
}

pub fn position_for(owner: Pubkey) -> LiquidityPosition {
    LiquidityPosition::new(Pubkey::new_unique(), owner, 254)
}
