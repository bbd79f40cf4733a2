use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TransferChecked};

use crate::errors::AmmError;

/// Which of the pool's two tokens a transfer moves
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolToken {
    A,
    B,
}

impl PoolToken {
    pub fn other(self) -> Self {
        match self {
            PoolToken::A => PoolToken::B,
            PoolToken::B => PoolToken::A,
        }
    }
}

/// Opaque reference to a confidential balance.
///
/// The pool never interprets it; only the token program can resolve it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceHandle(pub [u8; 32]);

/// Moves confidential tokens in and out of the pool.
///
/// Amounts are always cleartext; only resting balances are opaque.
pub trait ConfidentialTransferer {
    /// Debit `from` and credit the pool.
    fn pull(&mut self, token: PoolToken, from: &Pubkey, amount: u64) -> Result<()>;

    /// Credit `to` out of the pool's holdings.
    fn push(&mut self, token: PoolToken, to: &Pubkey, amount: u64) -> Result<()>;

    fn balance_of(&self, token: PoolToken, owner: &Pubkey) -> Result<BalanceHandle>;
}

/// Accounts needed to move one of the pool's tokens
pub struct TokenRoute<'info> {
    pub mint: AccountInfo<'info>,
    pub decimals: u8,
    pub vault: AccountInfo<'info>,
    pub user_account: AccountInfo<'info>,
    pub user_account_owner: Pubkey,
}

impl<'info> TokenRoute<'info> {
    pub fn new(
        mint: &InterfaceAccount<'info, Mint>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        user_account: &InterfaceAccount<'info, TokenAccount>,
    ) -> Self {
        Self {
            mint: mint.to_account_info(),
            decimals: mint.decimals,
            vault: vault.to_account_info(),
            user_account: user_account.to_account_info(),
            user_account_owner: user_account.owner,
        }
    }
}

/// CPI gateway over the token interface.
///
/// `pull` is authorized by the transaction signer, `push` by the pool PDA.
pub struct VaultGateway<'a, 'info> {
    pub token_program: AccountInfo<'info>,
    pub signer: AccountInfo<'info>,
    pub pool: AccountInfo<'info>,
    pub pool_signer_seeds: &'a [&'a [&'a [u8]]],
    pub route_a: TokenRoute<'info>,
    pub route_b: TokenRoute<'info>,
}

impl<'a, 'info> VaultGateway<'a, 'info> {
    fn route(&self, token: PoolToken) -> &TokenRoute<'info> {
        match token {
            PoolToken::A => &self.route_a,
            PoolToken::B => &self.route_b,
        }
    }
}

impl<'a, 'info> ConfidentialTransferer for VaultGateway<'a, 'info> {
    fn pull(&mut self, token: PoolToken, from: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*from, self.signer.key(), AmmError::OperatorNotAuthorized);
        let route = self.route(token);
        require_keys_eq!(
            route.user_account_owner,
            *from,
            AmmError::OperatorNotAuthorized
        );

        token_interface::transfer_checked(
            CpiContext::new(
                self.token_program.clone(),
                TransferChecked {
                    from: route.user_account.clone(),
                    mint: route.mint.clone(),
                    to: route.vault.clone(),
                    authority: self.signer.clone(),
                },
            ),
            amount,
            route.decimals,
        )
    }

    fn push(&mut self, token: PoolToken, to: &Pubkey, amount: u64) -> Result<()> {
        let route = self.route(token);
        require_keys_eq!(
            route.user_account_owner,
            *to,
            AmmError::TransferRecipientMismatch
        );

        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                TransferChecked {
                    from: route.vault.clone(),
                    mint: route.mint.clone(),
                    to: route.user_account.clone(),
                    authority: self.pool.clone(),
                },
                self.pool_signer_seeds,
            ),
            amount,
            route.decimals,
        )
    }

    fn balance_of(&self, token: PoolToken, owner: &Pubkey) -> Result<BalanceHandle> {
        let route = self.route(token);
        if *owner == self.pool.key() {
            return Ok(BalanceHandle(route.vault.key().to_bytes()));
        }
        require_keys_eq!(
            route.user_account_owner,
            *owner,
            AmmError::TransferRecipientMismatch
        );
        Ok(BalanceHandle(route.user_account.key().to_bytes()))
    }
}
