use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    // Initialization
    #[msg("Token mints must be different")]
    IdenticalTokenMints,

    // Validation
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("First deposit must price token A at 2 units per token B")]
    InvalidBootstrapRatio,

    #[msg("Deposit is not proportional to current reserves")]
    InvalidRatio,

    // Liquidity
    #[msg("Liquidity amount is zero")]
    ZeroLiquidity,

    #[msg("Pool has no liquidity")]
    NoLiquidity,

    #[msg("Liquidity exceeds provider share balance")]
    InsufficientShares,

    #[msg("Withdrawal would return nothing")]
    ZeroOutput,

    // Swap
    #[msg("Insufficient liquidity for swap")]
    InsufficientLiquidity,

    #[msg("Insufficient output amount")]
    InsufficientOutput,

    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,

    // Capacity
    #[msg("Reserve overflow")]
    Overflow,

    #[msg("Reserve underflow")]
    Underflow,

    #[msg("Output exceeds reserves")]
    InsufficientReserves,

    #[msg("Invariant violated")]
    InvariantViolation,

    // Concurrency
    #[msg("Reentrant call")]
    Reentrant,

    // Gateway
    #[msg("Pool is not an authorized operator for this account")]
    OperatorNotAuthorized,

    #[msg("Insufficient confidential balance")]
    InsufficientConfidentialBalance,

    #[msg("Transfer recipient does not own the destination account")]
    TransferRecipientMismatch,

    // Accounts
    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid vault")]
    InvalidVault,
}
