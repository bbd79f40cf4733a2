/// Umbra AMM Constants

// ============================================================================
// SCALING CONSTANTS
// ============================================================================

/// Precision for price calculations (2^64)
pub const Q64: u128 = 1u128 << 64;

// ============================================================================
// FEE
// ============================================================================

/// Share of the input kept for pricing: 0.3% fee (997/1000)
pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1_000;

// ============================================================================
// BOOTSTRAP
// ============================================================================

/// Units of token A per unit of token B required on the first deposit
pub const BOOTSTRAP_PRICE_RATIO: u64 = 2;

// ============================================================================
// PDA SEEDS
// ============================================================================

/// Seed for pool PDA
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for token A vault PDA
pub const VAULT_A_SEED: &[u8] = b"vault_a";

/// Seed for token B vault PDA
pub const VAULT_B_SEED: &[u8] = b"vault_b";

/// Seed for liquidity position PDA
pub const POSITION_SEED: &[u8] = b"position";

// ============================================================================
// PROTOCOL
// ============================================================================

/// Current protocol version
pub const PROTOCOL_VERSION: u8 = 1;
