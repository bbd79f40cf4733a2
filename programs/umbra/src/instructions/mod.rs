pub mod add_liquidity;
pub mod initialize_pool;
pub mod quote;
pub mod remove_liquidity;
pub mod swap;

pub use add_liquidity::*;
pub use initialize_pool::*;
pub use quote::*;
pub use remove_liquidity::*;
pub use swap::*;
