pub mod ledger;
pub mod pool;
pub mod position;

pub use ledger::*;
pub use pool::*;
pub use position::*;
