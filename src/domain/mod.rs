mod error;
mod ledger;
mod line_item;
mod money;
mod words;

pub use error::*;
pub use ledger::*;
pub use line_item::*;
pub use money::*;
pub use words::*;
