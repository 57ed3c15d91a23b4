pub mod deposit;
pub mod initialize;
pub mod set_fee_recipients;
pub mod set_fees;
pub mod view;
pub mod withdraw;

pub use deposit::*;
pub use initialize::*;
pub use set_fee_recipients::*;
pub use set_fees::*;
pub use view::*;
pub use withdraw::*;
