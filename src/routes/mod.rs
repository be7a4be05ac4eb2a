mod error;
mod root;
pub mod coffee;
pub mod customer;
pub mod order;
pub mod order_detail;

pub use error::*;
pub use root::*;
pub use coffee::*;
pub use customer::*;
pub use order::*;
pub use order_detail::*;
