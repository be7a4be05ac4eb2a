use std::{error::Error, fmt::Debug};

use thiserror::Error;

use crate::utils::error_fmt_chain;

mod coffee;
mod customer;
mod order_details;
mod orders;

pub use coffee::*;
pub use customer::*;
pub use order_details::*;
pub use orders::*;

// Failure of a single blocking diesel operation
#[derive(Error)]
pub enum QueryError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}
