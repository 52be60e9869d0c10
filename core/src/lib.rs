//! Outcome taxonomy and side-effect records shared by every layer of the
//! transaction executive.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod log;

pub use crate::error::TransactionException;
pub use crate::log::LogEntry;
