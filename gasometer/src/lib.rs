//! Gas schedule and transaction cost model.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "force-debug")]
macro_rules! log_cost {
	($($arg:tt)*) => (
		log::trace!(target: "executive", "Gasometer {}", format_args!($($arg)*));
	)
}

#[cfg(not(feature = "force-debug"))]
macro_rules! log_cost {
	($($arg:tt)*) => {};
}

mod config;
mod consts;
mod costs;

pub use crate::config::Config;
pub use crate::consts::{CALL_STACK_LIMIT, MAX_CODE_SIZE};
pub use crate::costs::{
	check_envelope, check_intrinsic, code_deposit_cost, intrinsic_gas, refund_cap, Envelope,
};
