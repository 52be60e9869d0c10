//! Transaction and message-call executive for an Ethereum-style state
//! machine.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use executive_core::*;
pub use executive_gasometer as gasometer;
pub use executive_runtime::*;

#[cfg(feature = "tracing")]
pub mod tracing;

#[cfg(feature = "tracing")]
macro_rules! event {
	($x:expr) => {{
		use crate::tracing::Event::*;
		($x).emit();
	}};
}

#[cfg(not(feature = "tracing"))]
macro_rules! event {
	($x:expr) => {};
}

pub mod backend;
pub mod env;
pub mod executor;
mod transaction;

pub use crate::env::{BlockHashSource, Environment, LastHashes};
pub use crate::executor::{
	create_address, simple_trace, CodeDeposit, ExecutionResult, Executive, ExecutiveError,
	Externality, Stage, StepRecord, Substate,
};
pub use crate::transaction::{Transaction, TransactionAction};
