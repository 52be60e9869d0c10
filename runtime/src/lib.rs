//! Boundary between the executive and a bytecode interpreter.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod context;
mod ext;
mod step;

pub use executive_core::*;

pub use crate::context::{CallParameters, Context};
pub use crate::ext::{CallOutcome, CreateOutcome, Ext};
pub use crate::step::{OnStep, Step};

use alloc::vec::Vec;
use primitive_types::U256;

/// What the interpreter hands back after running a piece of code.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VmOutcome {
	pub gas_left: U256,
	pub output: Vec<u8>,
	/// `None` when the code halted normally.
	pub exception: Option<TransactionException>,
}

impl VmOutcome {
	pub fn succeed(gas_left: U256, output: Vec<u8>) -> Self {
		Self {
			gas_left,
			output,
			exception: None,
		}
	}

	pub fn fail(exception: TransactionException, gas_left: U256, output: Vec<u8>) -> Self {
		Self {
			gas_left,
			output,
			exception: Some(exception),
		}
	}
}

/// A bytecode interpreter.
#[auto_impl::auto_impl(&, Box)]
pub trait Vm {
	/// Run `code` with `gas` against `ext`. `on_step` is called before every
	/// instruction when given.
	fn exec(
		&self,
		gas: U256,
		code: &[u8],
		input: &[u8],
		ext: &mut dyn Ext,
		on_step: Option<&mut OnStep<'_>>,
	) -> VmOutcome;
}
