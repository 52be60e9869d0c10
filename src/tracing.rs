//! Allows to listen to executive events.

use executive_core::TransactionException;
use executive_runtime::Context;
use primitive_types::{H160, U256};

environmental::environmental!(listener: dyn EventListener + 'static);

pub trait EventListener {
	fn event(&mut self, event: Event);
}

#[derive(Debug, Copy, Clone)]
pub enum Event<'a> {
	TransactCall {
		caller: H160,
		address: H160,
		value: U256,
		data: &'a [u8],
		gas_limit: U256,
	},
	TransactCreate {
		caller: H160,
		value: U256,
		init_code: &'a [u8],
		gas_limit: U256,
		address: H160,
	},
	Call {
		code_address: H160,
		context: &'a Context,
		input: &'a [u8],
		gas: U256,
		depth: usize,
	},
	Create {
		caller: H160,
		address: H160,
		value: U256,
		init_code: &'a [u8],
		gas: U256,
		depth: usize,
	},
	SelfDestruct {
		address: H160,
		beneficiary: H160,
		balance: U256,
	},
	Exit {
		depth: usize,
		exception: Option<TransactionException>,
		gas_left: U256,
		output: &'a [u8],
	},
}

impl<'a> Event<'a> {
	pub(crate) fn emit(self) {
		listener::with(|listener| listener.event(self));
	}
}

/// Run closure with provided listener.
pub fn using<R, F: FnOnce() -> R>(new: &mut (dyn EventListener + 'static), f: F) -> R {
	listener::using(new, f)
}
