use crate::Config;
use executive_core::TransactionException;
use primitive_types::{U256, U512};

/// Gas charged before the first instruction of a transaction runs.
pub fn intrinsic_gas(data: &[u8], is_creation: bool, config: &Config) -> u64 {
	let zero_data_len = data.iter().filter(|v| **v == 0).count() as u64;
	let non_zero_data_len = data.len() as u64 - zero_data_len;

	let base = if is_creation {
		config.gas_transaction_create
	} else {
		config.gas_transaction_call
	};

	base + zero_data_len * config.gas_transaction_zero_data
		+ non_zero_data_len * config.gas_transaction_non_zero_data
}

/// Fails with `OutOfGasIntrinsic` when `gas_limit` does not cover the
/// intrinsic cost.
pub fn check_intrinsic(gas_limit: U256, intrinsic: u64) -> Result<(), TransactionException> {
	if gas_limit < U256::from(intrinsic) {
		log_cost!(
			"OutOfGasIntrinsic: limit {}, intrinsic {}",
			gas_limit,
			intrinsic
		);
		return Err(TransactionException::OutOfGasIntrinsic);
	}

	Ok(())
}

/// Amounts the sender commits to when a transaction is accepted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Envelope {
	/// `gas_limit` widened, used for the block gas check.
	pub gas_required: U512,
	/// `gas_limit * gas_price`.
	pub gas_cost: U512,
	/// `gas_cost + value`.
	pub total_cost: U512,
}

/// Checks that the gas limit covers the intrinsic cost and that the sender
/// can afford the transaction, in that order.
pub fn check_envelope(
	balance: U256,
	gas_limit: U256,
	gas_price: U256,
	value: U256,
	intrinsic: u64,
) -> Result<Envelope, TransactionException> {
	let gas_required = U512::from(gas_limit);
	let gas_cost = gas_limit.full_mul(gas_price);
	let total_cost = gas_cost + U512::from(value);

	check_intrinsic(gas_limit, intrinsic)?;

	if U512::from(balance) < total_cost {
		log_cost!(
			"NotEnoughCash: required {}, balance {}",
			total_cost,
			balance
		);
		return Err(TransactionException::NotEnoughCash);
	}

	Ok(Envelope {
		gas_required,
		gas_cost,
		total_cost,
	})
}

/// Cost of storing `len` bytes of deployed code.
pub fn code_deposit_cost(len: usize, config: &Config) -> U256 {
	U256::from(len) * U256::from(config.gas_code_deposit)
}

/// Portion of the accumulated refund counter that is actually returned.
pub fn refund_cap(gas_used: U256, refunds: U256, config: &Config) -> U256 {
	let cap = gas_used / U256::from(config.max_refund_quotient);
	if refunds < cap {
		refunds
	} else {
		cap
	}
}
