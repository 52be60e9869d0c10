use crate::consts::*;

/// Gas schedule and execution limits of one hard fork.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
	/// Gas paid by every message-call transaction.
	pub gas_transaction_call: u64,
	/// Gas paid by every contract-creation transaction.
	pub gas_transaction_create: u64,
	/// Gas paid for each zero byte of transaction payload.
	pub gas_transaction_zero_data: u64,
	/// Gas paid for each non-zero byte of transaction payload.
	pub gas_transaction_non_zero_data: u64,
	/// Gas paid per byte of deployed contract code.
	pub gas_code_deposit: u64,
	/// Refund granted for each self-destructed account.
	pub gas_suicide_refund: u64,
	/// Refunds are capped at `gas_used / max_refund_quotient`.
	pub max_refund_quotient: u64,
	/// Deepest allowed call or creation.
	pub call_stack_limit: usize,
	/// Whether an unaffordable code deposit fails the creation with
	/// `OutOfGas`. Before Homestead the contract was created with empty code.
	pub exceptional_failed_code_deposit: bool,
	/// Whether newly created contracts start with nonce one.
	pub create_increase_nonce: bool,
	/// Maximum size of deployed code.
	pub create_contract_limit: Option<usize>,
}

impl Config {
	/// Frontier hard fork configuration.
	pub const fn frontier() -> Config {
		Config {
			gas_transaction_call: G_TRANSACTION,
			gas_transaction_create: G_TRANSACTION,
			gas_transaction_zero_data: G_TXDATAZERO,
			gas_transaction_non_zero_data: G_TXDATANONZERO_FRONTIER,
			gas_code_deposit: G_CODEDEPOSIT,
			gas_suicide_refund: R_SUICIDE,
			max_refund_quotient: MAX_REFUND_QUOTIENT,
			call_stack_limit: CALL_STACK_LIMIT,
			exceptional_failed_code_deposit: false,
			create_increase_nonce: false,
			create_contract_limit: None,
		}
	}

	/// Homestead
	pub const fn homestead() -> Config {
		let mut config = Self::frontier();
		config.gas_transaction_create = G_TRANSACTION_CREATE_HOMESTEAD;
		config.exceptional_failed_code_deposit = true;
		config
	}

	/// Spurious dragon
	pub const fn spurious_dragon() -> Config {
		let mut config = Self::homestead();
		config.create_increase_nonce = true;
		config.create_contract_limit = Some(MAX_CODE_SIZE);
		config
	}

	/// Byzantium
	pub const fn byzantium() -> Config {
		Self::spurious_dragon()
	}

	/// Istanbul hard fork configuration.
	pub const fn istanbul() -> Config {
		let mut config = Self::byzantium();
		config.gas_transaction_non_zero_data = G_TXDATANONZERO_ISTANBUL;
		config
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::istanbul()
	}
}
