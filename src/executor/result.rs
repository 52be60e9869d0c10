use alloc::vec::Vec;
use executive_core::TransactionException;
use executive_runtime::Step;
use primitive_types::{H160, U256};

/// What happened to the code returned by a contract creation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodeDeposit {
	/// No creation, or the creation did not get to deposit code.
	#[default]
	None,
	/// The code could not be paid for or was too large.
	Failed,
	Success,
}

/// One instruction of the execution path.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRecord {
	pub depth: u32,
	pub pc: u32,
	pub opcode: u8,
	pub gas: U256,
}

impl From<&Step> for StepRecord {
	fn from(step: &Step) -> Self {
		Self {
			depth: step.depth as u32,
			pc: step.pc as u32,
			opcode: step.opcode,
			gas: step.gas,
		}
	}
}

/// Summary of a finalized transaction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionResult {
	pub gas_used: U256,
	pub new_address: Option<H160>,
	pub exception: Option<TransactionException>,
	pub output: Vec<u8>,
	pub code_deposit: CodeDeposit,
	/// Gas returned from the refund counter.
	pub gas_refunded: U256,
	/// Size of the code the creation tried to deposit.
	pub deposit_size: u64,
	/// Gas left when the deposit was attempted.
	pub gas_for_deposit: U256,
	/// Execution path, empty unless requested.
	pub trace: Vec<StepRecord>,
}
