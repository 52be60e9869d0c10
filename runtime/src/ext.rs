use crate::{CallParameters, Context, OnStep};
use alloc::vec::Vec;
use primitive_types::{H160, H256, U256};

/// Result of a nested message call as seen by the calling code.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallOutcome {
	pub success: bool,
	pub gas_left: U256,
	pub output: Vec<u8>,
}

/// Result of a nested contract creation as seen by the creating code.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateOutcome {
	/// Address of the new contract, `None` when the creation failed.
	pub address: Option<H160>,
	pub gas_left: U256,
	/// Revert data of a failed creation, empty otherwise.
	pub output: Vec<u8>,
}

/// Capabilities the interpreter uses to observe and change the world.
pub trait Ext {
	/// Get the execution context.
	fn context(&self) -> &Context;
	/// Get the current call depth.
	fn depth(&self) -> usize;

	/// Get environmental block number.
	fn block_number(&self) -> U256;
	/// Get environmental fee recipient.
	fn block_author(&self) -> H160;
	/// Get environmental block timestamp.
	fn block_timestamp(&self) -> U256;
	/// Get environmental block difficulty.
	fn block_difficulty(&self) -> U256;
	/// Get environmental gas limit.
	fn block_gas_limit(&self) -> U256;
	/// Get hash of one of the last 256 blocks, zero for any other number.
	fn block_hash(&self, number: U256) -> H256;

	/// Get balance of address.
	fn balance(&self, address: H160) -> U256;
	/// Get code of address.
	fn code(&self, address: H160) -> Vec<u8>;
	/// Check whether an address exists.
	fn exists(&self, address: H160) -> bool;

	/// Get storage value of the executing account at index.
	fn storage(&self, index: H256) -> H256;
	/// Set storage value of the executing account at index.
	fn set_storage(&mut self, index: H256, value: H256);

	/// Create a log owned by the executing account.
	fn log(&mut self, topics: Vec<H256>, data: Vec<u8>);
	/// Increase the refund counter.
	fn refund(&mut self, amount: U256);
	/// Move the whole balance of the executing account to `beneficiary` and
	/// schedule the account for deletion.
	fn suicide(&mut self, beneficiary: H160);

	/// Invoke a nested message call. Failures are reported through
	/// [`CallOutcome::success`].
	fn call(&mut self, params: CallParameters, on_step: Option<&mut OnStep<'_>>) -> CallOutcome;
	/// Invoke a nested contract creation.
	fn create(
		&mut self,
		endowment: U256,
		gas: U256,
		init_code: &[u8],
		on_step: Option<&mut OnStep<'_>>,
	) -> CreateOutcome;
}
