//! Account-state ledger seen by the executive.

mod memory;
mod overlayed;

pub use self::memory::{MemoryAccount, MemoryBackend};
pub use self::overlayed::{ChangeSet, OverlayedLedger};

use alloc::vec::Vec;
use executive_core::TransactionException;
use primitive_types::{H160, H256, U256};

/// Basic account information.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Basic {
	/// Account balance.
	pub balance: U256,
	/// Account nonce.
	pub nonce: U256,
}

/// Read-only account store underneath the ledger.
#[auto_impl::auto_impl(&, &mut, Box)]
pub trait Backend {
	/// Whether account at address exists.
	fn exists(&self, address: H160) -> bool;
	/// Get basic account information.
	fn basic(&self, address: H160) -> Basic;
	/// Get account code.
	fn code(&self, address: H160) -> Vec<u8>;
	/// Get storage value of address at index.
	fn storage(&self, address: H160, index: H256) -> H256;
}

/// How a closed checkpoint is folded into its parent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeStrategy {
	/// Keep the changes.
	Commit,
	/// Drop the changes because the operation failed.
	Revert,
}

/// Attempt to close a checkpoint that was never opened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnevenSubstate;

/// A store with nested checkpoints.
#[auto_impl::auto_impl(&mut, Box)]
pub trait TransactionalBackend {
	/// Open a checkpoint.
	fn push_substate(&mut self);
	/// Close the innermost checkpoint.
	fn pop_substate(&mut self, strategy: MergeStrategy) -> Result<(), UnevenSubstate>;
}

/// Mutable account state the executive works against.
#[auto_impl::auto_impl(&mut, Box)]
pub trait Ledger: TransactionalBackend {
	fn balance(&self, address: H160) -> U256;
	fn nonce(&self, address: H160) -> U256;
	fn code(&self, address: H160) -> Vec<u8>;
	fn storage(&self, address: H160, index: H256) -> H256;
	fn exists(&self, address: H160) -> bool;

	/// Credit `value`. The account is created even if `value` is zero.
	fn add_balance(&mut self, address: H160, value: U256);
	/// Debit `value`, failing with `NotEnoughCash` if the balance is short.
	fn sub_balance(&mut self, address: H160, value: U256) -> Result<(), TransactionException>;
	fn inc_nonce(&mut self, address: H160);
	fn set_nonce(&mut self, address: H160, nonce: U256);
	fn set_code(&mut self, address: H160, code: Vec<u8>);
	fn set_storage(&mut self, address: H160, index: H256, value: H256);
	/// Clear all storage of an account.
	fn reset_storage(&mut self, address: H160);
	/// Remove an account with everything it holds.
	fn kill(&mut self, address: H160);

	/// Move `value` from `source` to `target`, creating `target`.
	fn transfer(
		&mut self,
		source: H160,
		target: H160,
		value: U256,
	) -> Result<(), TransactionException> {
		self.sub_balance(source, value)?;
		self.add_balance(target, value);
		Ok(())
	}
}
