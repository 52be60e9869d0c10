use alloc::vec::Vec;
use primitive_types::{H160, U256};

/// Target of a transaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransactionAction {
	/// Message call to the given account.
	Call(H160),
	/// Contract creation running the payload as init code.
	Create,
}

/// A signed transaction with its sender already recovered.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
	/// `None` when the signature did not recover to an address.
	pub sender: Option<H160>,
	pub action: TransactionAction,
	pub nonce: U256,
	pub gas_limit: U256,
	pub gas_price: U256,
	pub value: U256,
	/// Call data, or init code for a creation.
	pub data: Vec<u8>,
}

impl Transaction {
	pub fn is_creation(&self) -> bool {
		self.action == TransactionAction::Create
	}
}
