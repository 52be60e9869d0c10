use alloc::vec::Vec;
use primitive_types::{H160, U256};

/// Execution context of one interpreter invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
	/// Account whose code runs and whose storage is accessed.
	pub address: H160,
	/// Immediate caller.
	pub caller: H160,
	/// Sender of the enclosing transaction.
	pub origin: H160,
	/// Value transferred along with the call or creation.
	pub value: U256,
	/// Gas price of the enclosing transaction.
	pub gas_price: U256,
}

/// Parameters of a message call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallParameters {
	/// Account paying the value.
	pub sender: H160,
	/// Account receiving the value.
	pub receiver: H160,
	/// Account whose code is run. Usually the receiver.
	pub code_address: H160,
	/// Transferred value.
	pub value: U256,
	/// Gas handed to the call.
	pub gas: U256,
	/// Call data.
	pub data: Vec<u8>,
}

impl CallParameters {
	/// Plain call where the code of the receiver runs.
	pub fn new(sender: H160, receiver: H160, value: U256, gas: U256, data: Vec<u8>) -> Self {
		Self {
			sender,
			receiver,
			code_address: receiver,
			value,
			gas,
			data,
		}
	}
}
