use alloc::vec::Vec;
use primitive_types::{H160, H256};

/// A log record emitted by successfully executed code.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
	/// Account that emitted the log.
	pub address: H160,
	/// Indexed topics, in emission order.
	pub topics: Vec<H256>,
	/// Opaque payload.
	pub data: Vec<u8>,
}

impl LogEntry {
	pub fn new(address: H160, topics: Vec<H256>, data: Vec<u8>) -> Self {
		Self {
			address,
			topics,
			data,
		}
	}
}
