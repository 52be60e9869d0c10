//! Block environment a transaction executes in.

use alloc::vec::Vec;
use primitive_types::{H160, H256, U256};

/// Number of ancestor hashes visible to executing code.
pub const LAST_HASHES_WINDOW: usize = 256;

/// Source of historical block hashes.
#[auto_impl::auto_impl(&, Box)]
pub trait BlockHashSource {
	/// Hash of the block `offset + 1` blocks behind the current one. Offset
	/// zero is the parent. Zero hash outside of the known window.
	fn hash_of_block(&self, offset: usize) -> H256;
}

/// Hashes of the most recent ancestors, parent first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LastHashes(Vec<H256>);

impl LastHashes {
	/// Keeps at most the first 256 hashes.
	pub fn new(mut hashes: Vec<H256>) -> Self {
		hashes.truncate(LAST_HASHES_WINDOW);
		Self(hashes)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl BlockHashSource for LastHashes {
	fn hash_of_block(&self, offset: usize) -> H256 {
		self.0.get(offset).copied().unwrap_or_default()
	}
}

/// Block-level parameters shared by every transaction of a block.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
	/// Number of the block being built.
	pub number: U256,
	/// Fee recipient.
	pub author: H160,
	pub timestamp: U256,
	pub difficulty: U256,
	/// Block gas limit.
	pub gas_limit: U256,
	/// Gas already consumed by earlier transactions of the block.
	pub gas_used: U256,
	/// Default source of ancestor hashes.
	pub last_hashes: LastHashes,
}

impl Environment {
	/// Offset of an ancestor from the current block, `None` outside of the
	/// last 256 blocks.
	pub fn hash_offset(&self, number: U256) -> Option<usize> {
		if number >= self.number
			|| self.number - number > U256::from(LAST_HASHES_WINDOW)
		{
			return None;
		}

		Some((self.number - number - U256::one()).as_usize())
	}

	/// Hash of the block with the given absolute number, looked up in
	/// `source`. Only the last 256 blocks are visible.
	pub fn block_hash_in(&self, number: U256, source: &dyn BlockHashSource) -> H256 {
		self.hash_offset(number)
			.map(|offset| source.hash_of_block(offset))
			.unwrap_or_default()
	}

	/// Hash of the block with the given absolute number, looked up in
	/// [`Environment::last_hashes`].
	pub fn block_hash(&self, number: U256) -> H256 {
		self.block_hash_in(number, &self.last_hashes)
	}
}
