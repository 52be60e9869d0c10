use super::{Backend, Basic, ChangeSet};
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use primitive_types::{H160, H256, U256};

/// Account information of a memory backend.
#[derive(Default, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(codec::Encode, codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryAccount {
	/// Account nonce.
	pub nonce: U256,
	/// Account balance.
	pub balance: U256,
	/// Full account storage.
	pub storage: BTreeMap<H256, H256>,
	/// Account code.
	pub code: Vec<u8>,
}

impl MemoryAccount {
	/// Whether the account has no balance, no nonce and no code.
	pub fn is_empty(&self) -> bool {
		self.balance.is_zero() && self.nonce.is_zero() && self.code.is_empty()
	}
}

/// Memory backend, storing all state values in a `BTreeMap` in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
	state: BTreeMap<H160, MemoryAccount>,
}

impl MemoryBackend {
	/// Create a new memory backend.
	pub fn new(state: BTreeMap<H160, MemoryAccount>) -> Self {
		Self { state }
	}

	/// Get the underlying `BTreeMap` storing the state.
	pub fn state(&self) -> &BTreeMap<H160, MemoryAccount> {
		&self.state
	}

	/// Write a change set into the state. With `delete_empty`, touched
	/// accounts left empty are removed.
	pub fn apply(&mut self, changes: ChangeSet, delete_empty: bool) {
		let mut touched = BTreeSet::new();

		for address in changes.deletes {
			self.state.remove(&address);
		}
		for address in changes.storage_resets {
			if let Some(account) = self.state.get_mut(&address) {
				account.storage = BTreeMap::new();
			}
		}
		for (address, balance) in changes.balances {
			self.state.entry(address).or_default().balance = balance;
			touched.insert(address);
		}
		for (address, nonce) in changes.nonces {
			self.state.entry(address).or_default().nonce = nonce;
			touched.insert(address);
		}
		for (address, code) in changes.codes {
			self.state.entry(address).or_default().code = code;
			touched.insert(address);
		}
		for ((address, index), value) in changes.storages {
			let account = self.state.entry(address).or_default();
			if value == H256::default() {
				account.storage.remove(&index);
			} else {
				account.storage.insert(index, value);
			}
			touched.insert(address);
		}

		if delete_empty {
			for address in touched {
				if self.state.get(&address).map_or(false, MemoryAccount::is_empty) {
					log::trace!(target: "executive", "Deleting empty account {:?}", address);
					self.state.remove(&address);
				}
			}
		}
	}
}

impl Backend for MemoryBackend {
	fn exists(&self, address: H160) -> bool {
		self.state.contains_key(&address)
	}

	fn basic(&self, address: H160) -> Basic {
		self.state
			.get(&address)
			.map(|a| Basic {
				balance: a.balance,
				nonce: a.nonce,
			})
			.unwrap_or_default()
	}

	fn code(&self, address: H160) -> Vec<u8> {
		self.state
			.get(&address)
			.map(|v| v.code.clone())
			.unwrap_or_default()
	}

	fn storage(&self, address: H160, index: H256) -> H256 {
		self.state
			.get(&address)
			.and_then(|v| v.storage.get(&index).copied())
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn apply_kills_before_writing() {
		let address = H160::from_low_u64_be(1);
		let mut state = BTreeMap::new();
		state.insert(
			address,
			MemoryAccount {
				nonce: U256::one(),
				balance: U256::from(5),
				..Default::default()
			},
		);
		let mut backend = MemoryBackend::new(state);

		let mut changes = ChangeSet::default();
		changes.deletes.insert(address);
		changes.balances.insert(address, U256::from(3));
		backend.apply(changes, false);

		let account = &backend.state()[&address];
		assert_eq!(account.balance, U256::from(3));
		assert_eq!(account.nonce, U256::zero());
	}

	#[test]
	fn apply_removes_touched_empty_accounts() {
		let address = H160::from_low_u64_be(2);
		let mut backend = MemoryBackend::default();

		let mut changes = ChangeSet::default();
		changes.balances.insert(address, U256::zero());
		backend.apply(changes.clone(), false);
		assert!(backend.exists(address));

		backend.apply(changes, true);
		assert!(!backend.exists(address));
	}
}
