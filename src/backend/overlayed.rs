use alloc::{
	boxed::Box,
	collections::{BTreeMap, BTreeSet},
	vec::Vec,
};
use core::mem;

use executive_core::TransactionException;
use primitive_types::{H160, H256, U256};

use super::{Backend, Ledger, MergeStrategy, TransactionalBackend, UnevenSubstate};

/// Everything an overlayed ledger changed on top of its backend.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChangeSet {
	pub balances: BTreeMap<H160, U256>,
	pub codes: BTreeMap<H160, Vec<u8>>,
	pub nonces: BTreeMap<H160, U256>,
	pub storage_resets: BTreeSet<H160>,
	pub storages: BTreeMap<(H160, H256), H256>,
	/// Killed accounts. Writes listed above happened after the kill.
	pub deletes: BTreeSet<H160>,
}

/// Ledger keeping one change layer per open checkpoint on top of a
/// read-only backend.
pub struct OverlayedLedger<B> {
	backend: B,
	layer: Box<Layer>,
}

impl<B> OverlayedLedger<B> {
	pub fn new(backend: B) -> Self {
		Self {
			backend,
			layer: Box::new(Layer::new()),
		}
	}

	/// Number of open checkpoints.
	pub fn depth(&self) -> usize {
		let mut depth = 0;
		let mut layer = &self.layer;
		while let Some(parent) = layer.parent.as_ref() {
			depth += 1;
			layer = parent;
		}
		depth
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	/// Split into the backend and the changes of the root layer. Checkpoints
	/// still open are dropped.
	pub fn deconstruct(mut self) -> (B, ChangeSet) {
		while let Some(parent) = self.layer.parent.take() {
			self.layer = parent;
		}

		let layer = *self.layer;
		(
			self.backend,
			ChangeSet {
				balances: layer.balances,
				codes: layer.codes,
				nonces: layer.nonces,
				storage_resets: layer.storage_resets,
				storages: layer.storages,
				deletes: layer.deletes,
			},
		)
	}
}

impl<B: Backend> Ledger for OverlayedLedger<B> {
	fn balance(&self, address: H160) -> U256 {
		if let Some(balance) = self.layer.known_balance(address) {
			balance
		} else {
			self.backend.basic(address).balance
		}
	}

	fn nonce(&self, address: H160) -> U256 {
		if let Some(nonce) = self.layer.known_nonce(address) {
			nonce
		} else {
			self.backend.basic(address).nonce
		}
	}

	fn code(&self, address: H160) -> Vec<u8> {
		if let Some(code) = self.layer.known_code(address) {
			code
		} else {
			self.backend.code(address)
		}
	}

	fn storage(&self, address: H160, index: H256) -> H256 {
		if let Some(value) = self.layer.known_storage(address, index) {
			value
		} else {
			self.backend.storage(address, index)
		}
	}

	fn exists(&self, address: H160) -> bool {
		if let Some(exists) = self.layer.known_exists(address) {
			exists
		} else {
			self.backend.exists(address)
		}
	}

	fn add_balance(&mut self, address: H160, value: U256) {
		let balance = self.balance(address).saturating_add(value);
		self.layer.balances.insert(address, balance);
	}

	fn sub_balance(&mut self, address: H160, value: U256) -> Result<(), TransactionException> {
		let balance = self.balance(address);
		if balance < value {
			return Err(TransactionException::NotEnoughCash);
		}
		self.layer.balances.insert(address, balance - value);
		Ok(())
	}

	fn inc_nonce(&mut self, address: H160) {
		let nonce = self.nonce(address).saturating_add(U256::one());
		self.layer.nonces.insert(address, nonce);
	}

	fn set_nonce(&mut self, address: H160, nonce: U256) {
		self.layer.nonces.insert(address, nonce);
	}

	fn set_code(&mut self, address: H160, code: Vec<u8>) {
		self.layer.codes.insert(address, code);
	}

	fn set_storage(&mut self, address: H160, index: H256, value: H256) {
		self.layer.storages.insert((address, index), value);
	}

	fn reset_storage(&mut self, address: H160) {
		self.layer.reset_storage(address);
	}

	fn kill(&mut self, address: H160) {
		self.layer.kill(address);
	}
}

impl<B: Backend> TransactionalBackend for OverlayedLedger<B> {
	fn push_substate(&mut self) {
		let mut parent = Box::new(Layer::new());
		mem::swap(&mut parent, &mut self.layer);
		self.layer.parent = Some(parent);
	}

	fn pop_substate(&mut self, strategy: MergeStrategy) -> Result<(), UnevenSubstate> {
		let mut child = self.layer.parent.take().ok_or(UnevenSubstate)?;
		mem::swap(&mut child, &mut self.layer);

		match strategy {
			MergeStrategy::Commit => self.layer.merge(*child),
			MergeStrategy::Revert => {}
		}

		Ok(())
	}
}

struct Layer {
	parent: Option<Box<Layer>>,
	balances: BTreeMap<H160, U256>,
	codes: BTreeMap<H160, Vec<u8>>,
	nonces: BTreeMap<H160, U256>,
	storage_resets: BTreeSet<H160>,
	storages: BTreeMap<(H160, H256), H256>,
	deletes: BTreeSet<H160>,
}

impl Layer {
	fn new() -> Self {
		Self {
			parent: None,
			balances: Default::default(),
			codes: Default::default(),
			nonces: Default::default(),
			storage_resets: Default::default(),
			storages: Default::default(),
			deletes: Default::default(),
		}
	}

	fn reset_storage(&mut self, address: H160) {
		self.storages.retain(|(a, _), _| *a != address);
		self.storage_resets.insert(address);
	}

	fn kill(&mut self, address: H160) {
		self.balances.remove(&address);
		self.codes.remove(&address);
		self.nonces.remove(&address);
		self.storage_resets.remove(&address);
		self.storages.retain(|(a, _), _| *a != address);
		self.deletes.insert(address);
	}

	/// Fold a committed child into this layer. Kills and resets of the child
	/// happened before any of its writes.
	fn merge(&mut self, child: Layer) {
		for address in child.deletes {
			self.kill(address);
		}
		for address in child.storage_resets {
			self.reset_storage(address);
		}
		for (address, balance) in child.balances {
			self.balances.insert(address, balance);
		}
		for (address, code) in child.codes {
			self.codes.insert(address, code);
		}
		for (address, nonce) in child.nonces {
			self.nonces.insert(address, nonce);
		}
		for ((address, index), value) in child.storages {
			self.storages.insert((address, index), value);
		}
	}

	fn known_balance(&self, address: H160) -> Option<U256> {
		if let Some(balance) = self.balances.get(&address) {
			Some(*balance)
		} else if self.deletes.contains(&address) {
			Some(U256::zero())
		} else if let Some(parent) = self.parent.as_ref() {
			parent.known_balance(address)
		} else {
			None
		}
	}

	fn known_nonce(&self, address: H160) -> Option<U256> {
		if let Some(nonce) = self.nonces.get(&address) {
			Some(*nonce)
		} else if self.deletes.contains(&address) {
			Some(U256::zero())
		} else if let Some(parent) = self.parent.as_ref() {
			parent.known_nonce(address)
		} else {
			None
		}
	}

	fn known_code(&self, address: H160) -> Option<Vec<u8>> {
		if let Some(code) = self.codes.get(&address) {
			Some(code.clone())
		} else if self.deletes.contains(&address) {
			Some(Vec::new())
		} else if let Some(parent) = self.parent.as_ref() {
			parent.known_code(address)
		} else {
			None
		}
	}

	fn known_storage(&self, address: H160, index: H256) -> Option<H256> {
		if let Some(value) = self.storages.get(&(address, index)) {
			Some(*value)
		} else if self.deletes.contains(&address) || self.storage_resets.contains(&address) {
			Some(H256::default())
		} else if let Some(parent) = self.parent.as_ref() {
			parent.known_storage(address, index)
		} else {
			None
		}
	}

	fn known_exists(&self, address: H160) -> Option<bool> {
		if self.balances.contains_key(&address)
			|| self.nonces.contains_key(&address)
			|| self.codes.contains_key(&address)
		{
			Some(true)
		} else if self.deletes.contains(&address) {
			Some(false)
		} else if let Some(parent) = self.parent.as_ref() {
			parent.known_exists(address)
		} else {
			None
		}
	}
}
