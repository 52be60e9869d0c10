use alloc::vec::Vec;

use executive_core::LogEntry;
use executive_gasometer::Config;
use executive_runtime::{CallOutcome, CallParameters, Context, CreateOutcome, Ext, OnStep, Vm};
use primitive_types::{H160, H256, U256};

use crate::backend::Ledger;
use crate::env::{BlockHashSource, Environment};
use crate::executor::{Executive, Substate};

/// Capabilities handed to the interpreter for one invocation. Nested calls
/// and creations run in a child executive one level deeper.
pub struct Externality<'a, L> {
	ledger: &'a mut L,
	config: &'a Config,
	env: &'a Environment,
	hashes: &'a dyn BlockHashSource,
	vm: &'a dyn Vm,
	depth: usize,
	context: Context,
	substate: &'a mut Substate,
}

impl<'a, L: Ledger> Externality<'a, L> {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		ledger: &'a mut L,
		config: &'a Config,
		env: &'a Environment,
		hashes: &'a dyn BlockHashSource,
		vm: &'a dyn Vm,
		depth: usize,
		context: Context,
		substate: &'a mut Substate,
	) -> Self {
		Self {
			ledger,
			config,
			env,
			hashes,
			vm,
			depth,
			context,
			substate,
		}
	}
}

impl<'a, L: Ledger> Ext for Externality<'a, L> {
	fn context(&self) -> &Context {
		&self.context
	}

	fn depth(&self) -> usize {
		self.depth
	}

	fn block_number(&self) -> U256 {
		self.env.number
	}

	fn block_author(&self) -> H160 {
		self.env.author
	}

	fn block_timestamp(&self) -> U256 {
		self.env.timestamp
	}

	fn block_difficulty(&self) -> U256 {
		self.env.difficulty
	}

	fn block_gas_limit(&self) -> U256 {
		self.env.gas_limit
	}

	fn block_hash(&self, number: U256) -> H256 {
		self.env.block_hash_in(number, self.hashes)
	}

	fn balance(&self, address: H160) -> U256 {
		self.ledger.balance(address)
	}

	fn code(&self, address: H160) -> Vec<u8> {
		self.ledger.code(address)
	}

	fn exists(&self, address: H160) -> bool {
		self.ledger.exists(address)
	}

	fn storage(&self, index: H256) -> H256 {
		self.ledger.storage(self.context.address, index)
	}

	fn set_storage(&mut self, index: H256, value: H256) {
		self.ledger.set_storage(self.context.address, index, value);
	}

	fn log(&mut self, topics: Vec<H256>, data: Vec<u8>) {
		self.substate
			.logs
			.push(LogEntry::new(self.context.address, topics, data));
	}

	fn refund(&mut self, amount: U256) {
		self.substate.refunds = self.substate.refunds.saturating_add(amount);
	}

	fn suicide(&mut self, beneficiary: H160) {
		let address = self.context.address;
		let balance = self.ledger.balance(address);

		event!(SelfDestruct {
			address,
			beneficiary,
			balance,
		});

		self.ledger.add_balance(beneficiary, balance);
		// A self-beneficiary burns its balance.
		let remaining = self.ledger.balance(address);
		if let Err(exception) = self.ledger.sub_balance(address, remaining) {
			log::warn!(target: "executive", "Self-destruct of {:?}: {:?}", address, exception);
		}
		self.substate.suicides.insert(address);
	}

	fn call(&mut self, params: CallParameters, on_step: Option<&mut OnStep<'_>>) -> CallOutcome {
		let mut executive = Executive::new(
			&mut *self.ledger,
			self.config,
			self.env,
			self.vm,
			self.depth + 1,
		)
		.with_block_hashes(self.hashes);

		let result = executive
			.call(params, self.context.gas_price, self.context.origin)
			.and_then(|done| if done { Ok(()) } else { executive.go(on_step) });
		if let Err(error) = result {
			log::warn!(
				target: "executive",
				"Nested call at depth {} aborted: {:?}",
				self.depth + 1,
				error
			);
			return CallOutcome::default();
		}

		let success = !executive.excepted();
		if success {
			if let Err(error) = executive.accrue_sub_state(self.substate) {
				log::warn!(target: "executive", "Substate of nested call lost: {:?}", error);
			}
		}

		CallOutcome {
			success,
			gas_left: executive.gas(),
			output: executive.output().to_vec(),
		}
	}

	fn create(
		&mut self,
		endowment: U256,
		gas: U256,
		init_code: &[u8],
		on_step: Option<&mut OnStep<'_>>,
	) -> CreateOutcome {
		let creator = self.context.address;
		self.ledger.inc_nonce(creator);

		let mut executive = Executive::new(
			&mut *self.ledger,
			self.config,
			self.env,
			self.vm,
			self.depth + 1,
		)
		.with_block_hashes(self.hashes);

		let result = executive
			.create(
				creator,
				endowment,
				self.context.gas_price,
				gas,
				init_code,
				self.context.origin,
			)
			.and_then(|done| if done { Ok(()) } else { executive.go(on_step) });
		if let Err(error) = result {
			log::warn!(
				target: "executive",
				"Nested creation at depth {} aborted: {:?}",
				self.depth + 1,
				error
			);
			return CreateOutcome::default();
		}

		if executive.excepted() {
			return CreateOutcome {
				address: None,
				gas_left: executive.gas(),
				output: executive.output().to_vec(),
			};
		}

		if let Err(error) = executive.accrue_sub_state(self.substate) {
			log::warn!(target: "executive", "Substate of nested creation lost: {:?}", error);
		}

		CreateOutcome {
			address: executive.new_address(),
			gas_left: executive.gas(),
			output: Vec::new(),
		}
	}
}
