use alloc::vec::Vec;
use core::mem;

use executive_core::{LogEntry, TransactionException};
use executive_gasometer::{self as gasometer, Config, Envelope};
use executive_runtime::{CallParameters, Context, OnStep, Step, Vm};
use primitive_types::{H160, H256, U256, U512};
use sha3::{Digest, Keccak256};

use crate::backend::{Ledger, MergeStrategy, UnevenSubstate};
use crate::env::{BlockHashSource, Environment};
use crate::executor::{CodeDeposit, ExecutionResult, Externality, StepRecord, Substate};
use crate::transaction::{Transaction, TransactionAction};

/// Lifecycle of an executive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
	Created,
	/// Transaction validated, sender nonce bumped.
	Initialized,
	/// Code is pending, `go` has to be called.
	AwaitingInterpreter,
	Executed,
	Finalized,
	/// Transaction refused by `initialize`.
	Rejected,
}

/// Misuse of the executive. Protocol failures are reported as
/// [`TransactionException`]s instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutiveError {
	/// The transaction failed validation.
	Rejected(TransactionException),
	/// Operation called in the wrong stage.
	InvalidStage {
		operation: &'static str,
		stage: Stage,
	},
	/// Substate of an operation that excepted cannot be merged.
	ExceptedSubstate(TransactionException),
	/// Ledger checkpoints got out of balance.
	UnevenSubstate,
}

impl From<UnevenSubstate> for ExecutiveError {
	fn from(_: UnevenSubstate) -> Self {
		ExecutiveError::UnevenSubstate
	}
}

struct Pending {
	code: Vec<u8>,
	input: Vec<u8>,
	context: Context,
}

/// Applies one transaction, or one bare message call or contract creation,
/// to a ledger.
///
/// The transaction path is `initialize`, `execute`, `go` when `execute`
/// returned `false`, then `finalize`. The bare path is `call` or `create`,
/// then `go` when needed.
pub struct Executive<'a, L> {
	ledger: &'a mut L,
	config: &'a Config,
	env: &'a Environment,
	hashes: &'a dyn BlockHashSource,
	vm: &'a dyn Vm,
	depth: usize,
	stage: Stage,

	transaction: Option<Transaction>,
	envelope: Envelope,
	pending: Option<Pending>,
	substate: Substate,
	logs: Vec<LogEntry>,
	new_address: Option<H160>,
	is_creation: bool,
	exception: Option<TransactionException>,
	gas: U256,
	output: Vec<u8>,

	code_deposit: CodeDeposit,
	deposit_size: u64,
	gas_for_deposit: U256,
	gas_refunded: U256,

	collect: Option<bool>,
	trace: Vec<StepRecord>,
	result: Option<ExecutionResult>,
}

impl<'a, L: Ledger> Executive<'a, L> {
	/// Create an executive running at the given call depth. Top-level
	/// transactions run at depth zero.
	pub fn new(
		ledger: &'a mut L,
		config: &'a Config,
		env: &'a Environment,
		vm: &'a dyn Vm,
		depth: usize,
	) -> Self {
		Self {
			ledger,
			config,
			env,
			hashes: &env.last_hashes,
			vm,
			depth,
			stage: Stage::Created,
			transaction: None,
			envelope: Envelope::default(),
			pending: None,
			substate: Substate::new(),
			logs: Vec::new(),
			new_address: None,
			is_creation: false,
			exception: None,
			gas: U256::zero(),
			output: Vec::new(),
			code_deposit: CodeDeposit::None,
			deposit_size: 0,
			gas_for_deposit: U256::zero(),
			gas_refunded: U256::zero(),
			collect: None,
			trace: Vec::new(),
			result: None,
		}
	}

	/// Look ancestor hashes up in `hashes` instead of
	/// [`Environment::last_hashes`]. Nested calls use the same source.
	pub fn with_block_hashes(mut self, hashes: &'a dyn BlockHashSource) -> Self {
		self.hashes = hashes;
		self
	}

	pub fn stage(&self) -> Stage {
		self.stage
	}

	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Cost envelope of the accepted transaction.
	pub fn envelope(&self) -> Envelope {
		self.envelope
	}

	/// Validate the transaction and bump the sender nonce. Nothing is
	/// written to the ledger when validation fails.
	pub fn initialize(&mut self, transaction: Transaction) -> Result<(), ExecutiveError> {
		self.expect_stage("initialize", Stage::Created)?;

		match self.validate(&transaction) {
			Ok((sender, envelope)) => {
				self.ledger.inc_nonce(sender);
				self.envelope = envelope;
				self.transaction = Some(transaction);
				self.stage = Stage::Initialized;
				Ok(())
			}
			Err(exception) => {
				log::debug!(target: "executive", "Transaction rejected: {:?}", exception);
				self.exception = Some(exception);
				self.transaction = Some(transaction);
				self.stage = Stage::Rejected;
				Err(ExecutiveError::Rejected(exception))
			}
		}
	}

	fn validate(
		&self,
		transaction: &Transaction,
	) -> Result<(H160, Envelope), TransactionException> {
		let sender = transaction
			.sender
			.ok_or(TransactionException::InvalidSignature)?;

		let intrinsic = gasometer::intrinsic_gas(
			&transaction.data,
			transaction.is_creation(),
			self.config,
		);
		gasometer::check_intrinsic(transaction.gas_limit, intrinsic)?;

		let nonce = self.ledger.nonce(sender);
		if nonce != transaction.nonce {
			log::debug!(
				target: "executive",
				"Invalid nonce: expected {}, got {}",
				nonce,
				transaction.nonce
			);
			return Err(TransactionException::InvalidNonce);
		}

		let block_gas = U512::from(self.env.gas_used) + U512::from(transaction.gas_limit);
		if block_gas > U512::from(self.env.gas_limit) {
			log::debug!(
				target: "executive",
				"Block gas limit reached: used {}, limit {}, requested {}",
				self.env.gas_used,
				self.env.gas_limit,
				transaction.gas_limit
			);
			return Err(TransactionException::BlockGasLimitReached);
		}

		let envelope = gasometer::check_envelope(
			self.ledger.balance(sender),
			transaction.gas_limit,
			transaction.gas_price,
			transaction.value,
			intrinsic,
		)?;

		Ok((sender, envelope))
	}

	/// Buy the gas and start the transaction. Returns `true` when no code has
	/// to run.
	pub fn execute(&mut self) -> Result<bool, ExecutiveError> {
		self.expect_stage("execute", Stage::Initialized)?;
		let transaction = self
			.transaction
			.clone()
			.ok_or_else(|| self.invalid_stage("execute"))?;
		let sender = transaction
			.sender
			.ok_or_else(|| self.invalid_stage("execute"))?;

		let gas_cost = transaction.gas_limit.saturating_mul(transaction.gas_price);
		if let Err(exception) = self.ledger.sub_balance(sender, gas_cost) {
			self.exception = Some(exception);
			self.stage = Stage::Rejected;
			return Err(ExecutiveError::Rejected(exception));
		}

		let intrinsic = gasometer::intrinsic_gas(
			&transaction.data,
			transaction.is_creation(),
			self.config,
		);
		let gas = transaction.gas_limit - U256::from(intrinsic);

		let done = match transaction.action {
			TransactionAction::Create => {
				event!(TransactCreate {
					caller: sender,
					value: transaction.value,
					init_code: &transaction.data,
					gas_limit: transaction.gas_limit,
					address: create_address(sender, transaction.nonce),
				});

				self.create_inner(
					sender,
					transaction.value,
					transaction.gas_price,
					gas,
					&transaction.data,
					sender,
				)?
			}
			TransactionAction::Call(address) => {
				event!(TransactCall {
					caller: sender,
					address,
					value: transaction.value,
					data: &transaction.data,
					gas_limit: transaction.gas_limit,
				});

				let params = CallParameters::new(
					sender,
					address,
					transaction.value,
					gas,
					transaction.data,
				);
				self.call_inner(params, transaction.gas_price, sender)?
			}
		};

		self.stage = next_stage(done);
		Ok(done)
	}

	/// Bare contract creation. The caller is expected to have bumped the
	/// nonce of `sender` already. Returns `true` when no code has to run.
	pub fn create(
		&mut self,
		sender: H160,
		endowment: U256,
		gas_price: U256,
		gas: U256,
		init_code: &[u8],
		origin: H160,
	) -> Result<bool, ExecutiveError> {
		self.expect_stage("create", Stage::Created)?;
		let done = self.create_inner(sender, endowment, gas_price, gas, init_code, origin)?;
		self.stage = next_stage(done);
		Ok(done)
	}

	/// Bare message call. Returns `true` when no code has to run.
	pub fn call(
		&mut self,
		params: CallParameters,
		gas_price: U256,
		origin: H160,
	) -> Result<bool, ExecutiveError> {
		self.expect_stage("call", Stage::Created)?;
		let done = self.call_inner(params, gas_price, origin)?;
		self.stage = next_stage(done);
		Ok(done)
	}

	fn create_inner(
		&mut self,
		sender: H160,
		endowment: U256,
		gas_price: U256,
		gas: U256,
		init_code: &[u8],
		origin: H160,
	) -> Result<bool, ExecutiveError> {
		self.is_creation = true;
		self.gas = gas;

		let nonce = self.ledger.nonce(sender).saturating_sub(U256::one());
		let address = create_address(sender, nonce);
		self.new_address = Some(address);

		event!(Create {
			caller: sender,
			address,
			value: endowment,
			init_code,
			gas,
			depth: self.depth,
		});

		if self.depth > self.config.call_stack_limit {
			// The endowment moves even though the creation is refused.
			if let Err(exception) = self.ledger.transfer(sender, address, endowment) {
				log::debug!(target: "executive", "Endowment not transferred: {:?}", exception);
			}
			self.fail(TransactionException::CallDepthExceeded);
			return Ok(true);
		}

		self.ledger.push_substate();
		log::trace!(
			target: "executive",
			"Checkpoint opened for creation of {:?} at depth {}",
			address,
			self.depth
		);

		self.ledger.reset_storage(address);
		self.ledger.set_code(address, Vec::new());
		if self.config.create_increase_nonce {
			self.ledger.set_nonce(address, U256::one());
		}

		if let Err(exception) = self.ledger.transfer(sender, address, endowment) {
			self.ledger.pop_substate(MergeStrategy::Revert)?;
			self.exception = Some(exception);
			self.new_address = None;
			return Ok(true);
		}

		if init_code.is_empty() {
			self.ledger.pop_substate(MergeStrategy::Commit)?;
			return Ok(true);
		}

		self.pending = Some(Pending {
			code: init_code.to_vec(),
			input: Vec::new(),
			context: Context {
				address,
				caller: sender,
				origin,
				value: endowment,
				gas_price,
			},
		});
		Ok(false)
	}

	fn call_inner(
		&mut self,
		params: CallParameters,
		gas_price: U256,
		origin: H160,
	) -> Result<bool, ExecutiveError> {
		self.is_creation = false;
		self.gas = params.gas;

		let context = Context {
			address: params.receiver,
			caller: params.sender,
			origin,
			value: params.value,
			gas_price,
		};

		event!(Call {
			code_address: params.code_address,
			context: &context,
			input: &params.data,
			gas: params.gas,
			depth: self.depth,
		});

		if self.depth > self.config.call_stack_limit {
			self.fail(TransactionException::CallDepthExceeded);
			return Ok(true);
		}

		self.ledger.push_substate();
		log::trace!(
			target: "executive",
			"Checkpoint opened for call to {:?} at depth {}",
			params.receiver,
			self.depth
		);

		if let Err(exception) = self
			.ledger
			.transfer(params.sender, params.receiver, params.value)
		{
			self.ledger.pop_substate(MergeStrategy::Revert)?;
			self.exception = Some(exception);
			return Ok(true);
		}

		let code = self.ledger.code(params.code_address);
		if code.is_empty() {
			self.ledger.pop_substate(MergeStrategy::Commit)?;
			return Ok(true);
		}

		self.pending = Some(Pending {
			code,
			input: params.data,
			context,
		});
		Ok(false)
	}

	/// Run the pending code. `on_step` observes every instruction, including
	/// those of nested calls.
	pub fn go(&mut self, on_step: Option<&mut OnStep<'_>>) -> Result<(), ExecutiveError> {
		self.expect_stage("go", Stage::AwaitingInterpreter)?;
		let pending = self.pending.take().ok_or_else(|| self.invalid_stage("go"))?;

		let record = self.collect == Some(true);
		let mut trace = Vec::new();
		let outcome = {
			let mut on_step = on_step;
			let observed = record || on_step.is_some();
			let mut observer = |step: &Step| {
				if record {
					trace.push(StepRecord::from(step));
				}
				if let Some(on_step) = on_step.as_deref_mut() {
					on_step(step);
				}
			};
			let observer: Option<&mut OnStep<'_>> = if observed {
				Some(&mut observer)
			} else {
				None
			};

			let mut ext = Externality::new(
				&mut *self.ledger,
				self.config,
				self.env,
				self.hashes,
				self.vm,
				self.depth,
				pending.context,
				&mut self.substate,
			);
			self.vm
				.exec(self.gas, &pending.code, &pending.input, &mut ext, observer)
		};
		self.trace.extend(trace);

		self.gas = outcome.gas_left;
		self.output = outcome.output;
		self.exception = outcome.exception;

		if self.exception.is_none() && self.is_creation {
			self.deposit_code();
		}

		match self.exception {
			None => {
				self.ledger.pop_substate(MergeStrategy::Commit)?;
				log::trace!(target: "executive", "Checkpoint committed at depth {}", self.depth);
			}
			Some(exception) => {
				self.ledger.pop_substate(MergeStrategy::Revert)?;
				self.substate.clear();
				if exception.consumes_all_gas() {
					self.gas = U256::zero();
					self.output.clear();
				}
				if self.is_creation {
					self.new_address = None;
				}
				log::debug!(
					target: "executive",
					"Execution at depth {} excepted: {:?}",
					self.depth,
					exception
				);
			}
		}

		event!(Exit {
			depth: self.depth,
			exception: self.exception,
			gas_left: self.gas,
			output: &self.output,
		});

		self.stage = Stage::Executed;
		Ok(())
	}

	fn deposit_code(&mut self) {
		let address = match self.new_address {
			Some(address) => address,
			None => return,
		};

		let size = self.output.len();
		let cost = gasometer::code_deposit_cost(size, self.config);
		self.deposit_size = size as u64;
		self.gas_for_deposit = self.gas;

		let too_large = self
			.config
			.create_contract_limit
			.map_or(false, |limit| size > limit);
		if too_large || self.gas < cost {
			log::debug!(
				target: "executive",
				"Code deposit of {} bytes failed with {} gas left",
				size,
				self.gas
			);
			self.code_deposit = CodeDeposit::Failed;
			if too_large || self.config.exceptional_failed_code_deposit {
				self.exception = Some(TransactionException::OutOfGas);
			}
			return;
		}

		self.gas -= cost;
		self.ledger.set_code(address, self.output.clone());
		self.code_deposit = CodeDeposit::Success;
	}

	/// Apply refunds, pay the fee recipient, delete self-destructed accounts
	/// and publish the logs.
	pub fn finalize(&mut self) -> Result<(), ExecutiveError> {
		self.expect_stage("finalize", Stage::Executed)?;
		let (sender, gas_limit, gas_price) = match self.transaction.as_ref() {
			Some(Transaction {
				sender: Some(sender),
				gas_limit,
				gas_price,
				..
			}) => (*sender, *gas_limit, *gas_price),
			_ => return Err(self.invalid_stage("finalize")),
		};

		if self.exception.is_none() {
			let suicide_refund = U256::from(self.config.gas_suicide_refund)
				.saturating_mul(U256::from(self.substate.suicides.len()));
			self.substate.refunds = self.substate.refunds.saturating_add(suicide_refund);

			let gas_used = gas_limit.saturating_sub(self.gas);
			self.gas_refunded = gasometer::refund_cap(gas_used, self.substate.refunds, self.config);
			self.gas += self.gas_refunded;
		}

		self.ledger
			.add_balance(sender, self.gas.saturating_mul(gas_price));
		let fees = gas_limit.saturating_sub(self.gas).saturating_mul(gas_price);
		self.ledger.add_balance(self.env.author, fees);

		if self.exception.is_none() {
			let suicides: Vec<H160> = self.substate.suicides.iter().copied().collect();
			for address in suicides {
				self.ledger.kill(address);
			}
			self.logs = mem::take(&mut self.substate.logs);
		}

		log::debug!(
			target: "executive",
			"Transaction finalized: gas left {}, refunded {}, exception {:?}",
			self.gas,
			self.gas_refunded,
			self.exception
		);

		self.stage = Stage::Finalized;
		if let Some(with_trace) = self.collect {
			self.result = Some(ExecutionResult {
				gas_used: gas_limit.saturating_sub(self.gas),
				new_address: self.new_address,
				exception: self.exception,
				output: self.output.clone(),
				code_deposit: self.code_deposit,
				gas_refunded: self.gas_refunded,
				deposit_size: self.deposit_size,
				gas_for_deposit: self.gas_for_deposit,
				trace: if with_trace {
					mem::take(&mut self.trace)
				} else {
					Vec::new()
				},
			});
		}

		Ok(())
	}

	/// Merge the substate of a successful operation into `parent`.
	pub fn accrue_sub_state(&mut self, parent: &mut Substate) -> Result<(), ExecutiveError> {
		self.expect_stage("accrue_sub_state", Stage::Executed)?;
		if let Some(exception) = self.exception {
			return Err(ExecutiveError::ExceptedSubstate(exception));
		}
		parent.accrue(mem::take(&mut self.substate));
		Ok(())
	}

	/// Gas consumed by the transaction, after refunds.
	pub fn gas_used(&self) -> Result<U256, ExecutiveError> {
		self.expect_stage("gas_used", Stage::Finalized)?;
		let gas_limit = self
			.transaction
			.as_ref()
			.map(|transaction| transaction.gas_limit)
			.unwrap_or_default();
		Ok(gas_limit.saturating_sub(self.gas))
	}

	/// Logs of the finalized transaction.
	pub fn logs(&self) -> &[LogEntry] {
		&self.logs
	}

	pub fn new_address(&self) -> Option<H160> {
		self.new_address
	}

	pub fn excepted(&self) -> bool {
		self.exception.is_some()
	}

	pub fn exception(&self) -> Option<TransactionException> {
		self.exception
	}

	/// Gas left.
	pub fn gas(&self) -> U256 {
		self.gas
	}

	pub fn output(&self) -> &[u8] {
		&self.output
	}

	pub fn code_deposit(&self) -> CodeDeposit {
		self.code_deposit
	}

	pub fn substate(&self) -> &Substate {
		&self.substate
	}

	/// Ask `finalize` to produce an [`ExecutionResult`], with the execution
	/// path when `trace` is set.
	pub fn collect_result(&mut self, trace: bool) {
		self.collect = Some(trace);
	}

	pub fn take_result(&mut self) -> Option<ExecutionResult> {
		self.result.take()
	}

	fn fail(&mut self, exception: TransactionException) {
		log::debug!(target: "executive", "Depth {} failed: {:?}", self.depth, exception);
		self.exception = Some(exception);
		self.gas = U256::zero();
		self.output.clear();
		self.new_address = None;
	}

	fn expect_stage(&self, operation: &'static str, stage: Stage) -> Result<(), ExecutiveError> {
		if self.stage == stage {
			Ok(())
		} else {
			Err(self.invalid_stage(operation))
		}
	}

	fn invalid_stage(&self, operation: &'static str) -> ExecutiveError {
		ExecutiveError::InvalidStage {
			operation,
			stage: self.stage,
		}
	}
}

fn next_stage(done: bool) -> Stage {
	if done {
		Stage::Executed
	} else {
		Stage::AwaitingInterpreter
	}
}

/// Address of a contract created by `caller` with the given nonce.
pub fn create_address(caller: H160, nonce: U256) -> H160 {
	let mut stream = rlp::RlpStream::new_list(2);
	stream.append(&caller);
	stream.append(&nonce);
	H256::from_slice(Keccak256::digest(&stream.out()).as_slice()).into()
}

/// Step observer logging every instruction to the `executive::vmtrace`
/// target.
pub fn simple_trace() -> impl FnMut(&Step) {
	|step: &Step| {
		log::trace!(
			target: "executive::vmtrace",
			"{:>4} {:>6} {:#04x} gas {} cost {} {:?}",
			step.depth,
			step.pc,
			step.opcode,
			step.gas,
			step.gas_cost,
			step.address
		);
	}
}
