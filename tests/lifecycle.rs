
use executive::backend::{Ledger, MergeStrategy, TransactionalBackend, UnevenSubstate};
use executive::gasometer::Config;
use executive::{
	create_address, BlockHashSource, CallParameters, Executive, ExecutiveError, Stage, Substate,
	TransactionAction, TransactionException,
};
use mock::*;
use primitive_types::{H256, U256};

fn rejected(
	ledger: &mut TestLedger,
	env: &executive::Environment,
	transaction: executive::Transaction,
) -> ExecutiveError {
	let config = Config::istanbul();
	let mut executive = Executive::new(ledger, &config, env, &VM, 0);
	let error = executive.initialize(transaction).unwrap_err();
	assert_eq!(executive.stage(), Stage::Rejected);
	assert!(executive.excepted());
	error
}

#[test]
fn initialize_checks_in_order() {
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(100, Vec::new()))]);

	// Bad signature wins over every other problem.
	let mut unsigned = transaction(TransactionAction::Call(RECEIVER), 1000, Vec::new());
	unsigned.sender = None;
	unsigned.nonce = U256::from(9);
	assert_eq!(
		rejected(&mut ledger, &env, unsigned),
		ExecutiveError::Rejected(TransactionException::InvalidSignature)
	);

	let mut replayed = transaction(TransactionAction::Call(RECEIVER), 21_000, Vec::new());
	replayed.nonce = U256::from(9);
	assert_eq!(
		rejected(&mut ledger, &env, replayed),
		ExecutiveError::Rejected(TransactionException::InvalidNonce)
	);

	let full_block = executive::Environment {
		gas_used: U256::from(9_990_000),
		..environment()
	};
	assert_eq!(
		rejected(
			&mut ledger,
			&full_block,
			transaction(TransactionAction::Call(RECEIVER), 21_000, Vec::new())
		),
		ExecutiveError::Rejected(TransactionException::BlockGasLimitReached)
	);

	assert_eq!(
		rejected(
			&mut ledger,
			&env,
			transaction(TransactionAction::Call(RECEIVER), 21_000, Vec::new())
		),
		ExecutiveError::Rejected(TransactionException::NotEnoughCash)
	);

	assert_eq!(ledger.balance(SENDER), U256::from(100));
	assert_eq!(ledger.nonce(SENDER), U256::zero());
}

#[test]
fn intrinsic_gas_shortfall_leaves_ledger_untouched() {
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(100_000, Vec::new()))]);

	assert_eq!(
		rejected(
			&mut ledger,
			&env,
			transaction(TransactionAction::Call(RECEIVER), 20_999, Vec::new())
		),
		ExecutiveError::Rejected(TransactionException::OutOfGasIntrinsic)
	);
	assert_eq!(
		rejected(
			&mut ledger,
			&env,
			transaction(TransactionAction::Create, 52_999, Vec::new())
		),
		ExecutiveError::Rejected(TransactionException::OutOfGasIntrinsic)
	);

	assert_eq!(ledger.balance(SENDER), U256::from(100_000));
	assert_eq!(ledger.nonce(SENDER), U256::zero());
	assert!(!ledger.exists(RECEIVER));
	assert_eq!(ledger.depth(), 0);
}

#[test]
fn intrinsic_gas_is_checked_before_balance() {
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(10, Vec::new()))]);

	assert_eq!(
		rejected(
			&mut ledger,
			&env,
			transaction(TransactionAction::Call(RECEIVER), 100, Vec::new())
		),
		ExecutiveError::Rejected(TransactionException::OutOfGasIntrinsic)
	);
	assert_eq!(
		rejected(
			&mut ledger,
			&env,
			transaction(TransactionAction::Create, 21_000, vec![0x01])
		),
		ExecutiveError::Rejected(TransactionException::OutOfGasIntrinsic)
	);

	// Also wins over a wrong nonce and a full block.
	let mut replayed = transaction(TransactionAction::Call(RECEIVER), 100, Vec::new());
	replayed.nonce = U256::from(9);
	let full_block = executive::Environment {
		gas_used: U256::from(10_000_000),
		..environment()
	};
	assert_eq!(
		rejected(&mut ledger, &full_block, replayed),
		ExecutiveError::Rejected(TransactionException::OutOfGasIntrinsic)
	);

	assert_eq!(ledger.balance(SENDER), U256::from(10));
	assert_eq!(ledger.nonce(SENDER), U256::zero());
}

#[test]
fn operations_out_of_order_are_refused() {
	let config = Config::istanbul();
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(100_000, Vec::new()))]);
	let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 0);

	assert_eq!(
		executive.execute(),
		Err(ExecutiveError::InvalidStage {
			operation: "execute",
			stage: Stage::Created,
		})
	);
	assert!(executive.go(None).is_err());
	assert!(executive.finalize().is_err());

	executive
		.initialize(transaction(
			TransactionAction::Call(RECEIVER),
			21_000,
			Vec::new(),
		))
		.unwrap();
	assert_eq!(
		executive.initialize(transaction(
			TransactionAction::Call(RECEIVER),
			21_000,
			Vec::new()
		)),
		Err(ExecutiveError::InvalidStage {
			operation: "initialize",
			stage: Stage::Initialized,
		})
	);
	assert!(executive.gas_used().is_err());

	assert!(executive.execute().unwrap());
	assert_eq!(
		executive.go(None),
		Err(ExecutiveError::InvalidStage {
			operation: "go",
			stage: Stage::Executed,
		})
	);

	executive.finalize().unwrap();
	assert_eq!(
		executive.finalize(),
		Err(ExecutiveError::InvalidStage {
			operation: "finalize",
			stage: Stage::Finalized,
		})
	);
	assert_eq!(executive.gas_used(), Ok(U256::from(21_000)));
}

#[test]
fn result_is_produced_once() {
	let config = Config::istanbul();
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(100_000, Vec::new()))]);
	let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 0);

	executive.collect_result(false);
	executive
		.initialize(transaction(
			TransactionAction::Call(RECEIVER),
			21_000,
			Vec::new(),
		))
		.unwrap();
	executive.execute().unwrap();
	executive.finalize().unwrap();

	let result = executive.take_result().unwrap();
	assert_eq!(result.gas_used, U256::from(21_000));
	assert_eq!(result.exception, None);
	assert!(result.trace.is_empty());
	assert!(executive.take_result().is_none());
}

#[test]
fn bare_call_runs_code_and_accrues_substate() {
	let config = Config::istanbul();
	let env = environment();
	let mut ledger = ledger(vec![
		(SENDER, account(1000, Vec::new())),
		(CONTRACT, account(0, vec![LOG, 1, 0x01, STOP])),
	]);

	let mut parent = Substate::new();
	{
		let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 0);
		let params = CallParameters::new(
			SENDER,
			CONTRACT,
			U256::from(10),
			U256::from(1000),
			Vec::new(),
		);
		assert!(!executive.call(params, U256::one(), SENDER).unwrap());
		assert_eq!(executive.stage(), Stage::AwaitingInterpreter);
		executive.go(None).unwrap();

		assert_eq!(executive.exception(), None);
		assert_eq!(executive.gas(), U256::from(1000 - 383));
		executive.accrue_sub_state(&mut parent).unwrap();
	}

	assert_eq!(parent.logs.len(), 1);
	assert_eq!(parent.logs[0].address, CONTRACT);
	assert_eq!(ledger.balance(CONTRACT), U256::from(10));
	assert_eq!(ledger.depth(), 0);
}

#[test]
fn excepted_substate_is_not_accrued() {
	let config = Config::istanbul();
	let env = environment();
	let mut ledger = ledger(vec![
		(SENDER, account(1000, Vec::new())),
		(CONTRACT, account(0, vec![LOG, 0, INVALID])),
	]);

	let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 0);
	let params = CallParameters::new(
		SENDER,
		CONTRACT,
		U256::zero(),
		U256::from(1000),
		Vec::new(),
	);
	assert!(!executive.call(params, U256::one(), SENDER).unwrap());
	executive.go(None).unwrap();

	let mut parent = Substate::new();
	assert_eq!(
		executive.accrue_sub_state(&mut parent),
		Err(ExecutiveError::ExceptedSubstate(
			TransactionException::BadInstruction
		))
	);
	assert!(parent.logs.is_empty());
}

#[test]
fn bare_call_without_funds_returns_gas() {
	let config = Config::istanbul();
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(5, Vec::new()))]);

	{
		let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 0);
		let params = CallParameters::new(
			SENDER,
			RECEIVER,
			U256::from(10),
			U256::from(1000),
			Vec::new(),
		);
		assert!(executive.call(params, U256::one(), SENDER).unwrap());
		assert_eq!(
			executive.exception(),
			Some(TransactionException::NotEnoughCash)
		);
		assert_eq!(executive.gas(), U256::from(1000));
	}

	assert_eq!(ledger.balance(SENDER), U256::from(5));
	assert!(!ledger.exists(RECEIVER));
}

#[test]
fn bare_call_beyond_depth_limit_does_not_transfer() {
	let config = Config {
		call_stack_limit: 2,
		..Config::istanbul()
	};
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(1000, Vec::new()))]);

	{
		let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 3);
		let params = CallParameters::new(
			SENDER,
			RECEIVER,
			U256::from(10),
			U256::from(1000),
			Vec::new(),
		);
		assert!(executive.call(params, U256::one(), SENDER).unwrap());
		assert_eq!(
			executive.exception(),
			Some(TransactionException::CallDepthExceeded)
		);
		assert_eq!(executive.gas(), U256::zero());
	}

	assert_eq!(ledger.balance(SENDER), U256::from(1000));
	assert!(!ledger.exists(RECEIVER));
}

#[test]
fn bare_create_beyond_depth_limit_still_moves_endowment() {
	let config = Config {
		call_stack_limit: 2,
		..Config::istanbul()
	};
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(1000, Vec::new()))]);
	ledger.inc_nonce(SENDER);
	let address = create_address(SENDER, U256::zero());

	{
		let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 3);
		let done = executive
			.create(
				SENDER,
				U256::from(100),
				U256::one(),
				U256::from(50_000),
				&[STOP],
				SENDER,
			)
			.unwrap();
		assert!(done);
		assert_eq!(
			executive.exception(),
			Some(TransactionException::CallDepthExceeded)
		);
		assert_eq!(executive.gas(), U256::zero());
		assert_eq!(executive.new_address(), None);
	}

	assert_eq!(ledger.balance(SENDER), U256::from(900));
	assert_eq!(ledger.balance(address), U256::from(100));
}

#[test]
fn bare_create_with_empty_init_code() {
	let config = Config::istanbul();
	let env = environment();
	let mut ledger = ledger(vec![(SENDER, account(1000, Vec::new()))]);
	ledger.inc_nonce(SENDER);
	let address = create_address(SENDER, U256::zero());

	{
		let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 0);
		let done = executive
			.create(
				SENDER,
				U256::from(1),
				U256::one(),
				U256::from(50_000),
				&[],
				SENDER,
			)
			.unwrap();
		assert!(done);
		assert_eq!(executive.exception(), None);
		assert_eq!(executive.new_address(), Some(address));
		assert_eq!(executive.gas(), U256::from(50_000));
	}

	assert!(ledger.exists(address));
	assert!(ledger.code(address).is_empty());
	assert_eq!(ledger.nonce(address), U256::one());
	assert_eq!(ledger.balance(address), U256::one());
	assert_eq!(ledger.depth(), 0);
	assert_eq!(
		ledger.pop_substate(MergeStrategy::Commit),
		Err(UnevenSubstate)
	);
}

struct Numbered;

impl BlockHashSource for Numbered {
	fn hash_of_block(&self, offset: usize) -> H256 {
		H256::from_low_u64_be(10_000 + offset as u64)
	}
}

#[test]
fn injected_block_hashes_reach_nested_calls() {
	let config = Config::istanbul();
	let env = environment();
	let mut ledger = ledger(vec![
		(SENDER, account(1000, Vec::new())),
		(RECEIVER, account(0, call_code(CONTRACT, 0, 0, &[BLOCKHASH, 1]))),
		(CONTRACT, account(0, vec![BLOCKHASH, 2])),
	]);

	{
		let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 0)
			.with_block_hashes(&Numbered);
		let params = CallParameters::new(
			SENDER,
			RECEIVER,
			U256::zero(),
			U256::from(100_000),
			Vec::new(),
		);
		assert!(!executive.call(params, U256::one(), SENDER).unwrap());
		executive.go(None).unwrap();
		assert_eq!(executive.exception(), None);
	}

	let slot = H256::from_low_u64_be(HASH_SLOT);
	assert_eq!(ledger.storage(RECEIVER, slot), H256::from_low_u64_be(10_000));
	assert_eq!(ledger.storage(CONTRACT, slot), H256::from_low_u64_be(10_001));
}

#[test]
fn block_hashes_default_to_environment() {
	let config = Config::istanbul();
	let env = environment();
	let mut ledger = ledger(vec![
		(SENDER, account(1000, Vec::new())),
		(CONTRACT, account(0, vec![BLOCKHASH, 1])),
	]);

	{
		let mut executive = Executive::new(&mut ledger, &config, &env, &VM, 0);
		let params = CallParameters::new(
			SENDER,
			CONTRACT,
			U256::zero(),
			U256::from(1000),
			Vec::new(),
		);
		assert!(!executive.call(params, U256::one(), SENDER).unwrap());
		executive.go(None).unwrap();
	}

	assert_eq!(
		ledger.storage(CONTRACT, H256::from_low_u64_be(HASH_SLOT)),
		H256::repeat_byte(0x99)
	);
}
