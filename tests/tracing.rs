#![cfg(feature = "tracing")]


use executive::gasometer::Config;
use executive::tracing::{self, Event, EventListener};
use executive::TransactionAction;
use mock::*;

#[derive(Default)]
struct Recorder(Vec<(&'static str, usize)>);

impl EventListener for Recorder {
	fn event(&mut self, event: Event) {
		let entry = match event {
			Event::TransactCall { .. } => ("transact_call", 0),
			Event::TransactCreate { .. } => ("transact_create", 0),
			Event::Call { depth, .. } => ("call", depth),
			Event::Create { depth, .. } => ("create", depth),
			Event::SelfDestruct { .. } => ("self_destruct", 0),
			Event::Exit { depth, .. } => ("exit", depth),
		};
		self.0.push(entry);
	}
}

#[test]
fn events_follow_nested_execution() {
	let config = Config::istanbul();
	let env = environment();
	let relay = call_code(CONTRACT, 0, 0, &[STOP]);
	let mut doomed = vec![SELFDESTRUCT];
	doomed.extend_from_slice(OTHER.as_bytes());
	let mut ledger = ledger(vec![
		(SENDER, account(1_000_000, Vec::new())),
		(CONTRACT, account(0, doomed)),
		(RECEIVER, account(0, relay)),
	]);

	let mut recorder = Recorder::default();
	tracing::using(&mut recorder, || {
		run(
			&mut ledger,
			&config,
			&env,
			transaction(TransactionAction::Call(RECEIVER), 100_000, Vec::new()),
			None,
		)
	});

	assert_eq!(
		recorder.0,
		vec![
			("transact_call", 0),
			("call", 0),
			("call", 1),
			("self_destruct", 0),
			("exit", 1),
			("exit", 0),
		]
	);
}
