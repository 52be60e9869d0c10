use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use executive_core::LogEntry;
use primitive_types::{H160, U256};

/// Side effects collected while one operation runs, handed to the parent
/// operation only if it succeeds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substate {
	/// Accounts to delete once the transaction is finalized.
	pub suicides: BTreeSet<H160>,
	/// Logs in emission order.
	pub logs: Vec<LogEntry>,
	/// Refund counter, capped when the transaction is finalized.
	pub refunds: U256,
}

impl Substate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append the effects of a successful child operation.
	pub fn accrue(&mut self, other: Substate) {
		self.suicides.extend(other.suicides);
		self.logs.extend(other.logs);
		self.refunds = self.refunds.saturating_add(other.refunds);
	}

	pub fn clear(&mut self) {
		self.suicides.clear();
		self.logs.clear();
		self.refunds = U256::zero();
	}
}
