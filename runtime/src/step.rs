use primitive_types::{H160, U256};

/// Snapshot of the interpreter right before an instruction runs.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
	pub depth: usize,
	pub pc: usize,
	pub opcode: u8,
	/// Gas left before the instruction.
	pub gas: U256,
	/// Cost the instruction is about to be charged.
	pub gas_cost: U256,
	/// Account whose code is running.
	pub address: H160,
}

/// Observer invoked once per executed instruction. It has read-only access
/// and never alters the outcome.
pub type OnStep<'a> = dyn FnMut(&Step) + 'a;
