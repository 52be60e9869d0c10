/// Authoritative outcome tag of one transaction or nested operation.
///
/// Success is represented by the absence of an exception
/// (`Option<TransactionException>::None`), so every variant here is a
/// failure of some kind. The variants fall into three groups, see
/// [`TransactionException::is_pre_execution`],
/// [`TransactionException::is_execution`] and
/// [`TransactionException::CallDepthExceeded`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
	feature = "with-codec",
	derive(scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransactionException {
	/// Sender could not be recovered from the signature.
	InvalidSignature,
	/// Transaction nonce does not match the sender's nonce.
	InvalidNonce,
	/// Sender balance does not cover `gas_limit * gas_price + value`.
	NotEnoughCash,
	/// Transaction gas limit does not fit in the remaining block gas.
	BlockGasLimitReached,
	/// Gas limit is below the intrinsic cost of the transaction.
	OutOfGasIntrinsic,

	/// Too little gas to pay the base cost of an instruction.
	OutOfGasBase,
	/// Gas ran out during execution or while paying for the code deposit.
	OutOfGas,
	/// Undefined or forbidden instruction.
	BadInstruction,
	/// Jump to a position that is not a jump destination.
	BadJumpDestination,
	/// Instruction needed more stack items than available.
	StackUnderflow,
	/// Stack limit exceeded.
	StackOverflow,
	/// Explicit revert. State changes are undone but the output is kept
	/// and unused gas is returned.
	RevertInstruction,
	/// Access to an address that is in range but not allowed.
	InvalidAddress,

	/// Nested call or creation beyond the configured call stack limit.
	CallDepthExceeded,
	/// Interpreter failure without a more specific tag.
	Unknown,
}

impl TransactionException {
	/// Whether the transaction was refused before anything was charged
	/// besides validation.
	pub fn is_pre_execution(&self) -> bool {
		matches!(
			self,
			TransactionException::InvalidSignature
				| TransactionException::InvalidNonce
				| TransactionException::NotEnoughCash
				| TransactionException::BlockGasLimitReached
				| TransactionException::OutOfGasIntrinsic
		)
	}

	/// Whether the exception was raised while code was running.
	pub fn is_execution(&self) -> bool {
		!self.is_pre_execution() && *self != TransactionException::CallDepthExceeded
	}

	/// Whether the exception is an explicit revert.
	pub fn is_revert(&self) -> bool {
		*self == TransactionException::RevertInstruction
	}

	/// Whether all gas handed to the failed operation is lost.
	pub fn consumes_all_gas(&self) -> bool {
		!self.is_revert()
	}
}
