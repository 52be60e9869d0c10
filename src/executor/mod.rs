//! # Executive
//!
//! Applies transactions and nested message calls or contract creations to a
//! ledger, driving an interpreter wherever code has to run.

mod executive;
mod externality;
mod result;
mod substate;

pub use self::executive::{create_address, simple_trace, Executive, ExecutiveError, Stage};
pub use self::externality::Externality;
pub use self::result::{CodeDeposit, ExecutionResult, StepRecord};
pub use self::substate::Substate;
