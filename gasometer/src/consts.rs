pub const G_TRANSACTION: u64 = 21000;
pub const G_TRANSACTION_CREATE_HOMESTEAD: u64 = 53000;
pub const G_TXDATAZERO: u64 = 4;
pub const G_TXDATANONZERO_FRONTIER: u64 = 68;
pub const G_TXDATANONZERO_ISTANBUL: u64 = 16;
pub const G_CODEDEPOSIT: u64 = 200;
pub const R_SUICIDE: u64 = 24000;
pub const MAX_REFUND_QUOTIENT: u64 = 2;
pub const CALL_STACK_LIMIT: usize = 1024;
pub const MAX_CODE_SIZE: usize = 0x6000;
