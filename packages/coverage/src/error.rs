use soroban_sdk::contracterror;

pub type CoverageResult<T = ()> = core::result::Result<T, ErrorCode>;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    /// An argument or stored-state precondition does not hold
    ValidationError = 1,
    /// Share balance, profile balance or inbound transfer cannot cover the amount
    InsufficientFunds = 2,
    InsufficientCoverage = 3,
    WithdrawActive = 4,
    WithdrawNotActive = 5,
    TimelockExpired = 6,
    TimelockActive = 7,
    NotCovered = 8,
    TransferFault = 9,
    MathError = 10,
    AlreadyInitialized = 11,
    NotInitialized = 12,
    NotAuthorized = 13,
}
