use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    Unauthorized = 2,
    UnknownStrategy = 3,
    StrategyInactive = 4,
    DuplicateStrategy = 5,
    InvalidStrategyConfig = 6,
    InvalidAmount = 7,
    InvalidRiskTolerance = 8,
    InsufficientPosition = 9,
    PositionNotFound = 10,
    PositionTokenMismatch = 11,
    EmergencyRestricted = 12,
}
