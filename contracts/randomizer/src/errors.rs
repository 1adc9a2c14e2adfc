use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    Unauthorized = 2,
    InvalidMemberCount = 3,
    UnknownOrFulfilledRequest = 4,
    InvalidPermutation = 5,
    TestModeDisabled = 6,
}
