use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    Unauthorized = 2,
    CircleNotFound = 3,
    TemplateNotFound = 4,
    CircleFull = 5,
    AlreadyInvited = 6,
    AlreadyJoined = 7,
    NotInvited = 8,
    NotMember = 9,
    InvalidAmount = 10,
    InvalidConfig = 11,
    InsufficientMembers = 12,
    CircleNotForming = 13,
    PositionsNotPending = 14,
    PositionsAlreadyAssigned = 15,
    InvalidPermutation = 16,
    UnknownRequest = 17,
    MembersNotConfirmed = 18,
    CircleNotReady = 19,
    CircleNotActive = 20,
    AlreadyContributed = 21,
    CycleNotReady = 22,
    RecipientNotFound = 23,
    CircleNotCancellable = 24,
    CreatorLimitReached = 25,
    TemplateLimitReached = 26,
    JoinClosed = 27,
}
