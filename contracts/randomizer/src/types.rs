use soroban_sdk::{contracttype, Address, Vec};

/// Fulfillment state of a permutation request. Pending is surfaced
/// explicitly; callers never see a half-delivered result.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestStatus {
    Pending,
    Fulfilled(Vec<u32>),
}

/// A single permutation request, written at issuance and mutated exactly
/// once at fulfillment.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PermutationRequest {
    pub requester: Address,
    pub member_count: u32,
    pub status: RequestStatus,
    pub requested_at: u64,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    TestMode,
    RequestCounter,
    Request(u64),
    Operator(Address),
}
