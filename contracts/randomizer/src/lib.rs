#![no_std]

use soroban_sdk::{
    contract, contractclient, contractimpl, symbol_short, Address, Env, Vec,
};

mod errors;
mod permutation;
mod storage;
mod types;

pub use errors::ContractError;
pub use types::*;

/// Callback surface a requester exposes to receive its permutation.
/// Delivery uses the `try_` client, so a rejecting consumer is logged and
/// skipped rather than retried.
#[contractclient(name = "PositionConsumerClient")]
pub trait PositionConsumer {
    fn deliver_positions(env: Env, request_id: u64, permutation: Vec<u32>);
}

#[contract]
pub struct RandomizerContract;

#[contractimpl]
impl RandomizerContract {
    /// Initialize with an admin and an explicit mode. Test mode fulfills
    /// requests synchronously from the local PRNG; it is a deployment
    /// choice, never a fallback for the asynchronous path.
    pub fn __constructor(env: Env, admin: Address, test_mode: bool) {
        if storage::has_admin(&env) {
            panic!("already initialized");
        }
        storage::set_admin(&env, &admin);
        storage::set_test_mode(&env, test_mode);
    }

    // ─── Operators ──────────────────────────────────────────────────

    /// Grant the fulfillment-injection capability to an oracle operator.
    pub fn add_operator(
        env: Env,
        admin: Address,
        operator: Address,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        if admin != storage::get_admin(&env) {
            return Err(ContractError::Unauthorized);
        }
        storage::set_operator(&env, &operator, true);
        env.events()
            .publish((symbol_short!("op_add"),), operator);
        Ok(())
    }

    pub fn remove_operator(
        env: Env,
        admin: Address,
        operator: Address,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        if admin != storage::get_admin(&env) {
            return Err(ContractError::Unauthorized);
        }
        storage::set_operator(&env, &operator, false);
        env.events().publish((symbol_short!("op_rvk"),), operator);
        Ok(())
    }

    pub fn is_operator(env: Env, who: Address) -> bool {
        storage::is_operator(&env, &who)
    }

    // ─── Requests ───────────────────────────────────────────────────

    /// Issue a new permutation request sized to `member_count`. In test
    /// mode the result is generated and stored fulfilled immediately, for
    /// the requester to pull in the same transaction.
    pub fn request_permutation(
        env: Env,
        requester: Address,
        member_count: u32,
    ) -> Result<u64, ContractError> {
        requester.require_auth();

        if member_count < 2 || member_count > permutation::MAX_MEMBER_COUNT {
            return Err(ContractError::InvalidMemberCount);
        }

        let request_id = storage::get_request_counter(&env) + 1;
        storage::set_request_counter(&env, request_id);

        let status = if storage::get_test_mode(&env) {
            RequestStatus::Fulfilled(permutation::generate(&env, member_count))
        } else {
            RequestStatus::Pending
        };

        let request = PermutationRequest {
            requester: requester.clone(),
            member_count,
            status,
            requested_at: env.ledger().timestamp(),
        };
        storage::set_request(&env, request_id, &request);

        env.events()
            .publish((symbol_short!("perm_req"),), (request_id, member_count));

        Ok(request_id)
    }

    /// Deliver randomness for a pending request. Operator capability only;
    /// a request id is fulfilled exactly once.
    pub fn fulfill_request(
        env: Env,
        operator: Address,
        request_id: u64,
        permutation: Vec<u32>,
    ) -> Result<(), ContractError> {
        operator.require_auth();

        if !storage::is_operator(&env, &operator) {
            return Err(ContractError::Unauthorized);
        }

        let mut request = storage::get_request(&env, request_id)
            .ok_or(ContractError::UnknownOrFulfilledRequest)?;

        if request.status != RequestStatus::Pending {
            return Err(ContractError::UnknownOrFulfilledRequest);
        }

        if !permutation::is_valid(&permutation, request.member_count) {
            return Err(ContractError::InvalidPermutation);
        }

        request.status = RequestStatus::Fulfilled(permutation.clone());
        storage::set_request(&env, request_id, &request);

        env.events()
            .publish((symbol_short!("perm_ful"),), request_id);

        // Push the result to the requester. A rejecting consumer (for
        // example a circle cancelled while the request was pending) is
        // logged and the result dropped; the request stays fulfilled, so
        // re-delivery is impossible either way.
        let consumer = PositionConsumerClient::new(&env, &request.requester);
        if consumer
            .try_deliver_positions(&request_id, &permutation)
            .is_err()
        {
            env.events()
                .publish((symbol_short!("perm_fail"),), request_id);
        }

        Ok(())
    }

    pub fn is_fulfilled(env: Env, request_id: u64) -> Result<bool, ContractError> {
        let request = storage::get_request(&env, request_id)
            .ok_or(ContractError::UnknownOrFulfilledRequest)?;
        Ok(request.status != RequestStatus::Pending)
    }

    /// Result for a request; pending is explicit, never hidden behind a
    /// retry.
    pub fn get_result(env: Env, request_id: u64) -> Result<RequestStatus, ContractError> {
        let request = storage::get_request(&env, request_id)
            .ok_or(ContractError::UnknownOrFulfilledRequest)?;
        Ok(request.status)
    }

    pub fn get_request(env: Env, request_id: u64) -> Result<PermutationRequest, ContractError> {
        storage::get_request(&env, request_id).ok_or(ContractError::UnknownOrFulfilledRequest)
    }

    // ─── Test / Fallback Mode ───────────────────────────────────────

    /// Synchronous deterministic generation, available only when the
    /// instance was constructed in test mode.
    pub fn generate_test_permutation(
        env: Env,
        member_count: u32,
    ) -> Result<Vec<u32>, ContractError> {
        if !storage::get_test_mode(&env) {
            return Err(ContractError::TestModeDisabled);
        }
        if member_count < 2 || member_count > permutation::MAX_MEMBER_COUNT {
            return Err(ContractError::InvalidMemberCount);
        }
        Ok(permutation::generate(&env, member_count))
    }
}
