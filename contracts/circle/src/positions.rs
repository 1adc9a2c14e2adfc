use soroban_sdk::{Address, Env, Vec};

use randomizer::{RandomizerContractClient, RequestStatus};

use crate::errors::ContractError;
use crate::storage;
use crate::types::{Circle, CirclePhase};

/// Lock the roster and request one randomized payout ordering for it.
/// Callable once: the transition out of Forming is the re-entry guard.
pub fn initiate_formation(
    env: &Env,
    creator: Address,
    circle_id: u64,
) -> Result<(), ContractError> {
    creator.require_auth();

    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    if creator != circle.creator {
        return Err(ContractError::Unauthorized);
    }
    if circle.phase != CirclePhase::Forming {
        return Err(ContractError::CircleNotForming);
    }
    if circle.roster.len() < circle.min_members {
        return Err(ContractError::InsufficientMembers);
    }

    circle.total_cycles = circle.roster.len();

    let randomizer = RandomizerContractClient::new(env, &storage::get_randomizer(env));
    let request_id =
        randomizer.request_permutation(&env.current_contract_address(), &circle.roster.len());

    circle.request_id = request_id;
    storage::set_position_request(env, request_id, circle_id);

    env.events()
        .publish((crate::symbol_short!("pos_req"),), (circle_id, request_id));

    // A test-mode randomizer fulfills synchronously; pull the result here
    // rather than waiting on a callback the host would refuse as reentrant.
    match randomizer.get_result(&request_id) {
        RequestStatus::Fulfilled(permutation) => {
            assign_positions(env, &mut circle, &permutation)?;
        }
        RequestStatus::Pending => {
            circle.phase = CirclePhase::PositionsPending;
        }
    }

    storage::set_circle(env, &circle);

    Ok(())
}

/// Fulfillment callback, reachable only by the wired randomizer contract
/// (invoker-contract auth). Rejections here surface to the randomizer,
/// which logs them and drops the result.
pub fn deliver_positions(
    env: &Env,
    request_id: u64,
    permutation: Vec<u32>,
) -> Result<(), ContractError> {
    storage::get_randomizer(env).require_auth();

    let circle_id =
        storage::get_position_request(env, request_id).ok_or(ContractError::UnknownRequest)?;
    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    if circle.positions_initialized {
        return Err(ContractError::PositionsAlreadyAssigned);
    }
    if circle.phase != CirclePhase::PositionsPending {
        // Covers circles cancelled while the request was in flight.
        return Err(ContractError::PositionsNotPending);
    }

    assign_positions(env, &mut circle, &permutation)?;
    storage::set_circle(env, &circle);

    Ok(())
}

/// Validate and apply a permutation: roster member i takes payout position
/// permutation[i]. Afterwards the positions across the roster are exactly
/// {1..N}.
fn assign_positions(
    env: &Env,
    circle: &mut Circle,
    permutation: &Vec<u32>,
) -> Result<(), ContractError> {
    if !is_permutation(permutation, circle.roster.len()) {
        return Err(ContractError::InvalidPermutation);
    }

    for (i, address) in circle.roster.iter().enumerate() {
        let mut member =
            storage::get_member(env, circle.id, &address).ok_or(ContractError::NotMember)?;
        member.payout_position = permutation.get(i as u32).unwrap();
        storage::set_member(env, circle.id, &member);
    }

    circle.positions_initialized = true;
    circle.phase = CirclePhase::Ready;

    env.events()
        .publish((crate::symbol_short!("pos_set"),), circle.id);

    Ok(())
}

fn is_permutation(perm: &Vec<u32>, n: u32) -> bool {
    if perm.len() != n {
        return false;
    }
    // Rosters cap at 20 members; a u32 bitmask covers every slot.
    let mut seen: u32 = 0;
    for p in perm.iter() {
        if p < 1 || p > n {
            return false;
        }
        let bit = 1u32 << (p - 1);
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}
