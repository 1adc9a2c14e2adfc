use soroban_sdk::{token, Address, Env, Vec};

use strategy_manager::StrategyManagerContractClient;

use crate::errors::ContractError;
use crate::storage;
use crate::types::{CirclePhase, Member};

/// Pay the member whose position matches the cycle in progress. Anyone may
/// call this once every active member has contributed; cycle timing is
/// advisory and never fires this on its own.
pub fn execute_payout(env: &Env, circle_id: u64) -> Result<(), ContractError> {
    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    if circle.phase != CirclePhase::PayoutReady {
        return Err(ContractError::CycleNotReady);
    }

    let mut recipient = find_by_position(env, circle_id, &circle.roster, circle.current_cycle + 1)?;

    // Reverse this cycle's investment: base contributions plus every unit
    // of yield reported so far go to the current payee in one transfer.
    let base = circle.contribution_amount * circle.roster.len() as i128;
    let manager = StrategyManagerContractClient::new(env, &storage::get_strategy_manager(env));
    let self_addr = env.current_contract_address();
    let yield_share = manager.get_current_yield(&self_addr);
    let payout_amount = base + yield_share;

    manager.withdraw(&self_addr, &payout_amount);

    let token_client = token::Client::new(env, &circle.token);
    token_client.transfer(&self_addr, &recipient.address, &payout_amount);

    recipient.has_received_payout = true;
    storage::set_member(env, circle_id, &recipient);

    // Open the next cycle: every contribution flag resets.
    for m in circle.roster.iter() {
        if let Some(mut record) = storage::get_member(env, circle_id, &m) {
            if record.has_contributed {
                record.has_contributed = false;
                storage::set_member(env, circle_id, &record);
            }
        }
    }

    circle.contributed_count = 0;
    circle.current_cycle += 1;
    circle.total_yield_earned += yield_share;

    env.events().publish(
        (crate::symbol_short!("payout"),),
        (circle_id, recipient.address.clone(), payout_amount),
    );

    if circle.current_cycle >= circle.total_cycles {
        circle.phase = CirclePhase::Completed;
        storage::set_circle(env, &circle);
        env.events()
            .publish((crate::symbol_short!("crc_comp"),), circle_id);
    } else {
        circle.phase = CirclePhase::Active;
        circle.cycle_started_at = env.ledger().timestamp();
        storage::set_circle(env, &circle);
        env.events().publish(
            (crate::symbol_short!("cyc_new"),),
            (circle_id, circle.current_cycle + 1),
        );
    }

    Ok(())
}

pub fn get_current_recipient(env: &Env, circle_id: u64) -> Result<Address, ContractError> {
    let circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    match circle.phase {
        CirclePhase::Active | CirclePhase::PayoutReady => {}
        _ => return Err(ContractError::CircleNotActive),
    }

    let member = find_by_position(env, circle_id, &circle.roster, circle.current_cycle + 1)?;
    Ok(member.address)
}

/// Advisory end of the cycle in progress; eligibility guidance for
/// callers, not an automatic transition.
pub fn get_cycle_deadline(env: &Env, circle_id: u64) -> Result<u64, ContractError> {
    let circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    match circle.phase {
        CirclePhase::Active | CirclePhase::PayoutReady => {
            Ok(circle.cycle_started_at + circle.cycle_duration)
        }
        _ => Err(ContractError::CircleNotActive),
    }
}

fn find_by_position(
    env: &Env,
    circle_id: u64,
    roster: &Vec<Address>,
    position: u32,
) -> Result<Member, ContractError> {
    for m in roster.iter() {
        if let Some(record) = storage::get_member(env, circle_id, &m) {
            if record.payout_position == position {
                return Ok(record);
            }
        }
    }
    Err(ContractError::RecipientNotFound)
}
