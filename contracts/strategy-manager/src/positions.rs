use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::access;
use crate::errors::ContractError;
use crate::selection;
use crate::storage;
use crate::types::{Capability, InvestmentPosition};

/// Pull `amount` of `token` from `owner` into manager custody and merge it
/// into the owner's single position. Re-investing replaces the strategy
/// reference in place; principal accumulates.
pub fn invest(
    env: &Env,
    owner: Address,
    token: Address,
    amount: i128,
    strategy_name: Symbol,
) -> Result<(), ContractError> {
    access::require_cap(env, &owner, Capability::Circle)?;

    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }

    let strategy =
        storage::get_strategy(env, &strategy_name).ok_or(ContractError::UnknownStrategy)?;
    if !strategy.active {
        return Err(ContractError::StrategyInactive);
    }

    // Selection already routes to treasury under emergency; naming any
    // other strategy directly is refused outright.
    if storage::get_emergency(env).active && strategy_name != selection::treasury() {
        return Err(ContractError::EmergencyRestricted);
    }

    let position = match storage::get_position(env, &owner) {
        Some(mut p) => {
            if p.token != token {
                return Err(ContractError::PositionTokenMismatch);
            }
            p.strategy = strategy_name.clone();
            p.principal += amount;
            p
        }
        None => InvestmentPosition {
            strategy: strategy_name.clone(),
            token: token.clone(),
            principal: amount,
            accrued_yield: 0,
        },
    };

    token::Client::new(env, &token).transfer(
        &owner,
        &env.current_contract_address(),
        &amount,
    );
    storage::set_position(env, &owner, &position);

    env.events()
        .publish((symbol_short!("invest"),), (owner, strategy_name, amount));

    Ok(())
}

/// Return up to `principal + accrued_yield` to the owner, reducing both
/// proportionally. Over-withdrawal rejects and leaves the position
/// untouched; a drained position is removed.
pub fn withdraw(env: &Env, owner: Address, amount: i128) -> Result<i128, ContractError> {
    access::require_cap(env, &owner, Capability::Circle)?;

    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }

    let mut position =
        storage::get_position(env, &owner).ok_or(ContractError::PositionNotFound)?;

    let total = position.principal + position.accrued_yield;
    if amount > total {
        return Err(ContractError::InsufficientPosition);
    }

    let yield_cut = amount * position.accrued_yield / total;
    let mut principal_cut = amount - yield_cut;
    if principal_cut > position.principal {
        principal_cut = position.principal;
    }
    let yield_cut = amount - principal_cut;

    position.principal -= principal_cut;
    position.accrued_yield -= yield_cut;

    token::Client::new(env, &position.token).transfer(
        &env.current_contract_address(),
        &owner,
        &amount,
    );

    if position.principal == 0 && position.accrued_yield == 0 {
        storage::remove_position(env, &owner);
    } else {
        storage::set_position(env, &owner, &position);
    }

    env.events()
        .publish((symbol_short!("withdraw"),), (owner, amount));

    Ok(amount)
}

/// Record externally realized yield for an owner, as an absolute value.
/// This is a report, not an accrual; the manager enforces no monotonicity.
pub fn update_actual_yield(
    env: &Env,
    operator: Address,
    owner: Address,
    new_yield: i128,
) -> Result<(), ContractError> {
    access::require_cap(env, &operator, Capability::Operator)?;

    if new_yield < 0 {
        return Err(ContractError::InvalidAmount);
    }

    let mut position =
        storage::get_position(env, &owner).ok_or(ContractError::PositionNotFound)?;
    position.accrued_yield = new_yield;
    storage::set_position(env, &owner, &position);

    env.events()
        .publish((symbol_short!("yield_upd"),), (owner, new_yield));

    Ok(())
}

pub fn get_current_yield(env: &Env, owner: &Address) -> i128 {
    storage::get_position(env, owner)
        .map(|p| p.accrued_yield)
        .unwrap_or(0)
}
