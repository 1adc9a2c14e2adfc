use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::access;
use crate::errors::ContractError;
use crate::storage;
use crate::types::{
    Capability, EmergencyState, Strategy, DEFAULT_MIN_YIELD_AMOUNT, MAX_STRATEGY_AMOUNT,
};

/// Seed the strategy table with the stock lineup. Called once from the
/// constructor; everything after goes through the strategy-admin paths.
pub fn install_default_strategies(env: &Env) {
    let defaults = [
        // Zero-risk parking slot; the selection fallback in every guard
        // branch and the only direct target allowed under emergency mode.
        Strategy {
            name: symbol_short!("treasury"),
            apy_bps: 0,
            risk_score: 1,
            liquidity_score: 10,
            min_amount: 0,
            max_amount: MAX_STRATEGY_AMOUNT,
            active: true,
        },
        Strategy {
            name: symbol_short!("lending"),
            apy_bps: 300,
            risk_score: 2,
            liquidity_score: 8,
            min_amount: DEFAULT_MIN_YIELD_AMOUNT,
            max_amount: MAX_STRATEGY_AMOUNT,
            active: true,
        },
        Strategy {
            name: symbol_short!("balanced"),
            apy_bps: 900,
            risk_score: 5,
            liquidity_score: 6,
            min_amount: DEFAULT_MIN_YIELD_AMOUNT,
            max_amount: MAX_STRATEGY_AMOUNT,
            active: true,
        },
        Strategy {
            name: symbol_short!("native_lp"),
            apy_bps: 1800,
            risk_score: 8,
            liquidity_score: 4,
            min_amount: DEFAULT_MIN_YIELD_AMOUNT,
            max_amount: MAX_STRATEGY_AMOUNT,
            active: true,
        },
    ];

    for strategy in defaults.iter() {
        storage::push_strategy_name(env, &strategy.name);
        storage::set_strategy(env, strategy);
    }
}

fn validate_strategy(strategy: &Strategy) -> Result<(), ContractError> {
    if strategy.risk_score < 1 || strategy.risk_score > 10 {
        return Err(ContractError::InvalidStrategyConfig);
    }
    if strategy.liquidity_score < 1 || strategy.liquidity_score > 10 {
        return Err(ContractError::InvalidStrategyConfig);
    }
    if strategy.min_amount < 0 || strategy.max_amount < strategy.min_amount {
        return Err(ContractError::InvalidStrategyConfig);
    }
    Ok(())
}

pub fn add_strategy(env: &Env, caller: Address, strategy: Strategy) -> Result<(), ContractError> {
    access::require_cap(env, &caller, Capability::StrategyAdmin)?;
    validate_strategy(&strategy)?;

    if storage::get_strategy(env, &strategy.name).is_some() {
        return Err(ContractError::DuplicateStrategy);
    }

    storage::push_strategy_name(env, &strategy.name);
    storage::set_strategy(env, &strategy);

    env.events()
        .publish((symbol_short!("strat_new"),), strategy.name);

    Ok(())
}

pub fn update_strategy_apy(
    env: &Env,
    caller: Address,
    name: Symbol,
    apy_bps: u32,
) -> Result<(), ContractError> {
    access::require_cap(env, &caller, Capability::StrategyAdmin)?;

    let mut strategy =
        storage::get_strategy(env, &name).ok_or(ContractError::UnknownStrategy)?;
    strategy.apy_bps = apy_bps;
    storage::set_strategy(env, &strategy);

    env.events()
        .publish((symbol_short!("strat_apy"),), (name, apy_bps));

    Ok(())
}

/// Strategies are never deleted; they are deactivated, which removes them
/// from selection and from direct investment.
pub fn set_strategy_status(
    env: &Env,
    caller: Address,
    name: Symbol,
    active: bool,
) -> Result<(), ContractError> {
    access::require_cap(env, &caller, Capability::StrategyAdmin)?;

    let mut strategy =
        storage::get_strategy(env, &name).ok_or(ContractError::UnknownStrategy)?;
    strategy.active = active;
    storage::set_strategy(env, &strategy);

    env.events()
        .publish((symbol_short!("strat_act"),), (name, active));

    Ok(())
}

pub fn activate_emergency_mode(
    env: &Env,
    caller: Address,
    reason: String,
) -> Result<(), ContractError> {
    access::require_cap(env, &caller, Capability::Emergency)?;

    storage::set_emergency(
        env,
        &EmergencyState {
            active: true,
            reason,
            since: env.ledger().timestamp(),
        },
    );

    env.events().publish((symbol_short!("emg_on"),), caller);

    Ok(())
}

pub fn deactivate_emergency_mode(env: &Env, caller: Address) -> Result<(), ContractError> {
    access::require_cap(env, &caller, Capability::Emergency)?;

    let mut state = storage::get_emergency(env);
    state.active = false;
    storage::set_emergency(env, &state);

    env.events().publish((symbol_short!("emg_off"),), caller);

    Ok(())
}

// --- Capability grants (instance admin only) ---

pub fn grant_capability(
    env: &Env,
    admin: Address,
    cap: Capability,
    who: Address,
) -> Result<(), ContractError> {
    admin.require_auth();
    if admin != storage::get_admin(env) {
        return Err(ContractError::Unauthorized);
    }

    storage::set_cap(env, &cap, &who, true);

    env.events()
        .publish((symbol_short!("cap_grant"),), (cap, who));

    Ok(())
}

pub fn revoke_capability(
    env: &Env,
    admin: Address,
    cap: Capability,
    who: Address,
) -> Result<(), ContractError> {
    admin.require_auth();
    if admin != storage::get_admin(env) {
        return Err(ContractError::Unauthorized);
    }

    storage::set_cap(env, &cap, &who, false);

    env.events().publish((symbol_short!("cap_rvk"),), (cap, who));

    Ok(())
}
