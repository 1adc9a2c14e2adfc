#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol, Vec};

mod access;
mod admin;
mod errors;
mod positions;
mod selection;
mod storage;
mod types;

pub use errors::ContractError;
pub use types::*;

#[contract]
pub struct StrategyManagerContract;

#[contractimpl]
impl StrategyManagerContract {
    /// Initialize with a global admin and seed the stock strategy table.
    pub fn __constructor(env: Env, admin: Address) {
        if storage::has_admin(&env) {
            panic!("already initialized");
        }
        storage::set_admin(&env, &admin);
        admin::install_default_strategies(&env);
    }

    // ─── Strategy Table ─────────────────────────────────────────────

    /// All currently active strategies.
    pub fn get_available_strategies(env: Env) -> Vec<Strategy> {
        let mut active = Vec::new(&env);
        for name in storage::get_strategy_names(&env).iter() {
            if let Some(s) = storage::get_strategy(&env, &name) {
                if s.active {
                    active.push_back(s);
                }
            }
        }
        active
    }

    pub fn get_strategy(env: Env, name: Symbol) -> Result<Strategy, ContractError> {
        storage::get_strategy(&env, &name).ok_or(ContractError::UnknownStrategy)
    }

    /// Pick a strategy for the given request. Deterministic: identical
    /// inputs against an unchanged table yield an identical choice, with a
    /// human-readable explanation of the deciding factor.
    pub fn select_best_strategy(
        env: Env,
        amount: i128,
        time_horizon_secs: u64,
        risk_tolerance: u32,
    ) -> Result<StrategyChoice, ContractError> {
        selection::select_best_strategy(&env, amount, time_horizon_secs, risk_tolerance)
    }

    /// Register a new strategy. Strategy-admin capability.
    pub fn add_strategy(env: Env, caller: Address, strategy: Strategy) -> Result<(), ContractError> {
        admin::add_strategy(&env, caller, strategy)
    }

    /// Re-rate a strategy's advertised APY. Strategy-admin capability.
    pub fn update_strategy_apy(
        env: Env,
        caller: Address,
        name: Symbol,
        apy_bps: u32,
    ) -> Result<(), ContractError> {
        admin::update_strategy_apy(&env, caller, name, apy_bps)
    }

    /// Activate or deactivate a strategy (strategies are never deleted).
    pub fn set_strategy_status(
        env: Env,
        caller: Address,
        name: Symbol,
        active: bool,
    ) -> Result<(), ContractError> {
        admin::set_strategy_status(&env, caller, name, active)
    }

    // ─── Investment Positions ───────────────────────────────────────

    /// Move `amount` of `token` from the owner into the named strategy.
    /// Circle capability; during emergency mode only `treasury` may be
    /// named directly.
    pub fn invest(
        env: Env,
        owner: Address,
        token: Address,
        amount: i128,
        strategy_name: Symbol,
    ) -> Result<(), ContractError> {
        positions::invest(&env, owner, token, amount, strategy_name)
    }

    /// Withdraw up to principal + reported yield back to the owner.
    /// Returns the amount actually transferred.
    pub fn withdraw(env: Env, owner: Address, amount: i128) -> Result<i128, ContractError> {
        positions::withdraw(&env, owner, amount)
    }

    pub fn get_position(env: Env, owner: Address) -> Result<InvestmentPosition, ContractError> {
        storage::get_position(&env, &owner).ok_or(ContractError::PositionNotFound)
    }

    /// Yield currently on record for the owner; zero when no position.
    pub fn get_current_yield(env: Env, owner: Address) -> i128 {
        positions::get_current_yield(&env, &owner)
    }

    /// Report externally realized yield as an absolute value. Operator
    /// capability.
    pub fn update_actual_yield(
        env: Env,
        operator: Address,
        owner: Address,
        new_yield: i128,
    ) -> Result<(), ContractError> {
        positions::update_actual_yield(&env, operator, owner, new_yield)
    }

    // ─── Emergency Mode ─────────────────────────────────────────────

    /// Force all future selection to treasury. Emergency capability.
    /// Existing positions are left untouched.
    pub fn activate_emergency_mode(
        env: Env,
        caller: Address,
        reason: String,
    ) -> Result<(), ContractError> {
        admin::activate_emergency_mode(&env, caller, reason)
    }

    pub fn deactivate_emergency_mode(env: Env, caller: Address) -> Result<(), ContractError> {
        admin::deactivate_emergency_mode(&env, caller)
    }

    pub fn get_emergency_state(env: Env) -> EmergencyState {
        storage::get_emergency(&env)
    }

    // ─── Capability Grants ──────────────────────────────────────────

    /// Grant a named capability. Instance admin only.
    pub fn grant_capability(
        env: Env,
        admin: Address,
        cap: Capability,
        who: Address,
    ) -> Result<(), ContractError> {
        admin::grant_capability(&env, admin, cap, who)
    }

    pub fn revoke_capability(
        env: Env,
        admin: Address,
        cap: Capability,
        who: Address,
    ) -> Result<(), ContractError> {
        admin::revoke_capability(&env, admin, cap, who)
    }

    pub fn has_capability(env: Env, cap: Capability, who: Address) -> bool {
        storage::has_cap(&env, &cap, &who)
    }
}
