use soroban_sdk::{Address, Env, String, Symbol, Vec};

use crate::types::{Capability, DataKey, EmergencyState, InvestmentPosition, Strategy};

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;

// --- Admin ---

pub fn get_admin(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Admin).unwrap()
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    extend_instance_ttl(env);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

// --- Strategy Table ---

pub fn get_strategy_names(env: &Env) -> Vec<Symbol> {
    env.storage()
        .instance()
        .get(&DataKey::StrategyNames)
        .unwrap_or(Vec::new(env))
}

pub fn push_strategy_name(env: &Env, name: &Symbol) {
    let mut names = get_strategy_names(env);
    names.push_back(name.clone());
    env.storage().instance().set(&DataKey::StrategyNames, &names);
    extend_instance_ttl(env);
}

pub fn get_strategy(env: &Env, name: &Symbol) -> Option<Strategy> {
    let key = DataKey::Strategy(name.clone());
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_strategy(env: &Env, strategy: &Strategy) {
    let key = DataKey::Strategy(strategy.name.clone());
    env.storage().persistent().set(&key, strategy);
    extend_persistent_ttl(env, &key);
}

// --- Positions ---

pub fn get_position(env: &Env, owner: &Address) -> Option<InvestmentPosition> {
    let key = DataKey::Position(owner.clone());
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_position(env: &Env, owner: &Address, position: &InvestmentPosition) {
    let key = DataKey::Position(owner.clone());
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
}

pub fn remove_position(env: &Env, owner: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Position(owner.clone()));
}

// --- Emergency ---

pub fn get_emergency(env: &Env) -> EmergencyState {
    env.storage()
        .instance()
        .get(&DataKey::Emergency)
        .unwrap_or(EmergencyState {
            active: false,
            reason: String::from_str(env, ""),
            since: 0,
        })
}

pub fn set_emergency(env: &Env, state: &EmergencyState) {
    env.storage().instance().set(&DataKey::Emergency, state);
    extend_instance_ttl(env);
}

// --- Capabilities ---

pub fn has_cap(env: &Env, cap: &Capability, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Cap(cap.clone(), who.clone()))
        .unwrap_or(false)
}

pub fn set_cap(env: &Env, cap: &Capability, who: &Address, granted: bool) {
    let key = DataKey::Cap(cap.clone(), who.clone());
    if granted {
        env.storage().persistent().set(&key, &true);
        extend_persistent_ttl(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// --- TTL Management ---

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
