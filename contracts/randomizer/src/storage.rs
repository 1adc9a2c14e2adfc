use soroban_sdk::{Address, Env};

use crate::types::{DataKey, PermutationRequest};

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

// --- Mode ---

pub fn get_test_mode(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::TestMode)
        .unwrap_or(false)
}

pub fn set_test_mode(env: &Env, test_mode: bool) {
    env.storage().instance().set(&DataKey::TestMode, &test_mode);
    extend_instance_ttl(env);
}

// --- Request Counter ---

pub fn get_request_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::RequestCounter)
        .unwrap_or(0)
}

pub fn set_request_counter(env: &Env, counter: u64) {
    env.storage()
        .instance()
        .set(&DataKey::RequestCounter, &counter);
    extend_instance_ttl(env);
}

// --- Requests ---

pub fn get_request(env: &Env, request_id: u64) -> Option<PermutationRequest> {
    let key = DataKey::Request(request_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_request(env: &Env, request_id: u64, request: &PermutationRequest) {
    let key = DataKey::Request(request_id);
    env.storage().persistent().set(&key, request);
    extend_persistent_ttl(env, &key);
}

// --- Operators ---

pub fn is_operator(env: &Env, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Operator(who.clone()))
        .unwrap_or(false)
}

pub fn set_operator(env: &Env, who: &Address, granted: bool) {
    let key = DataKey::Operator(who.clone());
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
