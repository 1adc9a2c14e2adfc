use soroban_sdk::{Address, Env, Vec};

use crate::types::{Circle, CircleTemplate, DataKey, Member};

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;

// --- Admin & Wired Services ---

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

pub fn get_strategy_manager(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::StrategyManager)
        .unwrap()
}

pub fn set_strategy_manager(env: &Env, manager: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::StrategyManager, manager);
    extend_instance_ttl(env);
}

pub fn get_randomizer(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Randomizer).unwrap()
}

pub fn set_randomizer(env: &Env, randomizer: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::Randomizer, randomizer);
    extend_instance_ttl(env);
}

// --- Circle Counter ---

pub fn get_circle_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CircleCounter)
        .unwrap_or(0)
}

pub fn set_circle_counter(env: &Env, counter: u64) {
    env.storage()
        .instance()
        .set(&DataKey::CircleCounter, &counter);
    extend_instance_ttl(env);
}

// --- Circle ---

pub fn get_circle(env: &Env, circle_id: u64) -> Option<Circle> {
    let key = DataKey::Circle(circle_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_circle(env: &Env, circle: &Circle) {
    let key = DataKey::Circle(circle.id);
    env.storage().persistent().set(&key, circle);
    extend_persistent_ttl(env, &key);
}

// --- Members ---

pub fn get_member(env: &Env, circle_id: u64, address: &Address) -> Option<Member> {
    let key = DataKey::Member(circle_id, address.clone());
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_member(env: &Env, circle_id: u64, member: &Member) {
    let key = DataKey::Member(circle_id, member.address.clone());
    env.storage().persistent().set(&key, member);
    extend_persistent_ttl(env, &key);
}

// --- Member / Creator Indexes ---

pub fn get_member_circles(env: &Env, member: &Address) -> Vec<u64> {
    let key = DataKey::MemberCircles(member.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

pub fn add_member_circle(env: &Env, member: &Address, circle_id: u64) {
    let key = DataKey::MemberCircles(member.clone());
    let mut circles = get_member_circles(env, member);
    circles.push_back(circle_id);
    env.storage().persistent().set(&key, &circles);
    extend_persistent_ttl(env, &key);
}

pub fn get_creator_circles(env: &Env, creator: &Address) -> Vec<u64> {
    let key = DataKey::CreatorCircles(creator.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

pub fn add_creator_circle(env: &Env, creator: &Address, circle_id: u64) {
    let key = DataKey::CreatorCircles(creator.clone());
    let mut circles = get_creator_circles(env, creator);
    circles.push_back(circle_id);
    env.storage().persistent().set(&key, &circles);
    extend_persistent_ttl(env, &key);
}

// --- Templates ---

pub fn get_template_count(env: &Env, creator: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::TemplateCount(creator.clone()))
        .unwrap_or(0)
}

pub fn set_template_count(env: &Env, creator: &Address, count: u32) {
    let key = DataKey::TemplateCount(creator.clone());
    env.storage().persistent().set(&key, &count);
    extend_persistent_ttl(env, &key);
}

pub fn get_template(env: &Env, creator: &Address, template_id: u32) -> Option<CircleTemplate> {
    let key = DataKey::Template(creator.clone(), template_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_template(env: &Env, creator: &Address, template_id: u32, template: &CircleTemplate) {
    let key = DataKey::Template(creator.clone(), template_id);
    env.storage().persistent().set(&key, template);
    extend_persistent_ttl(env, &key);
}

// --- Position Requests ---

pub fn get_position_request(env: &Env, request_id: u64) -> Option<u64> {
    let key = DataKey::PositionRequest(request_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_position_request(env: &Env, request_id: u64, circle_id: u64) {
    let key = DataKey::PositionRequest(request_id);
    env.storage().persistent().set(&key, &circle_id);
    extend_persistent_ttl(env, &key);
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
