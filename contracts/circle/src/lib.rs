#![no_std]

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Vec};

mod contribution;
mod errors;
mod lifecycle;
mod payout;
mod positions;
mod storage;
mod types;

pub use errors::ContractError;
pub use types::*;

#[contract]
pub struct CircleContract;

#[contractimpl]
impl CircleContract {
    /// Initialize with a global admin and the shared services every circle
    /// is wired to: the strategy manager and the position randomizer.
    pub fn __constructor(env: Env, admin: Address, strategy_manager: Address, randomizer: Address) {
        if storage::has_admin(&env) {
            panic!("already initialized");
        }
        storage::set_admin(&env, &admin);
        storage::set_strategy_manager(&env, &strategy_manager);
        storage::set_randomizer(&env, &randomizer);
    }

    // ─── Circle Lifecycle ───────────────────────────────────────────

    /// Create a new savings circle. The caller becomes the creator and
    /// heads the roster, but confirms membership like everyone else.
    #[allow(clippy::too_many_arguments)]
    pub fn create_circle(
        env: Env,
        creator: Address,
        name: String,
        token: Address,
        contribution_amount: i128,
        cycle_duration: u64,
        min_members: u32,
        max_members: u32,
        open_enrollment: bool,
        risk_tolerance: u32,
    ) -> Result<u64, ContractError> {
        lifecycle::create_circle(
            &env,
            creator,
            name,
            token,
            contribution_amount,
            cycle_duration,
            min_members,
            max_members,
            open_enrollment,
            risk_tolerance,
        )
    }

    /// Invite a member while the circle is forming. Creator only.
    pub fn invite_member(
        env: Env,
        creator: Address,
        circle_id: u64,
        member: Address,
    ) -> Result<(), ContractError> {
        lifecycle::invite_member(&env, creator, circle_id, member)
    }

    /// Confirm membership with a display name. Under open enrollment,
    /// joining while the circle is forming also claims a roster slot.
    pub fn join_circle(
        env: Env,
        member: Address,
        circle_id: u64,
        display_name: String,
    ) -> Result<(), ContractError> {
        lifecycle::join_circle(&env, member, circle_id, display_name)
    }

    /// Lock the roster and request the randomized payout ordering.
    /// Creator only, once only.
    pub fn initiate_formation(
        env: Env,
        creator: Address,
        circle_id: u64,
    ) -> Result<(), ContractError> {
        positions::initiate_formation(&env, creator, circle_id)
    }

    /// Permutation fulfillment callback, invoked by the wired randomizer.
    pub fn deliver_positions(
        env: Env,
        request_id: u64,
        permutation: Vec<u32>,
    ) -> Result<(), ContractError> {
        positions::deliver_positions(&env, request_id, permutation)
    }

    /// Begin the first contribution cycle. Creator only; every roster
    /// member must have confirmed.
    pub fn start_circle(env: Env, creator: Address, circle_id: u64) -> Result<(), ContractError> {
        lifecycle::start_circle(&env, creator, circle_id)
    }

    /// Abandon a circle that never activated. Creator or admin.
    pub fn cancel_circle(env: Env, caller: Address, circle_id: u64) -> Result<(), ContractError> {
        lifecycle::cancel_circle(&env, caller, circle_id)
    }

    // ─── Circle Templates ───────────────────────────────────────────

    /// Save a circle template for quick creation later.
    /// Max 10 templates per creator.
    #[allow(clippy::too_many_arguments)]
    pub fn save_template(
        env: Env,
        creator: Address,
        name: String,
        token: Address,
        contribution_amount: i128,
        cycle_duration: u64,
        min_members: u32,
        max_members: u32,
        open_enrollment: bool,
        risk_tolerance: u32,
    ) -> Result<u32, ContractError> {
        lifecycle::save_template(
            &env,
            creator,
            name,
            token,
            contribution_amount,
            cycle_duration,
            min_members,
            max_members,
            open_enrollment,
            risk_tolerance,
        )
    }

    /// Get a saved template by ID.
    pub fn get_template(
        env: Env,
        creator: Address,
        template_id: u32,
    ) -> Result<CircleTemplate, ContractError> {
        lifecycle::get_template(&env, &creator, template_id)
    }

    /// Create a new circle from a saved template.
    pub fn create_from_template(
        env: Env,
        creator: Address,
        template_id: u32,
        name: String,
    ) -> Result<u64, ContractError> {
        lifecycle::create_from_template(&env, creator, template_id, name)
    }

    // ─── Contributions & Payouts ────────────────────────────────────

    /// Contribute to the cycle in progress; once per member per cycle.
    pub fn contribute(env: Env, member: Address, circle_id: u64) -> Result<(), ContractError> {
        contribution::contribute(&env, member, circle_id)
    }

    /// Distribute the pool (plus reported yield) to the member whose
    /// payout position matches the cycle. Anyone can call this once all
    /// contributions are in.
    pub fn execute_payout(env: Env, circle_id: u64) -> Result<(), ContractError> {
        payout::execute_payout(&env, circle_id)
    }

    // ─── Read Views ─────────────────────────────────────────────────

    /// Get circle details.
    pub fn get_circle(env: Env, circle_id: u64) -> Result<Circle, ContractError> {
        storage::get_circle(&env, circle_id).ok_or(ContractError::CircleNotFound)
    }

    /// Get one member's bookkeeping for a circle.
    pub fn get_member(
        env: Env,
        circle_id: u64,
        member: Address,
    ) -> Result<Member, ContractError> {
        storage::get_member(&env, circle_id, &member).ok_or(ContractError::NotMember)
    }

    /// Roster with per-member status, in position-assignment order.
    pub fn get_members(env: Env, circle_id: u64) -> Result<Vec<Member>, ContractError> {
        let circle = storage::get_circle(&env, circle_id).ok_or(ContractError::CircleNotFound)?;
        let mut members = Vec::new(&env);
        for m in circle.roster.iter() {
            if let Some(record) = storage::get_member(&env, circle_id, &m) {
                members.push_back(record);
            }
        }
        Ok(members)
    }

    /// All circle IDs a member belongs to.
    pub fn get_member_circles(env: Env, member: Address) -> Vec<u64> {
        storage::get_member_circles(&env, &member)
    }

    /// The member due the next payout.
    pub fn get_current_recipient(env: Env, circle_id: u64) -> Result<Address, ContractError> {
        payout::get_current_recipient(&env, circle_id)
    }

    /// Advisory deadline of the cycle in progress.
    pub fn get_cycle_deadline(env: Env, circle_id: u64) -> Result<u64, ContractError> {
        payout::get_cycle_deadline(&env, circle_id)
    }
}

#[cfg(test)]
mod test;
