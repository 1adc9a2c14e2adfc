use soroban_sdk::{contracttype, Address, String, Vec};

/// Lifecycle of a savings circle. Advanced only by the transitions the
/// circle itself defines; Completed and Cancelled are terminal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CirclePhase {
    Forming,          // Invitations open, roster not yet locked
    PositionsPending, // Waiting on the randomizer for payout positions
    Ready,            // Positions fixed, members confirming
    Active,           // Contribution cycle in progress
    PayoutReady,      // Cycle fully contributed, pool invested, payout due
    Completed,        // All payouts distributed
    Cancelled,        // Abandoned before activation
}

/// Core circle configuration and state.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Circle {
    pub id: u64,
    pub name: String,
    pub creator: Address,
    pub token: Address,
    pub contribution_amount: i128,
    pub cycle_duration: u64,
    pub min_members: u32,
    pub max_members: u32,
    pub open_enrollment: bool,
    /// 1 (conservative) to 10 (aggressive); handed to strategy selection.
    pub risk_tolerance: u32,
    /// Invitation order; join order under open enrollment. Payout positions
    /// are assigned over this list.
    pub roster: Vec<Address>,
    /// Fixed to the roster length when formation is initiated.
    pub total_cycles: u32,
    /// Completed payouts so far.
    pub current_cycle: u32,
    /// Contributions received in the cycle in progress.
    pub contributed_count: u32,
    /// Idle contributions held by the circle, not yet invested.
    pub pool_balance: i128,
    pub total_yield_earned: i128,
    pub positions_initialized: bool,
    /// Randomizer request handle; 0 until formation is initiated.
    pub request_id: u64,
    pub phase: CirclePhase,
    pub cycle_started_at: u64,
    pub created_at: u64,
}

/// Per-member bookkeeping, keyed by (circle, address).
#[contracttype]
#[derive(Clone, Debug)]
pub struct Member {
    pub address: Address,
    /// Display only; no uniqueness constraint.
    pub name: String,
    /// 1..=N once positions are initialized, 0 before.
    pub payout_position: u32,
    /// Reset every cycle.
    pub has_contributed: bool,
    /// Set exactly once over the circle's lifetime, never cleared.
    pub has_received_payout: bool,
    pub total_contributions: i128,
    pub joined_at: u64,
    pub is_active: bool,
}

/// Reusable circle configuration for quick creation.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CircleTemplate {
    pub name: String,
    pub token: Address,
    pub contribution_amount: i128,
    pub cycle_duration: u64,
    pub min_members: u32,
    pub max_members: u32,
    pub open_enrollment: bool,
    pub risk_tolerance: u32,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    StrategyManager,
    Randomizer,
    CircleCounter,
    Circle(u64),
    Member(u64, Address),
    MemberCircles(Address),
    CreatorCircles(Address),
    Template(Address, u32),
    TemplateCount(Address),
    PositionRequest(u64),
}
