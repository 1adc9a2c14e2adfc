use soroban_sdk::{contracttype, Address, String, Symbol};

/// Default floor for yield-bearing strategies: a $25-equivalent expressed in
/// 6-decimal minor units. Stored per strategy; selection reads the table,
/// not this constant.
pub const DEFAULT_MIN_YIELD_AMOUNT: i128 = 25_000_000;

/// Upper bound on any single position, in minor units.
pub const MAX_STRATEGY_AMOUNT: i128 = 1_000_000_000_000_000;

/// A named destination for pooled funds. Declarative: mutated only through
/// the strategy-admin entry points, deactivated instead of deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Strategy {
    pub name: Symbol,
    /// Advertised yield in basis points.
    pub apy_bps: u32,
    /// 1 (safest) to 10.
    pub risk_score: u32,
    /// 1 (locked) to 10 (instantly exitable).
    pub liquidity_score: u32,
    pub min_amount: i128,
    pub max_amount: i128,
    pub active: bool,
}

/// The single logical position an owner holds: principal accumulates on
/// re-invest and the strategy reference is replaced in place.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentPosition {
    pub strategy: Symbol,
    pub token: Address,
    pub principal: i128,
    /// Last value asserted by the yield operator. A report, not an accrual;
    /// not guaranteed monotonic.
    pub accrued_yield: i128,
}

/// Outcome of strategy selection: the chosen name plus a human-readable
/// explanation of the deciding factor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyChoice {
    pub strategy: Symbol,
    pub explanation: String,
}

/// System-wide override state. Activation only constrains future selection
/// and direct investment; it never unwinds existing positions.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyState {
    pub active: bool,
    pub reason: String,
    pub since: u64,
}

/// Named capabilities granted per deployment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Capability {
    /// May report externally realized yield.
    Operator,
    /// May invest and withdraw pooled funds (circle contracts, admins).
    Circle,
    /// May mutate the strategy table.
    StrategyAdmin,
    /// May toggle emergency mode.
    Emergency,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    StrategyNames,
    Strategy(Symbol),
    Position(Address),
    Emergency,
    Cap(Capability, Address),
}
