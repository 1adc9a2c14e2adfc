use soroban_sdk::{symbol_short, Env, String, Symbol};

use crate::errors::ContractError;
use crate::storage;
use crate::types::{Strategy, StrategyChoice};

/// Positions shorter than this cannot be entered and exited safely.
pub const MIN_TIME_HORIZON_SECS: u64 = 7 * 86_400;

const LOW_RISK_TOLERANCE_MAX: u32 = 3;
const MID_RISK_TOLERANCE_MAX: u32 = 7;
/// The mid bucket never reaches into high-risk strategies, whatever their
/// risk-adjusted ratio says.
const MID_RISK_SCORE_MAX: u32 = 7;

pub fn treasury() -> Symbol {
    symbol_short!("treasury")
}

/// Deterministic strategy selection. Pure in (amount, time horizon, risk
/// tolerance, emergency flag) given an unchanged strategy table; precedence
/// is total: emergency, then amount floor, then duration floor, then the
/// risk-tolerance bucket.
pub fn select_best_strategy(
    env: &Env,
    amount: i128,
    time_horizon_secs: u64,
    risk_tolerance: u32,
) -> Result<StrategyChoice, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if risk_tolerance < 1 || risk_tolerance > 10 {
        return Err(ContractError::InvalidRiskTolerance);
    }

    if storage::get_emergency(env).active {
        return Ok(choice(
            env,
            treasury(),
            "Emergency mode active: routing funds to treasury until conditions normalize",
        ));
    }

    if let Some(floor) = lowest_active_minimum(env) {
        if amount < floor {
            return Ok(choice(
                env,
                treasury(),
                "Amount is below the minimum for yield strategies; parking in treasury",
            ));
        }
    }

    if time_horizon_secs < MIN_TIME_HORIZON_SECS {
        return Ok(choice(
            env,
            treasury(),
            "Time horizon under 7 days is too short to safely exit a yield position; parking in treasury",
        ));
    }

    let pick = if risk_tolerance <= LOW_RISK_TOLERANCE_MAX {
        lowest_risk(env, amount)
    } else if risk_tolerance <= MID_RISK_TOLERANCE_MAX {
        best_risk_adjusted(env, amount)
    } else {
        highest_apy(env, amount)
    };

    match pick {
        Some(strategy) => {
            let prefix = if risk_tolerance <= LOW_RISK_TOLERANCE_MAX {
                "Conservative profile: picked the lowest-risk strategy at "
            } else if risk_tolerance <= MID_RISK_TOLERANCE_MAX {
                "Balanced profile: picked the best risk-adjusted strategy at "
            } else {
                "Aggressive profile: picked the highest-yield strategy at "
            };
            Ok(StrategyChoice {
                strategy: strategy.name.clone(),
                explanation: explain_with_apy(env, prefix, strategy.apy_bps),
            })
        }
        None => Ok(choice(
            env,
            treasury(),
            "No active strategy accepts this amount; parking in treasury",
        )),
    }
}

/// Lowest non-zero minimum across active strategies: the floor below which
/// nothing yield-bearing will take the funds.
fn lowest_active_minimum(env: &Env) -> Option<i128> {
    let mut floor: Option<i128> = None;
    for name in storage::get_strategy_names(env).iter() {
        if let Some(s) = storage::get_strategy(env, &name) {
            if s.active && s.min_amount > 0 {
                floor = Some(match floor {
                    Some(f) if f <= s.min_amount => f,
                    _ => s.min_amount,
                });
            }
        }
    }
    floor
}

fn fits(s: &Strategy, amount: i128) -> bool {
    s.active && s.apy_bps > 0 && amount >= s.min_amount && amount <= s.max_amount
}

fn lowest_risk(env: &Env, amount: i128) -> Option<Strategy> {
    let mut best: Option<Strategy> = None;
    for name in storage::get_strategy_names(env).iter() {
        let s = match storage::get_strategy(env, &name) {
            Some(s) if fits(&s, amount) => s,
            _ => continue,
        };
        best = Some(match best {
            Some(b)
                if b.risk_score < s.risk_score
                    || (b.risk_score == s.risk_score && b.apy_bps >= s.apy_bps) =>
            {
                b
            }
            _ => s,
        });
    }
    best
}

fn best_risk_adjusted(env: &Env, amount: i128) -> Option<Strategy> {
    let mut best: Option<(u64, Strategy)> = None;
    for name in storage::get_strategy_names(env).iter() {
        let s = match storage::get_strategy(env, &name) {
            Some(s) if fits(&s, amount) && s.risk_score <= MID_RISK_SCORE_MAX => s,
            _ => continue,
        };
        let score = s.apy_bps as u64 * 1000 / s.risk_score as u64;
        best = Some(match best {
            Some((b_score, b)) if b_score >= score => (b_score, b),
            _ => (score, s),
        });
    }
    best.map(|(_, s)| s)
}

fn highest_apy(env: &Env, amount: i128) -> Option<Strategy> {
    let mut best: Option<Strategy> = None;
    for name in storage::get_strategy_names(env).iter() {
        let s = match storage::get_strategy(env, &name) {
            Some(s) if fits(&s, amount) => s,
            _ => continue,
        };
        best = Some(match best {
            Some(b) if b.apy_bps >= s.apy_bps => b,
            _ => s,
        });
    }
    best
}

fn choice(env: &Env, strategy: Symbol, explanation: &str) -> StrategyChoice {
    StrategyChoice {
        strategy,
        explanation: String::from_str(env, explanation),
    }
}

/// no_std explanation builder: `<prefix><apy> bps APY`.
fn explain_with_apy(env: &Env, prefix: &str, apy_bps: u32) -> String {
    let mut buf = [0u8; 112];
    let mut len = 0;
    for b in prefix.as_bytes() {
        buf[len] = *b;
        len += 1;
    }

    let mut digits = [0u8; 10];
    let mut n = apy_bps;
    let mut d = 0;
    if n == 0 {
        digits[0] = b'0';
        d = 1;
    }
    while n > 0 {
        digits[d] = b'0' + (n % 10) as u8;
        n /= 10;
        d += 1;
    }
    while d > 0 {
        d -= 1;
        buf[len] = digits[d];
        len += 1;
    }

    for b in b" bps APY" {
        buf[len] = *b;
        len += 1;
    }

    String::from_bytes(env, &buf[..len])
}
