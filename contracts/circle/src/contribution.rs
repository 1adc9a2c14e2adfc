use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    token, vec, Address, Env, IntoVal, Symbol,
};

use strategy_manager::StrategyManagerContractClient;

use crate::errors::ContractError;
use crate::storage;
use crate::types::{Circle, CirclePhase};

pub fn contribute(env: &Env, member: Address, circle_id: u64) -> Result<(), ContractError> {
    member.require_auth();

    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    if circle.phase != CirclePhase::Active {
        return Err(ContractError::CircleNotActive);
    }

    let mut record =
        storage::get_member(env, circle_id, &member).ok_or(ContractError::NotMember)?;
    if !record.is_active {
        return Err(ContractError::NotMember);
    }
    if record.has_contributed {
        return Err(ContractError::AlreadyContributed);
    }

    // Pull this cycle's contribution into the pool.
    let token_client = token::Client::new(env, &circle.token);
    token_client.transfer(
        &member,
        &env.current_contract_address(),
        &circle.contribution_amount,
    );

    record.has_contributed = true;
    record.total_contributions += circle.contribution_amount;
    storage::set_member(env, circle_id, &record);

    circle.pool_balance += circle.contribution_amount;
    circle.contributed_count += 1;

    // Last contribution of the cycle: the payout becomes due and the idle
    // pool goes to work until it is executed.
    if circle.contributed_count == circle.roster.len() {
        circle.phase = CirclePhase::PayoutReady;
        invest_pool(env, &mut circle)?;
    }

    storage::set_circle(env, &circle);

    env.events().publish(
        (crate::symbol_short!("contrib"),),
        (circle_id, member, circle.contribution_amount),
    );

    Ok(())
}

/// Route the fully-contributed pool through strategy selection into the
/// manager's custody. Under emergency mode selection resolves to treasury
/// on its own; this path never names a strategy directly.
fn invest_pool(env: &Env, circle: &mut Circle) -> Result<(), ContractError> {
    let manager_addr = storage::get_strategy_manager(env);
    let manager = StrategyManagerContractClient::new(env, &manager_addr);

    let amount = circle.pool_balance;
    let choice =
        manager.select_best_strategy(&amount, &circle.cycle_duration, &circle.risk_tolerance);

    authorize_token_pull(env, &manager_addr, &circle.token, amount);
    manager.invest(
        &env.current_contract_address(),
        &circle.token,
        &amount,
        &choice.strategy,
    );

    circle.pool_balance = 0;

    env.events().publish(
        (crate::symbol_short!("invested"),),
        (circle.id, choice.strategy, amount),
    );

    Ok(())
}

/// Pre-authorize the manager's nested pull of this contract's tokens, so
/// its `transfer(circle -> manager)` sub-invocation passes auth.
fn authorize_token_pull(env: &Env, manager: &Address, token: &Address, amount: i128) {
    env.authorize_as_current_contract(vec![
        env,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: token.clone(),
                fn_name: Symbol::new(env, "transfer"),
                args: (env.current_contract_address(), manager.clone(), amount).into_val(env),
            },
            sub_invocations: vec![env],
        }),
    ]);
}
