use soroban_sdk::{token, Address, Env, String, Vec};

use crate::errors::ContractError;
use crate::storage;
use crate::types::{Circle, CirclePhase, CircleTemplate, Member};

pub const MIN_CIRCLE_MEMBERS: u32 = 2;
pub const MAX_CIRCLE_MEMBERS: u32 = 20;
pub const MAX_CIRCLES_PER_CREATOR: u32 = 10;
pub const MAX_TEMPLATES_PER_CREATOR: u32 = 10;

fn validate_config(
    contribution_amount: i128,
    cycle_duration: u64,
    min_members: u32,
    max_members: u32,
    risk_tolerance: u32,
) -> Result<(), ContractError> {
    if contribution_amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if cycle_duration == 0 {
        return Err(ContractError::InvalidConfig);
    }
    if min_members < MIN_CIRCLE_MEMBERS
        || min_members > max_members
        || max_members > MAX_CIRCLE_MEMBERS
    {
        return Err(ContractError::InvalidConfig);
    }
    if risk_tolerance < 1 || risk_tolerance > 10 {
        return Err(ContractError::InvalidConfig);
    }
    Ok(())
}

fn new_member(env: &Env, address: &Address) -> Member {
    Member {
        address: address.clone(),
        name: String::from_str(env, ""),
        payout_position: 0,
        has_contributed: false,
        has_received_payout: false,
        total_contributions: 0,
        joined_at: 0,
        is_active: false,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn create_circle(
    env: &Env,
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
    creator.require_auth();

    validate_config(
        contribution_amount,
        cycle_duration,
        min_members,
        max_members,
        risk_tolerance,
    )?;

    if storage::get_creator_circles(env, &creator).len() >= MAX_CIRCLES_PER_CREATOR {
        return Err(ContractError::CreatorLimitReached);
    }

    let circle_id = storage::get_circle_counter(env) + 1;
    storage::set_circle_counter(env, circle_id);

    // The creator heads the roster but still confirms through join_circle
    // like everyone else.
    let mut roster = Vec::new(env);
    roster.push_back(creator.clone());

    let circle = Circle {
        id: circle_id,
        name,
        creator: creator.clone(),
        token,
        contribution_amount,
        cycle_duration,
        min_members,
        max_members,
        open_enrollment,
        risk_tolerance,
        roster,
        total_cycles: 0,
        current_cycle: 0,
        contributed_count: 0,
        pool_balance: 0,
        total_yield_earned: 0,
        positions_initialized: false,
        request_id: 0,
        phase: CirclePhase::Forming,
        cycle_started_at: 0,
        created_at: env.ledger().timestamp(),
    };

    storage::set_circle(env, &circle);
    storage::set_member(env, circle_id, &new_member(env, &creator));
    storage::add_member_circle(env, &creator, circle_id);
    storage::add_creator_circle(env, &creator, circle_id);

    env.events()
        .publish((crate::symbol_short!("crc_new"),), circle_id);

    Ok(circle_id)
}

pub fn invite_member(
    env: &Env,
    creator: Address,
    circle_id: u64,
    member: Address,
) -> Result<(), ContractError> {
    creator.require_auth();

    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    if creator != circle.creator {
        return Err(ContractError::Unauthorized);
    }
    if circle.phase != CirclePhase::Forming {
        return Err(ContractError::CircleNotForming);
    }
    if circle.roster.len() >= circle.max_members {
        return Err(ContractError::CircleFull);
    }
    for m in circle.roster.iter() {
        if m == member {
            return Err(ContractError::AlreadyInvited);
        }
    }

    circle.roster.push_back(member.clone());
    storage::set_circle(env, &circle);
    storage::set_member(env, circle_id, &new_member(env, &member));
    storage::add_member_circle(env, &member, circle_id);

    env.events()
        .publish((crate::symbol_short!("crc_invt"),), (circle_id, member));

    Ok(())
}

/// Confirm membership. Invitees may confirm any time before activation;
/// under open enrollment, joining during Forming adds the caller to the
/// roster directly.
pub fn join_circle(
    env: &Env,
    member: Address,
    circle_id: u64,
    display_name: String,
) -> Result<(), ContractError> {
    member.require_auth();

    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    match circle.phase {
        CirclePhase::Forming | CirclePhase::PositionsPending | CirclePhase::Ready => {}
        _ => return Err(ContractError::JoinClosed),
    }

    let mut on_roster = false;
    for m in circle.roster.iter() {
        if m == member {
            on_roster = true;
            break;
        }
    }

    if !on_roster {
        if !circle.open_enrollment || circle.phase != CirclePhase::Forming {
            return Err(ContractError::NotInvited);
        }
        if circle.roster.len() >= circle.max_members {
            return Err(ContractError::CircleFull);
        }
        circle.roster.push_back(member.clone());
        storage::set_circle(env, &circle);
        storage::set_member(env, circle_id, &new_member(env, &member));
        storage::add_member_circle(env, &member, circle_id);
    }

    let mut record = storage::get_member(env, circle_id, &member)
        .ok_or(ContractError::NotMember)?;
    if record.is_active {
        return Err(ContractError::AlreadyJoined);
    }
    record.name = display_name;
    record.joined_at = env.ledger().timestamp();
    record.is_active = true;
    storage::set_member(env, circle_id, &record);

    env.events()
        .publish((crate::symbol_short!("crc_join"),), (circle_id, member));

    Ok(())
}

/// Move a fully confirmed circle into its first contribution cycle.
pub fn start_circle(env: &Env, creator: Address, circle_id: u64) -> Result<(), ContractError> {
    creator.require_auth();

    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    if creator != circle.creator {
        return Err(ContractError::Unauthorized);
    }
    if circle.phase != CirclePhase::Ready {
        return Err(ContractError::CircleNotReady);
    }
    for m in circle.roster.iter() {
        let record = storage::get_member(env, circle_id, &m).ok_or(ContractError::NotMember)?;
        if !record.is_active {
            return Err(ContractError::MembersNotConfirmed);
        }
    }

    circle.phase = CirclePhase::Active;
    circle.cycle_started_at = env.ledger().timestamp();
    storage::set_circle(env, &circle);

    env.events()
        .publish((crate::symbol_short!("crc_strt"),), circle_id);

    Ok(())
}

/// Abandon a circle that never activated. Terminal; any recorded
/// contributions are swept back to their members first (contributions only
/// accrue once Active, so in practice the sweep moves nothing).
pub fn cancel_circle(env: &Env, caller: Address, circle_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let mut circle = storage::get_circle(env, circle_id).ok_or(ContractError::CircleNotFound)?;

    if caller != circle.creator && caller != storage::get_admin(env) {
        return Err(ContractError::Unauthorized);
    }
    match circle.phase {
        CirclePhase::Forming | CirclePhase::PositionsPending | CirclePhase::Ready => {}
        _ => return Err(ContractError::CircleNotCancellable),
    }

    let token_client = token::Client::new(env, &circle.token);
    let contract_addr = env.current_contract_address();
    for m in circle.roster.iter() {
        if let Some(mut record) = storage::get_member(env, circle_id, &m) {
            if record.total_contributions > 0 {
                token_client.transfer(&contract_addr, &m, &record.total_contributions);
                circle.pool_balance -= record.total_contributions;
                record.total_contributions = 0;
                storage::set_member(env, circle_id, &record);
            }
        }
    }

    circle.phase = CirclePhase::Cancelled;
    storage::set_circle(env, &circle);

    env.events()
        .publish((crate::symbol_short!("crc_cncl"),), circle_id);

    Ok(())
}

// --- Templates ---

#[allow(clippy::too_many_arguments)]
pub fn save_template(
    env: &Env,
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
    creator.require_auth();

    validate_config(
        contribution_amount,
        cycle_duration,
        min_members,
        max_members,
        risk_tolerance,
    )?;

    let count = storage::get_template_count(env, &creator);
    if count >= MAX_TEMPLATES_PER_CREATOR {
        return Err(ContractError::TemplateLimitReached);
    }

    let template_id = count + 1;
    let template = CircleTemplate {
        name,
        token,
        contribution_amount,
        cycle_duration,
        min_members,
        max_members,
        open_enrollment,
        risk_tolerance,
    };

    storage::set_template(env, &creator, template_id, &template);
    storage::set_template_count(env, &creator, template_id);

    env.events()
        .publish((crate::symbol_short!("tmpl_new"),), (creator, template_id));

    Ok(template_id)
}

pub fn get_template(
    env: &Env,
    creator: &Address,
    template_id: u32,
) -> Result<CircleTemplate, ContractError> {
    storage::get_template(env, creator, template_id).ok_or(ContractError::TemplateNotFound)
}

pub fn create_from_template(
    env: &Env,
    creator: Address,
    template_id: u32,
    name: String,
) -> Result<u64, ContractError> {
    let template = get_template(env, &creator, template_id)?;
    create_circle(
        env,
        creator,
        name,
        template.token,
        template.contribution_amount,
        template.cycle_duration,
        template.min_members,
        template.max_members,
        template.open_enrollment,
        template.risk_tolerance,
    )
}
