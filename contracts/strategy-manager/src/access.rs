use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::storage;
use crate::types::Capability;

/// Single authorization gate for every privileged entry point: the caller
/// proves its identity, then must hold the named capability in the grant
/// table. Fails closed before any state is touched.
pub fn require_cap(env: &Env, caller: &Address, cap: Capability) -> Result<(), ContractError> {
    caller.require_auth();
    if !storage::has_cap(env, &cap, caller) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
