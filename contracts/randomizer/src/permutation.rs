use soroban_sdk::{Env, Vec};

/// Largest group a single request may cover. Keeps the validation bitmask
/// in a u128 and bounds fulfillment cost.
pub const MAX_MEMBER_COUNT: u32 = 128;

/// Uniform random permutation of `1..=n` via a back-to-front Fisher-Yates
/// shuffle over the env PRNG (seedable in tests).
pub fn generate(env: &Env, n: u32) -> Vec<u32> {
    let mut slots = Vec::new(env);
    for slot in 1..=n {
        slots.push_back(slot);
    }
    let mut i = n;
    while i > 1 {
        let j = env.prng().gen_range::<u64>(0..=(i as u64 - 1)) as u32;
        let a = slots.get(i - 1).unwrap();
        let b = slots.get(j).unwrap();
        slots.set(i - 1, b);
        slots.set(j, a);
        i -= 1;
    }
    slots
}

/// True iff `perm` is exactly a permutation of `1..=n`: no repeats, no gaps.
pub fn is_valid(perm: &Vec<u32>, n: u32) -> bool {
    if n < 2 || n > MAX_MEMBER_COUNT || perm.len() != n {
        return false;
    }
    let mut seen: u128 = 0;
    for p in perm.iter() {
        if p < 1 || p > n {
            return false;
        }
        let bit = 1u128 << (p - 1);
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}
