use soroban_sdk::{contracttype, Address};

/// Interceptor lists are bounded per (minter, token id) key.
pub const MAX_INTERCEPTORS: u32 = 8;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // instance
    Owner,
    Underlying,
    Registry,
    Name,
    Symbol,
    ClaimAdmin,
    LoanGuard,
    Locked,
    TotalSupply,
    // persistent
    TokenOwner(u128),
    TokenMinter(u128),
    Balance(Address),
    Delegates(u128),
    /// (registering minter, token id) -> ordered interceptor list.
    Interceptors(Address, u128),
    /// Minters holding an interceptor list for a token id, so burn can
    /// clear every list.
    InterceptorMinters(u128),
    AuthorizedMinter(Address),
    AuthorizedCaller(Address),
}
