use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    NamePrefix,
    SymbolPrefix,
    /// Protocol-wide delegation registry consumed by every wrapper.
    DelegationRegistry,
    /// Protocol-wide default claim admin, overridable per wrapper.
    ClaimAdmin,
    /// Underlying asset -> wrapper address.
    BoundToken(Address),
    /// Ordered list of registered underlying assets.
    Assets,
}
