use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Provider,
    Version,
    Previous,
    Receivers(Address),
}
