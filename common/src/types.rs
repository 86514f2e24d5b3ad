use soroban_sdk::{contracttype, Address, Symbol, Val, Vec};

/// One entry in a user's receiver history, newest version first.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiverRecord {
    pub version: u32,
    pub receiver: Address,
}

/// What the executor should do with a reward balance after the claim call.
///
/// Each variant names the reward contract; balances always move to the
/// receiver's owner, never to an arbitrary destination.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SweepSpec {
    /// Sweep the receiver's full balance of a fungible token.
    Fungible(Address),
    /// Sweep one non-fungible token id.
    NonFungible(Address, u128),
    /// Sweep the receiver's full balance of one multi-token id.
    MultiToken(Address, u128),
}

/// The typed instruction blob a wrapper forwards opaquely through
/// `flash_loan`; the registry decodes it back from XDR for the executor.
#[contracttype]
#[derive(Clone, Debug)]
pub struct FlashClaimParams {
    /// Reward contract to call while holding the unwrapped asset.
    pub target: Address,
    pub func: Symbol,
    pub args: Vec<Val>,
    /// Reward balances to forward to the owner once the call returns.
    pub sweeps: Vec<SweepSpec>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RewardKind {
    Fungible,
    NonFungible,
    MultiToken,
    Other,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Distribution {
    /// Every user receives the reward units mapped to their own token ids.
    Fixed,
    /// Reward units are assigned among claimants from fulfilled randomness.
    Random,
}

/// One distribution campaign. The field shape is read by off-chain
/// indexers through `airdrop_data` and must stay stable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AirdropData {
    pub nft_asset: Address,
    pub reward_token: Address,
    pub reward_kind: RewardKind,
    pub distribution: Distribution,
    /// Zero until randomness has been requested.
    pub vrf_request_id: u64,
    pub randomness_fulfilled: bool,
    pub total_units: u32,
    pub claimed_units: u32,
}
