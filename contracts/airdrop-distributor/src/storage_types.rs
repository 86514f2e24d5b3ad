use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    BoundRegistry,
    Coordinator,
    SubscriptionId,
    NextId,
    Data(u64),
    // campaign id, nft token id -> configured owner
    TokenOwner(u64, u128),
    // campaign id, user -> owned nft token ids
    UserTokens(u64, Address),
    // campaign id -> configured nft token ids in configuration order
    TokenIds(u64),
    // campaign id -> multi-token reward unit ids
    MtIds(u64),
    // campaign id -> fungible reward per owned token id
    AmountPerUnit(u64),
    UnitClaimed(u64, u32),
    UserClaimed(u64, Address),
    // campaign id -> fulfilled random words
    Words(u64),
    // vrf request id -> campaign id
    Request(u64),
    // campaign id -> random assignment cursor
    Cursor(u64),
}
