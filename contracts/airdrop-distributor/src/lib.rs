#![no_std]

mod storage_types;

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, Env, Vec,
};

use bound_common::{
    AirdropData, BoundRegistryClient, Distribution, MultiTokenClient, NonFungibleClient,
    RewardKind, VrfCoordinatorClient,
};

use crate::storage_types::DataKey;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    CampaignNotFound = 3,
    AssetNotRegistered = 4,
    InvalidDistribution = 5,
    LengthMismatch = 6,
    AlreadyConfigured = 7,
    NotRandomDistribution = 8,
    RandomnessPending = 9,
    RandomnessFulfilled = 10,
    UnknownRequest = 11,
    NotCampaignUser = 12,
    AlreadyClaimed = 13,
    WrongRewardKind = 14,
    NothingToClaim = 15,
}

/// Campaign engine that fans wrapper-collected airdrop rewards back out to
/// the owners of the wrapped tokens, either by direct mapping or from
/// oracle randomness.
#[contract]
pub struct AirdropDistributorContract;

#[contractimpl]
impl AirdropDistributorContract {
    pub fn initialize(
        e: Env,
        admin: Address,
        bound_registry: Address,
        vrf_coordinator: Address,
        subscription_id: u64,
    ) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage()
            .instance()
            .set(&DataKey::BoundRegistry, &bound_registry);
        e.storage()
            .instance()
            .set(&DataKey::Coordinator, &vrf_coordinator);
        e.storage()
            .instance()
            .set(&DataKey::SubscriptionId, &subscription_id);
        Ok(())
    }

    /// Opens a campaign for a wrapped collection and returns its id.
    /// Random distribution only makes sense for rewards that come in
    /// discrete units.
    pub fn create_airdrop(
        e: Env,
        nft_asset: Address,
        reward_token: Address,
        reward_kind: RewardKind,
        distribution: Distribution,
    ) -> Result<u64, Error> {
        Self::require_admin(&e)?;
        let registry: Address = e
            .storage()
            .instance()
            .get(&DataKey::BoundRegistry)
            .ok_or(Error::NotInitialized)?;
        if BoundRegistryClient::new(&e, &registry)
            .get_bound_token(&nft_asset)
            .is_none()
        {
            return Err(Error::AssetNotRegistered);
        }
        if distribution == Distribution::Random
            && reward_kind != RewardKind::NonFungible
            && reward_kind != RewardKind::MultiToken
        {
            return Err(Error::InvalidDistribution);
        }

        let id: u64 = e.storage().instance().get(&DataKey::NextId).unwrap_or(1);
        e.storage().instance().set(&DataKey::NextId, &(id + 1));

        let data = AirdropData {
            nft_asset: nft_asset.clone(),
            reward_token,
            reward_kind,
            distribution,
            vrf_request_id: 0,
            randomness_fulfilled: false,
            total_units: 0,
            claimed_units: 0,
        };
        e.storage().persistent().set(&DataKey::Data(id), &data);

        e.events()
            .publish((symbol_short!("created"), id), nft_asset);
        Ok(id)
    }

    /// Records which user owns which wrapped token id for this campaign.
    /// A token id that is already mapped must be cleared first; silently
    /// remapping it would leave two users pointing at one reward unit.
    pub fn configure_nft_user_token_ids(
        e: Env,
        id: u64,
        users: Vec<Address>,
        token_ids: Vec<u128>,
    ) -> Result<(), Error> {
        Self::require_admin(&e)?;
        let mut data = Self::read_data(&e, id)?;
        if users.len() != token_ids.len() {
            return Err(Error::LengthMismatch);
        }

        let mut ordered: Vec<u128> = e
            .storage()
            .persistent()
            .get(&DataKey::TokenIds(id))
            .unwrap_or_else(|| Vec::new(&e));
        for (user, token_id) in users.iter().zip(token_ids.iter()) {
            let owner_key = DataKey::TokenOwner(id, token_id);
            if e.storage().persistent().has(&owner_key) {
                return Err(Error::AlreadyConfigured);
            }
            e.storage().persistent().set(&owner_key, &user);

            let user_key = DataKey::UserTokens(id, user.clone());
            let mut owned: Vec<u128> = e
                .storage()
                .persistent()
                .get(&user_key)
                .unwrap_or_else(|| Vec::new(&e));
            owned.push_back(token_id);
            e.storage().persistent().set(&user_key, &owned);

            ordered.push_back(token_id);
        }
        e.storage().persistent().set(&DataKey::TokenIds(id), &ordered);

        Self::sync_total_units(&e, id, &mut data);
        Ok(())
    }

    /// Drops the campaign's whole owner/token configuration. Claim state
    /// is untouched.
    pub fn clear_nft_user_token_ids(e: Env, id: u64) -> Result<(), Error> {
        Self::require_admin(&e)?;
        let mut data = Self::read_data(&e, id)?;

        let ordered: Vec<u128> = e
            .storage()
            .persistent()
            .get(&DataKey::TokenIds(id))
            .unwrap_or_else(|| Vec::new(&e));
        for token_id in ordered.iter() {
            let owner_key = DataKey::TokenOwner(id, token_id);
            if let Some(user) = e.storage().persistent().get::<_, Address>(&owner_key) {
                e.storage()
                    .persistent()
                    .remove(&DataKey::UserTokens(id, user));
            }
            e.storage().persistent().remove(&owner_key);
        }
        e.storage().persistent().remove(&DataKey::TokenIds(id));

        Self::sync_total_units(&e, id, &mut data);
        Ok(())
    }

    /// Pins the reward unit ids a Random multi-token campaign assigns from.
    pub fn configure_multi_token_ids(e: Env, id: u64, ids: Vec<u128>) -> Result<(), Error> {
        Self::require_admin(&e)?;
        let mut data = Self::read_data(&e, id)?;
        if data.reward_kind != RewardKind::MultiToken {
            return Err(Error::WrongRewardKind);
        }
        e.storage().persistent().set(&DataKey::MtIds(id), &ids);
        Self::sync_total_units(&e, id, &mut data);
        Ok(())
    }

    /// Fungible campaigns pay `amount_per_unit` for every owned token id.
    pub fn configure_fungible_amount(e: Env, id: u64, amount_per_unit: i128) -> Result<(), Error> {
        Self::require_admin(&e)?;
        let data = Self::read_data(&e, id)?;
        if data.reward_kind != RewardKind::Fungible {
            return Err(Error::WrongRewardKind);
        }
        e.storage()
            .persistent()
            .set(&DataKey::AmountPerUnit(id), &amount_per_unit);
        Ok(())
    }

    /// Asks the oracle for randomness. Re-requesting while a request is
    /// pending supersedes it; the stale request id stops resolving. Once
    /// words have landed they are final, so unit assignment stays
    /// deterministic.
    pub fn request_vrf_random_words(e: Env, id: u64) -> Result<u64, Error> {
        Self::require_admin(&e)?;
        let mut data = Self::read_data(&e, id)?;
        if data.distribution != Distribution::Random {
            return Err(Error::NotRandomDistribution);
        }
        if data.randomness_fulfilled {
            return Err(Error::RandomnessFulfilled);
        }

        let coordinator: Address = e
            .storage()
            .instance()
            .get(&DataKey::Coordinator)
            .ok_or(Error::NotInitialized)?;
        let subscription_id: u64 = e
            .storage()
            .instance()
            .get(&DataKey::SubscriptionId)
            .ok_or(Error::NotInitialized)?;

        if data.vrf_request_id != 0 {
            e.storage()
                .persistent()
                .remove(&DataKey::Request(data.vrf_request_id));
        }

        let this = e.current_contract_address();
        let request_id = VrfCoordinatorClient::new(&e, &coordinator)
            .request_random_words(&this, &subscription_id);
        data.vrf_request_id = request_id;
        e.storage().persistent().set(&DataKey::Request(request_id), &id);
        e.storage().persistent().set(&DataKey::Data(id), &data);

        e.events().publish((symbol_short!("vrf_req"), id), request_id);
        Ok(request_id)
    }

    /// Oracle callback. Unknown request ids are rejected; a repeat delivery
    /// for an already-fulfilled campaign is a no-op so oracle retries stay
    /// harmless. The first delivered words win.
    pub fn fulfill_random_words(e: Env, request_id: u64, words: Vec<u64>) -> Result<(), Error> {
        let coordinator: Address = e
            .storage()
            .instance()
            .get(&DataKey::Coordinator)
            .ok_or(Error::NotInitialized)?;
        coordinator.require_auth();

        let id: u64 = e
            .storage()
            .persistent()
            .get(&DataKey::Request(request_id))
            .ok_or(Error::UnknownRequest)?;
        let mut data = Self::read_data(&e, id)?;
        if data.randomness_fulfilled {
            return Ok(());
        }

        e.storage().persistent().set(&DataKey::Words(id), &words);
        data.randomness_fulfilled = true;
        e.storage().persistent().set(&DataKey::Data(id), &data);

        e.events().publish((symbol_short!("vrf_done"), id), request_id);
        Ok(())
    }

    /// Pays out a non-fungible campaign to one user. Fixed campaigns hand
    /// over the reward ids mirroring the user's own token ids; Random
    /// campaigns assign ids from the fulfilled randomness.
    pub fn claim_non_fungible(e: Env, id: u64, user: Address) -> Result<(), Error> {
        user.require_auth();
        let (mut data, tokens) = Self::prepare_claim(&e, id, &user)?;
        if data.reward_kind != RewardKind::NonFungible {
            return Err(Error::WrongRewardKind);
        }

        let reward = NonFungibleClient::new(&e, &data.reward_token);
        let this = e.current_contract_address();
        let units = Self::read_unit_list(&e, id, &data);
        match data.distribution {
            Distribution::Fixed => {
                for token_id in tokens.iter() {
                    if let Some(index) = units.first_index_of(token_id) {
                        e.storage()
                            .persistent()
                            .set(&DataKey::UnitClaimed(id, index), &true);
                    }
                    reward.transfer(&this, &user, &token_id);
                }
            }
            Distribution::Random => {
                let seed = Self::read_seed(&e, id);
                for _ in 0..tokens.len() {
                    let index = Self::assign_unit(&e, id, seed, units.len())?;
                    let unit_id = units.get(index).ok_or(Error::NothingToClaim)?;
                    reward.transfer(&this, &user, &unit_id);
                }
            }
        }

        Self::finish_claim(&e, id, &user, &mut data, tokens.len());
        Ok(())
    }

    /// Pays out a multi-token campaign to one user, one unit of balance per
    /// owed reward unit.
    pub fn claim_multi_token(e: Env, id: u64, user: Address) -> Result<(), Error> {
        user.require_auth();
        let (mut data, tokens) = Self::prepare_claim(&e, id, &user)?;
        if data.reward_kind != RewardKind::MultiToken {
            return Err(Error::WrongRewardKind);
        }

        let reward = MultiTokenClient::new(&e, &data.reward_token);
        let this = e.current_contract_address();
        let units = Self::read_unit_list(&e, id, &data);
        match data.distribution {
            Distribution::Fixed => {
                for token_id in tokens.iter() {
                    if let Some(index) = units.first_index_of(token_id) {
                        e.storage()
                            .persistent()
                            .set(&DataKey::UnitClaimed(id, index), &true);
                    }
                    reward.transfer(&this, &user, &token_id, &1);
                }
            }
            Distribution::Random => {
                let seed = Self::read_seed(&e, id);
                for _ in 0..tokens.len() {
                    let index = Self::assign_unit(&e, id, seed, units.len())?;
                    let unit_id = units.get(index).ok_or(Error::NothingToClaim)?;
                    reward.transfer(&this, &user, &unit_id, &1);
                }
            }
        }

        Self::finish_claim(&e, id, &user, &mut data, tokens.len());
        Ok(())
    }

    /// Pays out a fungible campaign: the configured amount per owned token
    /// id, in one transfer.
    pub fn claim_fungible(e: Env, id: u64, user: Address) -> Result<(), Error> {
        user.require_auth();
        let (mut data, tokens) = Self::prepare_claim(&e, id, &user)?;
        if data.reward_kind != RewardKind::Fungible {
            return Err(Error::WrongRewardKind);
        }

        let amount_per_unit: i128 = e
            .storage()
            .persistent()
            .get(&DataKey::AmountPerUnit(id))
            .unwrap_or(0);
        if amount_per_unit == 0 {
            return Err(Error::NothingToClaim);
        }

        let owed = amount_per_unit * tokens.len() as i128;
        let this = e.current_contract_address();
        token::Client::new(&e, &data.reward_token).transfer(&this, &user, &owed);

        Self::finish_claim(&e, id, &user, &mut data, tokens.len());
        Ok(())
    }

    pub fn airdrop_data(e: Env, id: u64) -> Result<AirdropData, Error> {
        Self::read_data(&e, id)
    }

    pub fn next_airdrop_id(e: Env) -> u64 {
        e.storage().instance().get(&DataKey::NextId).unwrap_or(1)
    }

    pub fn get_user_token_ids(e: Env, id: u64, user: Address) -> Vec<u128> {
        e.storage()
            .persistent()
            .get(&DataKey::UserTokens(id, user))
            .unwrap_or_else(|| Vec::new(&e))
    }

    pub fn claimed_unit(e: Env, id: u64, index: u32) -> bool {
        e.storage()
            .persistent()
            .get(&DataKey::UnitClaimed(id, index))
            .unwrap_or(false)
    }

    pub fn admin(e: Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn require_admin(e: &Env) -> Result<(), Error> {
        let admin: Address = e
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Ok(())
    }

    fn read_data(e: &Env, id: u64) -> Result<AirdropData, Error> {
        e.storage()
            .persistent()
            .get(&DataKey::Data(id))
            .ok_or(Error::CampaignNotFound)
    }

    fn prepare_claim(e: &Env, id: u64, user: &Address) -> Result<(AirdropData, Vec<u128>), Error> {
        let data = Self::read_data(e, id)?;
        let claimed: bool = e
            .storage()
            .persistent()
            .get(&DataKey::UserClaimed(id, user.clone()))
            .unwrap_or(false);
        if claimed {
            return Err(Error::AlreadyClaimed);
        }
        let tokens: Vec<u128> = e
            .storage()
            .persistent()
            .get(&DataKey::UserTokens(id, user.clone()))
            .unwrap_or_else(|| Vec::new(e));
        if tokens.is_empty() {
            return Err(Error::NotCampaignUser);
        }
        if data.distribution == Distribution::Random && !data.randomness_fulfilled {
            return Err(Error::RandomnessPending);
        }
        Ok((data, tokens))
    }

    /// Marks the next reward unit claimed and returns its index. Starts at
    /// `(word + cursor) mod total` and scans circularly for the first
    /// unclaimed unit, so the assignment depends only on the randomness,
    /// the unit list and the claim order.
    fn assign_unit(e: &Env, id: u64, seed: u64, total_units: u32) -> Result<u32, Error> {
        if total_units == 0 {
            return Err(Error::NothingToClaim);
        }
        let cursor: u64 = e
            .storage()
            .persistent()
            .get(&DataKey::Cursor(id))
            .unwrap_or(0);
        let start = (seed.wrapping_add(cursor) % total_units as u64) as u32;
        for step in 0..total_units {
            let index = (start + step) % total_units;
            let key = DataKey::UnitClaimed(id, index);
            let claimed: bool = e.storage().persistent().get(&key).unwrap_or(false);
            if !claimed {
                e.storage().persistent().set(&key, &true);
                e.storage().persistent().set(&DataKey::Cursor(id), &(cursor + 1));
                return Ok(index);
            }
        }
        Err(Error::NothingToClaim)
    }

    fn finish_claim(e: &Env, id: u64, user: &Address, data: &mut AirdropData, paid_units: u32) {
        e.storage()
            .persistent()
            .set(&DataKey::UserClaimed(id, user.clone()), &true);
        data.claimed_units += paid_units;
        e.storage().persistent().set(&DataKey::Data(id), data);
        e.events()
            .publish((symbol_short!("claimed"), id, user.clone()), paid_units);
    }

    // Fixed campaigns mirror the configured token ids; only a Random
    // multi-token campaign draws from its own unit id list.
    fn read_unit_list(e: &Env, id: u64, data: &AirdropData) -> Vec<u128> {
        let key = if data.reward_kind == RewardKind::MultiToken
            && data.distribution == Distribution::Random
        {
            DataKey::MtIds(id)
        } else {
            DataKey::TokenIds(id)
        };
        e.storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| Vec::new(e))
    }

    fn read_seed(e: &Env, id: u64) -> u64 {
        let words: Vec<u64> = e
            .storage()
            .persistent()
            .get(&DataKey::Words(id))
            .unwrap_or_else(|| Vec::new(e));
        words.first().unwrap_or(0)
    }

    fn sync_total_units(e: &Env, id: u64, data: &mut AirdropData) {
        data.total_units = Self::read_unit_list(e, id, data).len();
        e.storage().persistent().set(&DataKey::Data(id), data);
    }
}
