#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, xdr::FromXdr, Address, Bytes, Env, String,
    Vec,
};

use bound_common::FlashClaimParams;

mod storage_types;
use storage_types::DataKey;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    AssetAlreadyExists = 3,
}

#[contract]
pub struct BoundRegistryContract;

#[contractimpl]
impl BoundRegistryContract {
    /// Initialize the registry with an admin and the naming prefixes wrapper
    /// deployments derive their metadata from. Only can be called once.
    pub fn initialize(
        e: Env,
        admin: Address,
        name_prefix: String,
        symbol_prefix: String,
    ) -> Result<(), Error> {
        let key = DataKey::Admin;

        if e.storage().instance().has(&key) {
            return Err(Error::AlreadyInitialized);
        }

        e.storage().instance().set(&key, &admin);
        e.storage().instance().set(&DataKey::NamePrefix, &name_prefix);
        e.storage().instance().set(&DataKey::SymbolPrefix, &symbol_prefix);
        Ok(())
    }

    /// Record the wrapper contract for an underlying asset. Only callable by
    /// the admin. Each asset can be bound at most once.
    pub fn register_bound_token(e: Env, asset: Address, bound_token: Address) -> Result<(), Error> {
        Self::require_admin(&e)?;

        let key = DataKey::BoundToken(asset.clone());
        if e.storage().persistent().has(&key) {
            return Err(Error::AssetAlreadyExists);
        }
        e.storage().persistent().set(&key, &bound_token);

        let mut assets: Vec<Address> = e
            .storage()
            .instance()
            .get(&DataKey::Assets)
            .unwrap_or(Vec::new(&e));
        assets.push_back(asset.clone());
        e.storage().instance().set(&DataKey::Assets, &assets);

        e.events()
            .publish((symbol_short!("bind"), asset), bound_token);
        Ok(())
    }

    /// Wrapper registered for `asset`, if any.
    pub fn get_bound_token(e: Env, asset: Address) -> Option<Address> {
        e.storage().persistent().get(&DataKey::BoundToken(asset))
    }

    pub fn all_assets_length(e: Env) -> u32 {
        let assets: Vec<Address> = e
            .storage()
            .instance()
            .get(&DataKey::Assets)
            .unwrap_or(Vec::new(&e));
        assets.len()
    }

    pub fn asset_by_index(e: Env, index: u32) -> Option<Address> {
        let assets: Vec<Address> = e
            .storage()
            .instance()
            .get(&DataKey::Assets)
            .unwrap_or(Vec::new(&e));
        assets.get(index)
    }

    /// Set the delegation registry every wrapper forwards hot-wallet
    /// delegations to. Admin only.
    pub fn set_delegation_registry(e: Env, registry: Address) -> Result<(), Error> {
        Self::require_admin(&e)?;
        e.storage()
            .instance()
            .set(&DataKey::DelegationRegistry, &registry);
        Ok(())
    }

    pub fn delegation_registry(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::DelegationRegistry)
    }

    /// Set the protocol-wide default claim admin. Wrappers fall back to this
    /// when no per-wrapper claim admin is configured. Admin only.
    pub fn set_claim_admin(e: Env, claim_admin: Address) -> Result<(), Error> {
        Self::require_admin(&e)?;
        e.storage().instance().set(&DataKey::ClaimAdmin, &claim_admin);
        Ok(())
    }

    pub fn claim_admin(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::ClaimAdmin)
    }

    pub fn name_prefix(e: Env) -> Option<String> {
        e.storage().instance().get(&DataKey::NamePrefix)
    }

    pub fn symbol_prefix(e: Env) -> Option<String> {
        e.storage().instance().get(&DataKey::SymbolPrefix)
    }

    /// Decode an `encode_flash_loan_params` blob. Bytes that are not valid
    /// XDR abort the call; valid XDR of the wrong shape comes back as
    /// `None`. Receivers invoke this with `try_` so either outcome lands as
    /// their own `InvalidParams`.
    pub fn decode_flash_claim_params(e: Env, params: Bytes) -> Option<FlashClaimParams> {
        FlashClaimParams::from_xdr(&e, &params).ok()
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
}

#[cfg(test)]
mod test;
