#![no_std]

mod storage_types;

use soroban_sdk::{
    contract, contracterror, contractimpl, xdr::ToXdr, Address, Bytes, BytesN, Env,
};

use bound_common::ReceiverSetupClient;

use crate::storage_types::DataKey;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
}

/// Production receiver provider. Deploys one executor instance per request
/// from an admin-configured wasm hash and initializes it for the requesting
/// user before handing the address back to the registry.
#[contract]
pub struct FlashclaimDeployerContract;

#[contractimpl]
impl FlashclaimDeployerContract {
    pub fn initialize(e: Env, admin: Address) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        Ok(())
    }

    pub fn set_receiver_wasm(e: Env, wasm_hash: BytesN<32>) -> Result<(), Error> {
        Self::require_admin(&e)?;
        e.storage().instance().set(&DataKey::ReceiverWasm, &wasm_hash);
        Ok(())
    }

    pub fn set_registry(e: Env, registry: Address) -> Result<(), Error> {
        Self::require_admin(&e)?;
        e.storage().instance().set(&DataKey::Registry, &registry);
        Ok(())
    }

    /// Bound-asset registry handed to every provisioned receiver. Receivers
    /// authenticate wrapper callbacks against it.
    pub fn set_bound_registry(e: Env, bound_registry: Address) -> Result<(), Error> {
        Self::require_admin(&e)?;
        e.storage()
            .instance()
            .set(&DataKey::BoundRegistry, &bound_registry);
        Ok(())
    }

    /// Deploys and initializes a receiver for `owner`. Only the wired
    /// registry may call; its own invocation satisfies the auth check.
    pub fn provision(e: Env, owner: Address, version: u32) -> Result<Address, Error> {
        let registry: Address = e
            .storage()
            .instance()
            .get(&DataKey::Registry)
            .ok_or(Error::NotInitialized)?;
        registry.require_auth();
        let wasm_hash: BytesN<32> = e
            .storage()
            .instance()
            .get(&DataKey::ReceiverWasm)
            .ok_or(Error::NotInitialized)?;

        let counter: u64 = e
            .storage()
            .instance()
            .get(&DataKey::Counter)
            .unwrap_or(0);
        e.storage().instance().set(&DataKey::Counter, &(counter + 1));

        // Same owner can be provisioned repeatedly; the counter keeps the
        // derived address unique
        let mut preimage = Bytes::new(&e);
        preimage.append(&owner.clone().to_xdr(&e));
        preimage.append(&counter.to_xdr(&e));
        let salt = e.crypto().sha256(&preimage).to_bytes();

        let receiver = e.deployer().with_current_contract(salt).deploy(wasm_hash);
        Self::wire_receiver(&e, &receiver, &owner, version)?;
        Ok(receiver)
    }

    pub fn admin(e: Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn registry(e: Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Registry)
            .ok_or(Error::NotInitialized)
    }

    pub fn bound_registry(e: Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::BoundRegistry)
            .ok_or(Error::NotInitialized)
    }

    pub fn receiver_wasm(e: Env) -> Result<BytesN<32>, Error> {
        e.storage()
            .instance()
            .get(&DataKey::ReceiverWasm)
            .ok_or(Error::NotInitialized)
    }

    /// Receivers anchor callback trust on the bound-asset registry, not on
    /// the flash-claim registry that calls `provision`.
    fn wire_receiver(
        e: &Env,
        receiver: &Address,
        owner: &Address,
        version: u32,
    ) -> Result<(), Error> {
        let bound_registry: Address = e
            .storage()
            .instance()
            .get(&DataKey::BoundRegistry)
            .ok_or(Error::NotInitialized)?;
        ReceiverSetupClient::new(e, receiver).initialize(owner, &bound_registry, &version);
        Ok(())
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
