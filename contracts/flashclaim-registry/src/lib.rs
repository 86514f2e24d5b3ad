#![no_std]

mod storage_types;

use soroban_sdk::{contract, contracterror, contractimpl, symbol_short, Address, Env, Vec};

use bound_common::{FlashclaimRegistryClient, ReceiverProviderClient, ReceiverRecord};

use crate::storage_types::DataKey;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    AlreadyHasReceiver = 3,
}

/// Per-user receiver factory. Every protocol version runs its own registry;
/// each instance chains to its predecessor so older receivers stay
/// discoverable after an upgrade.
#[contract]
pub struct FlashclaimRegistryContract;

#[contractimpl]
impl FlashclaimRegistryContract {
    /// `provider` answers `provision(owner, version)` with a fresh receiver
    /// address. `previous` links the registry this one supersedes.
    pub fn initialize(
        e: Env,
        provider: Address,
        version: u32,
        previous: Option<Address>,
    ) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Provider) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Provider, &provider);
        e.storage().instance().set(&DataKey::Version, &version);
        if let Some(previous) = previous {
            e.storage().instance().set(&DataKey::Previous, &previous);
        }
        Ok(())
    }

    /// Provisions the caller's first receiver at this registry's version.
    /// A receiver anywhere in the chain counts as already existing.
    pub fn create_receiver(e: Env, user: Address) -> Result<Address, Error> {
        user.require_auth();
        if Self::latest_record(&e, &user).is_some() {
            return Err(Error::AlreadyHasReceiver);
        }
        let version = Self::read_version(&e)?;
        Self::provision_and_record(&e, &user, version, false)
    }

    /// Provisions a new receiver no matter what the caller already has.
    /// The new record's version always exceeds every earlier one.
    pub fn force_create_receiver(e: Env, user: Address) -> Result<Address, Error> {
        user.require_auth();
        let base = Self::read_version(&e)?;
        let version = match Self::latest_record(&e, &user) {
            Some(latest) if latest.version >= base => latest.version + 1,
            _ => base,
        };
        Self::provision_and_record(&e, &user, version, true)
    }

    pub fn get_user_receiver(e: Env, user: Address) -> Option<Address> {
        Self::latest_record(&e, &user).map(|record| record.receiver)
    }

    pub fn get_user_receiver_latest_version(e: Env, user: Address) -> Option<ReceiverRecord> {
        Self::latest_record(&e, &user)
    }

    /// Full history, newest first: this registry's records, then the chain's.
    pub fn get_user_receiver_all_versions(e: Env, user: Address) -> Vec<ReceiverRecord> {
        let mut records = Self::local_records(&e, &user);
        if let Some(previous) = Self::read_previous(&e) {
            let chained =
                FlashclaimRegistryClient::new(&e, &previous).get_user_receiver_all_versions(&user);
            for record in chained.iter() {
                records.push_back(record);
            }
        }
        records
    }

    pub fn version(e: Env) -> Result<u32, Error> {
        Self::read_version(&e)
    }

    pub fn provider(e: Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Provider)
            .ok_or(Error::NotInitialized)
    }

    pub fn previous_registry(e: Env) -> Option<Address> {
        Self::read_previous(&e)
    }

    fn provision_and_record(
        e: &Env,
        user: &Address,
        version: u32,
        forced: bool,
    ) -> Result<Address, Error> {
        let provider: Address = e
            .storage()
            .instance()
            .get(&DataKey::Provider)
            .ok_or(Error::NotInitialized)?;
        let receiver = ReceiverProviderClient::new(e, &provider).provision(user, &version);

        let key = DataKey::Receivers(user.clone());
        let mut records: Vec<ReceiverRecord> = e
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| Vec::new(e));
        records.push_front(ReceiverRecord {
            version,
            receiver: receiver.clone(),
        });
        e.storage().persistent().set(&key, &records);

        e.events().publish(
            (symbol_short!("created"), user.clone()),
            (receiver.clone(), version, forced),
        );
        Ok(receiver)
    }

    fn latest_record(e: &Env, user: &Address) -> Option<ReceiverRecord> {
        if let Some(record) = Self::local_records(e, user).first() {
            return Some(record);
        }
        match Self::read_previous(e) {
            Some(previous) => FlashclaimRegistryClient::new(e, &previous)
                .get_user_receiver_latest_version(user),
            None => None,
        }
    }

    fn local_records(e: &Env, user: &Address) -> Vec<ReceiverRecord> {
        e.storage()
            .persistent()
            .get(&DataKey::Receivers(user.clone()))
            .unwrap_or_else(|| Vec::new(e))
    }

    fn read_version(e: &Env) -> Result<u32, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Version)
            .ok_or(Error::NotInitialized)
    }

    fn read_previous(e: &Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::Previous)
    }
}
