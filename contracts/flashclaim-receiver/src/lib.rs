#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, token, xdr::ToXdr, Address, Bytes, Env, Symbol, Val, Vec,
};

use bound_common::{
    invoke_raw, BoundRegistryClient, FlashClaimParams, MultiTokenClient, NonFungibleClient,
    SweepSpec,
};

mod storage_types;
use storage_types::DataKey;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotOwner = 3,
    UntrustedCaller = 4,
    InvalidParams = 5,
}

/// Per-user executor for flash claims. Holds nothing long term: during a
/// flash loan it performs one claim call plus reward sweeps on behalf of
/// its owner, and outside of loans it is a thin owner-gated wallet for
/// whatever rewards ended up parked here.
#[contract]
pub struct FlashclaimReceiverContract;

#[contractimpl]
impl FlashclaimReceiverContract {
    pub fn initialize(
        e: Env,
        owner: Address,
        bound_registry: Address,
        version: u32,
    ) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Owner, &owner);
        e.storage()
            .instance()
            .set(&DataKey::BoundRegistry, &bound_registry);
        e.storage().instance().set(&DataKey::Version, &version);
        Ok(())
    }

    /// Flash-loan callback. Only a wrapper registered for `nft_asset` may
    /// invoke it, and only for a loan initiated by this receiver's owner.
    /// Decodes the instruction blob, performs the claim call and the
    /// reward sweeps, then approves the wrapper to pull every borrowed
    /// token back.
    pub fn execute_operation(
        e: Env,
        nft_asset: Address,
        token_ids: Vec<u128>,
        initiator: Address,
        operator: Address,
        params: Bytes,
    ) -> Result<bool, Error> {
        operator.require_auth();

        let registry: Address = e
            .storage()
            .instance()
            .get(&DataKey::BoundRegistry)
            .ok_or(Error::NotInitialized)?;
        let registry_client = BoundRegistryClient::new(&e, &registry);
        match registry_client.get_bound_token(&nft_asset) {
            Some(bound) if bound == operator => {}
            _ => return Err(Error::UntrustedCaller),
        }

        let owner = Self::read_owner(&e)?;
        if initiator != owner {
            return Err(Error::NotOwner);
        }

        // The registry decodes in its own frame; a malformed blob aborts
        // that call, not this one
        let decoded = match registry_client.try_decode_flash_claim_params(&params) {
            Ok(Ok(Some(decoded))) => decoded,
            _ => return Err(Error::InvalidParams),
        };

        invoke_raw(&e, &decoded.target, &decoded.func, decoded.args);

        let this = e.current_contract_address();
        for sweep in decoded.sweeps.iter() {
            match sweep {
                SweepSpec::Fungible(token_addr) => {
                    let client = token::Client::new(&e, &token_addr);
                    let balance = client.balance(&this);
                    if balance > 0 {
                        client.transfer(&this, &owner, &balance);
                    }
                }
                SweepSpec::NonFungible(token_addr, token_id) => {
                    NonFungibleClient::new(&e, &token_addr).transfer(&this, &owner, &token_id);
                }
                SweepSpec::MultiToken(token_addr, id) => {
                    let client = MultiTokenClient::new(&e, &token_addr);
                    let balance = client.balance_of(&this, &id);
                    if balance > 0 {
                        client.transfer(&this, &owner, &id, &balance);
                    }
                }
            }
        }

        let nft = NonFungibleClient::new(&e, &nft_asset);
        for token_id in token_ids.iter() {
            nft.approve(&this, &operator, &token_id);
        }
        Ok(true)
    }

    /// Build the opaque blob `flash_loan` forwards to this receiver.
    pub fn encode_flash_loan_params(
        e: Env,
        target: Address,
        func: Symbol,
        args: Vec<Val>,
        sweeps: Vec<SweepSpec>,
    ) -> Bytes {
        FlashClaimParams {
            target,
            func,
            args,
            sweeps,
        }
        .to_xdr(&e)
    }

    pub fn approve_fungible(
        e: Env,
        caller: Address,
        token: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        token::Client::new(&e, &token).approve(
            &e.current_contract_address(),
            &spender,
            &amount,
            &expiration_ledger,
        );
        Ok(())
    }

    pub fn approve_non_fungible_all(
        e: Env,
        caller: Address,
        token: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        NonFungibleClient::new(&e, &token).approve_all(
            &e.current_contract_address(),
            &operator,
            &approved,
        );
        Ok(())
    }

    pub fn approve_multi_token_all(
        e: Env,
        caller: Address,
        token: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        MultiTokenClient::new(&e, &token).set_approval_for_all(
            &e.current_contract_address(),
            &operator,
            &approved,
        );
        Ok(())
    }

    /// Move a fungible balance parked here back to the owner.
    pub fn transfer_fungible(
        e: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        token::Client::new(&e, &token).transfer(&e.current_contract_address(), &caller, &amount);
        Ok(())
    }

    pub fn transfer_non_fungible(
        e: Env,
        caller: Address,
        token: Address,
        token_id: u128,
    ) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        NonFungibleClient::new(&e, &token).transfer(
            &e.current_contract_address(),
            &caller,
            &token_id,
        );
        Ok(())
    }

    pub fn transfer_multi_token(
        e: Env,
        caller: Address,
        token: Address,
        id: u128,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        MultiTokenClient::new(&e, &token).transfer(
            &e.current_contract_address(),
            &caller,
            &id,
            &amount,
        );
        Ok(())
    }

    /// Forward an arbitrary call from this receiver's address.
    pub fn call_method(
        e: Env,
        caller: Address,
        target: Address,
        func: Symbol,
        args: Vec<Val>,
    ) -> Result<Val, Error> {
        Self::require_owner(&e, &caller)?;
        Ok(invoke_raw(&e, &target, &func, args))
    }

    pub fn transfer_ownership(e: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        e.storage().instance().set(&DataKey::Owner, &new_owner);
        Ok(())
    }

    pub fn owner(e: Env) -> Result<Address, Error> {
        Self::read_owner(&e)
    }

    pub fn version(e: Env) -> Result<u32, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Version)
            .ok_or(Error::NotInitialized)
    }

    pub fn bound_registry(e: Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::BoundRegistry)
            .ok_or(Error::NotInitialized)
    }

    fn read_owner(e: &Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    fn require_owner(e: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if Self::read_owner(e)? != *caller {
            return Err(Error::NotOwner);
        }
        Ok(())
    }
}
