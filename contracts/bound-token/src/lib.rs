#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, Bytes, Env, String,
    Symbol, Val, Vec,
};

use bound_common::{
    invoke_raw, BoundRegistryClient, DelegationRegistryClient, FlashLoanReceiverClient,
    LoanGuardClient, MultiTokenClient, NonFungibleClient, TokenInterceptorClient,
};

mod storage_types;
use storage_types::{DataKey, MAX_INTERCEPTORS};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotOwner = 3,
    NotAuthorizedMinter = 4,
    TokenAlreadyWrapped = 5,
    NonexistentToken = 6,
    NotMinter = 7,
    NotTokenOwner = 8,
    EmptyTokenList = 9,
    AlreadyLocked = 10,
    FlashLoanLocked = 11,
    ExecutionFailed = 12,
    NotClaimAdmin = 13,
    CannotClaimUnderlying = 14,
    CannotClaimSelf = 15,
    InterceptorRejected = 16,
    TooManyInterceptors = 17,
    DelegateMismatch = 18,
    LengthMismatch = 19,
    CustodyNotRestored = 20,
}

/// Non-transferable wrapper over one underlying collection. Custody of the
/// underlying moves only through `mint`/`burn` by an authorized minting
/// contract and through the atomic `flash_loan` round trip; there is no
/// transfer or approval surface for the bound token itself.
#[contract]
pub struct BoundTokenContract;

#[contractimpl]
impl BoundTokenContract {
    /// Bind this wrapper to an underlying collection. Only can be called once.
    pub fn initialize(
        e: Env,
        underlying: Address,
        registry: Address,
        name: String,
        symbol: String,
        owner: Address,
    ) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Underlying) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Underlying, &underlying);
        e.storage().instance().set(&DataKey::Registry, &registry);
        e.storage().instance().set(&DataKey::Name, &name);
        e.storage().instance().set(&DataKey::Symbol, &symbol);
        e.storage().instance().set(&DataKey::Owner, &owner);
        Ok(())
    }

    /// Grant or revoke mint/burn rights for minting contracts. Owner only.
    pub fn set_authorized_minters(
        e: Env,
        caller: Address,
        minters: Vec<Address>,
        grant: bool,
    ) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        for minter in minters.iter() {
            let key = DataKey::AuthorizedMinter(minter);
            if grant {
                e.storage().persistent().set(&key, &true);
            } else {
                e.storage().persistent().remove(&key);
            }
        }
        Ok(())
    }

    pub fn is_authorized_minter(e: Env, minter: Address) -> bool {
        e.storage()
            .persistent()
            .get(&DataKey::AuthorizedMinter(minter))
            .unwrap_or(false)
    }

    /// Grant or revoke the right to flash-loan token ids the caller does
    /// not own. Owner only.
    pub fn set_authorized_flashloan_callers(
        e: Env,
        caller: Address,
        callers: Vec<Address>,
        grant: bool,
    ) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        for c in callers.iter() {
            let key = DataKey::AuthorizedCaller(c);
            if grant {
                e.storage().persistent().set(&key, &true);
            } else {
                e.storage().persistent().remove(&key);
            }
        }
        Ok(())
    }

    pub fn is_authorized_flashloan_caller(e: Env, caller: Address) -> bool {
        e.storage()
            .persistent()
            .get(&DataKey::AuthorizedCaller(caller))
            .unwrap_or(false)
    }

    /// Wrap `token_id` for `to`. The minter must have been granted mint
    /// rights and must have approved this contract on the underlying
    /// collection; the underlying token is pulled from the minter.
    pub fn mint(e: Env, minter: Address, to: Address, token_id: u128) -> Result<(), Error> {
        minter.require_auth();
        let underlying = Self::read_underlying(&e)?;

        if !Self::is_authorized_minter(e.clone(), minter.clone()) {
            return Err(Error::NotAuthorizedMinter);
        }
        if e.storage()
            .persistent()
            .has(&DataKey::TokenOwner(token_id))
        {
            return Err(Error::TokenAlreadyWrapped);
        }
        if Self::is_locked(&e) {
            return Err(Error::AlreadyLocked);
        }

        Self::run_interceptors(&e, &minter, &underlying, token_id, true)?;

        let this = e.current_contract_address();
        NonFungibleClient::new(&e, &underlying).transfer_from(&this, &minter, &this, &token_id);

        e.storage()
            .persistent()
            .set(&DataKey::TokenOwner(token_id), &to);
        e.storage()
            .persistent()
            .set(&DataKey::TokenMinter(token_id), &minter);
        Self::write_balance(&e, &to, Self::read_balance(&e, &to) + 1);
        let supply: u32 = e
            .storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0);
        e.storage().instance().set(&DataKey::TotalSupply, &(supply + 1));

        e.events()
            .publish((symbol_short!("mint"), minter, to), token_id);
        Ok(())
    }

    /// Unwrap `token_id`, returning the underlying to the recorded minter.
    /// Only the minter of record may burn. Clears the token's delegation
    /// and interceptor state.
    pub fn burn(e: Env, minter: Address, token_id: u128) -> Result<(), Error> {
        minter.require_auth();
        let underlying = Self::read_underlying(&e)?;

        let owner: Address = e
            .storage()
            .persistent()
            .get(&DataKey::TokenOwner(token_id))
            .ok_or(Error::NonexistentToken)?;
        let recorded: Address = e
            .storage()
            .persistent()
            .get(&DataKey::TokenMinter(token_id))
            .ok_or(Error::NonexistentToken)?;
        if recorded != minter {
            return Err(Error::NotMinter);
        }
        if Self::is_locked(&e) {
            return Err(Error::AlreadyLocked);
        }

        Self::run_interceptors(&e, &minter, &underlying, token_id, false)?;

        let this = e.current_contract_address();
        NonFungibleClient::new(&e, &underlying).transfer(&this, &minter, &token_id);

        Self::clear_delegates(&e, &underlying, token_id);
        Self::clear_interceptors(&e, token_id);

        e.storage().persistent().remove(&DataKey::TokenOwner(token_id));
        e.storage()
            .persistent()
            .remove(&DataKey::TokenMinter(token_id));
        Self::write_balance(&e, &owner, Self::read_balance(&e, &owner) - 1);
        let supply: u32 = e
            .storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0);
        e.storage().instance().set(&DataKey::TotalSupply, &(supply - 1));

        e.events().publish((symbol_short!("burn"), minter), token_id);
        Ok(())
    }

    /// Lend the underlying tokens to `receiver` for the duration of this
    /// call. The receiver's callback must signal success and approve this
    /// contract to pull every token back; any failure unwinds the whole
    /// operation.
    pub fn flash_loan(
        e: Env,
        caller: Address,
        receiver: Address,
        token_ids: Vec<u128>,
        params: Bytes,
    ) -> Result<(), Error> {
        caller.require_auth();
        let underlying = Self::read_underlying(&e)?;

        if token_ids.is_empty() {
            return Err(Error::EmptyTokenList);
        }
        if Self::is_locked(&e) {
            return Err(Error::AlreadyLocked);
        }

        let authorized = Self::is_authorized_flashloan_caller(e.clone(), caller.clone());
        for token_id in token_ids.iter() {
            let owner: Address = e
                .storage()
                .persistent()
                .get(&DataKey::TokenOwner(token_id))
                .ok_or(Error::NonexistentToken)?;
            if !authorized && owner != caller {
                return Err(Error::NotTokenOwner);
            }
        }

        if let Some(guard) = e
            .storage()
            .instance()
            .get::<_, Address>(&DataKey::LoanGuard)
        {
            let guard = LoanGuardClient::new(&e, &guard);
            for token_id in token_ids.iter() {
                if guard.is_flash_loan_locked(&underlying, &token_id) {
                    return Err(Error::FlashLoanLocked);
                }
            }
        }

        e.storage().instance().set(&DataKey::Locked, &true);

        let this = e.current_contract_address();
        let nft = NonFungibleClient::new(&e, &underlying);
        for token_id in token_ids.iter() {
            nft.transfer(&this, &receiver, &token_id);
        }

        let ok = FlashLoanReceiverClient::new(&e, &receiver).execute_operation(
            &underlying,
            &token_ids,
            &caller,
            &this,
            &params,
        );
        if !ok {
            return Err(Error::ExecutionFailed);
        }

        // Pull everything back; a withheld approval surfaces the
        // collection's own error here and unwinds the call.
        for token_id in token_ids.iter() {
            nft.transfer_from(&this, &receiver, &this, &token_id);
        }
        for token_id in token_ids.iter() {
            if nft.owner_of(&token_id) != this {
                return Err(Error::CustodyNotRestored);
            }
        }

        e.storage().instance().set(&DataKey::Locked, &false);

        e.events()
            .publish((symbol_short!("flashloan"), caller, receiver), token_ids);
        Ok(())
    }

    /// Set the claim admin for reward extraction. Owner only. When unset,
    /// the protocol-wide claim admin from the registry applies.
    pub fn set_claim_admin(e: Env, caller: Address, claim_admin: Address) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        e.storage().instance().set(&DataKey::ClaimAdmin, &claim_admin);
        Ok(())
    }

    pub fn claim_admin(e: Env) -> Option<Address> {
        Self::resolve_claim_admin(&e)
    }

    /// Move a fungible reward balance held by this wrapper out to `to`.
    /// Claim admin only; the underlying collection and the wrapper itself
    /// are never claimable.
    pub fn claim_fungible_airdrop(
        e: Env,
        caller: Address,
        airdrop_token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_claim_admin(&e, &caller)?;
        Self::require_claimable(&e, &airdrop_token)?;

        let this = e.current_contract_address();
        token::Client::new(&e, &airdrop_token).transfer(&this, &to, &amount);

        e.events()
            .publish((symbol_short!("claim"), caller, airdrop_token), amount);
        Ok(())
    }

    /// Move non-fungible rewards held by this wrapper out to `to`.
    pub fn claim_non_fungible_airdrop(
        e: Env,
        caller: Address,
        airdrop_token: Address,
        to: Address,
        token_ids: Vec<u128>,
    ) -> Result<(), Error> {
        Self::require_claim_admin(&e, &caller)?;
        Self::require_claimable(&e, &airdrop_token)?;

        let this = e.current_contract_address();
        let nft = NonFungibleClient::new(&e, &airdrop_token);
        for token_id in token_ids.iter() {
            nft.transfer(&this, &to, &token_id);
        }

        e.events()
            .publish((symbol_short!("claim"), caller, airdrop_token), token_ids);
        Ok(())
    }

    /// Move multi-token reward balances held by this wrapper out to `to`.
    pub fn claim_multi_token_airdrop(
        e: Env,
        caller: Address,
        airdrop_token: Address,
        to: Address,
        ids: Vec<u128>,
        amounts: Vec<i128>,
    ) -> Result<(), Error> {
        Self::require_claim_admin(&e, &caller)?;
        Self::require_claimable(&e, &airdrop_token)?;
        if ids.len() != amounts.len() {
            return Err(Error::LengthMismatch);
        }

        let this = e.current_contract_address();
        let mt = MultiTokenClient::new(&e, &airdrop_token);
        for (id, amount) in ids.iter().zip(amounts.iter()) {
            mt.transfer(&this, &to, &id, &amount);
        }

        e.events()
            .publish((symbol_short!("claim"), caller, airdrop_token), (ids, amounts));
        Ok(())
    }

    /// Forward an arbitrary call to a reward contract on behalf of the
    /// claim admin, e.g. to trigger a third-party claim entry point.
    pub fn execute_airdrop(
        e: Env,
        caller: Address,
        target: Address,
        func: Symbol,
        args: Vec<Val>,
    ) -> Result<Val, Error> {
        Self::require_claim_admin(&e, &caller)?;
        Self::require_claimable(&e, &target)?;

        let result = invoke_raw(&e, &target, &func, args);

        e.events()
            .publish((symbol_short!("exec"), caller, target), func);
        Ok(result)
    }

    /// Grant or revoke hot-wallet delegation for token ids the caller
    /// owns, forwarded to the protocol delegation registry when one is
    /// configured. Several delegates may coexist per token id.
    pub fn set_delegate_for_token(
        e: Env,
        caller: Address,
        delegate: Address,
        token_ids: Vec<u128>,
        value: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        let underlying = Self::read_underlying(&e)?;
        let delegation = Self::delegation_registry(&e);

        for token_id in token_ids.iter() {
            let owner: Address = e
                .storage()
                .persistent()
                .get(&DataKey::TokenOwner(token_id))
                .ok_or(Error::NonexistentToken)?;
            if owner != caller {
                return Err(Error::NotTokenOwner);
            }

            let key = DataKey::Delegates(token_id);
            let mut delegates: Vec<Address> = e
                .storage()
                .persistent()
                .get(&key)
                .unwrap_or(Vec::new(&e));
            if value {
                if !delegates.contains(&delegate) {
                    delegates.push_back(delegate.clone());
                }
                e.storage().persistent().set(&key, &delegates);
            } else {
                let index = delegates
                    .first_index_of(&delegate)
                    .ok_or(Error::DelegateMismatch)?;
                delegates.remove(index);
                if delegates.is_empty() {
                    e.storage().persistent().remove(&key);
                } else {
                    e.storage().persistent().set(&key, &delegates);
                }
            }

            if let Some(registry) = &delegation {
                DelegationRegistryClient::new(&e, registry).set_delegate_for_token(
                    &e.current_contract_address(),
                    &delegate,
                    &underlying,
                    &token_id,
                    &value,
                );
            }
        }
        Ok(())
    }

    pub fn get_delegates(e: Env, token_id: u128) -> Vec<Address> {
        e.storage()
            .persistent()
            .get(&DataKey::Delegates(token_id))
            .unwrap_or(Vec::new(&e))
    }

    /// Register an interceptor under the calling minter's key. Interceptors
    /// run in registration order before that minter's mint/burn.
    pub fn add_token_interceptor(
        e: Env,
        minter: Address,
        token_id: u128,
        interceptor: Address,
    ) -> Result<(), Error> {
        minter.require_auth();

        let key = DataKey::Interceptors(minter.clone(), token_id);
        let mut interceptors: Vec<Address> = e
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or(Vec::new(&e));
        if interceptors.contains(&interceptor) {
            return Ok(());
        }
        if interceptors.len() >= MAX_INTERCEPTORS {
            return Err(Error::TooManyInterceptors);
        }
        interceptors.push_back(interceptor);
        e.storage().persistent().set(&key, &interceptors);

        let index_key = DataKey::InterceptorMinters(token_id);
        let mut minters: Vec<Address> = e
            .storage()
            .persistent()
            .get(&index_key)
            .unwrap_or(Vec::new(&e));
        if !minters.contains(&minter) {
            minters.push_back(minter);
            e.storage().persistent().set(&index_key, &minters);
        }
        Ok(())
    }

    /// Remove one interceptor from the calling minter's list. Removing an
    /// unregistered interceptor is a no-op.
    pub fn delete_token_interceptor(
        e: Env,
        minter: Address,
        token_id: u128,
        interceptor: Address,
    ) -> Result<(), Error> {
        minter.require_auth();

        let key = DataKey::Interceptors(minter.clone(), token_id);
        let mut interceptors: Vec<Address> = e
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or(Vec::new(&e));
        if let Some(index) = interceptors.first_index_of(&interceptor) {
            interceptors.remove(index);
            if interceptors.is_empty() {
                e.storage().persistent().remove(&key);
                let index_key = DataKey::InterceptorMinters(token_id);
                let mut minters: Vec<Address> = e
                    .storage()
                    .persistent()
                    .get(&index_key)
                    .unwrap_or(Vec::new(&e));
                if let Some(minter_index) = minters.first_index_of(&minter) {
                    minters.remove(minter_index);
                }
                if minters.is_empty() {
                    e.storage().persistent().remove(&index_key);
                } else {
                    e.storage().persistent().set(&index_key, &minters);
                }
            } else {
                e.storage().persistent().set(&key, &interceptors);
            }
        }
        Ok(())
    }

    pub fn get_token_interceptors(e: Env, minter: Address, token_id: u128) -> Vec<Address> {
        e.storage()
            .persistent()
            .get(&DataKey::Interceptors(minter, token_id))
            .unwrap_or(Vec::new(&e))
    }

    pub fn set_loan_guard(e: Env, caller: Address, guard: Address) -> Result<(), Error> {
        Self::require_owner(&e, &caller)?;
        e.storage().instance().set(&DataKey::LoanGuard, &guard);
        Ok(())
    }

    pub fn loan_guard(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::LoanGuard)
    }

    pub fn owner_of(e: Env, token_id: u128) -> Result<Address, Error> {
        e.storage()
            .persistent()
            .get(&DataKey::TokenOwner(token_id))
            .ok_or(Error::NonexistentToken)
    }

    pub fn minter_of(e: Env, token_id: u128) -> Result<Address, Error> {
        e.storage()
            .persistent()
            .get(&DataKey::TokenMinter(token_id))
            .ok_or(Error::NonexistentToken)
    }

    pub fn balance_of(e: Env, owner: Address) -> u32 {
        Self::read_balance(&e, &owner)
    }

    pub fn total_supply(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn underlying(e: Env) -> Result<Address, Error> {
        Self::read_underlying(&e)
    }

    pub fn name(e: Env) -> Result<String, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Name)
            .ok_or(Error::NotInitialized)
    }

    pub fn symbol(e: Env) -> Result<String, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Symbol)
            .ok_or(Error::NotInitialized)
    }

    pub fn locked(e: Env) -> bool {
        Self::is_locked(&e)
    }

    fn read_underlying(e: &Env) -> Result<Address, Error> {
        e.storage()
            .instance()
            .get(&DataKey::Underlying)
            .ok_or(Error::NotInitialized)
    }

    fn require_owner(e: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        let owner: Address = e
            .storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)?;
        if owner != *caller {
            return Err(Error::NotOwner);
        }
        Ok(())
    }

    fn require_claim_admin(e: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        match Self::resolve_claim_admin(e) {
            Some(admin) if admin == *caller => Ok(()),
            _ => Err(Error::NotClaimAdmin),
        }
    }

    fn resolve_claim_admin(e: &Env) -> Option<Address> {
        if let Some(admin) = e.storage().instance().get(&DataKey::ClaimAdmin) {
            return Some(admin);
        }
        let registry: Address = e.storage().instance().get(&DataKey::Registry)?;
        BoundRegistryClient::new(e, &registry).claim_admin()
    }

    fn require_claimable(e: &Env, target: &Address) -> Result<(), Error> {
        if *target == Self::read_underlying(e)? {
            return Err(Error::CannotClaimUnderlying);
        }
        if *target == e.current_contract_address() {
            return Err(Error::CannotClaimSelf);
        }
        Ok(())
    }

    fn delegation_registry(e: &Env) -> Option<Address> {
        let registry: Address = e.storage().instance().get(&DataKey::Registry)?;
        BoundRegistryClient::new(e, &registry).delegation_registry()
    }

    fn run_interceptors(
        e: &Env,
        minter: &Address,
        underlying: &Address,
        token_id: u128,
        minting: bool,
    ) -> Result<(), Error> {
        let interceptors: Vec<Address> = e
            .storage()
            .persistent()
            .get(&DataKey::Interceptors(minter.clone(), token_id))
            .unwrap_or(Vec::new(e));
        for interceptor in interceptors.iter() {
            let hook = TokenInterceptorClient::new(e, &interceptor);
            let ok = if minting {
                hook.pre_handle_mint(underlying, &token_id)
            } else {
                hook.pre_handle_burn(underlying, &token_id)
            };
            if !ok {
                return Err(Error::InterceptorRejected);
            }
        }
        Ok(())
    }

    fn clear_delegates(e: &Env, underlying: &Address, token_id: u128) {
        let key = DataKey::Delegates(token_id);
        let delegates: Vec<Address> = e
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or(Vec::new(e));
        if delegates.is_empty() {
            return;
        }
        if let Some(registry) = Self::delegation_registry(e) {
            let client = DelegationRegistryClient::new(e, &registry);
            let this = e.current_contract_address();
            for delegate in delegates.iter() {
                client.set_delegate_for_token(&this, &delegate, underlying, &token_id, &false);
            }
        }
        e.storage().persistent().remove(&key);
    }

    fn clear_interceptors(e: &Env, token_id: u128) {
        let index_key = DataKey::InterceptorMinters(token_id);
        let minters: Vec<Address> = e
            .storage()
            .persistent()
            .get(&index_key)
            .unwrap_or(Vec::new(e));
        for minter in minters.iter() {
            e.storage()
                .persistent()
                .remove(&DataKey::Interceptors(minter, token_id));
        }
        e.storage().persistent().remove(&index_key);
    }

    fn is_locked(e: &Env) -> bool {
        e.storage().instance().get(&DataKey::Locked).unwrap_or(false)
    }

    fn read_balance(e: &Env, owner: &Address) -> u32 {
        e.storage()
            .persistent()
            .get(&DataKey::Balance(owner.clone()))
            .unwrap_or(0)
    }

    fn write_balance(e: &Env, owner: &Address, balance: u32) {
        if balance == 0 {
            e.storage()
                .persistent()
                .remove(&DataKey::Balance(owner.clone()));
        } else {
            e.storage()
                .persistent()
                .set(&DataKey::Balance(owner.clone()), &balance);
        }
    }
}
