//! # Permissioned Token Pallet
//!
//! Authorization and compliance layer for fungible token deployments whose
//! balances live in an external ledger ([`BalanceLedger`]).
//!
//! Each deployment, keyed by `T::TokenId`, carries:
//! - an authority (the account that initialized it),
//! - an operator allowlist of at most [`MAX_OPERATORS`] accounts,
//! - a pause switch,
//! - per-account freeze flags,
//! - signed, scoped, time-bound permits between owners and spenders.
//!
//! Token operations (`mint`, `transfer`, `transfer_from`, `burn`, `burn_from`)
//! check every guard first and then issue a single ledger call. A failing guard
//! leaves storage untouched and never reaches the ledger.

#![cfg_attr(not(feature = "std"), no_std)]
// `RuntimeEvent` in `Config` and storage getters are kept until the runtime
// moves to the newer pallet syntax.
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]
#![allow(clippy::too_many_arguments)]

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, traits::UnixTime};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::{Convert, MaybeSerializeDeserialize};
use sp_std::prelude::*;

pub use pallet::*;

pub mod ledger;
pub mod signature;
pub mod types;
pub mod weights;

pub use ledger::BalanceLedger;
pub use signature::{
    AccountIdFromKey, Ed25519Verifier, PublicKeyBytes, SignatureBytes, VerifySignature,
};
pub use types::*;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

pub const LOG_TARGET: &str = "runtime::permissioned-token";

/// Domain tag mixed into every permit message so signatures cannot be
/// replayed against another pallet or message format.
pub const PERMIT_DOMAIN: &[u8] = b"permissioned-token/permit/v1";

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Identity of a token deployment.
        type TokenId: Parameter + Member + MaxEncodedLen + Copy + MaybeSerializeDeserialize;

        /// Ledger holding the balances this pallet governs.
        type Ledger: BalanceLedger<Self::TokenId, Self::AccountId>;

        /// Verifies owner signatures on permits.
        type SignatureVerifier: VerifySignature;

        /// Account a permit signing key belongs to. A permit is only accepted
        /// when its key maps to the signing owner.
        type KeyOwner: Convert<PublicKeyBytes, Self::AccountId>;

        /// Trusted clock used for permit deadlines.
        type TimeProvider: UnixTime;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Authority of each deployment.
    #[pallet::storage]
    #[pallet::getter(fn authority)]
    pub type Authorities<T: Config> =
        StorageMap<_, Blake2_128Concat, T::TokenId, AuthorityRecord<T::AccountId>, OptionQuery>;

    /// Decimals and supply counters of each deployment.
    #[pallet::storage]
    #[pallet::getter(fn mint_state)]
    pub type MintStates<T: Config> =
        StorageMap<_, Blake2_128Concat, T::TokenId, MintRecord, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn pause_state)]
    pub type PauseStates<T: Config> =
        StorageMap<_, Blake2_128Concat, T::TokenId, PauseRecord<T::AccountId>, OptionQuery>;

    /// Operator allowlist of each deployment.
    #[pallet::storage]
    #[pallet::getter(fn access_registry)]
    pub type AccessRegistries<T: Config> = StorageMap<
        _,
        Blake2_128Concat,
        T::TokenId,
        AccessRegistryRecord<T::AccountId>,
        OptionQuery,
    >;

    /// Freeze flags, created lazily per (deployment, account).
    #[pallet::storage]
    #[pallet::getter(fn freeze_state)]
    pub type FreezeStates<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::TokenId,
        Blake2_128Concat,
        T::AccountId,
        FreezeRecord,
        OptionQuery,
    >;

    /// Latest permit per (deployment, (owner, spender)).
    #[pallet::storage]
    #[pallet::getter(fn permit)]
    pub type Permits<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::TokenId,
        Blake2_128Concat,
        (T::AccountId, T::AccountId),
        PermitRecord<T::AccountId>,
        OptionQuery,
    >;

    /// Spendable remainder of the latest permit per (deployment, (owner, spender)).
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::TokenId,
        Blake2_128Concat,
        (T::AccountId, T::AccountId),
        AllowanceRecord<T::AccountId>,
        OptionQuery,
    >;

    /// Next nonce a permit for (deployment, (owner, spender)) must carry.
    #[pallet::storage]
    #[pallet::getter(fn permit_nonce)]
    pub type PermitNonces<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::TokenId,
        Blake2_128Concat,
        (T::AccountId, T::AccountId),
        u64,
        ValueQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A deployment was created; `authority` owns it.
        DeploymentInitialized { token: T::TokenId, authority: T::AccountId, decimals: u8 },
        AccessRegistryInitialized { token: T::TokenId, authority: T::AccountId },
        OperatorAdded { token: T::TokenId, operator: T::AccountId },
        OperatorRemoved { token: T::TokenId, operator: T::AccountId },
        /// All token operations of the deployment are halted.
        Paused { token: T::TokenId },
        Unpaused { token: T::TokenId },
        FreezeStateInitialized { token: T::TokenId, account: T::AccountId },
        AccountFrozen { token: T::TokenId, account: T::AccountId },
        AccountUnfrozen { token: T::TokenId, account: T::AccountId },
        Minted { token: T::TokenId, to: T::AccountId, amount: u128 },
        Transferred { token: T::TokenId, from: T::AccountId, to: T::AccountId, amount: u128 },
        PermitIssued {
            token: T::TokenId,
            owner: T::AccountId,
            spender: T::AccountId,
            amount: u128,
            deadline: u64,
            nonce: u64,
            scope: PermitScope,
        },
        /// A spender moved owner funds under a permit.
        TransferredFrom {
            token: T::TokenId,
            owner: T::AccountId,
            spender: T::AccountId,
            to: T::AccountId,
            amount: u128,
            remaining: u128,
        },
        Burned { token: T::TokenId, account: T::AccountId, amount: u128 },
        BurnedFrom {
            token: T::TokenId,
            owner: T::AccountId,
            spender: T::AccountId,
            amount: u128,
            remaining: u128,
        },
        PermitRevoked { token: T::TokenId, owner: T::AccountId, spender: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is not the deployment authority.
        NotAuthority,
        AlreadyInitialized,
        /// Deployment or access registry does not exist.
        NotInitialized,
        /// Access registry holds the maximum number of operators.
        RegistryFull,
        DuplicateOperator,
        OperatorNotFound,
        /// Deployment is paused.
        Paused,
        AccountFrozen,
        AccountAlreadyFrozen,
        AccountNotFrozen,
        /// Permit deadline has passed.
        PermitExpired,
        /// Permit scope does not cover the requested operation.
        PermitScopeMismatch,
        /// One-time permit was already used.
        PermitConsumed,
        PermitNotFound,
        InsufficientAllowance,
        /// Owner has not approved the spender on the ledger for this amount.
        InsufficientDelegation,
        InsufficientBalance,
        InvalidSignature,
        InvalidNonce,
        InvalidAmount,
        /// Account has not been opened on the ledger.
        AccountNotFound,
        Overflow,
        /// Burn would exceed the minted supply.
        Underflow,
        /// Caller lacks the role required for this operation.
        Unauthorized,
    }

    impl<T> From<OperatorError> for Error<T> {
        fn from(err: OperatorError) -> Self {
            match err {
                OperatorError::Duplicate => Error::<T>::DuplicateOperator,
                OperatorError::Full => Error::<T>::RegistryFull,
                OperatorError::NotFound => Error::<T>::OperatorNotFound,
            }
        }
    }

    impl<T> From<ConsumeError> for Error<T> {
        fn from(err: ConsumeError) -> Self {
            match err {
                ConsumeError::Consumed => Error::<T>::PermitConsumed,
                ConsumeError::Expired => Error::<T>::PermitExpired,
                ConsumeError::ScopeMismatch => Error::<T>::PermitScopeMismatch,
                ConsumeError::InsufficientAllowance => Error::<T>::InsufficientAllowance,
            }
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Creates deployment `token` with the signer as its authority.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::initialize_deployment())]
        pub fn initialize_deployment(
            origin: OriginFor<T>,
            token: T::TokenId,
            decimals: u8,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(!Authorities::<T>::contains_key(token), Error::<T>::AlreadyInitialized);

            Self::create_deployment(token, who.clone(), decimals);

            log::info!(target: LOG_TARGET, "deployment {:?} initialized by {:?}", token, who);
            Self::deposit_event(Event::DeploymentInitialized { token, authority: who, decimals });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::initialize_access_registry())]
        pub fn initialize_access_registry(
            origin: OriginFor<T>,
            token: T::TokenId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_authority(token, &who)?;
            ensure!(
                !AccessRegistries::<T>::get(token).is_some_and(|r| r.initialized),
                Error::<T>::AlreadyInitialized
            );

            AccessRegistries::<T>::insert(token, AccessRegistryRecord::new(who.clone()));

            log::info!(target: LOG_TARGET, "access registry for {:?} initialized", token);
            Self::deposit_event(Event::AccessRegistryInitialized { token, authority: who });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::add_operator())]
        pub fn add_operator(
            origin: OriginFor<T>,
            token: T::TokenId,
            operator: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut registry = Self::registry(token)?;
            ensure!(registry.authority == who, Error::<T>::NotAuthority);

            registry.add_operator(operator.clone()).map_err(Error::<T>::from)?;
            AccessRegistries::<T>::insert(token, registry);

            Self::deposit_event(Event::OperatorAdded { token, operator });
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::remove_operator())]
        pub fn remove_operator(
            origin: OriginFor<T>,
            token: T::TokenId,
            operator: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut registry = Self::registry(token)?;
            ensure!(registry.authority == who, Error::<T>::NotAuthority);

            registry.remove_operator(&operator).map_err(Error::<T>::from)?;
            AccessRegistries::<T>::insert(token, registry);

            Self::deposit_event(Event::OperatorRemoved { token, operator });
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::pause())]
        pub fn pause(origin: OriginFor<T>, token: T::TokenId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::set_paused(token, &who, true)?;

            log::info!(target: LOG_TARGET, "deployment {:?} paused", token);
            Self::deposit_event(Event::Paused { token });
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::unpause())]
        pub fn unpause(origin: OriginFor<T>, token: T::TokenId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::set_paused(token, &who, false)?;

            log::info!(target: LOG_TARGET, "deployment {:?} unpaused", token);
            Self::deposit_event(Event::Unpaused { token });
            Ok(())
        }

        /// Opens `account` on the ledger if needed and gives it an unfrozen
        /// freeze record. Calling it again for the same account is a no-op.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::initialize_freeze_state())]
        pub fn initialize_freeze_state(
            origin: OriginFor<T>,
            token: T::TokenId,
            account: T::AccountId,
        ) -> DispatchResult {
            ensure_signed(origin)?;
            ensure!(Authorities::<T>::contains_key(token), Error::<T>::NotInitialized);

            if FreezeStates::<T>::contains_key(token, &account) {
                return Ok(());
            }
            if !T::Ledger::account_exists(token, &account) {
                T::Ledger::create_account(token, &account)?;
            }
            FreezeStates::<T>::insert(token, &account, FreezeRecord::default());

            Self::deposit_event(Event::FreezeStateInitialized { token, account });
            Ok(())
        }

        /// Freezes or unfreezes `account`. Authority only.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::set_frozen())]
        pub fn set_frozen(
            origin: OriginFor<T>,
            token: T::TokenId,
            account: T::AccountId,
            frozen: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_authority(token, &who)?;

            let current = FreezeStates::<T>::get(token, &account).unwrap_or_default();
            if frozen {
                ensure!(!current.frozen, Error::<T>::AccountAlreadyFrozen);
            } else {
                ensure!(current.frozen, Error::<T>::AccountNotFrozen);
            }
            FreezeStates::<T>::insert(token, &account, FreezeRecord { frozen });

            log::info!(
                target: LOG_TARGET,
                "account {:?} in {:?} frozen={}",
                account,
                token,
                frozen
            );
            if frozen {
                Self::deposit_event(Event::AccountFrozen { token, account });
            } else {
                Self::deposit_event(Event::AccountUnfrozen { token, account });
            }
            Ok(())
        }

        /// Mints `amount` to `to`. Callable by the authority or an operator.
        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(
            origin: OriginFor<T>,
            token: T::TokenId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused(token)?;
            ensure!(amount > 0, Error::<T>::InvalidAmount);
            Self::ensure_authority_or_operator(token, &who)?;
            Self::ensure_account(token, &to)?;

            let record = MintStates::<T>::get(token)
                .ok_or(Error::<T>::NotInitialized)?
                .with_minted(amount)
                .ok_or(Error::<T>::Overflow)?;

            T::Ledger::mint_to(token, &to, amount)?;
            MintStates::<T>::insert(token, record);

            log::debug!(target: LOG_TARGET, "{:?} minted {} to {:?}", who, amount, to);
            Self::deposit_event(Event::Minted { token, to, amount });
            Ok(())
        }

        /// Moves `amount` from the signer to `to`. The signer must be an
        /// operator and neither side may be frozen.
        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(
            origin: OriginFor<T>,
            token: T::TokenId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let from = ensure_signed(origin)?;
            Self::ensure_not_paused(token)?;
            ensure!(amount > 0, Error::<T>::InvalidAmount);
            Self::ensure_operator(token, &from)?;
            Self::ensure_not_frozen(token, &from)?;
            Self::ensure_not_frozen(token, &to)?;
            Self::ensure_account(token, &to)?;
            Self::ensure_balance(token, &from, amount)?;

            T::Ledger::transfer(token, &from, &to, amount)?;

            log::debug!(target: LOG_TARGET, "transfer {} {:?} -> {:?}", amount, from, to);
            Self::deposit_event(Event::Transferred { token, from, to, amount });
            Ok(())
        }

        /// Records a signed permit from the signer (owner) to `spender`,
        /// replacing any earlier permit for the pair.
        ///
        /// `signature` must be valid for [`Pallet::permit_message`] under
        /// `public_key`, and `nonce` must equal the pair's current
        /// [`PermitNonces`] entry.
        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::issue_permit())]
        pub fn issue_permit(
            origin: OriginFor<T>,
            token: T::TokenId,
            spender: T::AccountId,
            amount: u128,
            deadline: u64,
            nonce: u64,
            scope: PermitScope,
            signature: SignatureBytes,
            public_key: PublicKeyBytes,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            ensure!(Authorities::<T>::contains_key(token), Error::<T>::NotInitialized);
            ensure!(amount > 0, Error::<T>::InvalidAmount);
            ensure!(deadline > Self::now(), Error::<T>::PermitExpired);

            let key = (owner.clone(), spender.clone());
            ensure!(nonce == PermitNonces::<T>::get(token, &key), Error::<T>::InvalidNonce);

            ensure!(T::KeyOwner::convert(public_key) == owner, Error::<T>::InvalidSignature);
            let message =
                Self::permit_message(token, &owner, &spender, amount, deadline, nonce, scope);
            ensure!(
                T::SignatureVerifier::verify(&public_key, &message, &signature),
                Error::<T>::InvalidSignature
            );
            let next_nonce = nonce.checked_add(1).ok_or(Error::<T>::Overflow)?;

            Permits::<T>::insert(
                token,
                &key,
                PermitRecord {
                    owner: owner.clone(),
                    spender: spender.clone(),
                    amount,
                    deadline,
                    nonce,
                    scope,
                    consumed: false,
                },
            );
            Allowances::<T>::insert(
                token,
                &key,
                AllowanceRecord {
                    owner: owner.clone(),
                    spender: spender.clone(),
                    remaining: amount,
                },
            );
            PermitNonces::<T>::insert(token, &key, next_nonce);

            Self::deposit_event(Event::PermitIssued {
                token,
                owner,
                spender,
                amount,
                deadline,
                nonce,
                scope,
            });
            Ok(())
        }

        /// Moves `amount` of `owner`'s funds to `to` on behalf of the signer
        /// (spender). Needs both an active permit and a native ledger approval.
        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            token: T::TokenId,
            owner: T::AccountId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::ensure_not_paused(token)?;
            ensure!(amount > 0, Error::<T>::InvalidAmount);
            Self::ensure_operator(token, &spender)?;
            Self::ensure_not_frozen(token, &owner)?;
            Self::ensure_not_frozen(token, &to)?;

            let (permit, allowance) =
                Self::checked_permit_spend(token, &owner, &spender, amount, SpendKind::Transfer)?;
            ensure!(
                T::Ledger::allowance(token, &owner, &spender) >= amount,
                Error::<T>::InsufficientDelegation
            );
            Self::ensure_account(token, &to)?;
            Self::ensure_balance(token, &owner, amount)?;

            T::Ledger::transfer_from(token, &owner, &spender, &to, amount)?;

            let remaining = allowance.remaining;
            Self::store_permit_spend(token, permit, allowance);

            log::debug!(
                target: LOG_TARGET,
                "{:?} moved {} of {:?} to {:?}, {} left",
                spender,
                amount,
                owner,
                to,
                remaining
            );
            Self::deposit_event(Event::TransferredFrom {
                token,
                owner,
                spender,
                to,
                amount,
                remaining,
            });
            Ok(())
        }

        /// Burns `amount` from the signer's own `account`. Callable by the
        /// authority or an operator. Other holders' funds are only reachable
        /// through [`Pallet::burn_from`].
        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(
            origin: OriginFor<T>,
            token: T::TokenId,
            account: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused(token)?;
            ensure!(amount > 0, Error::<T>::InvalidAmount);
            Self::ensure_authority_or_operator(token, &who)?;
            ensure!(account == who, Error::<T>::Unauthorized);
            Self::ensure_not_frozen(token, &account)?;
            Self::ensure_balance(token, &account, amount)?;
            let record = Self::burned_supply(token, amount)?;

            T::Ledger::burn(token, &account, amount)?;
            MintStates::<T>::insert(token, record);

            log::debug!(target: LOG_TARGET, "{:?} burned {} from {:?}", who, amount, account);
            Self::deposit_event(Event::Burned { token, account, amount });
            Ok(())
        }

        /// Burns `amount` of `owner`'s funds on behalf of the signer (spender).
        /// Needs both a permit whose scope covers burning and a native ledger
        /// approval.
        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::burn_from())]
        pub fn burn_from(
            origin: OriginFor<T>,
            token: T::TokenId,
            owner: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::ensure_not_paused(token)?;
            ensure!(amount > 0, Error::<T>::InvalidAmount);
            Self::ensure_operator(token, &spender)?;
            Self::ensure_not_frozen(token, &owner)?;

            let (permit, allowance) =
                Self::checked_permit_spend(token, &owner, &spender, amount, SpendKind::Burn)?;
            ensure!(
                T::Ledger::allowance(token, &owner, &spender) >= amount,
                Error::<T>::InsufficientDelegation
            );
            Self::ensure_balance(token, &owner, amount)?;
            let record = Self::burned_supply(token, amount)?;

            T::Ledger::burn_from(token, &owner, &spender, amount)?;

            let remaining = allowance.remaining;
            Self::store_permit_spend(token, permit, allowance);
            MintStates::<T>::insert(token, record);

            Self::deposit_event(Event::BurnedFrom { token, owner, spender, amount, remaining });
            Ok(())
        }

        /// Drops the signer's permit to `spender`. The nonce is kept, so
        /// signatures over older nonces stay unusable.
        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::revoke_permit())]
        pub fn revoke_permit(
            origin: OriginFor<T>,
            token: T::TokenId,
            spender: T::AccountId,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let key = (owner.clone(), spender.clone());
            ensure!(Permits::<T>::contains_key(token, &key), Error::<T>::PermitNotFound);

            Permits::<T>::remove(token, &key);
            Allowances::<T>::remove(token, &key);

            Self::deposit_event(Event::PermitRevoked { token, owner, spender });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Deployments to create as (token, authority, decimals).
        pub deployments: Vec<(T::TokenId, T::AccountId, u8)>,
        /// Operators to allowlist as (token, operator). Listing any operator
        /// for a deployment also initializes its access registry.
        pub operators: Vec<(T::TokenId, T::AccountId)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            for (token, authority, decimals) in &self.deployments {
                assert!(!Authorities::<T>::contains_key(token), "Duplicate deployment in genesis");
                Pallet::<T>::create_deployment(*token, authority.clone(), *decimals);
            }

            for (token, operator) in &self.operators {
                let authority = Authorities::<T>::get(token)
                    .expect("Operator listed for an unknown deployment")
                    .owner;
                AccessRegistries::<T>::mutate(token, |maybe| {
                    maybe
                        .get_or_insert_with(|| AccessRegistryRecord::new(authority))
                        .add_operator(operator.clone())
                        .expect("Genesis operators must be unique and at most 10 per deployment");
                });
            }
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Whether `who` is on the operator allowlist of `token`.
    pub fn is_operator(token: T::TokenId, who: &T::AccountId) -> bool {
        AccessRegistries::<T>::get(token).is_some_and(|r| r.initialized && r.is_operator(who))
    }

    /// Operators of `token` in insertion order.
    pub fn operators(token: T::TokenId) -> Vec<T::AccountId> {
        AccessRegistries::<T>::get(token).map(|r| r.operators.into_inner()).unwrap_or_default()
    }

    pub fn is_paused(token: T::TokenId) -> bool {
        PauseStates::<T>::get(token).is_some_and(|p| p.paused)
    }

    pub fn is_frozen(token: T::TokenId, account: &T::AccountId) -> bool {
        FreezeStates::<T>::get(token, account).is_some_and(|f| f.frozen)
    }

    /// Amount `spender` may still move for `owner` under the current permit.
    pub fn remaining_allowance(
        token: T::TokenId,
        owner: &T::AccountId,
        spender: &T::AccountId,
    ) -> u128 {
        Allowances::<T>::get(token, (owner.clone(), spender.clone()))
            .map(|a| a.remaining)
            .unwrap_or_default()
    }

    /// Message an owner signs to authorize a permit.
    ///
    /// blake2-256 of the SCALE encoding of
    /// `(PERMIT_DOMAIN, token, owner, spender, amount, deadline, nonce, scope)`.
    pub fn permit_message(
        token: T::TokenId,
        owner: &T::AccountId,
        spender: &T::AccountId,
        amount: u128,
        deadline: u64,
        nonce: u64,
        scope: PermitScope,
    ) -> [u8; 32] {
        (PERMIT_DOMAIN, token, owner, spender, amount, deadline, nonce, scope)
            .using_encoded(sp_io::hashing::blake2_256)
    }

    fn now() -> u64 {
        T::TimeProvider::now().as_secs()
    }

    fn create_deployment(token: T::TokenId, authority: T::AccountId, decimals: u8) {
        Authorities::<T>::insert(token, AuthorityRecord { owner: authority.clone() });
        MintStates::<T>::insert(token, MintRecord::new(decimals));
        PauseStates::<T>::insert(token, PauseRecord { paused: false, authority });
    }

    fn ensure_authority(token: T::TokenId, who: &T::AccountId) -> DispatchResult {
        let authority = Authorities::<T>::get(token).ok_or(Error::<T>::NotInitialized)?;
        ensure!(authority.owner == *who, Error::<T>::NotAuthority);
        Ok(())
    }

    fn set_paused(token: T::TokenId, who: &T::AccountId, paused: bool) -> DispatchResult {
        let mut state = PauseStates::<T>::get(token).ok_or(Error::<T>::NotInitialized)?;
        ensure!(state.authority == *who, Error::<T>::NotAuthority);
        state.paused = paused;
        PauseStates::<T>::insert(token, state);
        Ok(())
    }

    /// Fails with `NotInitialized` for unknown deployments, then `Paused`.
    fn ensure_not_paused(token: T::TokenId) -> DispatchResult {
        let state = PauseStates::<T>::get(token).ok_or(Error::<T>::NotInitialized)?;
        ensure!(!state.paused, Error::<T>::Paused);
        Ok(())
    }

    fn registry(token: T::TokenId) -> Result<AccessRegistryRecord<T::AccountId>, DispatchError> {
        AccessRegistries::<T>::get(token)
            .filter(|r| r.initialized)
            .ok_or_else(|| Error::<T>::NotInitialized.into())
    }

    fn ensure_operator(token: T::TokenId, who: &T::AccountId) -> DispatchResult {
        ensure!(Self::registry(token)?.is_operator(who), Error::<T>::Unauthorized);
        Ok(())
    }

    fn ensure_authority_or_operator(token: T::TokenId, who: &T::AccountId) -> DispatchResult {
        let registry = Self::registry(token)?;
        let is_authority = Authorities::<T>::get(token).is_some_and(|a| a.owner == *who);
        ensure!(is_authority || registry.is_operator(who), Error::<T>::Unauthorized);
        Ok(())
    }

    fn ensure_not_frozen(token: T::TokenId, who: &T::AccountId) -> DispatchResult {
        ensure!(!Self::is_frozen(token, who), Error::<T>::AccountFrozen);
        Ok(())
    }

    fn ensure_account(token: T::TokenId, who: &T::AccountId) -> DispatchResult {
        ensure!(T::Ledger::account_exists(token, who), Error::<T>::AccountNotFound);
        Ok(())
    }

    fn ensure_balance(token: T::TokenId, who: &T::AccountId, amount: u128) -> DispatchResult {
        ensure!(T::Ledger::balance(token, who) >= amount, Error::<T>::InsufficientBalance);
        Ok(())
    }

    fn burned_supply(token: T::TokenId, amount: u128) -> Result<MintRecord, DispatchError> {
        let record = MintStates::<T>::get(token).ok_or(Error::<T>::NotInitialized)?;
        record.with_burned(amount).ok_or_else(|| Error::<T>::Underflow.into())
    }

    /// Permit and allowance as they would be after spending `amount`. Nothing
    /// is written; see [`Self::store_permit_spend`].
    fn checked_permit_spend(
        token: T::TokenId,
        owner: &T::AccountId,
        spender: &T::AccountId,
        amount: u128,
        kind: SpendKind,
    ) -> Result<(PermitRecord<T::AccountId>, AllowanceRecord<T::AccountId>), DispatchError> {
        let key = (owner.clone(), spender.clone());
        let permit = Permits::<T>::get(token, &key).ok_or(Error::<T>::PermitNotFound)?;
        let allowance = Allowances::<T>::get(token, &key).ok_or(Error::<T>::PermitNotFound)?;
        permit
            .consume(&allowance, amount, kind, Self::now())
            .map_err(|e| Error::<T>::from(e).into())
    }

    fn store_permit_spend(
        token: T::TokenId,
        permit: PermitRecord<T::AccountId>,
        allowance: AllowanceRecord<T::AccountId>,
    ) {
        let key = (permit.owner.clone(), permit.spender.clone());
        Permits::<T>::insert(token, &key, permit);
        Allowances::<T>::insert(token, &key, allowance);
    }
}
