use crate as pallet_permissioned_token;
use crate::{BalanceLedger, PublicKeyBytes, SignatureBytes, VerifySignature};
use core::cell::RefCell;
use frame_support::{
    derive_impl,
    dispatch::DispatchResult,
    storage::with_storage_layer,
    traits::{ConstU32, ConstU64, UnixTime},
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, Convert, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

pub const TOKEN: u32 = 7;
pub const OTHER_TOKEN: u32 = 9;

/// Deployment authority of `TOKEN`.
pub const ALICE: u64 = 1;
/// Operators of `TOKEN`.
pub const BOB: u64 = 2;
pub const CHARLIE: u64 = 3;
/// Plain holder with a ledger account.
pub const DAVE: u64 = 4;
/// No role and no ledger account.
pub const EVE: u64 = 5;

pub const GENESIS_TIME: u64 = 1_700_000_000;

/// Minimal balance ledger backed by runtime storage, so rollbacks and
/// `assert_noop!` cover ledger state as well.
#[frame_support::pallet(dev_mode)]
pub mod mock_ledger {
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {}

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::storage]
    pub type Accounts<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        u32,
        Blake2_128Concat,
        T::AccountId,
        u128,
        OptionQuery,
    >;

    /// Native approvals keyed by (token, (owner, delegate)).
    #[pallet::storage]
    pub type Approvals<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        u32,
        Blake2_128Concat,
        (T::AccountId, T::AccountId),
        u128,
        ValueQuery,
    >;

    #[pallet::error]
    pub enum Error<T> {
        UnknownAccount,
        AccountExists,
        InsufficientBalance,
        InsufficientApproval,
        Overflow,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        pub fn approve(
            origin: OriginFor<T>,
            token: u32,
            delegate: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Approvals::<T>::insert(token, (owner, delegate), amount);
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        pub fn open(token: u32, who: &T::AccountId) -> DispatchResult {
            ensure!(!Accounts::<T>::contains_key(token, who), Error::<T>::AccountExists);
            Accounts::<T>::insert(token, who, 0u128);
            Ok(())
        }

        pub fn balance_of(token: u32, who: &T::AccountId) -> u128 {
            Accounts::<T>::get(token, who).unwrap_or_default()
        }

        pub fn approval(token: u32, owner: &T::AccountId, delegate: &T::AccountId) -> u128 {
            Approvals::<T>::get(token, (owner.clone(), delegate.clone()))
        }

        pub fn set_approval(
            token: u32,
            owner: &T::AccountId,
            delegate: &T::AccountId,
            amount: u128,
        ) {
            Approvals::<T>::insert(token, (owner.clone(), delegate.clone()), amount);
        }

        pub fn spend_approval(
            token: u32,
            owner: &T::AccountId,
            delegate: &T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let left = Self::approval(token, owner, delegate)
                .checked_sub(amount)
                .ok_or(Error::<T>::InsufficientApproval)?;
            Self::set_approval(token, owner, delegate, left);
            Ok(())
        }

        pub fn credit(token: u32, who: &T::AccountId, amount: u128) -> DispatchResult {
            Accounts::<T>::try_mutate(token, who, |balance| -> DispatchResult {
                let balance = balance.as_mut().ok_or(Error::<T>::UnknownAccount)?;
                *balance = balance.checked_add(amount).ok_or(Error::<T>::Overflow)?;
                Ok(())
            })
        }

        pub fn debit(token: u32, who: &T::AccountId, amount: u128) -> DispatchResult {
            Accounts::<T>::try_mutate(token, who, |balance| -> DispatchResult {
                let balance = balance.as_mut().ok_or(Error::<T>::UnknownAccount)?;
                *balance = balance.checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
                Ok(())
            })
        }
    }
}

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        MockLedger: mock_ledger,
        PermissionedToken: pallet_permissioned_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

impl mock_ledger::Config for Test {}

impl BalanceLedger<u32, u64> for MockLedger {
    fn account_exists(token: u32, who: &u64) -> bool {
        mock_ledger::Accounts::<Test>::contains_key(token, who)
    }

    fn create_account(token: u32, who: &u64) -> DispatchResult {
        MockLedger::open(token, who)
    }

    fn balance(token: u32, who: &u64) -> u128 {
        MockLedger::balance_of(token, who)
    }

    fn mint_to(token: u32, who: &u64, amount: u128) -> DispatchResult {
        MockLedger::credit(token, who, amount)
    }

    fn burn(token: u32, who: &u64, amount: u128) -> DispatchResult {
        MockLedger::debit(token, who, amount)
    }

    fn transfer(token: u32, from: &u64, to: &u64, amount: u128) -> DispatchResult {
        with_storage_layer(|| {
            MockLedger::debit(token, from, amount)?;
            MockLedger::credit(token, to, amount)
        })
    }

    fn approve(token: u32, owner: &u64, delegate: &u64, amount: u128) -> DispatchResult {
        MockLedger::set_approval(token, owner, delegate, amount);
        Ok(())
    }

    fn allowance(token: u32, owner: &u64, delegate: &u64) -> u128 {
        MockLedger::approval(token, owner, delegate)
    }

    fn transfer_from(
        token: u32,
        owner: &u64,
        delegate: &u64,
        to: &u64,
        amount: u128,
    ) -> DispatchResult {
        with_storage_layer(|| {
            MockLedger::spend_approval(token, owner, delegate, amount)?;
            MockLedger::debit(token, owner, amount)?;
            MockLedger::credit(token, to, amount)
        })
    }

    fn burn_from(token: u32, owner: &u64, delegate: &u64, amount: u128) -> DispatchResult {
        with_storage_layer(|| {
            MockLedger::spend_approval(token, owner, delegate, amount)?;
            MockLedger::debit(token, owner, amount)
        })
    }
}

thread_local! {
    static NOW: RefCell<u64> = const { RefCell::new(GENESIS_TIME) };
}

/// Chain clock driven by the tests.
pub struct MockTime;

impl UnixTime for MockTime {
    fn now() -> core::time::Duration {
        core::time::Duration::from_secs(NOW.with(|now| *now.borrow()))
    }
}

pub fn now() -> u64 {
    NOW.with(|now| *now.borrow())
}

pub fn set_now(secs: u64) {
    NOW.with(|now| *now.borrow_mut() = secs);
}

/// Deterministic stand-in for a real signature scheme: the "signature" is
/// blake2-256(public_key ++ message) followed by the public key.
pub struct StubVerifier;

impl VerifySignature for StubVerifier {
    fn verify(public_key: &PublicKeyBytes, message: &[u8], signature: &SignatureBytes) -> bool {
        stub_sign(public_key, message) == *signature
    }
}

pub fn stub_sign(public_key: &PublicKeyBytes, message: &[u8]) -> SignatureBytes {
    let digest = sp_io::hashing::blake2_256(&[&public_key[..], message].concat());
    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(&digest);
    signature[32..].copy_from_slice(public_key);
    signature
}

/// Stub key pair of a test account.
pub fn key_of(who: u64) -> PublicKeyBytes {
    [who as u8; 32]
}

/// Inverse of [`key_of`].
pub struct StubKeyOwner;

impl Convert<PublicKeyBytes, u64> for StubKeyOwner {
    fn convert(public_key: PublicKeyBytes) -> u64 {
        public_key[0] as u64
    }
}

impl pallet_permissioned_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type TokenId = u32;
    type Ledger = MockLedger;
    type SignatureVerifier = StubVerifier;
    type KeyOwner = StubKeyOwner;
    type TimeProvider = MockTime;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
//
// `TOKEN` is deployed by ALICE with BOB and CHARLIE as operators. ALICE, BOB,
// CHARLIE and DAVE hold empty ledger accounts; EVE has none.
pub fn new_test_ext() -> sp_io::TestExternalities {
    set_now(GENESIS_TIME);
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_permissioned_token::GenesisConfig::<Test> {
        deployments: vec![(TOKEN, ALICE, 6)],
        operators: vec![(TOKEN, BOB), (TOKEN, CHARLIE)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| {
        System::set_block_number(1);
        for who in [ALICE, BOB, CHARLIE, DAVE] {
            MockLedger::open(TOKEN, &who).unwrap();
        }
    });
    ext
}
