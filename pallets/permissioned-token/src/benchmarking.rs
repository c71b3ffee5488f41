//! Benchmarking setup for pallet-permissioned-token

use super::*;

#[allow(unused)]
use crate::Pallet as PermissionedToken;
use codec::Decode;
use frame_benchmarking::v2::*;
use frame_support::traits::UnixTime;
use frame_system::RawOrigin;
use sp_runtime::traits::TrailingZeroInput;

fn token_id<T: Config>() -> T::TokenId {
    T::TokenId::decode(&mut TrailingZeroInput::zeroes()).expect("infinite input; qed")
}

/// Deploys the benchmark token with an initialized registry and returns its
/// authority.
fn deploy<T: Config>() -> T::AccountId {
    let authority: T::AccountId = account("authority", 0, 0);
    let token = token_id::<T>();
    PermissionedToken::<T>::initialize_deployment(
        RawOrigin::Signed(authority.clone()).into(),
        token,
        6,
    )
    .expect("fresh deployment");
    PermissionedToken::<T>::initialize_access_registry(
        RawOrigin::Signed(authority.clone()).into(),
        token,
    )
    .expect("authority registers");
    authority
}

/// Adds `who` to the operator list and opens their ledger account.
fn operator<T: Config>(authority: &T::AccountId, who: &T::AccountId) {
    let token = token_id::<T>();
    PermissionedToken::<T>::add_operator(
        RawOrigin::Signed(authority.clone()).into(),
        token,
        who.clone(),
    )
    .expect("registry has room");
    open::<T>(who);
}

fn open<T: Config>(who: &T::AccountId) {
    let token = token_id::<T>();
    if !T::Ledger::account_exists(token, who) {
        T::Ledger::create_account(token, who).expect("account opens");
    }
}

fn funded<T: Config>(authority: &T::AccountId, who: &T::AccountId, amount: u128) {
    open::<T>(who);
    PermissionedToken::<T>::mint(
        RawOrigin::Signed(authority.clone()).into(),
        token_id::<T>(),
        who.clone(),
        amount,
    )
    .expect("authority mints");
}

/// Installs a permit and matching native approval without a signature.
fn delegated<T: Config>(owner: &T::AccountId, spender: &T::AccountId, scope: PermitScope) {
    let token = token_id::<T>();
    let amount = 1_000_000u128;
    let deadline = T::TimeProvider::now().as_secs().saturating_add(3600);
    let key = (owner.clone(), spender.clone());
    T::Ledger::approve(token, owner, spender, amount).expect("approval");
    Permits::<T>::insert(
        token,
        &key,
        PermitRecord {
            owner: owner.clone(),
            spender: spender.clone(),
            amount,
            deadline,
            nonce: 0,
            scope,
            consumed: false,
        },
    );
    Allowances::<T>::insert(
        token,
        &key,
        AllowanceRecord { owner: owner.clone(), spender: spender.clone(), remaining: amount },
    );
    PermitNonces::<T>::insert(token, &key, 1);
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn initialize_deployment() {
        let caller: T::AccountId = whitelisted_caller();
        let token = token_id::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), token, 6);

        assert_eq!(Authorities::<T>::get(token).map(|a| a.owner), Some(caller));
    }

    #[benchmark]
    fn initialize_access_registry() {
        let caller: T::AccountId = whitelisted_caller();
        let token = token_id::<T>();
        PermissionedToken::<T>::initialize_deployment(
            RawOrigin::Signed(caller.clone()).into(),
            token,
            6,
        )
        .expect("fresh deployment");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), token);

        assert!(AccessRegistries::<T>::contains_key(token));
    }

    #[benchmark]
    fn add_operator() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        // Worst case scans a nearly full list
        for i in 0..(MAX_OPERATORS - 1) {
            operator::<T>(&authority, &account("operator", i, 0));
        }
        let new: T::AccountId = account("operator", MAX_OPERATORS, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(authority), token, new.clone());

        assert!(PermissionedToken::<T>::is_operator(token, &new));
    }

    #[benchmark]
    fn remove_operator() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        for i in 0..MAX_OPERATORS {
            operator::<T>(&authority, &account("operator", i, 0));
        }
        let first: T::AccountId = account("operator", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(authority), token, first.clone());

        assert!(!PermissionedToken::<T>::is_operator(token, &first));
    }

    #[benchmark]
    fn pause() {
        let authority = deploy::<T>();
        let token = token_id::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(authority), token);

        assert!(PermissionedToken::<T>::is_paused(token));
    }

    #[benchmark]
    fn unpause() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        PermissionedToken::<T>::pause(RawOrigin::Signed(authority.clone()).into(), token)
            .expect("authority pauses");

        #[extrinsic_call]
        _(RawOrigin::Signed(authority), token);

        assert!(!PermissionedToken::<T>::is_paused(token));
    }

    #[benchmark]
    fn initialize_freeze_state() {
        deploy::<T>();
        let caller: T::AccountId = whitelisted_caller();
        let token = token_id::<T>();
        let fresh: T::AccountId = account("fresh", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), token, fresh.clone());

        assert!(FreezeStates::<T>::contains_key(token, &fresh));
    }

    #[benchmark]
    fn set_frozen() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        let holder: T::AccountId = account("holder", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(authority), token, holder.clone(), true);

        assert!(PermissionedToken::<T>::is_frozen(token, &holder));
    }

    #[benchmark]
    fn mint() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        let minter: T::AccountId = whitelisted_caller();
        operator::<T>(&authority, &minter);
        let recipient: T::AccountId = account("recipient", 0, 0);
        open::<T>(&recipient);

        #[extrinsic_call]
        _(RawOrigin::Signed(minter), token, recipient.clone(), 1_000_000);

        assert_eq!(T::Ledger::balance(token, &recipient), 1_000_000);
    }

    #[benchmark]
    fn transfer() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        let sender: T::AccountId = whitelisted_caller();
        operator::<T>(&authority, &sender);
        funded::<T>(&authority, &sender, 10_000_000);
        let recipient: T::AccountId = account("recipient", 0, 0);
        open::<T>(&recipient);

        #[extrinsic_call]
        _(RawOrigin::Signed(sender), token, recipient.clone(), 1_000_000);

        assert_eq!(T::Ledger::balance(token, &recipient), 1_000_000);
    }

    #[benchmark]
    fn transfer_from() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        let spender: T::AccountId = whitelisted_caller();
        operator::<T>(&authority, &spender);
        let owner: T::AccountId = account("owner", 0, 0);
        funded::<T>(&authority, &owner, 10_000_000);
        delegated::<T>(&owner, &spender, PermitScope::All);
        let recipient: T::AccountId = account("recipient", 0, 0);
        open::<T>(&recipient);

        #[extrinsic_call]
        _(RawOrigin::Signed(spender.clone()), token, owner.clone(), recipient.clone(), 1_000);

        assert_eq!(T::Ledger::balance(token, &recipient), 1_000);
        assert_eq!(PermissionedToken::<T>::remaining_allowance(token, &owner, &spender), 999_000);
    }

    #[benchmark]
    fn burn() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        let holder: T::AccountId = whitelisted_caller();
        operator::<T>(&authority, &holder);
        funded::<T>(&authority, &holder, 10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(holder.clone()), token, holder.clone(), 1_000_000);

        assert_eq!(T::Ledger::balance(token, &holder), 9_000_000);
    }

    #[benchmark]
    fn burn_from() {
        let authority = deploy::<T>();
        let token = token_id::<T>();
        let spender: T::AccountId = whitelisted_caller();
        operator::<T>(&authority, &spender);
        let owner: T::AccountId = account("owner", 0, 0);
        funded::<T>(&authority, &owner, 10_000_000);
        delegated::<T>(&owner, &spender, PermitScope::BurnOnly);

        #[extrinsic_call]
        _(RawOrigin::Signed(spender), token, owner.clone(), 1_000);

        assert_eq!(T::Ledger::balance(token, &owner), 9_999_000);
    }

    #[benchmark]
    fn revoke_permit() {
        let owner: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);
        let token = token_id::<T>();
        deploy::<T>();
        delegated::<T>(&owner, &spender, PermitScope::Permanent);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner.clone()), token, spender.clone());

        assert!(Permits::<T>::get(token, (owner, spender)).is_none());
    }

    impl_benchmark_test_suite!(PermissionedToken, crate::mock::new_test_ext(), crate::mock::Test);
}
