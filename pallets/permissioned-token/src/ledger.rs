//! Interface to the balance-keeping ledger underneath the control plane.

use frame_support::dispatch::DispatchResult;

/// Atomic balance primitives of an external fungible ledger.
///
/// The pallet never computes balances itself. It validates a request, then
/// issues exactly one mutating call through this trait. Each mutating call
/// must succeed or fail as a whole.
pub trait BalanceLedger<TokenId, AccountId> {
    /// Whether `who` holds an account for `token`.
    fn account_exists(token: TokenId, who: &AccountId) -> bool;

    /// Opens an empty account for `who`.
    fn create_account(token: TokenId, who: &AccountId) -> DispatchResult;

    fn balance(token: TokenId, who: &AccountId) -> u128;

    fn mint_to(token: TokenId, who: &AccountId, amount: u128) -> DispatchResult;

    fn burn(token: TokenId, who: &AccountId, amount: u128) -> DispatchResult;

    fn transfer(
        token: TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> DispatchResult;

    /// Native delegation: `owner` lets `delegate` move up to `amount`.
    fn approve(token: TokenId, owner: &AccountId, delegate: &AccountId, amount: u128)
        -> DispatchResult;

    /// Amount `delegate` may still move on behalf of `owner`.
    fn allowance(token: TokenId, owner: &AccountId, delegate: &AccountId) -> u128;

    /// Moves `amount` from `owner` to `to` using the native approval granted
    /// to `delegate`, reducing that approval.
    fn transfer_from(
        token: TokenId,
        owner: &AccountId,
        delegate: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> DispatchResult;

    /// Burns `amount` from `owner` using the native approval granted to
    /// `delegate`, reducing that approval.
    fn burn_from(
        token: TokenId,
        owner: &AccountId,
        delegate: &AccountId,
        amount: u128,
    ) -> DispatchResult;
}
