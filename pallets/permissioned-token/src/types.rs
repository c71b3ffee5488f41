//! Storage records for a permissioned token deployment.
//!
//! Records are plain data with small state-transition helpers. The pallet
//! reads a record, asks it for the next state, and writes the result back only
//! once every guard of the calling extrinsic has passed.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{pallet_prelude::ConstU32, BoundedVec};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

/// Maximum number of operators a single access registry can hold.
pub const MAX_OPERATORS: u32 = 10;

/// Bounded operator set. Capacity is part of the type, so an eleventh entry
/// cannot be stored.
pub type OperatorList<AccountId> = BoundedVec<AccountId, ConstU32<MAX_OPERATORS>>;

/// Owner of a deployment.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct AuthorityRecord<AccountId> {
    pub owner: AccountId,
}

/// Supply bookkeeping for a deployment.
///
/// Both totals only grow; `total_burned` never exceeds `total_minted`.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default)]
pub struct MintRecord {
    pub decimals: u8,
    pub total_minted: u128,
    pub total_burned: u128,
}

impl MintRecord {
    pub fn new(decimals: u8) -> Self {
        Self { decimals, total_minted: 0, total_burned: 0 }
    }

    /// Units minted and not yet burned.
    pub fn outstanding(&self) -> u128 {
        self.total_minted.saturating_sub(self.total_burned)
    }

    /// Record after minting `amount`, or `None` on overflow.
    pub fn with_minted(&self, amount: u128) -> Option<Self> {
        let total_minted = self.total_minted.checked_add(amount)?;
        Some(Self { total_minted, ..self.clone() })
    }

    /// Record after burning `amount`, or `None` if that would burn more than
    /// was ever minted.
    pub fn with_burned(&self, amount: u128) -> Option<Self> {
        let total_burned = self.total_burned.checked_add(amount)?;
        if total_burned > self.total_minted {
            return None;
        }
        Some(Self { total_burned, ..self.clone() })
    }
}

/// Global halt switch of a deployment.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct PauseRecord<AccountId> {
    pub paused: bool,
    pub authority: AccountId,
}

/// Why an operator could not be added to or removed from the registry.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum OperatorError {
    Duplicate,
    Full,
    NotFound,
}

/// Operator allowlist of a deployment.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct AccessRegistryRecord<AccountId> {
    pub authority: AccountId,
    pub initialized: bool,
    pub operators: OperatorList<AccountId>,
}

impl<AccountId: PartialEq> AccessRegistryRecord<AccountId> {
    pub fn new(authority: AccountId) -> Self {
        Self { authority, initialized: true, operators: BoundedVec::new() }
    }

    pub fn is_operator(&self, who: &AccountId) -> bool {
        self.operators.iter().any(|op| op == who)
    }

    pub fn is_full(&self) -> bool {
        self.operators.len() as u32 >= MAX_OPERATORS
    }

    /// Appends `operator`. Never evicts an existing entry to make room.
    pub fn add_operator(&mut self, operator: AccountId) -> Result<(), OperatorError> {
        if self.is_operator(&operator) {
            return Err(OperatorError::Duplicate);
        }
        self.operators.try_push(operator).map_err(|_| OperatorError::Full)
    }

    /// Removes `operator`, keeping the relative order of the others.
    pub fn remove_operator(&mut self, operator: &AccountId) -> Result<(), OperatorError> {
        let index =
            self.operators.iter().position(|op| op == operator).ok_or(OperatorError::NotFound)?;
        self.operators.remove(index);
        Ok(())
    }
}

/// Per-account compliance halt. Absent records read as unfrozen.
#[derive(
    Clone, Copy, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default,
)]
pub struct FreezeRecord {
    pub frozen: bool,
}

/// What a permit authorizes the spender to do.
#[derive(
    Clone,
    Copy,
    Encode,
    Decode,
    DecodeWithMemTracking,
    PartialEq,
    Eq,
    RuntimeDebug,
    TypeInfo,
    MaxEncodedLen,
)]
pub enum PermitScope {
    /// A single transfer; the permit is spent after first use.
    OneTime,
    /// Transfers until the allowance or deadline runs out.
    Permanent,
    TransferOnly,
    BurnOnly,
    /// Transfers and burns.
    All,
}

/// Kind of delegated operation consuming a permit.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum SpendKind {
    Transfer,
    Burn,
}

impl PermitScope {
    pub fn permits(&self, kind: SpendKind) -> bool {
        match kind {
            SpendKind::Transfer => matches!(
                self,
                PermitScope::OneTime |
                    PermitScope::Permanent |
                    PermitScope::TransferOnly |
                    PermitScope::All
            ),
            SpendKind::Burn => matches!(self, PermitScope::BurnOnly | PermitScope::All),
        }
    }
}

/// Signature-verified intent of an owner towards a spender.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct PermitRecord<AccountId> {
    pub owner: AccountId,
    pub spender: AccountId,
    pub amount: u128,
    pub deadline: u64,
    pub nonce: u64,
    pub scope: PermitScope,
    pub consumed: bool,
}

/// Amount still spendable under the active permit of a pair.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct AllowanceRecord<AccountId> {
    pub owner: AccountId,
    pub spender: AccountId,
    pub remaining: u128,
}

/// Why a permit could not be consumed.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum ConsumeError {
    Consumed,
    Expired,
    ScopeMismatch,
    InsufficientAllowance,
}

impl<AccountId: Clone> PermitRecord<AccountId> {
    /// Computes the permit and allowance after spending `amount` at time
    /// `now`. Inputs are left untouched so a failed guard mutates nothing.
    pub fn consume(
        &self,
        allowance: &AllowanceRecord<AccountId>,
        amount: u128,
        kind: SpendKind,
        now: u64,
    ) -> Result<(Self, AllowanceRecord<AccountId>), ConsumeError> {
        if self.consumed {
            return Err(ConsumeError::Consumed);
        }
        if now > self.deadline {
            return Err(ConsumeError::Expired);
        }
        if !self.scope.permits(kind) {
            return Err(ConsumeError::ScopeMismatch);
        }
        let remaining =
            allowance.remaining.checked_sub(amount).ok_or(ConsumeError::InsufficientAllowance)?;

        let permit = Self { consumed: self.scope == PermitScope::OneTime, ..self.clone() };
        let allowance = AllowanceRecord { remaining, ..allowance.clone() };
        Ok((permit, allowance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permit(scope: PermitScope, amount: u128) -> (PermitRecord<u64>, AllowanceRecord<u64>) {
        (
            PermitRecord {
                owner: 1,
                spender: 2,
                amount,
                deadline: 100,
                nonce: 0,
                scope,
                consumed: false,
            },
            AllowanceRecord { owner: 1, spender: 2, remaining: amount },
        )
    }

    #[test]
    fn registry_rejects_duplicates_and_eleventh_operator() {
        let mut registry = AccessRegistryRecord::new(0u64);
        for op in 1..=MAX_OPERATORS as u64 {
            assert_eq!(registry.add_operator(op), Ok(()));
        }
        assert!(registry.is_full());
        assert_eq!(registry.add_operator(3), Err(OperatorError::Duplicate));
        assert_eq!(registry.add_operator(42), Err(OperatorError::Full));
        assert_eq!(registry.operators.len(), MAX_OPERATORS as usize);
    }

    #[test]
    fn registry_remove_preserves_order() {
        let mut registry = AccessRegistryRecord::new(0u64);
        for op in [5, 6, 7, 8] {
            registry.add_operator(op).unwrap();
        }
        assert_eq!(registry.remove_operator(&6), Ok(()));
        assert_eq!(registry.operators.to_vec(), vec![5, 7, 8]);
        assert_eq!(registry.remove_operator(&6), Err(OperatorError::NotFound));
        assert_eq!(registry.operators.to_vec(), vec![5, 7, 8]);
    }

    #[test]
    fn scope_mapping() {
        use PermitScope::*;
        for scope in [OneTime, Permanent, TransferOnly, All] {
            assert!(scope.permits(SpendKind::Transfer), "{scope:?} should allow transfer");
        }
        assert!(!BurnOnly.permits(SpendKind::Transfer));
        for scope in [BurnOnly, All] {
            assert!(scope.permits(SpendKind::Burn), "{scope:?} should allow burn");
        }
        for scope in [OneTime, Permanent, TransferOnly] {
            assert!(!scope.permits(SpendKind::Burn), "{scope:?} should not allow burn");
        }
    }

    #[test]
    fn consume_decrements_and_leaves_input_untouched() {
        let (p, a) = permit(PermitScope::TransferOnly, 10);
        let (p2, a2) = p.consume(&a, 4, SpendKind::Transfer, 50).unwrap();
        assert_eq!(a2.remaining, 6);
        assert!(!p2.consumed);
        assert_eq!(a.remaining, 10);

        assert_eq!(
            p2.consume(&a2, 7, SpendKind::Transfer, 50),
            Err(ConsumeError::InsufficientAllowance)
        );
    }

    #[test]
    fn consume_at_deadline_is_allowed_after_is_expired() {
        let (p, a) = permit(PermitScope::Permanent, 10);
        assert!(p.consume(&a, 1, SpendKind::Transfer, 100).is_ok());
        assert_eq!(p.consume(&a, 1, SpendKind::Transfer, 101), Err(ConsumeError::Expired));
    }

    #[test]
    fn one_time_permit_is_spent_after_first_use() {
        let (p, a) = permit(PermitScope::OneTime, 10);
        let (p2, a2) = p.consume(&a, 3, SpendKind::Transfer, 1).unwrap();
        assert!(p2.consumed);
        assert_eq!(a2.remaining, 7);
        assert_eq!(p2.consume(&a2, 1, SpendKind::Transfer, 1), Err(ConsumeError::Consumed));
    }

    #[test]
    fn burn_only_permit_rejects_transfer() {
        let (p, a) = permit(PermitScope::BurnOnly, 10);
        assert_eq!(p.consume(&a, 1, SpendKind::Transfer, 1), Err(ConsumeError::ScopeMismatch));
        assert!(p.consume(&a, 1, SpendKind::Burn, 1).is_ok());
    }

    #[test]
    fn mint_record_tracks_supply() {
        let record = MintRecord::new(6).with_minted(100).unwrap();
        assert_eq!(record.outstanding(), 100);
        let record = record.with_burned(40).unwrap();
        assert_eq!(record.outstanding(), 60);
        assert_eq!(record.with_burned(61), None);
        assert_eq!(record.with_minted(u128::MAX), None);
    }
}
