//! Weights for pallet-permissioned-token.
//!
//! Hand-estimated from storage access counts until benchmark output replaces
//! them. Ledger calls are charged as one extra read/write pair.

#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, RuntimeDbWeight, Weight},
};
use sp_std::marker::PhantomData;

pub trait WeightInfo {
    fn initialize_deployment() -> Weight;
    fn initialize_access_registry() -> Weight;
    fn add_operator() -> Weight;
    fn remove_operator() -> Weight;
    fn pause() -> Weight;
    fn unpause() -> Weight;
    fn initialize_freeze_state() -> Weight;
    fn set_frozen() -> Weight;
    fn mint() -> Weight;
    fn transfer() -> Weight;
    fn issue_permit() -> Weight;
    fn transfer_from() -> Weight;
    fn burn() -> Weight;
    fn burn_from() -> Weight;
    fn revoke_permit() -> Weight;
}

/// Weights for a runtime using `RocksDbWeight`.
pub struct SubstrateWeight<T>(PhantomData<T>);

fn base(ref_time: u64, reads: u64, writes: u64, db: RuntimeDbWeight) -> Weight {
    Weight::from_parts(ref_time, 0).saturating_add(db.reads_writes(reads, writes))
}

impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    fn initialize_deployment() -> Weight {
        base(15_000_000, 1, 3, T::DbWeight::get())
    }
    fn initialize_access_registry() -> Weight {
        base(12_000_000, 2, 1, T::DbWeight::get())
    }
    fn add_operator() -> Weight {
        base(14_000_000, 1, 1, T::DbWeight::get())
    }
    fn remove_operator() -> Weight {
        base(14_000_000, 1, 1, T::DbWeight::get())
    }
    fn pause() -> Weight {
        base(10_000_000, 2, 1, T::DbWeight::get())
    }
    fn unpause() -> Weight {
        base(10_000_000, 2, 1, T::DbWeight::get())
    }
    fn initialize_freeze_state() -> Weight {
        base(12_000_000, 3, 2, T::DbWeight::get())
    }
    fn set_frozen() -> Weight {
        base(12_000_000, 2, 1, T::DbWeight::get())
    }
    fn mint() -> Weight {
        base(25_000_000, 5, 2, T::DbWeight::get())
    }
    fn transfer() -> Weight {
        base(28_000_000, 7, 2, T::DbWeight::get())
    }
    fn issue_permit() -> Weight {
        // Dominated by signature verification.
        base(60_000_000, 2, 3, T::DbWeight::get())
    }
    fn transfer_from() -> Weight {
        base(35_000_000, 10, 4, T::DbWeight::get())
    }
    fn burn() -> Weight {
        base(25_000_000, 5, 2, T::DbWeight::get())
    }
    fn burn_from() -> Weight {
        base(30_000_000, 8, 4, T::DbWeight::get())
    }
    fn revoke_permit() -> Weight {
        base(12_000_000, 1, 2, T::DbWeight::get())
    }
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    fn initialize_deployment() -> Weight {
        base(15_000_000, 1, 3, RocksDbWeight::get())
    }
    fn initialize_access_registry() -> Weight {
        base(12_000_000, 2, 1, RocksDbWeight::get())
    }
    fn add_operator() -> Weight {
        base(14_000_000, 1, 1, RocksDbWeight::get())
    }
    fn remove_operator() -> Weight {
        base(14_000_000, 1, 1, RocksDbWeight::get())
    }
    fn pause() -> Weight {
        base(10_000_000, 2, 1, RocksDbWeight::get())
    }
    fn unpause() -> Weight {
        base(10_000_000, 2, 1, RocksDbWeight::get())
    }
    fn initialize_freeze_state() -> Weight {
        base(12_000_000, 3, 2, RocksDbWeight::get())
    }
    fn set_frozen() -> Weight {
        base(12_000_000, 2, 1, RocksDbWeight::get())
    }
    fn mint() -> Weight {
        base(25_000_000, 5, 2, RocksDbWeight::get())
    }
    fn transfer() -> Weight {
        base(28_000_000, 7, 2, RocksDbWeight::get())
    }
    fn issue_permit() -> Weight {
        base(60_000_000, 2, 3, RocksDbWeight::get())
    }
    fn transfer_from() -> Weight {
        base(35_000_000, 10, 4, RocksDbWeight::get())
    }
    fn burn() -> Weight {
        base(25_000_000, 5, 2, RocksDbWeight::get())
    }
    fn burn_from() -> Weight {
        base(30_000_000, 8, 4, RocksDbWeight::get())
    }
    fn revoke_permit() -> Weight {
        base(12_000_000, 1, 2, RocksDbWeight::get())
    }
}
