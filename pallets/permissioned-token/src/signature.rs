//! Signature verification for permits.

use sp_core::ed25519;
use sp_runtime::traits::Convert;

/// Raw ed25519-sized public key.
pub type PublicKeyBytes = [u8; 32];
/// Raw ed25519-sized signature.
pub type SignatureBytes = [u8; 64];

/// Checks that `signature` over `message` was produced by `public_key`.
pub trait VerifySignature {
    fn verify(public_key: &PublicKeyBytes, message: &[u8], signature: &SignatureBytes) -> bool;
}

/// Verifies plain ed25519 signatures through the runtime host functions.
pub struct Ed25519Verifier;

impl VerifySignature for Ed25519Verifier {
    fn verify(public_key: &PublicKeyBytes, message: &[u8], signature: &SignatureBytes) -> bool {
        let public = ed25519::Public::from_raw(*public_key);
        let signature = ed25519::Signature::from_raw(*signature);
        sp_io::crypto::ed25519_verify(&signature, message, &public)
    }
}

/// Maps a public key to the account id built from the same 32 bytes, as
/// `AccountId32` does for ed25519 and sr25519 keys.
pub struct AccountIdFromKey;

impl<AccountId: From<PublicKeyBytes>> Convert<PublicKeyBytes, AccountId> for AccountIdFromKey {
    fn convert(public_key: PublicKeyBytes) -> AccountId {
        AccountId::from(public_key)
    }
}
