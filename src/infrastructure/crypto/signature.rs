use vodozemac::{Ed25519PublicKey, Ed25519Signature};

/// Checks that `signature_hex` is a valid Ed25519 signature by
/// `public_key_hex` over `timestamp` concatenated with `raw_body`.
///
/// Malformed hex, a key or signature of the wrong length, and a failed
/// verification all return `false`; callers treat every one of them as an
/// unauthenticated request.
pub fn verify_signature(
    raw_body: &[u8],
    signature_hex: &str,
    timestamp: &str,
    public_key_hex: &str,
) -> bool {
    let Ok(signature_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(key_bytes) = hex::decode(public_key_hex) else {
        return false;
    };
    let Ok(key_bytes) = <[u8; Ed25519PublicKey::LENGTH]>::try_from(key_bytes.as_slice()) else {
        return false;
    };
    let Ok(public_key) = Ed25519PublicKey::from_slice(&key_bytes) else {
        return false;
    };
    let Ok(signature) = Ed25519Signature::from_slice(&signature_bytes) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + raw_body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(raw_body);

    public_key.verify(&message, &signature).is_ok()
}
