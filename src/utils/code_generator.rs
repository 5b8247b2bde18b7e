//! Deterministic short code derivation.
//!
//! A short code is the URL-safe base64 encoding (no padding) of the first
//! [`CODE_LENGTH_BYTES`] bytes of the SHA-256 digest of a normalized URL.
//! Distinct URLs sharing a truncated prefix are not disambiguated here; the
//! unique index on the store rejects the second insert.
//!
//! Links minted by the earlier service were 12 characters with `==` padding;
//! those fail [`is_well_formed_code`] and resolve as not found.

use base64::Engine as _;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Number of digest bytes kept before encoding.
pub const CODE_LENGTH_BYTES: usize = 7;

/// Encoded length of every short code.
pub const CODE_LENGTH: usize = (CODE_LENGTH_BYTES * 4).div_ceil(3);

/// Shape of a derived code.
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[A-Za-z0-9_-]{{{CODE_LENGTH}}}$")).expect("static regex")
});

/// Derives the short code for a normalized URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(derive_code("example.com/x"), "HH2tynxpYA");
/// assert_eq!(derive_code("example.com/x").len(), CODE_LENGTH);
/// ```
pub fn derive_code(normalized_url: &str) -> String {
    let digest = Sha256::digest(normalized_url.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&digest[..CODE_LENGTH_BYTES])
}

/// Returns true if `candidate` could have been produced by [`derive_code`].
///
/// Lets the resolver answer 404 for junk paths without a datastore round-trip.
pub fn is_well_formed_code(candidate: &str) -> bool {
    CODE_REGEX.is_match(candidate)
}
