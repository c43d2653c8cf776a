use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;
use thiserror::Error;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = ring::digest::SHA256_OUTPUT_LEN;
const DEFAULT_ITERATIONS: NonZeroU32 = NonZeroU32::new(100_000).expect("iterations are not zero");

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to generate salt")]
    Random,
    #[error("stored password hash is malformed")]
    Malformed,
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}

/// Hashes a password for storage as `pbkdf2-sha256$<iterations>$<salt>$<hash>`.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_with_iterations(password, DEFAULT_ITERATIONS)
}

fn hash_with_iterations(password: &str, iterations: NonZeroU32) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new().fill(&mut salt).map_err(|_| PasswordError::Random)?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt,
        password.as_bytes(),
        &mut hash,
    );
    Ok(format!(
        "{SCHEME}${iterations}${}${}",
        STANDARD.encode(salt),
        STANDARD.encode(hash)
    ))
}

/// Checks a password against a stored hash in constant time.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(hash), None) =
        (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(PasswordError::Malformed);
    };
    let iterations: NonZeroU32 = iterations.parse().map_err(|_| PasswordError::Malformed)?;
    let salt = STANDARD.decode(salt)?;
    let hash = STANDARD.decode(hash)?;

    Ok(pbkdf2::verify(pbkdf2::PBKDF2_HMAC_SHA256, iterations, &salt, password.as_bytes(), &hash).is_ok())
}
