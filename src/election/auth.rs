//! Administrator authentication.
//!
//! The election only asks an [`AdminAuthenticator`] whether a password is
//! acceptable; it never holds a secret itself. The shipped implementation
//! checks an Argon2 hash taken from the config file.

use rand::RngExt;

/// Decides whether a submitted admin password is accepted.
pub trait AdminAuthenticator {
    fn verify(&self, password: &str) -> bool;
}

/// Verifies passwords against an Argon2 encoded hash. With no hash configured
/// every attempt is rejected.
#[derive(Debug, Clone, Default)]
pub struct Argon2Authenticator {
    password_hash: Option<String>,
}

impl Argon2Authenticator {
    pub fn new(password_hash: Option<String>) -> Self {
        Self { password_hash }
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl AdminAuthenticator for Argon2Authenticator {
    fn verify(&self, password: &str) -> bool {
        let Some(ref hash) = self.password_hash else {
            return false;
        };
        match argon2::verify_encoded(hash, password.as_bytes()) {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!("configured admin password hash is unusable: {}", e);
                false
            }
        }
    }
}

/// Hash a password into the encoded form stored in `[admin] password_hash`.
pub fn hash_password(password: &str) -> Result<String, argon2::Error> {
    // 16 bytes of salt, as recommended for Argon2
    let salt: [u8; 16] = rand::rng().random();
    argon2::hash_encoded(password.as_bytes(), &salt, &argon2::Config::default())
}
