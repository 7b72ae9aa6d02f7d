//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols of which a password must contain at least one
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Minimum name length after trimming (in characters)
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum name length after trimming (in characters)
pub const MAX_NAME_LENGTH: usize = 50;

/// Shape accepted for email addresses: `local@domain.tld`
pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

// =============================================================================
// Credential hashing
// =============================================================================

/// Random salt size in bytes (256 bits)
pub const SALT_LENGTH: usize = 32;

/// Derived key size in bytes (256 bits)
pub const DERIVED_KEY_LENGTH: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count used for new credentials
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Argon2id memory cost in KiB used for new credentials
pub const ARGON2_MEMORY_KIB: u32 = 19_456;

/// Argon2id time cost used for new credentials
pub const ARGON2_ITERATIONS: u32 = 2;

/// Argon2id lanes used for new credentials
pub const ARGON2_PARALLELISM: u32 = 1;

/// Highest PBKDF2 iteration count accepted from a stored credential
pub const MAX_PBKDF2_ITERATIONS: u32 = 1_000_000;

/// Highest Argon2id memory cost in KiB accepted from a stored credential (256 MiB)
pub const MAX_ARGON2_MEMORY_KIB: u32 = 262_144;

/// Highest Argon2id time cost accepted from a stored credential
pub const MAX_ARGON2_ITERATIONS: u32 = 10;

/// Highest Argon2id lane count accepted from a stored credential
pub const MAX_ARGON2_PARALLELISM: u32 = 8;

/// Algorithm identifier for PBKDF2-HMAC-SHA256
pub const ALGORITHM_PBKDF2_SHA256: &str = "pbkdf2-sha256";

/// Algorithm identifier for Argon2id
pub const ALGORITHM_ARGON2ID: &str = "argon2id";

// =============================================================================
// Sign-up
// =============================================================================

/// Message returned when a sign-up targets an email that is already registered
pub const EMAIL_EXISTS_MESSAGE: &str = "Email already exists";
