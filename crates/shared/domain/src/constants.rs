//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Posts
// =============================================================================

/// Maximum post length in characters, measured after filtering
pub const MAX_POST_LENGTH: usize = 140;

/// Words masked by the content filter (compared lowercase)
pub const CENSORED_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];

/// Replacement written in place of a censored word
pub const CENSOR_MASK: &str = "****";

// =============================================================================
// Authentication
// =============================================================================

/// Issuer claim stamped on every access token
pub const TOKEN_ISSUER: &str = "chirpy";

/// Default access token lifetime in seconds (1 hour)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 3600;

/// Default refresh token lifetime in seconds (1 hour)
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 3600;

/// Number of random bytes behind a refresh token (hex encoded on the wire)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Authorization header prefix for webhook API keys
pub const API_KEY_PREFIX: &str = "ApiKey ";

// =============================================================================
// Webhooks
// =============================================================================

/// Payment provider event that upgrades a user to Chirpy Red
pub const EVENT_USER_UPGRADED: &str = "user.upgraded";
