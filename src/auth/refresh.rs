use base64::Engine;
use rand::{rngs::OsRng, RngCore};

/// Refresh tokens live for 60 days after creation
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Generate an opaque refresh token: 256 bits from the OS random source,
/// base64url-encoded. Unlike access tokens these carry no structure; their
/// only property is being unguessable.
pub fn make_refresh_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
