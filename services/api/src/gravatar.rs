//! Gravatar avatar URLs

use md5::{Digest, Md5};

/// Avatar URL for `email`: 200px, PG rated, "mystery man" fallback
pub fn gravatar_url(email: &str) -> String {
    let digest = Md5::digest(email.trim().to_lowercase().as_bytes());
    format!(
        "//www.gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}
