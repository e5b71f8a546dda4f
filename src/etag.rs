//! Content Fingerprints for Conditional Requests

use std::io::{self, Read};

use sha1::{Digest, Sha1};

/// Hash the full content of a reader into a strong ETag value.
///
/// The digest is lowercase hex SHA-1 wrapped in double quotes, so it can
/// be compared byte-for-byte against an `If-None-Match` header.
pub fn generate_etag<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha1::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(format!("\"{}\"", hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag("Gin Web Framework".as_bytes()).unwrap();
        assert_eq!(etag.len(), 42);
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert!(
            etag[1..41]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
        assert_eq!(etag, generate_etag("Gin Web Framework".as_bytes()).unwrap());
        assert_ne!(etag, generate_etag("Gin Web Framework!".as_bytes()).unwrap());
    }

    #[test]
    fn test_generate_etag_known_digest() {
        let etag = generate_etag(io::empty()).unwrap();
        assert_eq!(etag, "\"da39a3ee5e6b4b0d3255bfef95601890afd80709\"");
    }
}
