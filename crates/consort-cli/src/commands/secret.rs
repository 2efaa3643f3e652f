//! Secret helpers.
//!
//! `consort secret generate` - Generate a random signing secret.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Generate a random alphanumeric secret of `length` characters.
pub fn generate(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secret() {
        let a = generate(32);
        let b = generate(32);

        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
        assert!(generate(0).is_empty());
    }
}
