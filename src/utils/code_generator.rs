//! Random short-code generation.

use rand::Rng;

/// Alphabet for generated codes: lowercase, uppercase, digits.
const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated short codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Generates a random 6-character alphanumeric short code.
///
/// Uniqueness is not guaranteed here; the registry checks each candidate
/// against active records and regenerates on collision.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_code_has_correct_length() {
        assert_eq!(generate_code().len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generated_code_is_alphanumeric() {
        let code = generate_code();
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_codes_vary() {
        let mut codes = HashSet::new();

        for _ in 0..100 {
            codes.insert(generate_code());
        }

        // 62^6 possibilities; 100 draws colliding down to one value would
        // mean the generator is broken.
        assert!(codes.len() > 1);
    }
}
