use rand::rngs::OsRng;
use rand::seq::SliceRandom;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*_+-";

/// Generate a random password that satisfies [`PasswordPolicy`](super::PasswordPolicy).
///
/// Characters are drawn round-robin from the lowercase, uppercase, digit and
/// symbol classes and then shuffled. Lengths below the policy minimum are
/// raised to it.
pub fn generate_password(length: usize) -> String {
    let length = length.max(super::PasswordPolicy::MIN_LENGTH);
    let classes = [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS];
    let mut rng = OsRng;

    let mut chars: Vec<char> = (0..length)
        .map(|i| {
            let class = classes[i % classes.len()];
            // Classes are non-empty constants
            class.choose(&mut rng).copied().unwrap_or(b'x') as char
        })
        .collect();
    chars.shuffle(&mut rng);

    chars.into_iter().collect()
}
