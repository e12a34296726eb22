//! Username derivation from a first name

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of the random part appended to every username
pub const USERNAME_SUFFIX_LENGTH: usize = 10;

/// Lowercased first name with every space removed
pub fn username_stem(first_name: &str) -> String {
    first_name.replace(' ', "").to_lowercase()
}

/// Build `<stem>-<suffix>` drawing the suffix from `rng`.
///
/// No uniqueness check is made; collisions are left to suffix entropy.
pub fn build_username<R>(first_name: &str, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(USERNAME_SUFFIX_LENGTH)
        .map(char::from)
        .collect();

    format!("{}-{}", username_stem(first_name), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_username_stem() {
        assert_eq!(username_stem("John"), "john");
        assert_eq!(username_stem("Mary Jane Watson"), "maryjanewatson");
        assert_eq!(username_stem(" Ana "), "ana");
        assert_eq!(username_stem("ÉLODIE"), "élodie");
    }

    #[test]
    fn test_build_username_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let username = build_username("Mary Jane", &mut rng);

        let (stem, suffix) = username.split_once('-').unwrap();
        assert_eq!(stem, "maryjane");
        assert_eq!(suffix.len(), USERNAME_SUFFIX_LENGTH);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_build_username_deterministic_with_seed() {
        let first = build_username("John", &mut StdRng::seed_from_u64(42));
        let second = build_username("John", &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_username_suffix_varies() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = build_username("John", &mut rng);
        let second = build_username("John", &mut rng);
        assert_ne!(first, second);
    }
}
