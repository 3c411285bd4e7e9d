//! Random ids for annotations created on the canvas.

use rand::Rng;

/// Generate a 32-hex-digit random id.
///
/// Collision odds over the lifetime of a project are negligible; the ids
/// only need to be unique within one workflow's annotation lists.
pub fn generate() -> String {
    let value: u128 = rand::rng().random();
    format!("{value:032x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_well_formed_and_distinct() {
        let a = generate();
        let b = generate();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
