//! ID prefixes and client-side ID generation.
//!
//! IDs look like `prj-a3f8b2c1`: a three-letter entity prefix, a dash, and
//! eight lowercase hex characters from four random bytes. Uniqueness relies on
//! randomness only; nothing checks for collisions.

use crate::errors::CoreError;

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_EXPERIMENT: &str = "exp";
pub const PREFIX_PROPERTY: &str = "prp";
pub const PREFIX_ANIMAL: &str = "ani";
pub const PREFIX_ANIMAL_FIELD: &str = "apr";
pub const PREFIX_FIELD_DEF: &str = "fld";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PROJECT,
    PREFIX_EXPERIMENT,
    PREFIX_PROPERTY,
    PREFIX_ANIMAL,
    PREFIX_ANIMAL_FIELD,
    PREFIX_FIELD_DEF,
];

/// Generate a prefixed random ID, e.g. `"exp-0b9c44e1"`.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut buf = [0u8; 4];
    getrandom::fill(&mut buf)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("random source unavailable: {e}")))?;
    let hex: String = buf.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generate_id_correct_format() {
        let id = generate_id(PREFIX_EXPERIMENT).unwrap();
        assert!(id.starts_with("exp-"), "ID should start with 'exp-': {id}");
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generate_id_all_prefixes() {
        for prefix in ALL_PREFIXES {
            let id = generate_id(prefix).unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[test]
    fn generate_id_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = generate_id("tst").unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }
}
