//! Shared name validation and alternative-name generation for storage backends.

use rand::distr::Alphanumeric;
use rand::Rng;

use crate::traits::{StorageError, StorageResult};

const ALTERNATE_SUFFIX_LEN: usize = 7;

/// Reject names that are empty or could escape the storage root.
pub fn validate_name(name: &str) -> StorageResult<()> {
    if name.is_empty() {
        return Err(StorageError::InvalidKey(
            "Storage name cannot be empty".to_string(),
        ));
    }
    if name.starts_with('/') || name.contains('\\') || name.contains('\0') {
        return Err(StorageError::InvalidKey(
            "Storage name contains invalid characters".to_string(),
        ));
    }
    if name.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(
            "Storage name contains a parent directory segment".to_string(),
        ));
    }
    Ok(())
}

/// Split `dir/root.ext` into (`dir/`, `root`, `.ext`).
///
/// A leading dot does not start an extension (`.env` has none).
fn split_name(name: &str) -> (&str, &str, &str) {
    let (dir, file) = match name.rfind('/') {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    };
    let stem_start = file.len() - file.trim_start_matches('.').len();
    match file[stem_start..].rfind('.') {
        Some(idx) => {
            let (root, ext) = file.split_at(stem_start + idx);
            (dir, root, ext)
        }
        None => (dir, file, ""),
    }
}

/// Variant of `name` with `_` and random alphanumerics inserted before the
/// extension: `uploads/a.png` becomes `uploads/a_X7pQ2kd.png`.
pub fn alternate_name(name: &str) -> String {
    let (dir, root, ext) = split_name(name);
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ALTERNATE_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}{}_{}{}", dir, root, suffix, ext)
}

/// Percent-encode each path segment, keeping the separators.
pub fn encode_path(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
