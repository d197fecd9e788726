mod error;
pub mod specs;

use std::{fs, path::Path};

use serde::de::DeserializeOwned;

pub use error::{Error, Result};

/// Parses some exchange type from a JSON string.
///
/// # Arguments
/// * `s` - The JSON document.
///
/// # Returns
/// The parsed value or an error if the document is invalid.
pub fn from_str<T: DeserializeOwned>(s: &str) -> Result<T> {
    Ok(serde_json::from_str(s)?)
}

/// Reads and parses some exchange type from a JSON file.
///
/// # Arguments
/// * `path` - The path of the JSON file.
///
/// # Returns
/// The parsed value or an error if the file can't be read or is invalid.
pub fn from_path<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    from_str(&content)
}
