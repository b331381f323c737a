use anyhow::{Context, Result};
use zstd::stream::{decode_all, encode_all};

/// Get the bincode configuration
fn get_config() -> impl bincode::config::Config {
    // Limit allocation to prevent memory exhaustion on corrupt data
    bincode::config::legacy().with_limit::<{ 512 * 1024 * 1024 }>() // 512MB limit
}

/// Serialize data using bincode v2.0 with serde
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn serialize<T: serde::Serialize>(data: &T) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(data, get_config()).map_err(Into::into)
}

/// Deserialize data using bincode v2.0 with serde
///
/// # Errors
///
/// Returns an error if the data is malformed or incompatible
pub fn deserialize<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (result, _bytes_read) = bincode::serde::decode_from_slice(bytes, get_config())?;
    Ok(result)
}

/// Serialize and compress with zstd at `level`
///
/// # Errors
///
/// Returns an error if serialization or compression fails
pub fn serialize_compressed<T: serde::Serialize>(data: &T, level: i32) -> Result<Vec<u8>> {
    let serialized = serialize(data)?;
    encode_all(&serialized[..], level).context("Failed to compress data")
}

/// Decompress zstd data and deserialize it
///
/// # Errors
///
/// Returns an error if the data is not valid zstd or cannot be deserialized
pub fn deserialize_compressed<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let decompressed = decode_all(bytes).context("Failed to decompress data")?;
    deserialize(&decompressed)
}
