use std::env;
use std::str::FromStr;

use crate::error::Result;
use crate::storage::constants::DEFAULT_FS_ROOT;
use crate::storage::{GatewayConfig, StorageProvider};

// Optional lookup across a primary and a legacy environment key.
fn env_var_opt(primary_key: &str, secondary_key: &str) -> Option<String> {
    env::var(primary_key)
        .or_else(|_| env::var(secondary_key))
        .ok()
}

/// Load gateway configuration from environment variables.
///
/// Only an unknown provider name fails here. Absent credentials or share
/// name load as `None` and surface as an error on the first operation that
/// needs them.
pub fn load_gateway_config() -> Result<GatewayConfig> {
    let provider_str = env::var("STORAGE_PROVIDER").unwrap_or_else(|_| "azure".to_string());
    let provider = StorageProvider::from_str(&provider_str)?;

    match provider {
        StorageProvider::Azure => Ok(load_azure_config()),
        StorageProvider::Fs => Ok(load_fs_config()),
        StorageProvider::Memory => Ok(GatewayConfig::memory()),
    }
}

/// Load Azure storage configuration
fn load_azure_config() -> GatewayConfig {
    let account = env_var_opt("STORAGE_ACCOUNT", "AZURE_STORAGE_ACCOUNT");
    let access_key = env_var_opt("STORAGE_ACCESS_KEY", "AZURE_STORAGE_KEY");
    let file_share = env_var_opt("STORAGE_FILE_SHARE", "FILE_SHARE");

    let mut config = GatewayConfig::azure(account, access_key, file_share);
    // Explicit endpoints override the account-derived ones; mainly for the
    // Azurite emulator.
    config.file_endpoint = env::var("STORAGE_FILE_ENDPOINT").ok();
    config.blob_endpoint = env::var("STORAGE_BLOB_ENDPOINT").ok();
    config
}

/// Load filesystem configuration (for local runs and testing)
fn load_fs_config() -> GatewayConfig {
    let root_path = env::var("STORAGE_ROOT_PATH").unwrap_or_else(|_| DEFAULT_FS_ROOT.to_string());
    GatewayConfig::fs(root_path)
}
