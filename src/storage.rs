use crate::error::{Error, MissingEnvVarSnafu, MissingParameterSnafu, Result};
use crate::wrap_err;
use opendal::Operator;
use opendal::layers::{LoggingLayer, TimeoutLayer};
use serde::Serialize;
use snafu::OptionExt;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub mod constants;
pub mod naming;
pub mod operations;
pub mod utils;

use self::constants::{
    DEFAULT_ENDPOINT_SUFFIX, DEFAULT_FS_ROOT, DEFAULT_FS_SHARE, REMOTE_OP_TIMEOUT_SECS,
};
use self::operations::{BlobStore, ObjectStore, OperationKind, ShareStore};

/// Storage provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    Azure,
    Fs,
    Memory,
}

impl FromStr for StorageProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "azure" => Ok(Self::Azure),
            "fs" => Ok(Self::Fs),
            "memory" => Ok(Self::Memory),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Backend addressing scheme an operation runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// File share with real directory semantics.
    File,
    /// Container namespace where folders are key prefixes.
    #[default]
    Blob,
}

impl BackendKind {
    /// Backend selection from the raw `type` query value. Only the literal
    /// "file" selects the share backend; anything else, including an absent
    /// parameter, routes to blob.
    pub fn from_query_value(value: Option<&str>) -> Self {
        match value {
            Some("file") => Self::File,
            _ => Self::Blob,
        }
    }
}

/// Unified gateway configuration for the supported providers
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub provider: StorageProvider,
    pub account: Option<String>,
    pub access_key: Option<String>,
    pub file_share: Option<String>,
    pub file_endpoint: Option<String>,
    pub blob_endpoint: Option<String>,
    pub root_path: Option<String>,
}

impl GatewayConfig {
    /// Azure configuration. Absent fields are tolerated here and rejected
    /// by the first operation that needs them.
    pub fn azure(
        account: Option<String>,
        access_key: Option<String>,
        file_share: Option<String>,
    ) -> Self {
        Self {
            provider: StorageProvider::Azure,
            account,
            access_key,
            file_share,
            file_endpoint: None,
            blob_endpoint: None,
            root_path: None,
        }
    }

    pub fn fs(root_path: String) -> Self {
        Self {
            provider: StorageProvider::Fs,
            account: None,
            access_key: None,
            file_share: None,
            file_endpoint: None,
            blob_endpoint: None,
            root_path: Some(root_path),
        }
    }

    pub fn memory() -> Self {
        Self {
            provider: StorageProvider::Memory,
            account: None,
            access_key: None,
            file_share: None,
            file_endpoint: None,
            blob_endpoint: None,
            root_path: None,
        }
    }
}

/// Allow table keyed on backend and operation. A denied pair never reaches
/// the backend; the dispatcher answers with the pair's fixed message.
#[derive(Debug, Clone)]
pub struct OperationPolicy {
    denied: Vec<(BackendKind, OperationKind, &'static str)>,
}

impl OperationPolicy {
    /// Message to answer with when the pair is denied, `None` when allowed.
    pub fn denial(&self, backend: BackendKind, operation: OperationKind) -> Option<&'static str> {
        self.denied
            .iter()
            .find(|(b, o, _)| *b == backend && *o == operation)
            .map(|(_, _, message)| *message)
    }
}

impl Default for OperationPolicy {
    /// Deleting out of a blob container is disabled; everything else runs.
    fn default() -> Self {
        Self {
            denied: vec![(
                BackendKind::Blob,
                OperationKind::Delete,
                "delete operation not allowed",
            )],
        }
    }
}

/// Backend store selected for one request.
pub enum BackendStore {
    Share(ShareStore),
    Blob(BlobStore),
}

impl ObjectStore for BackendStore {
    async fn copy(
        &self,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
    ) -> Result<String> {
        match self {
            Self::Share(store) => store.copy(source_folder, file_name, target_folder).await,
            Self::Blob(store) => store.copy(source_folder, file_name, target_folder).await,
        }
    }

    async fn mv(
        &self,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
        stamp_target: bool,
    ) -> Result<String> {
        match self {
            Self::Share(store) => {
                store
                    .mv(source_folder, file_name, target_folder, stamp_target)
                    .await
            }
            Self::Blob(store) => {
                store
                    .mv(source_folder, file_name, target_folder, stamp_target)
                    .await
            }
        }
    }

    async fn delete(&self, source_folder: &str, file_name: &str) -> Result<String> {
        match self {
            Self::Share(store) => store.delete(source_folder, file_name).await,
            Self::Blob(store) => store.delete(source_folder, file_name).await,
        }
    }

    async fn exists(&self, source_folder: &str, file_name: &str) -> Result<bool> {
        match self {
            Self::Share(store) => store.exists(source_folder, file_name).await,
            Self::Blob(store) => store.exists(source_folder, file_name).await,
        }
    }
}

/// Factory and cache for backend operators, plus the wrapped operation
/// entry points the dispatcher calls.
///
/// Operators build lazily on first use, so missing credentials surface as
/// an operation error rather than failing startup. Built operators are
/// cached per share/container and shared across requests.
#[derive(Clone)]
pub struct StorageGateway {
    config: GatewayConfig,
    share: Arc<Mutex<Option<Operator>>>,
    containers: Arc<Mutex<HashMap<String, Operator>>>,
}

impl StorageGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            share: Arc::new(Mutex::new(None)),
            containers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Operator rooted at the file share, built on first use.
    pub fn share_operator(&self) -> Result<Operator> {
        let mut cache = self.share.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(operator) = cache.as_ref() {
            return Ok(operator.clone());
        }
        let operator = Self::build_share_operator(&self.config)?;
        *cache = Some(operator.clone());
        Ok(operator)
    }

    /// Operator scoped to one blob container, built on first use.
    pub fn container_operator(&self, container: &str) -> Result<Operator> {
        let mut cache = self.containers.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(operator) = cache.get(container) {
            return Ok(operator.clone());
        }
        let operator = Self::build_container_operator(&self.config, container)?;
        cache.insert(container.to_string(), operator.clone());
        Ok(operator)
    }

    /// Select the executor for a backend. Blob operations require the
    /// container the request is scoped to.
    pub fn store_for(&self, backend: BackendKind, container: Option<&str>) -> Result<BackendStore> {
        match backend {
            BackendKind::File => Ok(BackendStore::Share(ShareStore::new(self.share_operator()?))),
            BackendKind::Blob => {
                let container = container.context(MissingParameterSnafu { name: "container" })?;
                Ok(BackendStore::Blob(BlobStore::new(
                    self.container_operator(container)?,
                )))
            }
        }
    }

    pub async fn copy_object(
        &self,
        backend: BackendKind,
        container: Option<&str>,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
    ) -> Result<String> {
        log::debug!(
            "copy_object backend={:?} container={:?} source_folder={} file={} target_folder={}",
            backend,
            container,
            source_folder,
            file_name,
            target_folder
        );
        let store = self.store_for(backend, container)?;
        wrap_err!(
            store.copy(source_folder, file_name, target_folder).await,
            CopyFailed {
                folder: source_folder.to_string(),
                file: file_name.to_string(),
                target: target_folder.to_string()
            }
        )
    }

    pub async fn move_object(
        &self,
        backend: BackendKind,
        container: Option<&str>,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
        stamp_target: bool,
    ) -> Result<String> {
        log::debug!(
            "move_object backend={:?} container={:?} source_folder={} file={} target_folder={} stamp={}",
            backend,
            container,
            source_folder,
            file_name,
            target_folder,
            stamp_target
        );
        let store = self.store_for(backend, container)?;
        wrap_err!(
            store
                .mv(source_folder, file_name, target_folder, stamp_target)
                .await,
            MoveFailed {
                folder: source_folder.to_string(),
                file: file_name.to_string(),
                target: target_folder.to_string()
            }
        )
    }

    pub async fn delete_object(
        &self,
        backend: BackendKind,
        container: Option<&str>,
        source_folder: &str,
        file_name: &str,
    ) -> Result<String> {
        log::debug!(
            "delete_object backend={:?} container={:?} source_folder={} file={}",
            backend,
            container,
            source_folder,
            file_name
        );
        let store = self.store_for(backend, container)?;
        wrap_err!(
            store.delete(source_folder, file_name).await,
            DeleteFailed {
                folder: source_folder.to_string(),
                file: file_name.to_string()
            }
        )
    }

    pub async fn object_exists(
        &self,
        backend: BackendKind,
        container: Option<&str>,
        source_folder: &str,
        file_name: &str,
    ) -> Result<bool> {
        log::debug!(
            "object_exists backend={:?} container={:?} source_folder={} file={}",
            backend,
            container,
            source_folder,
            file_name
        );
        let store = self.store_for(backend, container)?;
        wrap_err!(
            store.exists(source_folder, file_name).await,
            ExistsFailed {
                folder: source_folder.to_string(),
                file: file_name.to_string()
            }
        )
    }

    fn build_share_operator(config: &GatewayConfig) -> Result<Operator> {
        let operator = match config.provider {
            StorageProvider::Azure => {
                let account = config
                    .account
                    .as_deref()
                    .context(MissingEnvVarSnafu {
                        key: "STORAGE_ACCOUNT",
                    })?;
                let access_key = config
                    .access_key
                    .as_deref()
                    .context(MissingEnvVarSnafu {
                        key: "STORAGE_ACCESS_KEY",
                    })?;
                let share = config
                    .file_share
                    .as_deref()
                    .context(MissingEnvVarSnafu {
                        key: "STORAGE_FILE_SHARE",
                    })?;
                let endpoint = config.file_endpoint.clone().unwrap_or_else(|| {
                    format!("https://{account}.file.{DEFAULT_ENDPOINT_SUFFIX}")
                });
                let builder = opendal::services::Azfile::default()
                    .endpoint(&endpoint)
                    .share_name(share)
                    .account_name(account)
                    .account_key(access_key);
                Operator::new(builder)?.finish()
            }
            StorageProvider::Fs => {
                let root = config.root_path.as_deref().unwrap_or(DEFAULT_FS_ROOT);
                let share = config.file_share.as_deref().unwrap_or(DEFAULT_FS_SHARE);
                let builder = opendal::services::Fs::default().root(&format!("{root}/{share}"));
                Operator::new(builder)?.finish()
            }
            StorageProvider::Memory => {
                Operator::new(opendal::services::Memory::default())?.finish()
            }
        };
        Ok(Self::apply_layers(operator))
    }

    fn build_container_operator(config: &GatewayConfig, container: &str) -> Result<Operator> {
        let operator = match config.provider {
            StorageProvider::Azure => {
                let account = config
                    .account
                    .as_deref()
                    .context(MissingEnvVarSnafu {
                        key: "STORAGE_ACCOUNT",
                    })?;
                let access_key = config
                    .access_key
                    .as_deref()
                    .context(MissingEnvVarSnafu {
                        key: "STORAGE_ACCESS_KEY",
                    })?;
                let endpoint = config.blob_endpoint.clone().unwrap_or_else(|| {
                    format!("https://{account}.blob.{DEFAULT_ENDPOINT_SUFFIX}")
                });
                let builder = opendal::services::Azblob::default()
                    .endpoint(&endpoint)
                    .container(container)
                    .account_name(account)
                    .account_key(access_key);
                Operator::new(builder)?.finish()
            }
            StorageProvider::Fs => {
                let root = config.root_path.as_deref().unwrap_or(DEFAULT_FS_ROOT);
                let builder =
                    opendal::services::Fs::default().root(&format!("{root}/{container}"));
                Operator::new(builder)?.finish()
            }
            StorageProvider::Memory => {
                Operator::new(opendal::services::Memory::default())?.finish()
            }
        };
        Ok(Self::apply_layers(operator))
    }

    fn apply_layers(operator: Operator) -> Operator {
        operator.layer(LoggingLayer::default()).layer(
            TimeoutLayer::new().with_timeout(Duration::from_secs(REMOTE_OP_TIMEOUT_SECS)),
        )
    }
}
