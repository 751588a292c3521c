use crate::error::Result;
use crate::storage::naming::derive_target_name;
use crate::storage::operations::ObjectStore;
use crate::storage::utils::path::blob_key;
use opendal::Operator;

/// Executor for the flat backend: a single container namespace where
/// folders exist only as '/'-separated key prefixes. One store per
/// container; the operator is already scoped to it.
#[derive(Clone)]
pub struct BlobStore {
    operator: Operator,
}

impl BlobStore {
    /// Create a new store over an operator scoped to one container.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl ObjectStore for BlobStore {
    async fn copy(
        &self,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
    ) -> Result<String> {
        let src = blob_key(source_folder, file_name);
        let dst = blob_key(target_folder, file_name);

        log::debug!("blob copy {src} -> {dst}");
        self.operator.copy(&src, &dst).await?;

        Ok(format!("{file_name} copied to {target_folder}"))
    }

    async fn mv(
        &self,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
        stamp_target: bool,
    ) -> Result<String> {
        let target_name = derive_target_name(file_name, stamp_target);
        let src = blob_key(source_folder, file_name);
        let dst = blob_key(target_folder, &target_name);

        log::debug!("blob move {src} -> {dst}");
        self.operator.copy(&src, &dst).await?;
        self.operator.delete(&src).await?;

        Ok(format!(
            "{file_name} moved to {target_folder} as {target_name}"
        ))
    }

    async fn delete(&self, source_folder: &str, file_name: &str) -> Result<String> {
        let src = blob_key(source_folder, file_name);

        log::debug!("blob delete {src}");
        self.operator.delete(&src).await?;

        Ok(format!("{file_name} deleted"))
    }

    async fn exists(&self, source_folder: &str, file_name: &str) -> Result<bool> {
        let src = blob_key(source_folder, file_name);
        Ok(self.operator.exists(&src).await?)
    }
}
