use crate::error::Result;
use crate::storage::naming::derive_target_name;
use crate::storage::operations::ObjectStore;
use crate::storage::utils::path::share_path;
use opendal::Operator;

/// Executor for the hierarchical backend: a file share with real
/// directory semantics, addressed relative to the share root.
#[derive(Clone)]
pub struct ShareStore {
    operator: Operator,
}

impl ShareStore {
    /// Create a new store over an operator rooted at the share.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl ObjectStore for ShareStore {
    async fn copy(
        &self,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
    ) -> Result<String> {
        let src = share_path(source_folder, file_name);
        let dst = share_path(target_folder, file_name);

        log::debug!("share copy {src} -> {dst}");
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
        let src = share_path(source_folder, file_name);
        let dst = share_path(target_folder, &target_name);

        log::debug!("share move {src} -> {dst}");
        self.operator.copy(&src, &dst).await?;
        // Idempotent: a source that vanished after the copy is not an error
        self.operator.delete(&src).await?;

        Ok(format!(
            "{file_name} moved to {target_folder} as {target_name}"
        ))
    }

    async fn delete(&self, source_folder: &str, file_name: &str) -> Result<String> {
        let src = share_path(source_folder, file_name);

        log::debug!("share delete {src}");
        self.operator.delete(&src).await?;

        Ok(format!("{file_name} deleted"))
    }

    async fn exists(&self, source_folder: &str, file_name: &str) -> Result<bool> {
        let src = share_path(source_folder, file_name);
        Ok(self.operator.exists(&src).await?)
    }
}
