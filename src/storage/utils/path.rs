// Locator construction shared by the storage executors

/// Resolve a share-relative file path for the hierarchical backend.
///
/// An empty folder addresses the file directly under the share root; any
/// other folder yields `folder/file`. Separators and case are taken as
/// given, the request binding already lowercased folder names.
pub fn share_path(folder: &str, file_name: &str) -> String {
    if folder.is_empty() {
        file_name.to_string()
    } else {
        format!("{folder}/{file_name}")
    }
}

/// Resolve a blob key within a container for the flat backend.
///
/// The folder prefix is always joined with '/', so an empty folder yields a
/// key with a leading slash ("/name"). Deployed integrations address their
/// root-level blobs under exactly that key shape, so the join stays literal.
pub fn blob_key(folder: &str, file_name: &str) -> String {
    format!("{folder}/{file_name}")
}
