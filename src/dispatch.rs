//! Typed request binding and the per-request dispatch state machine.

use crate::error::{MissingParameterSnafu, Result};
use crate::storage::operations::OperationKind;
use crate::storage::{BackendKind, OperationPolicy, StorageGateway};
use serde::Serialize;
use snafu::OptionExt;

const COMPLETED: &str = "Completed";
const INVALID_OPERATION: &str = "Invalid";

/// One inbound gateway request, bound from the query string.
///
/// Folder, container and operation values arrive lowercased; the file name
/// keeps its case because it addresses a real object.
#[derive(Debug, Clone, Default)]
pub struct OperationRequest {
    pub operation: Option<String>,
    pub backend: BackendKind,
    pub input_folder: String,
    pub file: Option<String>,
    pub target_folder: Option<String>,
    pub container: Option<String>,
    pub prefix_timestamp: bool,
    pub body: Option<String>,
}

impl OperationRequest {
    /// Bind a request from decoded query pairs.
    ///
    /// Parameter names match case-insensitively and the first pair wins, so
    /// callers sending duplicate or oddly-cased names keep working.
    pub fn from_query(pairs: &[(String, String)]) -> Self {
        let operation = first_match(pairs, "op").map(|v| v.to_lowercase());
        let backend = BackendKind::from_query_value(
            first_match(pairs, "type").map(|v| v.to_lowercase()).as_deref(),
        );
        let input_folder = first_match(pairs, "inputfolder")
            .map(|v| v.to_lowercase())
            .unwrap_or_default();
        let file = first_match(pairs, "file").map(str::to_string);
        let target_folder = first_match(pairs, "targetfolder").map(|v| v.to_lowercase());
        let container = first_match(pairs, "container").map(|v| v.to_lowercase());
        let prefix_timestamp =
            first_match(pairs, "prefixdatetime").map(|v| v.to_lowercase()).as_deref() == Some("y");

        Self {
            operation,
            backend,
            input_folder,
            file,
            target_folder,
            container,
            prefix_timestamp,
            body: None,
        }
    }
}

fn first_match<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Terminal request status.
///
/// `Invalid` is part of the wire vocabulary for compatibility; the
/// dispatcher reports unrecognized operation names through the operation
/// field instead and never produces it as a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Ok,
    Incomplete,
    Error,
    Invalid,
}

/// The uniform response body. Built fresh per request, never persisted.
///
/// Serializes in PascalCase to match the wire format existing callers
/// already parse.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultEnvelope {
    pub operation: Option<String>,
    pub input_folder: String,
    pub file: Option<String>,
    #[serde(rename = "Type")]
    pub backend: BackendKind,
    pub target_folder: Option<String>,
    pub status: Status,
    pub message: String,
    pub exists: bool,
    pub body: Option<String>,
    pub prefix_date_time: bool,
    pub container: Option<String>,
}

impl ResultEnvelope {
    fn from_request(request: &OperationRequest) -> Self {
        Self {
            operation: request.operation.clone(),
            input_folder: request.input_folder.clone(),
            file: request.file.clone(),
            backend: request.backend,
            target_folder: request.target_folder.clone(),
            status: Status::Ok,
            message: String::new(),
            exists: false,
            body: request.body.clone(),
            prefix_date_time: request.prefix_timestamp,
            container: request.container.clone(),
        }
    }
}

enum Outcome {
    Message(String),
    Exists(bool),
}

/// Routes one bound request to the matching backend executor and folds the
/// result, whatever happened, into a `ResultEnvelope`.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: StorageGateway,
    policy: OperationPolicy,
}

impl Dispatcher {
    pub fn new(gateway: StorageGateway, policy: OperationPolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn gateway(&self) -> &StorageGateway {
        &self.gateway
    }

    /// Run one request to its terminal state. Never returns an error: every
    /// failure is folded into the envelope's status and message.
    pub async fn dispatch(&self, request: OperationRequest) -> ResultEnvelope {
        let mut envelope = ResultEnvelope::from_request(&request);

        let Some(operation) = request.operation.as_deref() else {
            log::info!("operation parameter value missing");
            envelope.status = Status::Incomplete;
            envelope.message = MissingParameterSnafu { name: "operation" }.build().to_string();
            return envelope;
        };

        log::info!("operation requested: {operation}");

        let Some(kind) = OperationKind::parse(operation) else {
            // An unknown operation name reports overall success with an
            // inert operation field; existing callers branch on the
            // Operation echo rather than on Status.
            envelope.operation = Some(INVALID_OPERATION.to_string());
            envelope.message = COMPLETED.to_string();
            return envelope;
        };

        match self.execute(kind, &request).await {
            Ok(Outcome::Message(message)) => {
                envelope.message = if message.is_empty() {
                    COMPLETED.to_string()
                } else {
                    message
                };
            }
            Ok(Outcome::Exists(exists)) => {
                envelope.exists = exists;
                envelope.message = COMPLETED.to_string();
            }
            Err(e) => {
                log::error!("operation failed: {e}");
                envelope.status = Status::Error;
                envelope.message = e.to_string();
            }
        }

        envelope
    }

    async fn execute(&self, kind: OperationKind, request: &OperationRequest) -> Result<Outcome> {
        let file = request
            .file
            .as_deref()
            .context(MissingParameterSnafu { name: "file" })?;

        if let Some(denial) = self.policy.denial(request.backend, kind) {
            log::info!("operation denied by policy: {denial}");
            return Ok(Outcome::Message(denial.to_string()));
        }

        let backend = request.backend;
        let container = request.container.as_deref();
        let folder = request.input_folder.as_str();

        match kind {
            OperationKind::Copy => {
                let target = request
                    .target_folder
                    .as_deref()
                    .context(MissingParameterSnafu {
                        name: "targetfolder",
                    })?;
                let message = self
                    .gateway
                    .copy_object(backend, container, folder, file, target)
                    .await?;
                Ok(Outcome::Message(message))
            }
            OperationKind::Move => {
                let target = request
                    .target_folder
                    .as_deref()
                    .context(MissingParameterSnafu {
                        name: "targetfolder",
                    })?;
                let message = self
                    .gateway
                    .move_object(
                        backend,
                        container,
                        folder,
                        file,
                        target,
                        request.prefix_timestamp,
                    )
                    .await?;
                Ok(Outcome::Message(message))
            }
            OperationKind::Delete => {
                let message = self
                    .gateway
                    .delete_object(backend, container, folder, file)
                    .await?;
                Ok(Outcome::Message(message))
            }
            OperationKind::Exist => {
                let exists = self
                    .gateway
                    .object_exists(backend, container, folder, file)
                    .await?;
                Ok(Outcome::Exists(exists))
            }
        }
    }
}
