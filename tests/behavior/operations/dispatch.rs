use crate::*;
use filegate::dispatch::{Dispatcher, OperationRequest, Status};
use filegate::error::Result;
use filegate::storage::BackendKind;
use filegate::storage::naming::derive_target_name;
use filegate::storage::utils::path::{blob_key, share_path};

pub fn tests(dispatcher: &Dispatcher, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        dispatcher,
        test_missing_operation_is_incomplete,
        test_unknown_operation_reports_invalid,
        test_missing_file_reports_error,
        test_blob_operation_without_container_reports_error,
        test_binding_is_case_insensitive_first_match_wins,
        test_binding_preserves_file_case,
        test_locator_shapes,
        test_stamped_name_derivation,
        test_envelope_serializes_pascal_case
    ));
}

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

async fn test_missing_operation_is_incomplete(dispatcher: Dispatcher) -> Result<()> {
    let request = OperationRequest::from_query(&pairs(&[("file", "a.txt")]));
    let envelope = dispatcher.dispatch(request).await;

    assert_eq!(envelope.status, Status::Incomplete);
    assert_eq!(envelope.message, "Missing value for parameter : operation");

    Ok(())
}

async fn test_unknown_operation_reports_invalid(dispatcher: Dispatcher) -> Result<()> {
    let request = OperationRequest::from_query(&pairs(&[("op", "shred"), ("file", "a.txt")]));
    let envelope = dispatcher.dispatch(request).await;

    // An unknown name still reports overall success; only the operation
    // echo flips to Invalid
    assert_eq!(envelope.status, Status::Ok);
    assert_eq!(envelope.operation.as_deref(), Some("Invalid"));
    assert_eq!(envelope.message, "Completed");

    Ok(())
}

async fn test_missing_file_reports_error(dispatcher: Dispatcher) -> Result<()> {
    let request = OperationRequest::from_query(&pairs(&[("op", "exist"), ("type", "file")]));
    let envelope = dispatcher.dispatch(request).await;

    assert_eq!(envelope.status, Status::Error);
    assert_eq!(envelope.message, "Missing value for parameter : file");

    Ok(())
}

async fn test_blob_operation_without_container_reports_error(dispatcher: Dispatcher) -> Result<()> {
    let request = OperationRequest::from_query(&pairs(&[("op", "exist"), ("file", "a.txt")]));
    let envelope = dispatcher.dispatch(request).await;

    assert_eq!(envelope.status, Status::Error);
    assert!(envelope.message.contains("Missing value for parameter : container"));

    Ok(())
}

async fn test_binding_is_case_insensitive_first_match_wins(_dispatcher: Dispatcher) -> Result<()> {
    let request = OperationRequest::from_query(&pairs(&[
        ("OP", "Exist"),
        ("op", "copy"),
        ("Type", "FILE"),
        ("InputFolder", "Inbox"),
        ("PREFIXDATETIME", "Y"),
    ]));

    assert_eq!(request.operation.as_deref(), Some("exist"));
    assert_eq!(request.backend, BackendKind::File);
    assert_eq!(request.input_folder, "inbox");
    assert!(request.prefix_timestamp);

    Ok(())
}

async fn test_binding_preserves_file_case(_dispatcher: Dispatcher) -> Result<()> {
    let request = OperationRequest::from_query(&pairs(&[
        ("op", "exist"),
        ("file", "Report-Q3.CSV"),
        ("inputfolder", "Archive"),
        ("targetfolder", "Done"),
        ("container", "Landing"),
    ]));

    // The file addresses a real object and keeps its case; folders and
    // container are matched against lowercased vocabularies downstream
    assert_eq!(request.file.as_deref(), Some("Report-Q3.CSV"));
    assert_eq!(request.input_folder, "archive");
    assert_eq!(request.target_folder.as_deref(), Some("done"));
    assert_eq!(request.container.as_deref(), Some("landing"));

    Ok(())
}

async fn test_locator_shapes(_dispatcher: Dispatcher) -> Result<()> {
    assert_eq!(share_path("inbox", "a.txt"), "inbox/a.txt");
    assert_eq!(share_path("", "a.txt"), "a.txt");

    assert_eq!(blob_key("inbox", "a.txt"), "inbox/a.txt");
    // The flat join is literal: an empty folder keeps the leading slash
    assert_eq!(blob_key("", "a.txt"), "/a.txt");

    Ok(())
}

async fn test_stamped_name_derivation(_dispatcher: Dispatcher) -> Result<()> {
    assert_eq!(derive_target_name("report.csv", false), "report.csv");

    let stamped = derive_target_name("report.csv", true);
    let stamp = stamped
        .strip_prefix("report_")
        .expect("base name kept")
        .strip_suffix(".csv")
        .expect("extension kept");
    assert_eq!(stamp.len(), 14);
    assert!(stamp.chars().all(|c| c.is_ascii_digit()));

    let no_ext = derive_target_name("readme", true);
    let stamp = no_ext.strip_prefix("readme_").expect("base name kept");
    assert_eq!(stamp.len(), 14);
    assert!(stamp.chars().all(|c| c.is_ascii_digit()));

    // Split is at the last dot
    let dotted = derive_target_name("archive.tar.gz", true);
    assert!(dotted.starts_with("archive.tar_"));
    assert!(dotted.ends_with(".gz"));

    Ok(())
}

async fn test_envelope_serializes_pascal_case(dispatcher: Dispatcher) -> Result<()> {
    let request = OperationRequest::from_query(&pairs(&[("op", "shred"), ("file", "a.txt")]));
    let envelope = dispatcher.dispatch(request).await;
    let value = serde_json::to_value(&envelope).expect("envelope serializes");

    for key in [
        "Operation",
        "InputFolder",
        "File",
        "Type",
        "TargetFolder",
        "Status",
        "Message",
        "Exists",
        "Body",
        "PrefixDateTime",
        "Container",
    ] {
        assert!(value.get(key).is_some(), "missing envelope field {key}");
    }
    assert_eq!(value["Type"], "blob");
    assert_eq!(value["Status"], "Ok");

    Ok(())
}
