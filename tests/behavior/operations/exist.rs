use crate::*;
use filegate::dispatch::{Dispatcher, Status};
use filegate::error::Result;

pub fn tests(dispatcher: &Dispatcher, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        dispatcher,
        test_share_exist_false_then_true_after_copy,
        test_blob_exist_scoped_to_container,
        test_blob_exist_at_container_root
    ));
}

async fn test_share_exist_false_then_true_after_copy(dispatcher: Dispatcher) -> Result<()> {
    let src_dir = unique_folder();
    let dst_dir = unique_folder();
    let file = unique_file("txt");

    let before = dispatcher.dispatch(share_request("exist", &dst_dir, &file)).await;
    assert_eq!(before.status, Status::Ok);
    assert!(!before.exists);

    seed_share(&dispatcher, &format!("{src_dir}/{file}"), b"now present").await?;
    let mut copy = share_request("copy", &src_dir, &file);
    copy.target_folder = Some(dst_dir.clone());
    assert_eq!(dispatcher.dispatch(copy).await.status, Status::Ok);

    let after = dispatcher.dispatch(share_request("exist", &dst_dir, &file)).await;
    assert_eq!(after.status, Status::Ok);
    assert!(after.exists);

    Ok(())
}

async fn test_blob_exist_scoped_to_container(dispatcher: Dispatcher) -> Result<()> {
    let dir = unique_folder();
    let file = unique_file("dat");
    seed_container(&dispatcher, TEST_CONTAINER, &format!("{dir}/{file}"), b"here").await?;

    let found = dispatcher.dispatch(blob_request("exist", &dir, &file)).await;
    assert_eq!(found.status, Status::Ok);
    assert!(found.exists);

    // Same key, different container: not found
    let mut elsewhere = blob_request("exist", &dir, &file);
    elsewhere.container = Some("other".to_string());
    let missing = dispatcher.dispatch(elsewhere).await;
    assert_eq!(missing.status, Status::Ok);
    assert!(!missing.exists);

    Ok(())
}

async fn test_blob_exist_at_container_root(dispatcher: Dispatcher) -> Result<()> {
    // An empty folder resolves to a leading-slash key; the backend
    // normalizes it onto the same root-level object.
    let file = unique_file("txt");
    seed_container(&dispatcher, TEST_CONTAINER, &file, b"root blob").await?;

    let envelope = dispatcher.dispatch(blob_request("exist", "", &file)).await;

    assert_eq!(envelope.status, Status::Ok);
    assert!(envelope.exists);

    Ok(())
}
