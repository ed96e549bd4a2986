use super::*;

#[test]
fn test_applied_and_failed() {
    assert!(StepOutcome::success("done").is_applied());
    assert!(StepOutcome::already_applied("exists").is_applied());
    assert!(StepOutcome::failed("boom", Some(500)).is_failed());
    assert!(!StepOutcome::failed("boom", None).is_applied());
}

#[test]
fn test_display() {
    assert_eq!(StepOutcome::success("ok").to_string(), "success: ok");
    assert_eq!(
        StepOutcome::failed("not acknowledged", Some(200)).to_string(),
        "failed (200): not acknowledged"
    );
    assert_eq!(StepOutcome::failed("x", None).to_string(), "failed: x");
}

#[test]
fn test_serialize_tagged() {
    let json = serde_json::to_value(StepOutcome::failed("bad", Some(404))).unwrap();
    assert_eq!(json["status"], "failed");
    assert_eq!(json["reason"], "bad");
    assert_eq!(json["http_status"], 404);

    let json = serde_json::to_value(StepOutcome::failed("bad", None)).unwrap();
    assert!(json.get("http_status").is_none());

    let json = serde_json::to_value(StepOutcome::already_applied("exists")).unwrap();
    assert_eq!(json["status"], "already_applied");
}
