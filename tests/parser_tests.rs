use cache_analyzer::parser::{
    detect_shape, import_file, normalize, parse_payload, PayloadShape, RequestRecord,
};
use cache_analyzer::utils::ImportError;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

fn fixture() -> Vec<RequestRecord> {
    import_file(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/capture.har")).unwrap()
}

#[test]
fn test_har_fixture_entry_order() {
    let records = fixture();
    let methods: Vec<&str> = records.iter().map(|r| r.method.as_str()).collect();

    assert_eq!(records.len(), 4);
    assert_eq!(methods, vec!["GET", "GET", "POST", "GET"]);
}

#[test]
fn test_har_headers_case_insensitive() {
    let records = fixture();

    assert_eq!(
        records[0],
        RequestRecord {
            method: "GET".to_string(),
            url: "https://d111111abcdef8.cloudfront.net/index.html".to_string(),
            cache_control: Some("max-age=300".to_string()),
            x_cache: Some("Hit from cloudfront".to_string()),
            pop: Some("FRA56-P1".to_string()),
            time_seconds: 0.25,
            size_bytes: 5120,
            status: 200,
            fulfilled_by: None,
        }
    );
}

#[test]
fn test_har_first_header_wins() {
    let records = fixture();

    assert_eq!(records[1].x_cache.as_deref(), Some("Miss from cloudfront"));
    assert_eq!(records[1].fulfilled_by.as_deref(), Some("origin"));
}

#[test]
fn test_har_empty_header_is_present() {
    let records = fixture();

    assert_eq!(records[2].cache_control.as_deref(), Some(""));
    assert_eq!(records[2].x_cache, None);
    assert_eq!(records[2].status, 204);
}

#[test]
fn test_har_missing_headers_are_absent() {
    let records = fixture();

    assert_eq!(records[3].cache_control, None);
    assert_eq!(records[3].x_cache, None);
    assert_eq!(records[3].pop, None);
    assert_eq!(records[3].size_bytes, -1);
}

#[test]
fn test_har_missing_fields_default() {
    let records = normalize(&json!({"log": {"entries": [{}]}})).unwrap();

    assert_eq!(records, vec![RequestRecord::default()]);
}

#[test]
fn test_record_array_pass_through() {
    let records = normalize(&json!([
        {
            "method": "GET",
            "url": "https://a.cdn/x",
            "xCache": "Hit from cloudfront",
            "pop": "FRA56-P1",
            "timeSeconds": 0.5,
            "sizeBytes": 1000,
            "status": 200,
            "extra": "ignored"
        },
        { "method": "GET", "url": "https://b.cdn/y", "x_cache": "", "size_bytes": "2000" }
    ]))
    .unwrap();

    assert_eq!(records[0].x_cache.as_deref(), Some("Hit from cloudfront"));
    assert_eq!(records[0].cache_control, None);
    assert_eq!(records[0].time_seconds, 0.5);

    assert_eq!(records[1].x_cache.as_deref(), Some(""));
    assert_eq!(records[1].size_bytes, 2000);
    assert_eq!(records[1].status, 0);
    assert_eq!(records[1].time_seconds, 0.0);
}

#[test]
fn test_empty_array_is_valid() {
    assert_eq!(normalize(&json!([])).unwrap(), Vec::<RequestRecord>::new());
    assert_eq!(detect_shape(&json!([])), Some(PayloadShape::RecordArray));
}

#[test]
fn test_unrecognized_shapes() {
    for payload in [json!({}), json!({"log": {"entries": {}}}), json!(42), json!(null), json!("[]")] {
        assert!(
            matches!(normalize(&payload), Err(ImportError::UnrecognizedShape)),
            "{payload} should be rejected"
        );
    }
}

#[test]
fn test_parse_payload_invalid_json() {
    assert!(matches!(parse_payload("{not json"), Err(ImportError::Json(_))));
}

#[test]
fn test_import_missing_file() {
    assert!(matches!(
        import_file("/definitely/not/here.har"),
        Err(ImportError::Io(_))
    ));
}

#[test]
fn test_har_and_legacy_export_agree() {
    let har = normalize(&json!({"log": {"entries": [{
        "time": 250,
        "request": { "method": "GET", "url": "https://a.cdn/x" },
        "response": {
            "status": 200,
            "headers": [{ "name": "X-Cache", "value": "Hit from cloudfront" }],
            "content": { "size": 1000 }
        }
    }]}}))
    .unwrap();

    let legacy = normalize(&json!([{
        "1.method": "GET",
        "2.url": "https://a.cdn/x",
        "3.cache-control": null,
        "4.x-cache": "Hit from cloudfront",
        "5.x-amz-cf-pop": null,
        "5.time": 250,
        "6.size": 1000,
        "7.status": 200
    }]))
    .unwrap();

    assert_eq!(har, legacy);
    assert_eq!(legacy[0].time_seconds, 0.25);
}

#[test]
fn test_har_null_headers_keep_request() {
    let records = normalize(&json!({"log": {"entries": [{
        "request": { "method": "GET", "url": "https://a.cdn/x" },
        "response": { "status": 200, "headers": null, "content": null }
    }]}}))
    .unwrap();

    assert_eq!(records[0].method, "GET");
    assert_eq!(records[0].url, "https://a.cdn/x");
    assert_eq!(records[0].status, 200);
    assert_eq!(records[0].x_cache, None);
}
