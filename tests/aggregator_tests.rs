use cache_analyzer::aggregator::{
    aggregate, filter_records, group_by, AcceptedValues, AggregateRow, Dimension, FilterSpec,
    Metric,
};
use cache_analyzer::parser::{normalize, RequestRecord};
use pretty_assertions::assert_eq;
use serde_json::json;

const DIMENSIONS: [Dimension; 3] = [Dimension::CacheStatus, Dimension::Pop, Dimension::Domain];

fn record(url: &str, x_cache: Option<&str>, size_bytes: i64) -> RequestRecord {
    RequestRecord {
        method: "GET".to_string(),
        url: url.to_string(),
        x_cache: x_cache.map(str::to_string),
        size_bytes,
        status: 200,
        ..Default::default()
    }
}

fn scenario() -> Vec<RequestRecord> {
    vec![
        record("https://a.cdn/x", Some("Hit from cloudfront"), 1000),
        record("https://b.cdn/y", Some("Miss from cloudfront"), 2000),
        record("https://a.cdn/z", None, 500),
    ]
}

/// Mixed capture with missing headers, bad URLs and repeated values
fn mixed() -> Vec<RequestRecord> {
    let pops = [Some("FRA56-P1"), None, Some("LHR62-C2"), Some(""), Some("FRA56-P1")];
    let urls = ["https://a.cdn/1", "::not a url::", "https://b.cdn/2", "", "http://A.CDN/3"];
    let caches = [Some("Hit from cloudfront"), Some("Miss"), None, Some(""), Some("RefreshHit")];
    let statuses = [200, 404, 200, 304, 500];

    (0..20)
        .map(|i| RequestRecord {
            method: if i % 3 == 0 { "POST" } else { "GET" }.to_string(),
            url: urls[i % urls.len()].to_string(),
            x_cache: caches[(i / 2) % caches.len()].map(str::to_string),
            cache_control: (i % 4 == 0).then(|| "no-store".to_string()),
            pop: pops[(i / 3) % pops.len()].map(str::to_string),
            time_seconds: i as f64 * 0.01,
            size_bytes: (i as i64) * 137,
            status: statuses[i % statuses.len()],
            fulfilled_by: None,
        })
        .collect()
}

#[test]
fn test_cache_status_scenario() {
    let records = scenario();
    let groups = group_by(&records, Dimension::CacheStatus);

    assert_eq!(groups.len(), 3);
    assert_eq!(groups["Hit"], vec![&records[0]]);
    assert_eq!(groups["Miss"], vec![&records[1]]);
    assert_eq!(groups["Unknown"], vec![&records[2]]);

    let sizes = aggregate(&groups, Metric::SizeSum);
    assert_eq!(
        sizes.rows,
        vec![
            AggregateRow { key: "Miss".to_string(), value: 2000 },
            AggregateRow { key: "Hit".to_string(), value: 1000 },
            AggregateRow { key: "Unknown".to_string(), value: 500 },
        ]
    );
}

#[test]
fn test_status_filter_scenario() {
    let mut records = scenario();
    records[1].status = 404;

    let spec = FilterSpec::new().with("status", AcceptedValues::Many(vec![json!(200)]));
    let filtered = filter_records(&records, &spec);

    assert_eq!(filtered, vec![records[0].clone(), records[2].clone()]);
}

#[test]
fn test_grouping_partitions_records() {
    let records = mixed();

    for dimension in DIMENSIONS {
        let groups = group_by(&records, dimension);

        let mut members: Vec<*const RequestRecord> = groups
            .values()
            .flatten()
            .map(|r| *r as *const RequestRecord)
            .collect();
        members.sort();
        let mut expected: Vec<*const RequestRecord> =
            records.iter().map(|r| r as *const RequestRecord).collect();
        expected.sort();

        assert_eq!(members, expected, "{:?} grouping is not a partition", dimension);
    }
}

#[test]
fn test_count_conservation() {
    let records = mixed();

    for dimension in DIMENSIONS {
        let counts = aggregate(&group_by(&records, dimension), Metric::Count);
        assert_eq!(counts.total(), records.len() as i64);
    }
}

#[test]
fn test_size_conservation() {
    let records = mixed();
    let total: i64 = records.iter().map(|r| r.size_bytes).sum();

    for dimension in DIMENSIONS {
        let sizes = aggregate(&group_by(&records, dimension), Metric::SizeSum);
        assert_eq!(sizes.total(), total);
    }
}

#[test]
fn test_unknown_keys_for_missing_values() {
    let records = mixed();

    let domains = aggregate(&group_by(&records, Dimension::Domain), Metric::Count);
    assert!(domains.get("unknown").is_some());
    assert_eq!(domains.get("a.cdn"), Some(8));

    let pops = aggregate(&group_by(&records, Dimension::Pop), Metric::Count);
    assert!(pops.get("unknown").is_some());
    // Present-but-empty POP header is its own group
    assert!(pops.get("").is_some());
}

#[test]
fn test_filter_idempotence() {
    let records = mixed();
    let specs = [
        FilterSpec::new(),
        FilterSpec::from_args(&["status=200,304"]).unwrap(),
        FilterSpec::from_args(&["pop=null", "method=GET"]).unwrap(),
        FilterSpec::from_args(&["xCache=Miss", "colour=red"]).unwrap(),
    ];

    for spec in &specs {
        let once = filter_records(&records, spec);
        let twice = filter_records(&once, spec);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_filter_monotonicity() {
    let records = mixed();

    let wide = FilterSpec::from_args(&["status=200,404,304"]).unwrap();
    let narrow = FilterSpec::from_args(&["status=200,404"]).unwrap();
    let narrower = FilterSpec::from_args(&["status=200,404", "method=GET"]).unwrap();

    let wide_len = filter_records(&records, &wide).len();
    let narrow_len = filter_records(&records, &narrow).len();
    let narrower_len = filter_records(&records, &narrower).len();

    assert!(records.len() >= wide_len);
    assert!(wide_len >= narrow_len);
    assert!(narrow_len >= narrower_len);
    assert!(narrower_len > 0);
}

#[test]
fn test_aggregate_order_is_deterministic() {
    let records = mixed();
    let groups = group_by(&records, Dimension::Pop);

    let first = serde_json::to_string(&aggregate(&groups, Metric::Count)).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string(&aggregate(&groups, Metric::Count)).unwrap();
        assert_eq!(first, again);
    }

    let result = aggregate(&groups, Metric::SizeSum);
    for pair in result.rows.windows(2) {
        assert!(
            pair[0].value > pair[1].value
                || (pair[0].value == pair[1].value && pair[0].key < pair[1].key)
        );
    }
}

#[test]
fn test_grouping_reused_across_metrics() {
    let records = scenario();
    let groups = group_by(&records, Dimension::Domain);

    let counts = aggregate(&groups, Metric::Count);
    let sizes = aggregate(&groups, Metric::SizeSum);

    assert_eq!(counts.get("a.cdn"), Some(2));
    assert_eq!(sizes.get("a.cdn"), Some(1500));
    assert_eq!(groups["a.cdn"].len(), 2);
}

#[test]
fn test_size_sum_never_overflows() {
    let records = normalize(&json!([
        {"url": "https://a.cdn/big", "sizeBytes": i64::MAX},
        {"url": "https://a.cdn/small", "sizeBytes": 10}
    ]))
    .unwrap();

    for dimension in DIMENSIONS {
        let sizes = aggregate(&group_by(&records, dimension), Metric::SizeSum);
        assert_eq!(sizes.total(), i64::MAX);
    }
}
