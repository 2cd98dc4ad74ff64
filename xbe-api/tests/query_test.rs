use xbe_api::query::sort::{Order, SortQuery};
use xbe_api::query::Query;

/// Decodes an encoded query string back into raw pairs, for round-trip
/// checks.
fn parse_pairs(encoded: &str) -> Vec<(String, String)> {
    if encoded.is_empty() {
        return Vec::new();
    }
    encoded
        .split('&')
        .map(|pair| {
            let (key, value) = pair.split_once('=').expect("key=value pair");
            let decode = |s: &str| {
                percent_encoding::percent_decode_str(s).decode_utf8().unwrap().into_owned()
            };
            (decode(key), decode(value))
        })
        .collect()
}

#[test]
fn blank_filters_never_produce_a_key() {
    let _ = env_logger::try_init();

    let query = Query::new()
        .filter("company-name", "")
        .filter("is-active", "   ")
        .filter("sub-domain", "\t\n");

    assert!(query.is_empty());
    assert_eq!(query.encode(), "");
    assert!(parse_pairs(&query.encode()).iter().all(|(k, _)| !k.starts_with("filter")));
}

#[test]
fn present_filters_are_trimmed_and_kept() {
    let query = Query::new().filter("company-name", "  Acme  ");
    assert_eq!(query.encode(), "filter[company-name]=Acme");
}

#[test]
fn pagination_is_emitted_only_when_strictly_positive() {
    assert_eq!(Query::new().page(0, 0).encode(), "");
    assert_eq!(Query::new().page(50, 0).encode(), "page[limit]=50");
    assert_eq!(Query::new().page(0, 100).encode(), "page[offset]=100");
    assert_eq!(Query::new().page(50, 100).encode(), "page[limit]=50&page[offset]=100");
}

#[test]
fn fields_and_include_follow_jsonapi_conventions() {
    let query = Query::new()
        .fields("jobs", &["external-job-number", "customer"])
        .fields("customers", &["company-name"])
        .include(&["customer", "job-site"]);

    assert_eq!(
        query.encode(),
        "fields[customers]=company-name&fields[jobs]=external-job-number,customer&include=customer,job-site"
    );
}

#[test]
fn sort_spec_keeps_descending_prefix() {
    let mut sort = SortQuery::default();
    sort.insert_raw("-start-at, customer ,");
    sort.insert("id", Order::Asc);
    assert_eq!(sort.to_param().as_deref(), Some("-start-at,customer,id"));

    let query = Query::new().sort("-company-name");
    assert_eq!(query.encode(), "sort=-company-name");
}

#[test]
fn empty_sort_produces_no_parameter() {
    assert_eq!(SortQuery::default().to_param(), None);
    assert_eq!(Query::new().sort("  ,  ").encode(), "");
}

#[test]
fn encoding_is_deterministic() {
    let build = || {
        Query::new()
            .filter("broker", "4")
            .filter("customer", "9")
            .fields("brokers", &["company-name"])
            .include(&["broker"])
            .sort("company-name")
            .page(25, 50)
    };
    assert_eq!(build().encode(), build().encode());
}

#[test]
fn values_with_spaces_round_trip_through_encoding() {
    let query = Query::new().filter("company-name", "Acme Paving & Sons");
    let pairs = parse_pairs(&query.encode());
    assert_eq!(
        pairs,
        vec![("filter[company-name]".to_string(), "Acme Paving & Sons".to_string())]
    );
}

#[test]
fn round_trip_has_no_filter_key_for_blank_input() {
    let query = Query::new().filter("company-name", "   ").page(10, 0);
    let pairs = parse_pairs(&query.encode());
    assert!(pairs.iter().all(|(key, _)| key != "filter[company-name]"));
    assert_eq!(pairs, vec![("page[limit]".to_string(), "10".to_string())]);
}
