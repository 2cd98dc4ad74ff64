mod common;

use common::read_json_file;
use xbe_api::model::document::{Document, Included};
use xbe_api::model::organization::OrganizationKind;
use xbe_api::model::resource::Resource;
use xbe_api::resolve::{
    first_non_empty, label_of, resolve, resolve_many, resolve_organization, resolve_with,
    LABEL_PREFERENCE,
};

fn job_with_customer() -> (Resource, Included) {
    let document = Document::from_slice(
        br#"{
            "data": {
                "type": "jobs",
                "id": "1",
                "relationships": {
                    "customer": {"data": {"type": "customers", "id": "9"}}
                }
            },
            "included": [
                {"type": "customers", "id": "9", "attributes": {"company-name": "Acme"}}
            ]
        }"#,
    )
    .unwrap();
    document.into_single().unwrap()
}

#[test]
fn sideloaded_target_resolves_to_its_label() {
    let _ = env_logger::try_init();

    let (job, included) = job_with_customer();
    let customer = resolve(&job, "customer", &included).unwrap();
    assert_eq!(customer.id, "9");
    assert_eq!(customer.label, "Acme");
    assert_eq!(customer.display(), "Acme");
}

#[test]
fn missing_sideload_falls_back_to_the_bare_id() {
    let _ = env_logger::try_init();

    let (job, _) = job_with_customer();
    let none_included = Included::default();
    let customer = resolve(&job, "customer", &none_included).unwrap();
    assert_eq!(customer.id, "9");
    assert_eq!(customer.label, "");
    // Display degrades to the id, never an empty cell.
    assert_eq!(customer.display(), "9");
}

#[test]
fn absent_or_null_relationship_resolves_to_none() {
    let (job, included) = job_with_customer();
    assert!(resolve(&job, "trucker", &included).is_none());

    let resource: Resource = serde_json::from_str(
        r#"{
            "type": "jobs",
            "id": "2",
            "relationships": {"customer": {"data": null}}
        }"#,
    )
    .unwrap();
    assert!(resolve(&resource, "customer", &included).is_none());
}

#[test]
fn label_preference_is_first_non_empty_in_order() {
    let broker: Resource = serde_json::from_str(
        r#"{
            "type": "brokers",
            "id": "4",
            "attributes": {"company-name": "ABC Logistics", "name": "abc"}
        }"#,
    )
    .unwrap();
    assert_eq!(label_of(&broker, LABEL_PREFERENCE), "ABC Logistics");

    let unit: Resource = serde_json::from_str(
        r#"{
            "type": "business-units",
            "id": "21",
            "attributes": {"company-name": "   ", "name": "  Paving East "}
        }"#,
    )
    .unwrap();
    // Blank company-name loses to the trimmed name.
    assert_eq!(label_of(&unit, LABEL_PREFERENCE), "Paving East");
}

#[test]
fn custom_preference_overrides_the_default() {
    let document = Document::from_slice(
        br#"{
            "data": {
                "type": "jobs",
                "id": "1",
                "relationships": {
                    "job-production-plan": {"data": {"type": "job-production-plans", "id": "8"}}
                }
            },
            "included": [
                {
                    "type": "job-production-plans",
                    "id": "8",
                    "attributes": {"job-number": "JP-8", "job-name": "Main St overlay"}
                }
            ]
        }"#,
    )
    .unwrap();
    let (job, included) = document.into_single().unwrap();

    let plan =
        resolve_with(&job, "job-production-plan", &included, &["job-number", "job-name"]).unwrap();
    assert_eq!(plan.label, "JP-8");
}

#[test]
fn to_many_resolution_preserves_linkage_order() {
    let _ = env_logger::try_init();

    let document = Document::from_slice(&read_json_file("data/single.json")).unwrap();
    let (membership, included) = document.into_single().unwrap();

    let units = resolve_many(&membership, "business-units", &included);
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].id, "21");
    assert_eq!(units[0].label, "Paving East");
    // "20" was not sideloaded; order still follows the linkage array.
    assert_eq!(units[1].id, "20");
    assert_eq!(units[1].display(), "20");
}

#[test]
fn organization_kind_is_parsed_from_the_target_type() {
    let document = Document::from_slice(&read_json_file("data/single.json")).unwrap();
    let (membership, included) = document.into_single().unwrap();

    let organization = resolve_organization(&membership, "organization", &included).unwrap();
    assert_eq!(organization.kind, OrganizationKind::Broker);
    assert_eq!(organization.reference.display(), "ABC Logistics");
}

#[test]
fn unknown_organization_type_is_unresolvable() {
    let _ = env_logger::try_init();

    let resource: Resource = serde_json::from_str(
        r#"{
            "type": "broker-memberships",
            "id": "1",
            "relationships": {
                "organization": {"data": {"type": "developers", "id": "3"}}
            }
        }"#,
    )
    .unwrap();
    assert!(resolve_organization(&resource, "organization", &Included::default()).is_none());
}

#[test]
fn first_non_empty_skips_blank_candidates() {
    assert_eq!(first_non_empty(["", "   ", "Acme", "other"]), "Acme");
    assert_eq!(first_non_empty(["", "   "]), "");
}
