//! `xbe view broker-memberships list|show`, `xbe do broker-memberships
//! delete`.
//!
//! Memberships carry the widest relationship fan-out of any resource here:
//! a user, an organization (polymorphic in older records, a plain `broker`
//! in newer ones), an optional project office and an ordered list of
//! business units.

use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use xbe_api::model::document::Included;
use xbe_api::model::resource::Resource;
use xbe_api::query::Query;
use xbe_api::resolve::{resolve, resolve_many, resolve_organization, Ref};
use xbe_api::Client;

use crate::args::{ConnectionArgs, OutputArgs, PageArgs};
use crate::commands::{connect, Auth};
use crate::render;

/// List broker memberships with filtering and pagination.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by broker ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub broker: String,

    /// Filter by user ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub user: String,

    /// Filter by membership kind (e.g. manager, dispatcher)
    #[arg(long, default_value = "")]
    pub kind: String,

    /// Filter by admin status (true/false)
    #[arg(long, default_value = "")]
    pub is_admin: String,

    /// Sort by field (prefix with - for descending)
    #[arg(long, default_value = "")]
    pub sort: String,

    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct MembershipRow {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub broker: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub broker_id: String,
}

pub fn list(args: &ListArgs) -> Result<()> {
    let client = connect(&args.conn, Auth::Optional)?;

    let query = Query::new()
        .fields("broker-memberships", &["kind", "title", "is-admin", "user", "broker"])
        .include(&["user", "broker"])
        .fields("users", &["name"])
        .fields("brokers", &["company-name"])
        .filter("broker", &args.broker)
        .filter("user", &args.user)
        .filter("kind", &args.kind)
        .filter("is-admin", &args.is_admin)
        .sort(&args.sort)
        .page(args.page.limit, args.page.offset);

    let (resources, included) =
        client.get("/v1/broker-memberships", &query)?.into_collection()?;
    let rows: Vec<MembershipRow> = resources.iter().map(|r| build_row(r, &included)).collect();

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &rows);
    }
    if rows.is_empty() {
        render::write_empty(&mut out, "broker memberships")?;
        return Ok(());
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.id.clone(),
                render::truncate(&row.user, 28),
                row.kind.clone(),
                render::truncate(&row.title, 24),
                render::truncate(&row.broker, 28),
            ]
        })
        .collect();
    render::write_table(&mut out, &["ID", "USER", "KIND", "TITLE", "BROKER"], &cells)?;
    Ok(())
}

fn build_row(resource: &Resource, included: &Included) -> MembershipRow {
    let mut row = MembershipRow {
        id: resource.id.clone(),
        kind: resource.attributes.trimmed("kind"),
        title: resource.attributes.trimmed("title"),
        is_admin: resource.attributes.boolean("is-admin"),
        ..Default::default()
    };
    if let Some(user) = resolve(resource, "user", included) {
        row.user = user.display().to_string();
        row.user_id = user.id;
    }
    if let Some(broker) = resolve_broker(resource, included) {
        row.broker = broker.display().to_string();
        row.broker_id = broker.id;
    }
    row
}

/// The broker of a membership lives on the `broker` relationship, except in
/// older records where only the polymorphic `organization` relationship is
/// populated.
fn resolve_broker(resource: &Resource, included: &Included) -> Option<Ref> {
    if let Some(broker) = resolve(resource, "broker", included) {
        return Some(broker);
    }
    resolve_organization(resource, "organization", included).map(|org| org.reference)
}

/// Show one broker membership.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Broker membership ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct MembershipDetails {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color_hex: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub external_employee_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub end_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_sort_order: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_mobile: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub broker: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub broker_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_office: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_office_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub business_units: Vec<BusinessUnitRef>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BusinessUnitRef {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

fn detail_query() -> Query {
    Query::new()
        .include(&["user", "broker", "organization", "project-office", "business-units"])
        .fields("users", &["name", "email-address", "mobile-number"])
        .fields("brokers", &["company-name"])
        .fields("project-offices", &["name"])
        .fields("business-units", &["name"])
}

fn fetch_details(client: &Client, id: &str) -> Result<MembershipDetails> {
    let path = format!("/v1/broker-memberships/{id}");
    let (resource, included) = client.get(&path, &detail_query())?.into_single()?;
    Ok(build_details(&resource, &included))
}

pub fn show(args: &ShowArgs) -> Result<()> {
    let id = args.id.trim();
    if id.is_empty() {
        bail!("broker membership id is required");
    }
    let client = connect(&args.conn, Auth::Optional)?;
    let details = fetch_details(&client, id)?;

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &details);
    }
    render_details(&mut out, &details)?;
    Ok(())
}

fn build_details(resource: &Resource, included: &Included) -> MembershipDetails {
    let mut details = MembershipDetails {
        id: resource.id.clone(),
        kind: resource.attributes.trimmed("kind"),
        is_admin: resource.attributes.boolean("is-admin"),
        title: resource.attributes.trimmed("title"),
        color_hex: resource.attributes.trimmed("color-hex"),
        external_employee_id: resource.attributes.trimmed("external-employee-id"),
        start_at: resource.attributes.string("start-at"),
        end_at: resource.attributes.string("end-at"),
        explicit_sort_order: resource.attributes.opt_int("explicit-sort-order"),
        ..Default::default()
    };

    if let Some(user) = resolve(resource, "user", included) {
        details.user_name = user.label.clone();
        details.user_id = user.id;
        if let Some(user_resource) = sideloaded(resource, "user", included) {
            details.user_email = user_resource.attributes.trimmed("email-address");
            details.user_mobile = user_resource.attributes.trimmed("mobile-number");
        }
    }
    if let Some(broker) = resolve_broker(resource, included) {
        details.broker = broker.display().to_string();
        details.broker_id = broker.id;
    }
    if let Some(office) = resolve(resource, "project-office", included) {
        details.project_office = office.display().to_string();
        details.project_office_id = office.id;
    }
    details.business_units = resolve_many(resource, "business-units", included)
        .into_iter()
        .map(|unit| BusinessUnitRef { name: unit.label.clone(), id: unit.id })
        .collect();

    details
}

/// The sideloaded resource behind a to-one relationship, when present.
fn sideloaded<'a>(resource: &Resource, name: &str, included: &'a Included) -> Option<&'a Resource> {
    let target = resource.relationships.get(name)?.data.first()?;
    included.get(target)
}

fn render_details<W: Write>(out: &mut W, details: &MembershipDetails) -> io::Result<()> {
    writeln!(out, "ID: {}", details.id)?;
    writeln!(out)?;

    writeln!(out, "Membership:")?;
    render::detail_line(out, "Kind", &details.kind)?;
    render::detail_line(out, "Admin", if details.is_admin { "true" } else { "false" })?;
    render::detail_line(out, "Title", &details.title)?;
    render::detail_line(out, "Color", &details.color_hex)?;
    render::detail_line(out, "External Employee ID", &details.external_employee_id)?;
    render::detail_line(out, "Start At", &details.start_at)?;
    render::detail_line(out, "End At", &details.end_at)?;
    if let Some(order) = details.explicit_sort_order {
        render::detail_line(out, "Sort Order", &order.to_string())?;
    }
    writeln!(out)?;

    writeln!(out, "User:")?;
    render::detail_line(out, "ID", &details.user_id)?;
    render::detail_line(out, "Name", &details.user_name)?;
    render::detail_line(out, "Email", &details.user_email)?;
    render::detail_line(out, "Mobile", &details.user_mobile)?;
    writeln!(out)?;

    writeln!(out, "Broker:")?;
    render::detail_line(out, "ID", &details.broker_id)?;
    render::detail_line(out, "Name", &details.broker)?;

    if !details.project_office_id.is_empty() {
        writeln!(out)?;
        writeln!(out, "Project Office:")?;
        render::detail_line(out, "ID", &details.project_office_id)?;
        render::detail_line(out, "Name", &details.project_office)?;
    }

    if !details.business_units.is_empty() {
        writeln!(out)?;
        writeln!(out, "Business Units:")?;
        for unit in &details.business_units {
            if unit.name.is_empty() {
                writeln!(out, "  {}", unit.id)?;
            } else {
                writeln!(out, "  {} ({})", unit.name, unit.id)?;
            }
        }
    }
    Ok(())
}

/// Delete a broker membership.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Broker membership ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}

/// Fetches the membership first so the deleted record can still be shown
/// after the server forgets it.
pub fn delete(args: &DeleteArgs) -> Result<()> {
    let id = args.id.trim();
    if id.is_empty() {
        bail!("broker membership id is required");
    }
    let client = connect(&args.conn, Auth::Required)?;

    let details = fetch_details(&client, id)?;
    client.delete(&format!("/v1/broker-memberships/{id}"))?;

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &details);
    }
    writeln!(out, "Deleted broker membership {id}")?;
    writeln!(out)?;
    render_details(&mut out, &details)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbe_api::model::document::Document;

    fn single(json: &str) -> (Resource, Included) {
        Document::from_slice(json.as_bytes()).unwrap().into_single().unwrap()
    }

    const MEMBERSHIP: &str = r#"{
        "data": {
            "type": "broker-memberships",
            "id": "77",
            "attributes": {
                "kind": "manager",
                "is-admin": true,
                "title": "  Dispatcher  ",
                "explicit-sort-order": 3
            },
            "relationships": {
                "user": {"data": {"type": "users", "id": "12"}},
                "organization": {"data": {"type": "brokers", "id": "4"}},
                "business-units": {"data": [
                    {"type": "business-units", "id": "21"},
                    {"type": "business-units", "id": "20"}
                ]},
                "project-office": {"data": null}
            }
        },
        "included": [
            {"type": "users", "id": "12", "attributes": {
                "name": "Pat Jones",
                "email-address": "pat@example.com"
            }},
            {"type": "brokers", "id": "4", "attributes": {"company-name": "ABC Logistics"}},
            {"type": "business-units", "id": "21", "attributes": {"name": "Paving East"}}
        ]
    }"#;

    #[test]
    fn details_trim_the_title_and_keep_the_sort_order() {
        let (resource, included) = single(MEMBERSHIP);
        let details = build_details(&resource, &included);
        assert_eq!(details.title, "Dispatcher");
        assert!(details.is_admin);
        assert_eq!(details.explicit_sort_order, Some(3));
    }

    #[test]
    fn details_pull_user_contact_fields_from_the_sideload() {
        let (resource, included) = single(MEMBERSHIP);
        let details = build_details(&resource, &included);
        assert_eq!(details.user_name, "Pat Jones");
        assert_eq!(details.user_email, "pat@example.com");
        assert_eq!(details.user_mobile, "");
    }

    #[test]
    fn broker_falls_back_to_the_organization_relationship() {
        let (resource, included) = single(MEMBERSHIP);
        let details = build_details(&resource, &included);
        assert_eq!(details.broker, "ABC Logistics");
        assert_eq!(details.broker_id, "4");
    }

    #[test]
    fn business_units_keep_order_and_fall_back_to_ids() {
        let (resource, included) = single(MEMBERSHIP);
        let details = build_details(&resource, &included);
        assert_eq!(
            details.business_units,
            vec![
                BusinessUnitRef { id: "21".to_string(), name: "Paving East".to_string() },
                BusinessUnitRef { id: "20".to_string(), name: String::new() },
            ]
        );
    }

    #[test]
    fn null_project_office_stays_empty() {
        let (resource, included) = single(MEMBERSHIP);
        let details = build_details(&resource, &included);
        assert_eq!(details.project_office_id, "");
        assert_eq!(details.project_office, "");
    }

    #[test]
    fn detail_rendering_groups_sections() {
        let (resource, included) = single(MEMBERSHIP);
        let details = build_details(&resource, &included);
        let mut out = Vec::new();
        render_details(&mut out, &details).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("ID: 77\n"));
        assert!(text.contains("Membership:\n  Kind: manager\n"));
        assert!(text.contains("  Paving East (21)\n  20\n"));
        assert!(!text.contains("Project Office:"));
    }
}
