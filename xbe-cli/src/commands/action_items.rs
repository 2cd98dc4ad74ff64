//! `xbe view action-items list|show`.

use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use xbe_api::model::document::Included;
use xbe_api::model::resource::Resource;
use xbe_api::query::Query;
use xbe_api::resolve::resolve;

use crate::args::{ConnectionArgs, OutputArgs, PageArgs};
use crate::commands::{connect, Auth};
use crate::render;

/// List action items with filtering and pagination.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status (e.g. open, completed)
    #[arg(long, default_value = "")]
    pub status: String,

    /// Filter by assignee user ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub assignee: String,

    /// Filter by creator user ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub created_by: String,

    /// Filter by maximum due time (ISO 8601)
    #[arg(long, default_value = "")]
    pub due_at_max: String,

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
pub struct ActionItemRow {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub due_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub assignee: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub assignee_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_by: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_by_id: String,
}

fn base_query() -> Query {
    Query::new()
        .include(&["assignee", "created-by"])
        .fields(
            "action-items",
            &["title", "status", "due-at", "sort-order", "assignee", "created-by"],
        )
        .fields("users", &["name"])
}

pub fn list(args: &ListArgs) -> Result<()> {
    let client = connect(&args.conn, Auth::Optional)?;

    let query = base_query()
        .filter("status", &args.status)
        .filter("assignee", &args.assignee)
        .filter("created-by", &args.created_by)
        .filter("due-at-max", &args.due_at_max)
        .sort(&args.sort)
        .page(args.page.limit, args.page.offset);

    let (resources, included) = client.get("/v1/action-items", &query)?.into_collection()?;
    let rows: Vec<ActionItemRow> = resources.iter().map(|r| build_row(r, &included)).collect();

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &rows);
    }
    if rows.is_empty() {
        render::write_empty(&mut out, "action items")?;
        return Ok(());
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.id.clone(),
                render::truncate(&row.title, 40),
                row.status.clone(),
                row.due_at.clone(),
                render::truncate(&row.assignee, 28),
            ]
        })
        .collect();
    render::write_table(&mut out, &["ID", "TITLE", "STATUS", "DUE AT", "ASSIGNEE"], &cells)?;
    Ok(())
}

fn build_row(resource: &Resource, included: &Included) -> ActionItemRow {
    let mut row = ActionItemRow {
        id: resource.id.clone(),
        title: resource.attributes.trimmed("title"),
        status: resource.attributes.trimmed("status"),
        due_at: resource.attributes.string("due-at"),
        sort_order: resource.attributes.opt_int("sort-order"),
        ..Default::default()
    };
    if let Some(assignee) = resolve(resource, "assignee", included) {
        row.assignee = assignee.display().to_string();
        row.assignee_id = assignee.id;
    }
    if let Some(creator) = resolve(resource, "created-by", included) {
        row.created_by = creator.display().to_string();
        row.created_by_id = creator.id;
    }
    row
}

/// Show one action item.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Action item ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}

pub fn show(args: &ShowArgs) -> Result<()> {
    let id = args.id.trim();
    if id.is_empty() {
        bail!("action item id is required");
    }
    let client = connect(&args.conn, Auth::Optional)?;

    let path = format!("/v1/action-items/{id}");
    let (resource, included) = client.get(&path, &base_query())?.into_single()?;
    let row = build_row(&resource, &included);

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &row);
    }
    render_details(&mut out, &row)?;
    Ok(())
}

fn render_details<W: Write>(out: &mut W, row: &ActionItemRow) -> io::Result<()> {
    writeln!(out, "ID: {}", row.id)?;
    writeln!(out)?;

    writeln!(out, "Action Item:")?;
    render::detail_line(out, "Title", &row.title)?;
    render::detail_line(out, "Status", &row.status)?;
    render::detail_line(out, "Due At", &row.due_at)?;
    if let Some(order) = row.sort_order {
        render::detail_line(out, "Sort Order", &order.to_string())?;
    }
    writeln!(out)?;

    writeln!(out, "Assignee:")?;
    render::detail_line(out, "ID", &row.assignee_id)?;
    render::detail_line(out, "Name", &row.assignee)?;
    writeln!(out)?;

    writeln!(out, "Created By:")?;
    render::detail_line(out, "ID", &row.created_by_id)?;
    render::detail_line(out, "Name", &row.created_by)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbe_api::model::document::Document;

    #[test]
    fn row_resolves_both_users_and_the_sort_order() {
        let (resources, included) = Document::from_slice(
            br#"{
                "data": [{
                    "type": "action-items",
                    "id": "55",
                    "attributes": {
                        "title": "Call the quarry",
                        "status": "open",
                        "due-at": "2026-08-25T09:00:00Z",
                        "sort-order": 2
                    },
                    "relationships": {
                        "assignee": {"data": {"type": "users", "id": "12"}},
                        "created-by": {"data": {"type": "users", "id": "7"}}
                    }
                }],
                "included": [
                    {"type": "users", "id": "12", "attributes": {"name": "Pat Jones"}}
                ]
            }"#,
        )
        .unwrap()
        .into_collection()
        .unwrap();

        let row = build_row(&resources[0], &included);
        assert_eq!(row.title, "Call the quarry");
        assert_eq!(row.sort_order, Some(2));
        assert_eq!(row.assignee, "Pat Jones");
        // Creator was not sideloaded: the id stands in.
        assert_eq!(row.created_by, "7");
    }

    #[test]
    fn absent_sort_order_stays_none() {
        let resource: Resource = serde_json::from_str(
            r#"{"type": "action-items", "id": "1", "attributes": {"title": "x"}}"#,
        )
        .unwrap();
        let row = build_row(&resource, &Included::new());
        assert_eq!(row.sort_order, None);
    }
}
