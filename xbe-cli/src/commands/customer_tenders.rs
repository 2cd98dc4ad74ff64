//! `xbe view customer-tenders list|show`.

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

/// List customer tenders with filtering and pagination.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status (e.g. pending, accepted, rejected)
    #[arg(long, default_value = "")]
    pub status: String,

    /// Filter by customer ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub customer: String,

    /// Filter by broker ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub broker: String,

    /// Filter by start date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub start_date: String,

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
pub struct TenderRow {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub broker: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub broker_id: String,
}

fn base_query() -> Query {
    Query::new()
        .include(&["customer", "broker"])
        .fields("customer-tenders", &["status", "start-at", "customer", "broker"])
        .fields("customers", &["company-name"])
        .fields("brokers", &["company-name"])
}

pub fn list(args: &ListArgs) -> Result<()> {
    let client = connect(&args.conn, Auth::Optional)?;

    let query = base_query()
        .filter("status", &args.status)
        .filter("customer", &args.customer)
        .filter("broker", &args.broker)
        .filter("start-date", &args.start_date)
        .sort(&args.sort)
        .page(args.page.limit, args.page.offset);

    let (resources, included) =
        client.get("/v1/customer-tenders", &query)?.into_collection()?;
    let rows: Vec<TenderRow> = resources.iter().map(|r| build_row(r, &included)).collect();

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &rows);
    }
    if rows.is_empty() {
        render::write_empty(&mut out, "customer tenders")?;
        return Ok(());
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.id.clone(),
                row.status.clone(),
                row.start_at.clone(),
                render::truncate(&row.customer, 28),
                render::truncate(&row.broker, 28),
            ]
        })
        .collect();
    render::write_table(&mut out, &["ID", "STATUS", "START AT", "CUSTOMER", "BROKER"], &cells)?;
    Ok(())
}

fn build_row(resource: &Resource, included: &Included) -> TenderRow {
    let mut row = TenderRow {
        id: resource.id.clone(),
        status: resource.attributes.trimmed("status"),
        start_at: resource.attributes.string("start-at"),
        ..Default::default()
    };
    if let Some(customer) = resolve(resource, "customer", included) {
        row.customer = customer.display().to_string();
        row.customer_id = customer.id;
    }
    if let Some(broker) = resolve(resource, "broker", included) {
        row.broker = broker.display().to_string();
        row.broker_id = broker.id;
    }
    row
}

/// Show one customer tender.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Customer tender ID
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
        bail!("customer tender id is required");
    }
    let client = connect(&args.conn, Auth::Optional)?;

    let path = format!("/v1/customer-tenders/{id}");
    let (resource, included) = client.get(&path, &base_query())?.into_single()?;
    let row = build_row(&resource, &included);

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &row);
    }
    render_details(&mut out, &row)?;
    Ok(())
}

fn render_details<W: Write>(out: &mut W, row: &TenderRow) -> io::Result<()> {
    writeln!(out, "ID: {}", row.id)?;
    writeln!(out)?;

    writeln!(out, "Tender:")?;
    render::detail_line(out, "Status", &row.status)?;
    render::detail_line(out, "Start At", &row.start_at)?;
    writeln!(out)?;

    writeln!(out, "Customer:")?;
    render::detail_line(out, "ID", &row.customer_id)?;
    render::detail_line(out, "Name", &row.customer)?;
    writeln!(out)?;

    writeln!(out, "Broker:")?;
    render::detail_line(out, "ID", &row.broker_id)?;
    render::detail_line(out, "Name", &row.broker)?;
    Ok(())
}
