//! `xbe view jobs list|show`.

use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use xbe_api::model::document::Included;
use xbe_api::model::resource::Resource;
use xbe_api::query::Query;
use xbe_api::resolve::{resolve, resolve_with};

use crate::args::{ConnectionArgs, OutputArgs, PageArgs};
use crate::commands::{connect, Auth};
use crate::render;

/// Label preference for job production plans: the job number reads better
/// in a table than the free-form name.
const PLAN_LABELS: &[&str] = &["job-number", "job-name"];

/// List jobs with filtering and pagination.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by customer ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub customer: String,

    /// Filter by job site ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub job_site: String,

    /// Filter by start date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub start_date: String,

    /// Filter by minimum start time (ISO 8601)
    #[arg(long, default_value = "")]
    pub start_at_min: String,

    /// Filter by maximum start time (ISO 8601)
    #[arg(long, default_value = "")]
    pub start_at_max: String,

    /// Filter by whether the job has tenders (true/false)
    #[arg(long, default_value = "")]
    pub offered: String,

    /// Filter by broker ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub broker: String,

    /// Filter by trucker ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub trucker: String,

    /// Filter by job production plan ID (comma-separated for multiple)
    #[arg(long, default_value = "")]
    pub job_production_plan: String,

    /// Filter by external job number
    #[arg(long, default_value = "")]
    pub external_job_number: String,

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
pub struct JobRow {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub external_job_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub job_production_plan: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub job_production_plan_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub job_site: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub job_site_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_id: String,
}

fn list_query(args: &ListArgs) -> Query {
    Query::new()
        .fields("jobs", &["external-job-number", "job-site", "customer", "job-production-plan"])
        .include(&["job-site", "customer", "job-production-plan"])
        .fields("job-sites", &["name"])
        .fields("customers", &["company-name"])
        .fields("job-production-plans", &["job-number", "job-name"])
        .filter("customer", &args.customer)
        .filter("job-site", &args.job_site)
        .filter("start-date", &args.start_date)
        .filter("start-at-min", &args.start_at_min)
        .filter("start-at-max", &args.start_at_max)
        .filter("offered", &args.offered)
        .filter("broker", &args.broker)
        .filter("trucker", &args.trucker)
        .filter("job-production-plan", &args.job_production_plan)
        .filter("external-job-number", &args.external_job_number)
        .sort(&args.sort)
        .page(args.page.limit, args.page.offset)
}

pub fn list(args: &ListArgs) -> Result<()> {
    let client = connect(&args.conn, Auth::Optional)?;
    let (resources, included) = client.get("/v1/jobs", &list_query(args))?.into_collection()?;
    let rows: Vec<JobRow> = resources.iter().map(|r| build_row(r, &included)).collect();

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &rows);
    }
    if rows.is_empty() {
        render::write_empty(&mut out, "jobs")?;
        return Ok(());
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.id.clone(),
                render::truncate(&row.external_job_number, 24),
                render::truncate(&row.job_production_plan, 40),
                render::truncate(&row.job_site, 28),
                render::truncate(&row.customer, 28),
            ]
        })
        .collect();
    render::write_table(
        &mut out,
        &["ID", "EXTERNAL JOB NUMBER", "JOB PRODUCTION PLAN", "JOB SITE", "CUSTOMER"],
        &cells,
    )?;
    Ok(())
}

fn build_row(resource: &Resource, included: &Included) -> JobRow {
    let mut row = JobRow {
        id: resource.id.clone(),
        external_job_number: resource.attributes.string("external-job-number"),
        ..Default::default()
    };

    if let Some(plan) = resolve_with(resource, "job-production-plan", included, PLAN_LABELS) {
        row.job_production_plan = plan.display().to_string();
        row.job_production_plan_id = plan.id;
    }
    if let Some(site) = resolve(resource, "job-site", included) {
        row.job_site = site.display().to_string();
        row.job_site_id = site.id;
    }
    if let Some(customer) = resolve(resource, "customer", included) {
        row.customer = customer.display().to_string();
        row.customer_id = customer.id;
    }

    row
}

/// Show one job.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Job ID
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
        bail!("job id is required");
    }
    let client = connect(&args.conn, Auth::Optional)?;

    let query = Query::new()
        .include(&["job-site", "customer", "job-production-plan"])
        .fields("job-sites", &["name"])
        .fields("customers", &["company-name"])
        .fields("job-production-plans", &["job-number", "job-name"]);

    let path = format!("/v1/jobs/{id}");
    let (resource, included) = client.get(&path, &query)?.into_single()?;
    let row = build_row(&resource, &included);

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &row);
    }
    render_details(&mut out, &row)?;
    Ok(())
}

fn render_details<W: Write>(out: &mut W, row: &JobRow) -> io::Result<()> {
    writeln!(out, "ID: {}", row.id)?;
    writeln!(out)?;

    writeln!(out, "Job:")?;
    render::detail_line(out, "External Job Number", &row.external_job_number)?;
    render::detail_line(out, "Job Production Plan", &row.job_production_plan)?;
    render::detail_line(out, "Job Production Plan ID", &row.job_production_plan_id)?;
    writeln!(out)?;

    writeln!(out, "Job Site:")?;
    render::detail_line(out, "ID", &row.job_site_id)?;
    render::detail_line(out, "Name", &row.job_site)?;
    writeln!(out)?;

    writeln!(out, "Customer:")?;
    render::detail_line(out, "ID", &row.customer_id)?;
    render::detail_line(out, "Name", &row.customer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbe_api::model::document::Document;

    fn response(json: &str) -> (Vec<Resource>, Included) {
        Document::from_slice(json.as_bytes()).unwrap().into_collection().unwrap()
    }

    #[test]
    fn row_resolves_customer_label_from_included() {
        let (resources, included) = response(
            r#"{
                "data": [{
                    "type": "jobs",
                    "id": "1",
                    "relationships": {
                        "customer": {"data": {"type": "customers", "id": "9"}}
                    }
                }],
                "included": [
                    {"type": "customers", "id": "9", "attributes": {"company-name": "Acme"}}
                ]
            }"#,
        );
        let row = build_row(&resources[0], &included);
        assert_eq!(row.customer, "Acme");
        assert_eq!(row.customer_id, "9");
    }

    #[test]
    fn row_falls_back_to_customer_id_without_sideload() {
        let (resources, included) = response(
            r#"{
                "data": [{
                    "type": "jobs",
                    "id": "1",
                    "relationships": {
                        "customer": {"data": {"type": "customers", "id": "9"}}
                    }
                }]
            }"#,
        );
        let row = build_row(&resources[0], &included);
        // Not sideloaded: display shows the id, never an empty cell.
        assert_eq!(row.customer, "9");
        assert_eq!(row.customer_id, "9");
    }

    #[test]
    fn row_prefers_the_plan_job_number() {
        let (resources, included) = response(
            r#"{
                "data": [{
                    "type": "jobs",
                    "id": "1",
                    "relationships": {
                        "job-production-plan": {
                            "data": {"type": "job-production-plans", "id": "8"}
                        }
                    }
                }],
                "included": [{
                    "type": "job-production-plans",
                    "id": "8",
                    "attributes": {"job-number": "JP-8", "job-name": "Main St overlay"}
                }]
            }"#,
        );
        let row = build_row(&resources[0], &included);
        assert_eq!(row.job_production_plan, "JP-8");
        assert_eq!(row.job_production_plan_id, "8");
    }

    #[test]
    fn blank_list_filters_stay_out_of_the_query() {
        let args = ListArgs {
            customer: String::new(),
            job_site: "  ".to_string(),
            start_date: String::new(),
            start_at_min: String::new(),
            start_at_max: String::new(),
            offered: String::new(),
            broker: "4".to_string(),
            trucker: String::new(),
            job_production_plan: String::new(),
            external_job_number: String::new(),
            sort: String::new(),
            page: crate::args::PageArgs { limit: 0, offset: 0 },
            output: crate::args::OutputArgs { json: false },
            conn: crate::args::ConnectionArgs {
                base_url: "https://api.x-b-e.com".to_string(),
                token: None,
                no_auth: true,
            },
        };
        let pairs = list_query(&args).to_pairs();
        assert!(pairs.iter().any(|(k, v)| k == "filter[broker]" && v == "4"));
        assert!(pairs.iter().all(|(k, _)| k != "filter[job-site]"));
        assert!(pairs.iter().all(|(k, _)| k != "page[limit]"));
    }
}
