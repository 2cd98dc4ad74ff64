//! `xbe view brokers list`, `xbe do brokers create|update`.

use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use xbe_api::builder::ResourceBuilder;
use xbe_api::model::resource::Resource;
use xbe_api::query::Query;

use crate::args::{ConnectionArgs, OutputArgs, PageArgs};
use crate::commands::{connect, Auth};
use crate::render;

const TABLE_COMPANY_MAX: usize = 80;

/// List brokers with filtering and pagination. Results are sorted
/// alphabetically by company name.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by company name (partial match)
    #[arg(long, default_value = "")]
    pub company_name: String,

    /// Filter by active status (true/false)
    #[arg(long, default_value = "")]
    pub is_active: String,

    /// Filter by default status (true/false)
    #[arg(long, default_value = "")]
    pub is_default: String,

    /// Filter by subdomain
    #[arg(long, default_value = "")]
    pub sub_domain: String,

    /// Filter by QuickBooks enabled status (true/false)
    #[arg(long, default_value = "")]
    pub quickbooks_enabled: String,

    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BrokerRow {
    pub id: String,
    pub company_name: String,
}

pub fn list(args: &ListArgs) -> Result<()> {
    let client = connect(&args.conn, Auth::Optional)?;

    let query = Query::new()
        .fields("brokers", &["company-name"])
        .sort("company-name")
        .filter("company-name", &args.company_name)
        .filter("is-active", &args.is_active)
        .filter("is-default", &args.is_default)
        .filter("sub-domain", &args.sub_domain)
        .filter("quickbooks-enabled", &args.quickbooks_enabled)
        .page(args.page.limit, args.page.offset);

    let (resources, _) = client.get("/v1/brokers", &query)?.into_collection()?;
    let rows: Vec<BrokerRow> = resources.iter().map(build_row).collect();

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &rows);
    }
    if rows.is_empty() {
        render::write_empty(&mut out, "brokers")?;
        return Ok(());
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![row.id.clone(), render::truncate(&row.company_name, TABLE_COMPANY_MAX)]
        })
        .collect();
    render::write_table(&mut out, &["ID", "COMPANY"], &cells)?;
    Ok(())
}

fn build_row(resource: &Resource) -> BrokerRow {
    BrokerRow {
        id: resource.id.clone(),
        company_name: resource.attributes.trimmed("company-name"),
    }
}

/// Create a new broker.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Company name (required)
    #[arg(long)]
    pub name: String,

    /// Short abbreviation
    #[arg(long, default_value = "")]
    pub abbreviation: String,

    /// Default trucker payment terms (days)
    #[arg(long, default_value_t = 0)]
    pub default_trucker_payment_terms: i64,

    /// Default customer payment terms (days)
    #[arg(long, default_value_t = 0)]
    pub default_customer_payment_terms: i64,

    /// Transport only (true/false)
    #[arg(long, default_value = "")]
    pub is_transport_only: String,

    /// Active status (true/false, admin only)
    #[arg(long, default_value = "")]
    pub is_active: String,

    /// Default reply-to email address
    #[arg(long, default_value = "")]
    pub default_reply_to_email: String,

    /// Remit-to address
    #[arg(long, default_value = "")]
    pub remit_to_address: String,

    /// Help text
    #[arg(long, default_value = "")]
    pub help_text: String,

    /// Default financial contact user ID
    #[arg(long, default_value = "")]
    pub default_financial_contact: String,

    /// Default operations contact user ID
    #[arg(long, default_value = "")]
    pub default_operations_contact: String,

    /// Default dispatch contact user ID
    #[arg(long, default_value = "")]
    pub default_dispatch_contact: String,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}

pub fn create(args: &CreateArgs) -> Result<()> {
    if args.name.trim().is_empty() {
        bail!("--name is required");
    }
    let client = connect(&args.conn, Auth::Required)?;

    // Payment terms are required by server validation, so they go out even
    // when left at zero.
    let document = ResourceBuilder::new("brokers")
        .attr("company-name", args.name.trim())
        .attr("default-trucker-payment-terms", args.default_trucker_payment_terms)
        .attr("default-customer-payment-terms", args.default_customer_payment_terms)
        .attr_if("abbreviation", &args.abbreviation)
        .flag_if("is-transport-only", &args.is_transport_only)
        .flag_if("is-active", &args.is_active)
        .attr_if("default-reply-to-email-address", &args.default_reply_to_email)
        .attr_if("remit-to-address", &args.remit_to_address)
        .attr_if("help-text", &args.help_text)
        .to_one("default-financial-contact", "users", &args.default_financial_contact)
        .to_one("default-operations-contact", "users", &args.default_operations_contact)
        .to_one("default-dispatch-contact", "users", &args.default_dispatch_contact)
        .build();

    let (resource, _) = client.post("/v1/brokers", &document)?.into_single()?;
    let row = build_row(&resource);

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &row);
    }
    writeln!(out, "Created broker {} ({})", row.id, row.company_name)?;
    Ok(())
}

/// Update an existing broker.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Broker ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Company name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Short abbreviation
    #[arg(long, default_value = "")]
    pub abbreviation: String,

    /// Default trucker payment terms (days)
    #[arg(long)]
    pub default_trucker_payment_terms: Option<i64>,

    /// Default customer payment terms (days)
    #[arg(long)]
    pub default_customer_payment_terms: Option<i64>,

    /// Transport only (true/false)
    #[arg(long, default_value = "")]
    pub is_transport_only: String,

    /// Active status (true/false, admin only)
    #[arg(long, default_value = "")]
    pub is_active: String,

    /// Help text
    #[arg(long, default_value = "")]
    pub help_text: String,

    /// Default financial contact user ID
    #[arg(long, default_value = "")]
    pub default_financial_contact: String,

    /// Clear the default financial contact
    #[arg(long)]
    pub clear_default_financial_contact: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub conn: ConnectionArgs,
}

pub fn update(args: &UpdateArgs) -> Result<()> {
    let id = args.id.trim();
    if id.is_empty() {
        bail!("broker id is required");
    }
    let client = connect(&args.conn, Auth::Required)?;

    let mut builder = ResourceBuilder::new("brokers")
        .id(id)
        .attr_if("company-name", &args.name)
        .attr_if("abbreviation", &args.abbreviation)
        .int_if("default-trucker-payment-terms", args.default_trucker_payment_terms)
        .int_if("default-customer-payment-terms", args.default_customer_payment_terms)
        .flag_if("is-transport-only", &args.is_transport_only)
        .flag_if("is-active", &args.is_active)
        .attr_if("help-text", &args.help_text);
    if args.clear_default_financial_contact {
        builder = builder.clear_to_one("default-financial-contact");
    } else {
        builder =
            builder.to_one("default-financial-contact", "users", &args.default_financial_contact);
    }

    let path = format!("/v1/brokers/{id}");
    let (resource, _) = client.patch(&path, &builder.build())?.into_single()?;
    let row = build_row(&resource);

    let mut out = io::stdout();
    if args.output.json {
        return render::write_json(&mut out, &row);
    }
    writeln!(out, "Updated broker {} ({})", row.id, row.company_name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_copies_id_and_trimmed_company_name() {
        let resource: Resource = serde_json::from_str(
            r#"{
                "type": "brokers",
                "id": "4",
                "attributes": {"company-name": "  ABC Logistics  "}
            }"#,
        )
        .unwrap();
        let row = build_row(&resource);
        assert_eq!(row, BrokerRow { id: "4".to_string(), company_name: "ABC Logistics".to_string() });
    }

    #[test]
    fn row_tolerates_a_missing_company_name() {
        let resource: Resource =
            serde_json::from_str(r#"{"type": "brokers", "id": "9"}"#).unwrap();
        let row = build_row(&resource);
        assert_eq!(row.company_name, "");
    }
}
