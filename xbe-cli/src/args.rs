//! CLI argument definitions using clap. The command tree is built
//! statically from these enums; adding a resource means adding a variant
//! here and a module under `commands/`.

use clap::{Args, Parser, Subcommand};

use crate::commands::{action_items, broker_memberships, brokers, customer_tenders, jobs};

/// Command-line client for the XBE platform
#[derive(Parser, Debug)]
#[command(name = "xbe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read-only views of API resources
    #[command(subcommand)]
    View(ViewCommands),

    /// Mutating operations on API resources
    #[command(subcommand)]
    Do(DoCommands),
}

#[derive(Subcommand, Debug)]
pub enum ViewCommands {
    /// Brokers registered on the platform
    #[command(subcommand)]
    Brokers(BrokersView),

    /// Jobs and their production plans
    #[command(subcommand)]
    Jobs(JobsView),

    /// Broker staff memberships
    #[command(subcommand, name = "broker-memberships")]
    BrokerMemberships(BrokerMembershipsView),

    /// Tenders offered to customers
    #[command(subcommand, name = "customer-tenders")]
    CustomerTenders(CustomerTendersView),

    /// Action items and their assignees
    #[command(subcommand, name = "action-items")]
    ActionItems(ActionItemsView),
}

#[derive(Subcommand, Debug)]
pub enum DoCommands {
    /// Create or update brokers
    #[command(subcommand)]
    Brokers(BrokersDo),

    /// Remove broker staff memberships
    #[command(subcommand, name = "broker-memberships")]
    BrokerMemberships(BrokerMembershipsDo),
}

#[derive(Subcommand, Debug)]
pub enum BrokersView {
    /// List brokers
    List(brokers::ListArgs),
}

#[derive(Subcommand, Debug)]
pub enum BrokersDo {
    /// Create a new broker
    Create(brokers::CreateArgs),
    /// Update an existing broker
    Update(brokers::UpdateArgs),
}

#[derive(Subcommand, Debug)]
pub enum JobsView {
    /// List jobs
    List(jobs::ListArgs),
    /// Show one job
    Show(jobs::ShowArgs),
}

#[derive(Subcommand, Debug)]
pub enum BrokerMembershipsView {
    /// List broker memberships
    List(broker_memberships::ListArgs),
    /// Show one broker membership
    Show(broker_memberships::ShowArgs),
}

#[derive(Subcommand, Debug)]
pub enum BrokerMembershipsDo {
    /// Delete a broker membership and display the deleted record
    Delete(broker_memberships::DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum CustomerTendersView {
    /// List customer tenders
    List(customer_tenders::ListArgs),
    /// Show one customer tender
    Show(customer_tenders::ShowArgs),
}

#[derive(Subcommand, Debug)]
pub enum ActionItemsView {
    /// List action items
    List(action_items::ListArgs),
    /// Show one action item
    Show(action_items::ShowArgs),
}

/// Connection flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(long, env = "XBE_BASE_URL", default_value = "https://api.x-b-e.com")]
    pub base_url: String,

    /// API token (overrides the resolved credentials)
    #[arg(long)]
    pub token: Option<String>,

    /// Disable auth token lookup
    #[arg(long)]
    pub no_auth: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Page size (defaults to the server default)
    #[arg(long, default_value_t = 0)]
    pub limit: u32,

    /// Page offset
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}
