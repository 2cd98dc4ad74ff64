//! Command dispatch and the connection plumbing every subcommand shares.

pub mod action_items;
pub mod broker_memberships;
pub mod brokers;
pub mod customer_tenders;
pub mod jobs;

use anyhow::{bail, Result};
use xbe_api::{auth, Client, Error};

use crate::args::{
    ActionItemsView, BrokerMembershipsDo, BrokerMembershipsView, BrokersDo, BrokersView, Cli,
    Commands, ConnectionArgs, CustomerTendersView, DoCommands, JobsView, ViewCommands,
};

/// Whether a command can run unauthenticated when no token resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Optional,
    Required,
}

pub fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::View(view) => match view {
            ViewCommands::Brokers(BrokersView::List(args)) => brokers::list(args),
            ViewCommands::Jobs(JobsView::List(args)) => jobs::list(args),
            ViewCommands::Jobs(JobsView::Show(args)) => jobs::show(args),
            ViewCommands::BrokerMemberships(BrokerMembershipsView::List(args)) => {
                broker_memberships::list(args)
            }
            ViewCommands::BrokerMemberships(BrokerMembershipsView::Show(args)) => {
                broker_memberships::show(args)
            }
            ViewCommands::CustomerTenders(CustomerTendersView::List(args)) => {
                customer_tenders::list(args)
            }
            ViewCommands::CustomerTenders(CustomerTendersView::Show(args)) => {
                customer_tenders::show(args)
            }
            ViewCommands::ActionItems(ActionItemsView::List(args)) => action_items::list(args),
            ViewCommands::ActionItems(ActionItemsView::Show(args)) => action_items::show(args),
        },
        Commands::Do(operation) => match operation {
            DoCommands::Brokers(BrokersDo::Create(args)) => brokers::create(args),
            DoCommands::Brokers(BrokersDo::Update(args)) => brokers::update(args),
            DoCommands::BrokerMemberships(BrokerMembershipsDo::Delete(args)) => {
                broker_memberships::delete(args)
            }
        },
    }
}

/// Builds a client for the given connection flags.
///
/// Token precedence: `--token`, then the resolver (`XBE_TOKEN`, credentials
/// file). A token that resolves nowhere is soft for `Auth::Optional`
/// commands and a hard "authentication required" failure for
/// `Auth::Required` ones; `--no-auth` only applies to the former.
pub fn connect(conn: &ConnectionArgs, auth_mode: Auth) -> Result<Client> {
    let explicit = conn.token.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let token = if let Some(token) = explicit {
        Some(token.to_string())
    } else if conn.no_auth && auth_mode == Auth::Optional {
        None
    } else {
        match auth::resolve_token(&conn.base_url) {
            Ok(token) => Some(token),
            Err(Error::TokenNotFound) if auth_mode == Auth::Optional => None,
            Err(Error::TokenNotFound) => {
                bail!("Authentication required. Pass --token or set XBE_TOKEN.")
            }
            Err(err) => return Err(err.into()),
        }
    };

    Ok(Client::new(&conn.base_url, token)?)
}
