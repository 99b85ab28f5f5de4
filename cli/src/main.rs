//! `esendex`: inspect and send messages through the Esendex REST API.

use std::fmt::Debug;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use esendex::{
    AccountReference, BatchId, Credentials, EsendexClient, ListOption, Message, MessageId,
    MessageText, Recipient, Timestamp,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const PAGE_SIZE: u32 = 20;
/// Largest page whose start index still fits in a `u32`.
const MAX_PAGE: i64 = (u32::MAX / PAGE_SIZE) as i64 + 1;

#[derive(Parser, Debug)]
#[command(name = "esendex")]
#[command(about = "Esendex SMS gateway client", long_about = None)]
#[command(version)]
struct Cli {
    /// Esendex login
    #[arg(long, env = "ESENDEX_USERNAME")]
    username: String,

    /// Esendex password
    #[arg(long, env = "ESENDEX_PASSWORD", hide_env_values = true)]
    password: String,

    /// Scope listings to one account; required by `send`
    #[arg(long, global = true)]
    account_reference: Option<String>,

    /// Override the API root
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print JSON instead of a debug dump
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct PageArgs {
    /// One-based page number, 20 items per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE))]
    page: Option<u32>,
}

impl PageArgs {
    fn options(self) -> Vec<ListOption> {
        self.page
            .map(|page| ListOption::page((page - 1) * PAGE_SIZE, PAGE_SIZE))
            .into_iter()
            .collect()
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List sent messages
    Sent(PageArgs),
    /// List received messages
    Received(PageArgs),
    /// Show one message header
    Message { id: String },
    /// Show the text of one message
    Body { id: String },
    /// List accounts
    Accounts,
    /// List message batches
    Batches(PageArgs),
    /// Show one message batch
    Batch { id: String },
    /// Send a message from the selected account
    Send {
        #[arg(long)]
        to: String,
        #[arg(long)]
        body: String,
        /// Schedule delivery, e.g. 2030-01-01T09:00:00Z
        #[arg(long)]
        send_at: Option<Timestamp>,
    },
    /// Cancel a scheduled batch
    Cancel { batch_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let credentials = Credentials::new(&cli.username, &cli.password)?;
    let mut builder = EsendexClient::builder(credentials);
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url);
    }
    let client = builder.build().context("failed to build client")?;
    let account = cli
        .account_reference
        .as_deref()
        .map(AccountReference::new)
        .transpose()?;
    tracing::debug!(command = ?cli.command, account = ?account, "running command");

    let json = cli.json;
    match cli.command {
        Command::Sent(page) => {
            let options = page.options();
            let response = match account {
                Some(reference) => client.account(reference).sent(&options).await?,
                None => client.sent(&options).await?,
            };
            print(&response, json)
        }
        Command::Received(page) => {
            let options = page.options();
            let response = match account {
                Some(reference) => client.account(reference).received(&options).await?,
                None => client.received(&options).await?,
            };
            print(&response, json)
        }
        Command::Message { id } => {
            let header = client.message(&MessageId::new(id)?).await?;
            print(&header, json)
        }
        Command::Body { id } => {
            let header = client.message(&MessageId::new(id)?).await?;
            let body = client.body(&header).await?;
            print(&body, json)
        }
        Command::Accounts => print(&client.accounts().await?, json),
        Command::Batches(page) => {
            let options = page.options();
            let response = match account {
                Some(reference) => client.account(reference).batches(&options).await?,
                None => client.batches(&options).await?,
            };
            print(&response, json)
        }
        Command::Batch { id } => print(&client.batch(&BatchId::new(id)?).await?, json),
        Command::Send { to, body, send_at } => {
            let reference = account.context("--account-reference is required to send")?;
            let message = Message::new(Recipient::new(to)?, MessageText::new(body)?);
            let account = client.account(reference);
            let response = match send_at {
                Some(at) => account.send_at(at, vec![message]).await?,
                None => account.send(vec![message]).await?,
            };
            print(&response, json)
        }
        Command::Cancel { batch_id } => {
            client.cancel_batch(&BatchId::new(batch_id)?).await?;
            println!("cancelled");
            Ok(())
        }
    }
}

fn print<T: Serialize + Debug>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value:#?}");
    }
    Ok(())
}
