//! `catalog` - command-line front end for the book catalog.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use catalog_core::{
    Book, BookId, CatalogAccess, CatalogClient, CatalogConfig, ConfigOverrides, ReaderId,
    UreqTransport,
};

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Query and edit the book catalog")]
struct Cli {
    /// Backend base URL [env: CATALOG_BASE_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Value sent as the Authorization header [env: CATALOG_AUTH_TOKEN]
    #[arg(long, global = true)]
    token: Option<String>,

    /// JSON dataset to preload instead of the built-in roster [env: CATALOG_DATASET]
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every reader in the roster
    Readers,
    /// Show one reader
    Reader { id: ReaderId },
    /// List every book held by the backend
    Books,
    /// Fetch one book
    Book { id: BookId },
    /// Fetch one book in its legacy title/year form
    Legacy { id: BookId },
    /// Create a book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long)]
        year: i32,
    },
    /// Replace a book
    Update {
        id: BookId,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long)]
        year: i32,
    },
    /// Delete a book
    Delete { id: BookId },
    /// Show the most popular book, optionally replacing it first
    Popular {
        #[arg(long)]
        set: Option<BookId>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CATALOG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = CatalogConfig::from_env_with_overrides(ConfigOverrides {
        base_url: cli.base_url,
        auth_token: cli.token,
        dataset_path: cli.dataset,
    })
    .context("invalid configuration")?;

    let dataset = config.load_dataset()?;
    let client = CatalogClient::new(&config.base_url, &config.auth_token);
    let mut access = CatalogAccess::new(client, UreqTransport::new(), dataset);

    match cli.command {
        Command::Readers => print_json(&access.get_all_readers())?,
        Command::Reader { id } => {
            let reader = access
                .get_reader_by_id(id)
                .with_context(|| format!("no reader with id {id}"))?;
            print_json(reader)?;
        }
        Command::Books => {
            let books = access.get_all_books().await.map_err(|err| {
                anyhow::anyhow!("{} ({})", err.friendly_message, err.message)
            })?;
            print_json(&books)?;
        }
        Command::Book { id } => print_json(&access.get_book_by_id(id).await?)?,
        Command::Legacy { id } => print_json(&access.get_old_book_by_id(id).await?)?,
        Command::Add {
            title,
            author,
            year,
        } => {
            let book = Book {
                book_id: 0,
                title,
                author,
                publication_year: year,
            };
            print_json(&access.add_book(&book).await?)?;
        }
        Command::Update {
            id,
            title,
            author,
            year,
        } => {
            let book = Book {
                book_id: id,
                title,
                author,
                publication_year: year,
            };
            access.update_book(&book).await?;
            tracing::info!(book_id = id, "book updated");
        }
        Command::Delete { id } => {
            access.delete_book(id).await?;
            tracing::info!(book_id = id, "book deleted");
        }
        Command::Popular { set } => {
            if let Some(id) = set {
                let book = access
                    .get_book_by_id(id)
                    .await
                    .with_context(|| format!("failed to fetch book {id}"))?;
                access.set_most_popular_book(book);
            }
            match access.most_popular_book() {
                Some(book) => print_json(book)?,
                None => println!("no most popular book"),
            }
        }
    }

    Ok(())
}
