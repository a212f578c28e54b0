//! Command-line tool for listing and adding records in the PostgreSQL store.
//!
//! ```bash
//! phonebook-seed --database-url postgres://... "Ada Lovelace" 39-44-5323523
//! phonebook-seed --database-url postgres://...
//! ```

use std::error::Error;

use clap::Parser;
use domain::{DuplicateNames, Person, PersonInput, Phonebook};
use person_store::PostgresPersonStore;
use sqlx::postgres::PgPoolOptions;

#[derive(Parser, Debug)]
#[command(name = "phonebook-seed")]
#[command(about = "List the phonebook or add a single entry to it", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Policy for names that are already stored (reject or allow)
    #[arg(long, env = "PHONEBOOK_DUPLICATE_NAMES", default_value = "reject")]
    duplicate_names: DuplicateNames,

    /// Name of the entry to add; lists all entries when omitted
    #[arg(requires = "number")]
    name: Option<String>,

    /// Number of the entry to add
    #[arg(requires = "name")]
    number: Option<String>,
}

fn added_message<Id>(person: &Person<Id>) -> String {
    format!("Added {} number {} to phonebook", person.name, person.number)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&cli.database_url)
        .await?;
    let store = PostgresPersonStore::new(pool.clone());
    store.run_migrations().await?;
    let phonebook = Phonebook::new(store, cli.duplicate_names);

    match (cli.name, cli.number) {
        (Some(name), Some(number)) => {
            let person = phonebook.add(PersonInput::new(name, number)).await?;
            println!("{}", added_message(&person));
        }
        _ => {
            println!("phonebook:");
            for person in phonebook.list().await? {
                println!("{} {}", person.name, person.number);
            }
        }
    }

    pool.close().await;
    Ok(())
}
