use clap::{Parser, Subcommand};
use server::{load_config, seed::seed_database, start_server, state::init_store, store::Repository};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Replace all clients and cases in the configured store with sample records
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config()?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => start_server(config).await,
        Command::Seed => {
            if config.redis_url.is_none() {
                anyhow::bail!("REDIS_URL must be set to seed a persistent store");
            }

            let repository = Repository::new(init_store(&config).await);
            let summary = seed_database(&repository).await?;

            println!("Seeded {} clients and {} cases", summary.clients, summary.cases);

            Ok(())
        }
    }
}
