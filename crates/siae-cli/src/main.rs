use anyhow::bail;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use siae_app::dashboard::DashboardPage;
use siae_app::processes::ProcessListPage;
use siae_client::ApiClient;
use siae_core::ProcessStatus;

mod display;

#[derive(Parser)]
#[command(name = "siae")]
#[command(about = "Terminal client for the SIAE administrative workflow backend")]
struct Cli {
    /// Base URL of the SIAE backend.
    #[arg(long, env = "SIAE_API_URL", default_value = "http://localhost:8080")]
    api_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List processes, filtered like the web table.
    Processes {
        /// Match against beneficiary, id, or sector.
        #[arg(long)]
        term: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusCli>,
        /// Only processes opened on this date (YYYY-MM-DD).
        #[arg(long)]
        opened: Option<NaiveDate>,
    },
    /// Show one process with its attached documents.
    Process { id: i64 },
    /// List registered public employees.
    Servers {
        /// Name search (3+ characters).
        #[arg(long)]
        name: Option<String>,
    },
    /// List database snapshots, newest first.
    Backups,
    /// Request a manual backup.
    Backup,
    /// Show the configured signing certificate.
    Certificate,
    /// Per-status counts plus the infrastructure health probe.
    Dashboard,
    /// Infrastructure health probe only.
    Health,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusCli {
    Legal,
    Executive,
    Finalized,
    Cancelled,
}

impl From<StatusCli> for ProcessStatus {
    fn from(status: StatusCli) -> Self {
        match status {
            StatusCli::Legal => ProcessStatus::InProgressLegal,
            StatusCli::Executive => ProcessStatus::InProgressExecutive,
            StatusCli::Finalized => ProcessStatus::Finalized,
            StatusCli::Cancelled => ProcessStatus::Cancelled,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("siae v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let client = ApiClient::new(cli.api_url);

    match cli.command {
        Commands::Processes { term, status, opened } => {
            let mut page = ProcessListPage::new(client);
            if let Some(term) = term {
                page.filter.term = term;
            }
            page.filter.status = status.map(Into::into);
            page.filter.date = opened;
            page.refresh().await;
            if let Some(err) = page.records.last_error() {
                bail!("could not fetch processes: {err}");
            }
            display::print_process_table(&page.visible());
        }
        Commands::Process { id } => {
            let process = client.get_process(id).await?;
            display::print_process_card(&process);
        }
        Commands::Servers { name } => {
            let servers = match name {
                Some(name) => client.search_servers(&name).await?,
                None => client.list_servers().await?,
            };
            display::print_server_table(&servers);
        }
        Commands::Backups => {
            let mut backups = client.list_backups().await?;
            backups.sort_by_key(|b| std::cmp::Reverse(b.created_at));
            display::print_backup_table(&backups.iter().collect::<Vec<_>>());
        }
        Commands::Backup => {
            client.trigger_backup().await?;
            println!("backup started");
        }
        Commands::Certificate => {
            let info = client.get_certificate().await?;
            display::print_certificate(info.as_ref(), Local::now().naive_local());
        }
        Commands::Dashboard => {
            let mut page = DashboardPage::new(client);
            page.refresh().await;
            if let Some(err) = page.processes.last_error() {
                bail!("could not fetch processes: {err}");
            }
            let stats = page.stats(Local::now().date_naive());
            println!("=== Processes ===");
            println!("  {:<14} {}", "total", stats.total);
            println!("  {:<14} {}", "in legal", stats.in_legal);
            println!("  {:<14} {}", "in executive", stats.in_executive);
            println!("  {:<14} {}", "finalized", stats.finalized);
            println!("  {:<14} {}", "cancelled", stats.cancelled);
            println!("  {:<14} {}", "overdue", stats.overdue);
            println!();
            println!("=== Infrastructure ===");
            match page.health.value() {
                Some(health) => display::print_health(health),
                None => println!("  (health probe unreachable)"),
            }
        }
        Commands::Health => {
            let health = client.health().await?;
            display::print_health(&health);
        }
    }

    Ok(())
}
