use clap::Parser;
use custpay::application::{CustomerRegistrar, PaymentProcessor};
use custpay::config::GatewayConfig;
use custpay::domain::ports::{CustomerDirectoryBox, PaymentLedgerBox};
use custpay::infrastructure::in_memory::{InMemoryCustomerDirectory, InMemoryPaymentLedger};
#[cfg(feature = "storage-rocksdb")]
use custpay::infrastructure::rocksdb::RocksDBStore;
use custpay::interfaces::batch::{BatchProcessor, Outcome};
use custpay::interfaces::csv::outcome_writer::OutcomeWriter;
use custpay::interfaces::csv::request_reader::RequestReader;
use custpay::logging;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input requests CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "CUSTPAY_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    gateway: GatewayConfig,
}

/// Customer directory handles for the registrar and the processor, plus the ledger.
type Stores = (CustomerDirectoryBox, CustomerDirectoryBox, PaymentLedgerBox);

fn open_stores(db_path: Option<PathBuf>) -> Result<Stores> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = db_path {
        tracing::info!(path = %db_path.display(), "Using RocksDB storage");
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        return Ok((
            Box::new(store.clone()),
            Box::new(store.clone()),
            Box::new(store),
        ));
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }

    let directory = InMemoryCustomerDirectory::new();
    Ok((
        Box::new(directory.clone()),
        Box::new(directory),
        Box::new(InMemoryPaymentLedger::new()),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);
    tracing::debug!(gateway = ?cli.gateway, "Starting custpay");

    let (registrar_directory, processor_directory, ledger) = open_stores(cli.db_path)?;
    let gateway = cli.gateway.build_gateway().into_diagnostic()?;

    let batch = BatchProcessor::new(
        CustomerRegistrar::new(registrar_directory),
        PaymentProcessor::new(processor_directory, ledger, gateway),
    );

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());

    for (index, request) in reader.requests().enumerate() {
        let row = index + 1;
        let outcome = match request {
            Ok(request) => batch.handle(row, request).await,
            Err(e) => {
                tracing::warn!(row, error = %e, "Error reading request");
                Outcome::failed(row, "invalid", &e)
            }
        };
        writer.write_outcome(&outcome).into_diagnostic()?;
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
