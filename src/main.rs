use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use note_browser::args::{BrowseArgs, Cli, Command};
use note_browser::client::NotesClient;
use note_browser::config::Config;
use note_browser::notes::DateDisplay;
use note_browser::{dump, logging, ui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid command line override")?;

    let log_path = logging::init_tracing(&config.logging)?;
    tracing::info!(
        endpoint = %config.endpoint.url,
        log = %log_path.display(),
        "note-browser starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let client = Arc::new(NotesClient::from_config(&config)?);
    let dates = DateDisplay::from(&config.display);

    match cli.command {
        Some(Command::Dump(args)) => {
            let mut stdout = std::io::stdout().lock();
            let count = dump::run(runtime.handle().clone(), client, dates, &args, &mut stdout)?;
            tracing::info!(count, "Dump finished");
        }
        Some(Command::Browse(args)) => browse(runtime.handle().clone(), client, dates, args)?,
        None => browse(runtime.handle().clone(), client, dates, BrowseArgs::default())?,
    }

    tracing::info!("note-browser exiting");
    Ok(())
}

fn browse(
    runtime: tokio::runtime::Handle,
    client: Arc<NotesClient>,
    dates: DateDisplay,
    args: BrowseArgs,
) -> anyhow::Result<()> {
    let submit = args.mrn.is_some() && args.after.is_some();
    let prefill = ui::Prefill {
        patient_id: args.mrn,
        after: args.after,
        submit,
    };
    ui::run(runtime, client, dates, prefill).context("Terminal UI failed")
}
