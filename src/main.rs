use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};

use model_pull_lib::{
    app,
    comfy_table::create_summary_table,
    commands::Cli,
    fetch::HubFetcher,
    logging::{self, LogConfig},
    settings,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    logging::init(&LogConfig::from_verbosity(cli.verbose))?;

    let settings = settings::get_config().wrap_err("Failed to load settings")?;
    let fetcher = HubFetcher::new(&settings.hub)?;

    let reports = app::run(&cli.selected_models(), &settings, &fetcher)?;
    println!("{}", create_summary_table(&reports));

    let failed = reports.iter().filter(|r| !r.outcome.succeeded()).count();
    if failed > 0 {
        return Err(eyre!("{failed} of {} model downloads failed", reports.len()));
    }
    Ok(())
}
