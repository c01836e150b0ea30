use itemflow::config;
use itemflow::errors::AppError;
use itemflow::logging::SlogBridge;
use itemflow_core::Slogger;
use log::LevelFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cfg = config::load()?;
    let slogger = Slogger::new(itemflow::sink_for(cfg)).with_min_level(cfg.log.level);
    SlogBridge::new(slogger.clone(), LevelFilter::Info).install()?;

    log::info!("running scenario {} (uow {})", cfg.run.scenario, cfg.run.uow);
    let report = itemflow::run_scenario(cfg, slogger).await?;

    let results = serde_json::to_string(&report.successes().collect::<Vec<_>>())?;
    println!("{results}");
    Ok(())
}
