use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use clap::{CommandFactory, FromArgMatches};
use rand::thread_rng;
use tokio::time::Instant;

use crate::args::LoadArgs;
use crate::config;
use crate::config::types::RunConfig;
use crate::error::{AppError, AppResult, ConfigError};
use crate::http;
use crate::metrics;
use crate::report;
use crate::workload;

/// Default config filenames checked when no `--config` is given.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["wmsload.toml", "wmsload.json"];

pub(crate) fn run() -> AppResult<()> {
    let args = match parse_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<LoadArgs>> {
    let mut cmd = LoadArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = LoadArgs::from_arg_matches(&matches)?;

    Ok(Some(args))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty = matches!(raw_args, [] | [_]);
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(args: LoadArgs) -> AppResult<()> {
    let file = config::load_config(args.config.as_deref())?
        .ok_or_else(|| AppError::config(ConfigError::NoConfigFound))?;
    let run_config = config::apply_config(&args, file)?;

    if let Some(count) = args.dump_urls {
        dump_urls(&run_config, count.get());
        return Ok(());
    }

    run_load(run_config).await
}

fn dump_urls(config: &RunConfig, count: u64) {
    let mut rng = thread_rng();
    for _ in 0..count {
        let request = workload::sample(config, &mut rng);
        println!("{}", workload::build_url(&request, config));
    }
}

async fn run_load(config: RunConfig) -> AppResult<()> {
    let client = http::build_client(&config)?;
    let config = Arc::new(config);

    tracing::info!(
        "Starting WMS load test: {} requests across {} workers against {}",
        config.requests.get(),
        config.workers.get(),
        config.service.url
    );

    let started = Instant::now();
    let task_config = Arc::clone(&config);
    let records = http::pool::run(
        config.requests.get(),
        config.workers.get(),
        move || {
            let config = Arc::clone(&task_config);
            let client = client.clone();
            async move {
                let request = workload::sample(&config, &mut thread_rng());
                tracing::debug!(
                    "Sampled '{}' level {:?} extent {:?}",
                    request.bounds_name,
                    request.level,
                    request.extent
                );
                let url = workload::build_url(&request, &config);
                http::fetch_map(&client, url).await
            }
        },
    )
    .await;
    let elapsed = started.elapsed();

    let rows = report::assemble(&records, &config);
    let path = report::timestamped_name(&config.output, Local::now());
    report::write_csv(&path, &rows).await?;

    let summary = metrics::summarize(&records);
    tracing::info!(
        "Finished: {} requests, {} successful, {} failed, average {:.3}s, elapsed {:.1}s; report written to '{}'",
        summary.requests,
        summary.successes,
        summary.failures,
        summary.average_seconds,
        elapsed.as_secs_f64(),
        path
    );

    Ok(())
}
