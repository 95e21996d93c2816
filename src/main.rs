use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;
use log::{error, info, LevelFilter};
use sesame_seed::cli::{normalize_args, version_banner, Opt};
use sesame_seed::main_runner;
use std::process::ExitCode;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Off
    };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .parse_default_env()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let opt = Opt::parse_from(normalize_args(std::env::args_os()));
    if opt.version {
        println!("{}", version_banner());
        return ExitCode::SUCCESS;
    }

    let config = opt.into_config();
    init_logging(config.verbose);

    match main_runner(config).await {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", DisplayErrorContext(&err));
            ExitCode::from(err.exit_code())
        }
    }
}
