use clap::Parser;
use dignet::cli::{run, Cli};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::process::ExitCode;

const LOG_CONFIG: &str = "log4rs.yml";

// Without log4rs.yml only warnings reach stderr; stdout stays for the report.
fn init_logging() {
    if log4rs::init_file(LOG_CONFIG, Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();
    if let Ok(config) = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(log::LevelFilter::Warn))
    {
        log4rs::init_config(config).ok();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging();
    let cli = Cli::parse();
    log::info!("#Start main()");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("run() failed: {e:?}");
            eprintln!("Failed to run dignet: {e}");
            ExitCode::FAILURE
        }
    }
}
