extern crate feedcal as lib;

use chrono::Month;
use flexi_logger::{FileSpec, Logger};
use lib::calendar::MonthIndex;
use lib::events::{Dispatcher, Event};
use lib::pane::CalendarPane;
use lib::provider::{CountApi, CountSource, HttpCountSource, StaticCountSource};
use lib::render::Renderer;
use num_traits::FromPrimitive;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fcal",
    about = "Feedcal - post-activity calendar for the feed."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "y", long = "year", help = "year to show (defaults to current)")]
    pub year: Option<i32>,

    #[structopt(
        short = "m",
        long = "month",
        help = "month to show, 1-12 (defaults to current)"
    )]
    pub month: Option<u32>,

    #[structopt(long = "offline", help = "render without contacting the count API")]
    pub offline: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn requested_month(args: &Args) -> Result<MonthIndex, Box<dyn std::error::Error>> {
    let current = MonthIndex::default();

    let number = args.month.unwrap_or_else(|| current.number());
    let index = Month::from_u32(number).ok_or("month must be in 1..=12")?;

    Ok(MonthIndex::new(
        index,
        args.year.unwrap_or_else(|| current.year()),
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file.clone())?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let month = requested_month(&args)?;

    let source: Box<dyn CountSource> = if args.offline {
        Box::new(StaticCountSource::empty())
    } else {
        match CountApi::from_config(&config)? {
            Some(api) => Box::new(HttpCountSource::new(api)),
            None => {
                log::info!("no count API configured, showing the month without activity");
                Box::new(StaticCountSource::empty())
            }
        }
    };

    let dispatcher = Dispatcher::from_config(&config);
    let mut pane = CalendarPane::with_month(month, source, dispatcher.event_sink().clone());

    // One fetch-and-render cycle: wait for the counts of the displayed
    // month, but never longer than the request itself is allowed to take.
    let deadline = config.api_timeout() + Duration::from_secs(2);
    let started = Instant::now();

    loop {
        let remaining = match deadline.checked_sub(started.elapsed()) {
            Some(remaining) => remaining,
            None => {
                log::warn!("count lookup did not answer in time");
                break;
            }
        };

        match dispatcher.next_timeout(remaining) {
            Ok(event @ Event::CountsLoaded { .. }) => {
                pane.handle(event);
                break;
            }
            Ok(event) => pane.handle(event),
            Err(_) => {
                log::warn!("count lookup did not answer in time");
                break;
            }
        }
    }

    let stdout = stdout();
    Renderer::default().render(&pane.grid(), &mut stdout.lock())?;

    Ok(())
}
