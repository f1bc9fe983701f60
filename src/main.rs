use std::{fs::File, io, io::Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use delaymap::{
    config::Args,
    logger,
    stats::{format_delay, PassStats},
    EstimationPass, Feed, Identity, LabelTable, Timetable, TimetableSnapshot, Translator,
};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.verbose)?;

    info!("Loading timetable from {}", args.timetable.display());
    let timetable = Timetable::from_dir(&args.timetable)
        .with_context(|| format!("loading timetable from {}", args.timetable.display()))?;
    info!(
        "Loaded {} stops and {} trips",
        timetable.stops.len(),
        timetable.trips.len()
    );
    let snapshot = TimetableSnapshot::new(timetable);

    let feed = match args.feed.as_str() {
        "-" => Feed::from_reader(io::stdin().lock()),
        path => Feed::from_reader(File::open(path).with_context(|| format!("opening {path}"))?),
    }
    .context("reading delay feed")?;
    info!("Read {} feed entities", feed.entities.len());

    let translator: Box<dyn Translator> = match &args.translations {
        Some(path) => Box::new(LabelTable::from_path(path)?),
        None => Box::new(Identity),
    };

    let now = args.now();
    let timetable = snapshot.load();
    let estimates = EstimationPass::new(&*timetable, &*translator)
        .with_diagnostics(args.diagnostics)
        .run(&feed, now);

    let stats: PassStats = estimates.iter().collect();
    info!(
        "{} trains: {} on time, {} minor delay, {} major delay, average {}, maximum {}",
        stats.total(),
        stats.on_time,
        stats.minor,
        stats.major,
        format_delay(stats.avg_delay.round() as i64),
        format_delay(stats.max_delay),
    );

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &estimates)?;
    writeln!(stdout)?;

    Ok(())
}
