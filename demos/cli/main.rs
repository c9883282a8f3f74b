// Slope filtered mean, command line demo.
// Parses the measurements and options, runs the filter and prints the report.
use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

use slope_mean::prelude::{
    Combinator, Config, Error, IgnoreSlope, Measurement, Report, Sexagesimal, SlopeFilter,
};

fn cli() -> ArgMatches {
    Command::new("slope-mean")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Calculate the mean of angular measurements, excluding steep slope outliers.")
        .arg_required_else_help(true)
        .color(ColorChoice::Always)
        .arg(
            Arg::new("measurements")
                .action(ArgAction::Append)
                .required(true)
                .help("List of measurements in HH:MM:SS@00°00.0' format"),
        )
        .arg(
            Arg::new("ignore-slope")
                .long("ignore-slope")
                .action(ArgAction::Set)
                .allow_hyphen_values(true)
                .help("Threshold with operator, '<value' or '>value', for ignoring slope values. Default is >0.005."),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .action(ArgAction::Set)
                .help("Tolerance in percentage for slope deviation from the mean slope. Default is 10%."),
        )
        .arg(
            Arg::new("slope-combinator")
                .long("slope-combinator")
                .action(ArgAction::Set)
                .help("'or': one slope OK side suffices (default), 'and': both sides must pass."),
        )
        .arg(
            Arg::new("tolerance-combinator")
                .long("tolerance-combinator")
                .action(ArgAction::Set)
                .help("'or': one side within tolerance suffices (default), 'and': both sides must be."),
        )
        .arg(
            Arg::new("sexagesimal")
                .long("sexagesimal")
                .action(ArgAction::SetTrue)
                .help("Render angles as D°MM.mmm' instead of decimal degrees."),
        )
        .get_matches()
}

fn config(matches: &ArgMatches) -> Result<Config, Error> {
    let mut cfg = Config::default();

    if let Some(ignore) = matches.get_one::<String>("ignore-slope") {
        cfg = cfg.with_ignore_slope(IgnoreSlope::from_str(ignore)?);
    }

    if let Some(tolerance) = matches.get_one::<String>("tolerance") {
        let tolerance = f64::from_str(tolerance.trim()).map_err(|_| Error::InvalidTolerance)?;
        cfg = cfg.with_tolerance_percent(tolerance);
    }

    if let Some(combinator) = matches.get_one::<String>("slope-combinator") {
        cfg = cfg.with_slope_combinator(Combinator::from_str(combinator)?);
    }

    if let Some(combinator) = matches.get_one::<String>("tolerance-combinator") {
        cfg = cfg.with_tolerance_combinator(Combinator::from_str(combinator)?);
    }

    Ok(cfg)
}

fn angle(degrees: f64, sexagesimal: bool) -> String {
    if sexagesimal {
        Sexagesimal::from(degrees).to_string()
    } else {
        format!("{:.4}°", degrees)
    }
}

fn slope(slope: Option<f64>) -> String {
    match slope {
        Some(slope) => format!("{:+.4}", slope),
        None => "-".to_string(),
    }
}

fn flag(ok: bool) -> &'static str {
    if ok {
        "✔"
    } else {
        "✘"
    }
}

fn print_report(report: &Report, sexagesimal: bool) {
    println!(
        "{:<10} {:>12} {:>16} {:>16} {:>9} {:>13}",
        "Time", "Degrees", "Slope To (°/s)", "Slope From (°/s)", "Slope OK", "Tolerance OK"
    );
    println!("{}", "-".repeat(81));

    for record in report.records.iter() {
        println!(
            "{:<10} {:>12} {:>16} {:>16} {:>9} {:>13}",
            record.time.to_string(),
            angle(record.degrees, sexagesimal),
            slope(record.slope_to),
            slope(record.slope_from),
            flag(record.slope_ok),
            flag(record.tolerance_ok),
        );
    }

    let summary = &report.summary;
    println!();

    match summary.final_mean {
        Some(mean) => println!("Mean of accepted values: {}", angle(mean, sexagesimal)),
        None => println!("No values accepted for mean calculation."),
    }

    match summary.mean_slope_to {
        Some(mean) => println!("Mean of accepted Slope To values: {:.4}°/s", mean),
        None => println!("No Slope To values accepted for mean calculation."),
    }

    match summary.mean_slope_from {
        Some(mean) => println!("Mean of accepted Slope From values: {:.4}°/s", mean),
        None => println!("No Slope From values accepted for mean calculation."),
    }

    match summary.mean_tolerance_slope {
        Some(mean) => println!("Mean of slopes within tolerance: {:.4}°/s", mean),
        None => println!("No slopes within tolerance for mean calculation."),
    }

    if let Some(interval) = summary.average_interval_seconds {
        println!("Average interval: {:.1}s", interval);
    }

    if let Some(midpoint) = summary.midpoint_time {
        println!("Midpoint time: {}", midpoint);
    }

    println!("Ignore slope threshold used: {}°/s", summary.ignore_slope_used);
    println!("Tolerance: <{}%", summary.tolerance_used);
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let cfg = config(matches)?;

    let measurements = matches
        .get_many::<String>("measurements")
        .into_iter()
        .flatten()
        .map(|desc| Measurement::from_str(desc))
        .collect::<Result<Vec<_>, _>>()?;

    let filter = SlopeFilter::new(cfg)?;
    let report = filter.resolve(measurements)?;

    print_report(&report, matches.get_flag("sexagesimal"));
    Ok(())
}

pub fn main() {
    env_logger::init();

    let matches = cli();

    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
