use std::{
    env,
    io::{self, Read},
    path::PathBuf,
    process,
};

use chrono::NaiveDate;

use trade_ledger::{
    cli::{forms, output},
    core::services::ReportService,
    domain::ledger::{DateRange, Ledger},
    init,
    utils::persistence,
};

fn main() {
    init();

    if let Err(err) = run() {
        output::error(err);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    match command.as_str() {
        "new" => {
            let name = args.next().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });

            let ledger = Ledger::new(name);
            println!("{}", serde_json::to_string_pretty(&ledger)?);
        }
        "save" => {
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            let ledger: Ledger = serde_json::from_str(&buffer)?;
            persistence::save_ledger_to_file(&ledger, &path)?;
            output::success(format!("Saved ledger to {}", path.display()));
        }
        "load" => {
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let ledger = persistence::load_ledger_from_file(&path)?;
            println!("{}", serde_json::to_string_pretty(&ledger)?);
        }
        "record" => {
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let operator = optional_flag(&mut args, "--operator")?.unwrap_or_else(|| "cli".into());
            let mut ledger = persistence::load_ledger_from_file(&path)?;
            forms::record_entry(&mut ledger, &operator)?;
            persistence::save_ledger_to_file(&ledger, &path)?;
            output::success(format!("Saved ledger to {}", path.display()));
        }
        "report" => {
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let range = parse_range(&mut args)?;
            let ledger = persistence::load_ledger_from_file(&path)?;
            let summary = ReportService::dashboard(&ledger, range);
            output::render_dashboard(&summary);
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn optional_flag(
    args: &mut impl Iterator<Item = String>,
    name: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    match args.next() {
        None => Ok(None),
        Some(flag) if flag == name => {
            let value = args
                .next()
                .ok_or_else(|| format!("{name} requires a value"))?;
            Ok(Some(value))
        }
        Some(other) => Err(format!("unexpected argument: {other}").into()),
    }
}

fn parse_range(
    args: &mut impl Iterator<Item = String>,
) -> Result<Option<DateRange>, Box<dyn std::error::Error>> {
    let mut from = None;
    let mut to = None;
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("{flag} requires a value"))?;
        let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")?;
        match flag.as_str() {
            "--from" => from = Some(date),
            "--to" => to = Some(date),
            other => return Err(format!("unexpected argument: {other}").into()),
        }
    }
    match (from, to) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
        _ => Err("--from and --to must be given together".into()),
    }
}

fn print_usage() {
    eprintln!(
        "Usage: trade_ledger_cli <command>\n\
         Commands:\n  \
         new <name>\n  \
         save <file.json> < ledger.json\n  \
         load <file.json>\n  \
         record <file.json> [--operator NAME]\n  \
         report <file.json> [--from YYYY-MM-DD --to YYYY-MM-DD]"
    );
}
