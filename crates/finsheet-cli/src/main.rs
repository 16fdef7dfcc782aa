//! finsheet CLI - drive a financial spreading grid from the terminal

mod config;
mod script;
mod table;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use finsheet::prelude::*;
use finsheet::{
    CsvDialect, CsvReadOptions, CsvWriteOptions, DisplayScale, LineTerminator, NegativeFormat,
};
use log::{debug, info, LevelFilter};

use crate::config::Config;
use crate::script::{parse_script, Step};
use crate::table::format_table;

#[derive(Parser)]
#[command(name = "finsheet")]
#[command(author, version, about = "Financial spreading grid: line items by reporting periods")]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Long-format value file (line_item_code,period_id,value); default: sample values
    #[arg(long, global = true)]
    values: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip invalid lines in the value file instead of failing
    #[arg(long, global = true)]
    skip_invalid: bool,

    /// Display scale
    #[arg(long, global = true, value_enum)]
    scale: Option<ScaleArg>,

    /// Digits after the decimal point
    #[arg(long, global = true)]
    decimals: Option<u8>,

    /// Show negatives with a minus sign instead of parentheses
    #[arg(long, global = true)]
    minus: bool,

    /// Round committed values to cents
    #[arg(long, global = true)]
    cents: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScaleArg {
    Decimal,
    Units,
    Thousands,
    Millions,
}

impl From<ScaleArg> for DisplayScale {
    fn from(scale: ScaleArg) -> Self {
        match scale {
            ScaleArg::Decimal => DisplayScale::Decimal,
            ScaleArg::Units => DisplayScale::Units,
            ScaleArg::Thousands => DisplayScale::Thousands,
            ScaleArg::Millions => DisplayScale::Millions,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// line_item_code,period_id,value records
    Values,
    /// The rendered grid with headers
    Grid,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grid
    Show,

    /// Run a script of grid commands and print the result
    Replay {
        /// Script file, one command per line
        script: PathBuf,

        /// Confirm and accept defaults for questions the script does not answer
        #[arg(short, long)]
        yes: bool,

        /// Print each step's outcome and notifications
        #[arg(short, long)]
        events: bool,

        /// Write the resulting values to a file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Report period dates with no active variant or several
    Audit,

    /// Export values or the rendered grid as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "grid")]
        format: ExportFormat,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Use CRLF line endings
        #[arg(long)]
        crlf: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli.input)?;
    let statement = load_statement(&cli.input)?;

    match cli.command {
        Commands::Show => show(statement, &config),
        Commands::Replay {
            script,
            yes,
            events,
            save,
        } => replay(statement, &config, &script, yes, events, save.as_deref()),
        Commands::Audit => audit(&statement),
        Commands::Export {
            output,
            format,
            delimiter,
            crlf,
        } => export(statement, &config, output.as_deref(), format, delimiter, crlf),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Config file, then command-line overrides
fn load_config(input: &InputArgs) -> Result<Config> {
    let mut config = match &input.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(scale) = input.scale {
        config.display.display_scale = scale.into();
    }
    if let Some(decimals) = input.decimals {
        anyhow::ensure!(
            decimals <= finsheet::MAX_DECIMAL_PLACES,
            "--decimals must be at most {}",
            finsheet::MAX_DECIMAL_PLACES
        );
        config.display.decimal_places = decimals;
    }
    if input.minus {
        config.display.negative_format = NegativeFormat::Minus;
    }
    if input.cents {
        config.commit.round_to_cents = true;
    }
    debug!("options: {:?}", config);
    Ok(config)
}

fn load_statement(input: &InputArgs) -> Result<Statement> {
    let Some(path) = &input.values else {
        return Ok(finsheet::sample::balance_sheet());
    };
    let options = CsvReadOptions {
        skip_invalid: input.skip_invalid,
        ..Default::default()
    };
    let values = CsvReader::read_values_file(path, &options)
        .with_context(|| format!("Failed to read values from '{}'", path.display()))?;
    info!("read {} values from '{}'", values.len(), path.display());
    finsheet::sample::balance_sheet_with_values(values).context("Failed to build statement")
}

fn open_grid<D: Dialogs>(statement: Statement, config: &Config, dialogs: D) -> Grid<D> {
    let mut grid = Grid::new(statement, dialogs, Vec::new()).with_options(config.grid_options());
    for date in &config.hidden_periods {
        grid.dispatch(GridCommand::HidePeriodEnd(*date));
    }
    grid
}

fn show(statement: Statement, config: &Config) -> Result<()> {
    let grid = open_grid(statement, config, AutoConfirm::new());
    write_stdout(&format_table(&grid.render()))
}

/// Scripted answers first; once they run out, either auto-confirm or decline
struct ReplayDialogs {
    scripted: ScriptedDialogs,
    fallback: Option<AutoConfirm>,
}

impl Dialogs for ReplayDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        match &mut self.fallback {
            Some(auto) if self.scripted.remaining() == 0 => auto.confirm(message),
            _ => self.scripted.confirm(message),
        }
    }

    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String> {
        match &mut self.fallback {
            Some(auto) if self.scripted.remaining() == 0 => auto.prompt_text(message, default),
            _ => self.scripted.prompt_text(message, default),
        }
    }
}

fn replay(
    statement: Statement,
    config: &Config,
    script: &Path,
    yes: bool,
    events: bool,
    save: Option<&Path>,
) -> Result<()> {
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script '{}'", script.display()))?;
    let lines = parse_script(&source)
        .with_context(|| format!("Invalid script '{}'", script.display()))?;

    let dialogs = ReplayDialogs {
        scripted: ScriptedDialogs::new(),
        fallback: yes.then(AutoConfirm::new),
    };
    let mut grid = open_grid(statement, config, dialogs);

    let mut seen = 0;
    for line in lines {
        match line.step {
            Step::Confirm(answer) => grid.dialogs_mut().scripted.push_confirm(answer),
            Step::Answer(text) => grid.dialogs_mut().scripted.push_text(text),
            Step::Command(command) => {
                let outcome = grid.dispatch(command);
                debug!("line {}: {} -> {:?}", line.line, line.text, outcome);
                if let Dispatch::Refused(e) = &outcome {
                    eprintln!("line {}: {}: {}", line.line, line.text, e);
                }
                if events {
                    println!("{:>4}  {:<32} {:?}", line.line, line.text, outcome);
                    for notification in &grid.observer()[seen..] {
                        println!("      {}", notification);
                    }
                }
                seen = grid.observer().len();
            }
        }
    }

    let unused = grid.dialogs().scripted.remaining();
    if unused > 0 {
        eprintln!("Warning: {} scripted answer(s) were never asked for", unused);
    }
    if events {
        println!();
    }
    write_stdout(&format_table(&grid.render()))?;

    if let Some(path) = save {
        CsvWriter::write_values_file(grid.statement().values(), path, &CsvWriteOptions::default())
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!("Wrote {} values to '{}'", grid.statement().values().len(), path.display());
    }
    Ok(())
}

fn audit(statement: &Statement) -> Result<()> {
    let report = statement.audit();
    if report.is_clean() {
        println!("Every period date has exactly one active variant");
        return Ok(());
    }
    for date in &report.missing {
        println!("{}: no active variant", date);
    }
    for date in &report.conflicting {
        println!("{}: more than one active variant", date);
    }
    anyhow::bail!(
        "{} period date(s) need attention",
        report.missing.len() + report.conflicting.len()
    )
}

fn export(
    statement: Statement,
    config: &Config,
    output: Option<&Path>,
    format: ExportFormat,
    delimiter: char,
    crlf: bool,
) -> Result<()> {
    anyhow::ensure!(delimiter.is_ascii(), "Delimiter must be a single ASCII character");
    let options = CsvWriteOptions {
        dialect: CsvDialect::new().with_delimiter(delimiter as u8),
        line_terminator: if crlf {
            LineTerminator::CRLF
        } else {
            LineTerminator::LF
        },
        ..Default::default()
    };

    let grid = open_grid(statement, config, AutoConfirm::new());
    let mut buf = Vec::new();
    let written = match format {
        ExportFormat::Values => CsvWriter::write_values(grid.statement().values(), &mut buf, &options),
        ExportFormat::Grid => CsvWriter::write_grid(&grid.render(), &mut buf, &options),
    };
    written.context("Failed to format CSV")?;

    match output {
        Some(path) => {
            std::fs::write(path, &buf)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote '{}'", path.display());
            Ok(())
        }
        None => io::stdout()
            .write_all(&buf)
            .context("Failed to write to stdout"),
    }
}

fn write_stdout(text: &str) -> Result<()> {
    io::stdout()
        .write_all(text.as_bytes())
        .context("Failed to write to stdout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(config: Option<PathBuf>) -> InputArgs {
        InputArgs {
            values: None,
            config,
            skip_invalid: false,
            scale: None,
            decimals: None,
            minus: false,
            cents: false,
        }
    }

    #[test]
    fn test_replay_saves_edited_values() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("edit.txt");
        let saved = dir.path().join("values.csv");
        std::fs::write(&script, "# edit cash\ndblclick 1 0\ntype (1,250)\nadd-period\n").unwrap();

        let statement = finsheet::sample::balance_sheet();
        replay(statement, &Config::default(), &script, false, false, Some(&saved)).unwrap();

        let values = CsvReader::read_values_file(&saved, &CsvReadOptions::default()).unwrap();
        assert_eq!(values.value("Asset.Current.Cash", "2022-12-31"), Some(-1250.0));
        assert_eq!(values.len(), 36);
    }

    #[test]
    fn test_export_grid_with_config_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("finsheet.toml");
        std::fs::write(&config_path, "hidden_periods = [\"2023-12-31\"]\n").unwrap();
        let mut args = input(Some(config_path));
        args.scale = Some(ScaleArg::Thousands);
        args.minus = true;
        let config = load_config(&args).unwrap();

        let output = dir.path().join("grid.csv");
        let statement = load_statement(&args).unwrap();
        export(statement, &config, Some(&output), ExportFormat::Grid, ';', true).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[1], "No.;Code;Line Item;12/31/2022;12/31/2024");
        assert_eq!(lines[10], "6;Asset.Fixed.AccumDepr;  Accumulated Depreciation;-1,450;-2,100");
    }

    #[test]
    fn test_load_statement_from_values_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.csv");
        std::fs::write(
            &path,
            "line_item_code,period_id,value\nAsset.Current.Cash,2024-12-31,42\nbad line\n",
        )
        .unwrap();

        let mut args = input(None);
        args.values = Some(path);
        assert!(load_statement(&args).is_err());

        args.skip_invalid = true;
        let statement = load_statement(&args).unwrap();
        assert_eq!(statement.values().len(), 1);
        assert_eq!(statement.rows().len(), 16);
    }
}
