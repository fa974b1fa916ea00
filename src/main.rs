use balance_sheet_narrative::config::DEFAULT_LOG_FILE;
use balance_sheet_narrative::logging::init_logging;
use balance_sheet_narrative::update::CURRENT_VERSION;
use balance_sheet_narrative::{
    run_profit_and_loss, AppConfig, BalanceSheetNarrator, ReportOptions, Result,
};
use clap::{Args, Parser, Subcommand};
use log::{debug, error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "balance-sheet-narrative",
    version,
    disable_version_flag = true,
    about = "Narrative analysis of financial statements kept in Excel files",
    after_help = "Use '<command> --help' for detailed command info."
)]
struct Cli {
    /// Print version and exit.
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Enable detailed (debug-level) logging.
    #[arg(short = 'V', long, global = true)]
    verbose: bool,

    /// File the log is appended to.
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the balance sheet in the given excel file.
    Bs(BalanceSheetArgs),

    /// Analyze the profit and loss statement in the given excel file.
    Pnl(StatementArgs),

    /// Check GitHub for a newer version.
    #[cfg(feature = "update")]
    Update,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Bs(_) => "bs",
            Command::Pnl(_) => "pnl",
            #[cfg(feature = "update")]
            Command::Update => "update",
        }
    }
}

#[derive(Args, Debug)]
struct StatementArgs {
    /// Path to input excel file.
    #[arg(short, long)]
    input: PathBuf,

    /// Name of the tab holding the statement. The first tab when omitted.
    #[arg(short = 't', long = "tab_name")]
    tab_name: Option<String>,

    /// Path for the analysis output (default: 1.docx).
    #[arg(short, long)]
    output: Option<String>,
}

impl StatementArgs {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            sheet: self.tab_name.clone(),
            output: self.output.clone(),
            ..ReportOptions::new(&self.input)
        }
    }
}

#[derive(Args, Debug)]
struct BalanceSheetArgs {
    #[command(flatten)]
    statement: StatementArgs,

    /// Earliest year to narrate. Earlier year columns are dropped.
    #[arg(long)]
    first_year: Option<i64>,

    /// Latest year to narrate. Later year columns are dropped.
    #[arg(long)]
    last_year: Option<i64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AppConfig {
        verbose: cli.verbose,
        log_file: Some(cli.log_file.clone()),
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        "Starting {} (version {})",
        env!("CARGO_PKG_NAME"),
        CURRENT_VERSION
    );
    debug!("Command arguments: {:?}", cli);

    let name = cli.command.name();
    match execute(&cli.command) {
        Ok(()) => {
            info!("Command '{}' completed successfully.", name);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("An error occurred while executing '{}': {}", name, e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: &Command) -> Result<()> {
    match command {
        Command::Bs(args) => {
            let options = ReportOptions {
                first_year: args.first_year,
                last_year: args.last_year,
                ..args.statement.report_options()
            };
            BalanceSheetNarrator::run(&options)?;
        }
        Command::Pnl(args) => {
            run_profit_and_loss(&args.report_options())?;
        }
        #[cfg(feature = "update")]
        Command::Update => run_update()?,
    }
    Ok(())
}

#[cfg(feature = "update")]
fn run_update() -> Result<()> {
    use balance_sheet_narrative::update::{
        check_release, fetch_latest_release, open_release_page, UpdateStatus,
    };

    info!("Current version: {}", CURRENT_VERSION);

    let release = match fetch_latest_release() {
        Ok(release) => release,
        Err(e) => {
            error!("Failed to check for updates: {}", e);
            println!("Could not check for updates. Please try again later.");
            return Ok(());
        }
    };
    info!("Latest version on GitHub: {}", release.version());

    match check_release(CURRENT_VERSION, &release)? {
        UpdateStatus::UpToDate { current } => {
            println!("You are up to date (version {}).", current);
        }
        UpdateStatus::Available {
            latest,
            release_url,
        } => {
            println!(
                "A newer version is available: {} (you have {}).",
                latest, CURRENT_VERSION
            );
            println!("Opening the GitHub release page so you can download the installer...");
            if !open_release_page(&release_url, |url| open::that(url)) {
                println!("Download the installer from the release page: {}", release_url);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bs_command() {
        let cli = Cli::try_parse_from([
            "balance-sheet-narrative",
            "-V",
            "bs",
            "-i",
            "sheet.xlsx",
            "--tab_name",
            "מאזן",
            "--first-year",
            "2022",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_file, PathBuf::from("app.log"));
        match cli.command {
            Command::Bs(args) => {
                assert_eq!(args.statement.input, PathBuf::from("sheet.xlsx"));
                assert_eq!(args.statement.tab_name.as_deref(), Some("מאזן"));
                assert_eq!(args.statement.output, None);
                assert_eq!(args.first_year, Some(2022));
                assert_eq!(args.last_year, None);
            }
            other => panic!("expected bs, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_pnl_command() {
        let cli =
            Cli::try_parse_from(["balance-sheet-narrative", "pnl", "--input", "p.xlsx", "-o", "out"])
                .unwrap();

        assert!(!cli.verbose);
        assert_eq!(cli.command.name(), "pnl");
        if let Command::Pnl(args) = &cli.command {
            let options = args.report_options();
            assert_eq!(options.output_path(), PathBuf::from("out.docx"));
            assert_eq!(options.sheet, None);
        }
    }

    #[test]
    fn test_version_flag() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["balance-sheet-narrative", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        }

        let cli = Cli::try_parse_from(["balance-sheet-narrative", "-V", "pnl", "-i", "p.xlsx"])
            .unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["balance-sheet-narrative", "bs"]).is_err());
    }
}
