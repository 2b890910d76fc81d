//! MyFinance Importer - CLI tool for importing ProSoft XML exports.

use clap::{Parser, Subcommand};
use colored::Colorize;
use myfinance_import::{
    config::Config,
    conversion::{qif_path_for, write_qif_file},
    prosoft_format::ProsoftReport,
    qif_format::DEFAULT_QIF_DATE_FORMAT,
    upload::UploadClient,
    Result,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "myfinance_importer")]
#[command(about = "Import a ProSoft XML export into MyFinance as a QIF bank statement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an XML export to QIF and upload it to MyFinance
    Import {
        /// Path of the XML file exported from ProSoft
        #[arg(short = 'f', long = "xml")]
        xml: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let Command::Import { xml } = cli.command;

    if let Err(e) = run(&xml) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run(xml_path: &Path) -> Result<()> {
    let config = load_config()?;

    println!(
        "{}",
        format!("--> Reading file {}...", xml_path.display()).yellow()
    );
    if !xml_path.exists() {
        println!("{}", "    File not found.".red());
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            xml_path.display().to_string(),
        )
        .into());
    }

    println!("{}", "--> Validating format...".yellow());
    let mut input = File::open(xml_path)?;
    let report = ProsoftReport::from_read(&mut input)?;

    println!("{}", "--> Creating the QIF file...".yellow());
    let qif_path = qif_path_for(xml_path);
    let summary = write_qif_file(&report.entries, &qif_path, DEFAULT_QIF_DATE_FORMAT)?;
    match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => println!(
            "{}",
            format!(
                "    The file contains {} transactions from {} to {}.",
                summary.total, first, last
            )
            .white()
        ),
        _ => println!(
            "{}",
            format!("    The file contains {} transactions.", summary.total).white()
        ),
    }

    upload(&UploadClient::new(config), &qif_path)
}

fn load_config() -> Result<Config> {
    match Config::from_env() {
        Ok(config) => Ok(config),
        Err(e) => {
            println!(
                "{} {}",
                "    ATTENTION!!!".red(),
                "The MyFinance environment variables are not set.".white()
            );
            println!(
                "{}",
                "    Get your API access token at https://app.passaporteweb.com.br/two_factor/"
                    .white()
            );
            println!(
                "{}",
                "    To configure, run the command below with your own values:".white()
            );
            println!(
                "{}",
                "    $ export MYFINANCE_ACCOUNT_ID=99 MYFINANCE_ENTITY=99 \
                 MYFINANCE_DEPOSIT_ACCOUNT=99 MYFINANCE_TOKEN=YOURTOKENHERE"
                    .blue()
            );
            println!("{}", "    The import was not performed :(".red());
            Err(e)
        }
    }
}

fn upload(client: &UploadClient, qif_path: &Path) -> Result<()> {
    println!("{}", "--> Uploading the file to MyFinance...".yellow());
    match client.upload_statement(qif_path) {
        Ok(()) => {
            println!(
                "{}",
                format!(
                    "    The file {} was sent to MyFinance successfully!",
                    qif_path.display()
                )
                .green()
            );
            println!(
                "{}",
                format!("--> Deleting the file {}...", qif_path.display()).yellow()
            );
            fs::remove_file(qif_path)?;
            println!("{}", "    File deleted successfully!".green());
            Ok(())
        }
        Err(e) => {
            // The QIF file is kept so the upload can be retried manually.
            println!(
                "{}",
                "    There was an error sending the file to MyFinance :(".red()
            );
            Err(e)
        }
    }
}
