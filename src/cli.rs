// src/cli.rs
use crate::edgar::models::Form;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line client for the SEC EDGAR API
#[derive(Parser, Debug)]
#[command(name = "sec_seek", author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding config.toml and company_tickers.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory output files are written to
    #[arg(short, long, global = true, default_value = ".")]
    pub output_dir: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the user settings
    Init {
        /// User agent sent to the SEC. Use the format <name> (<email>)
        #[arg(short, long)]
        user_agent: Option<String>,

        /// Skip downloading the company tickers file
        #[arg(long)]
        no_download: bool,
    },

    /// Show the current settings
    Settings,

    /// Get the CIK number for a given ticker
    GetCik {
        /// Ticker symbol or CIK number
        ticker: String,

        /// Query the live ticker list on sec.gov instead of the stored file
        #[arg(long)]
        live: bool,
    },

    /// Save all the XBRL facts for a company
    CompanyFacts {
        /// CIK number or ticker of the company
        company: String,

        /// Print the concept categories (taxonomies) found in the facts
        #[arg(short, long)]
        concepts: bool,
    },

    /// Save every disclosure of one concept for a company
    CompanyConcept {
        /// CIK number or ticker of the company
        company: String,

        /// Concept tag, e.g. AccountsPayableCurrent
        tag: String,

        #[arg(short, long, default_value = "us-gaap")]
        taxonomy: String,
    },

    /// Save one fact for every filer for a calendrical period
    Frames {
        /// Concept tag, e.g. AccountsPayableCurrent
        tag: String,

        /// Unit of measure, e.g. USD or USD-per-shares
        unit: String,

        /// CY2019, CY2019Q1 or CY2019Q1I (instantaneous)
        period: String,

        #[arg(short, long, default_value = "us-gaap")]
        taxonomy: String,

        #[arg(short, long)]
        filename: Option<String>,
    },

    /// Save the recent filings of a company as CSV
    CompanySubmissions {
        /// CIK number or ticker of the company
        company: String,

        /// Filename to save the data
        #[arg(short, long)]
        filename: Option<String>,
    },

    /// Download one filing document as-is
    DownloadSubmission {
        /// CIK number of the company
        cik: u64,

        /// Accession number of the submission
        accession_number: String,

        /// Primary document of the submission
        primary_document: String,

        /// Output filename (defaults to <cik>_<accession>_<document>.txt)
        #[arg(short, long)]
        filename: Option<String>,
    },

    /// Work with saved submission records
    #[command(subcommand)]
    Submissions(SubmissionsCommand),
}

#[derive(Subcommand, Debug)]
pub enum SubmissionsCommand {
    /// Fetch recent filings and save them as a CSV record
    Get {
        /// CIK number or ticker of the company
        company: String,

        /// Record to save the data to
        #[arg(short, long)]
        record: Option<String>,
    },

    /// Print the filings of a saved record that match a form type
    Filter {
        /// CIK number or ticker of the company
        #[arg(short, long)]
        company: Option<String>,

        /// Record to read
        #[arg(short, long)]
        record: Option<String>,

        /// Filing type to filter by
        #[arg(short, long, value_enum, default_value = "10-K")]
        form: Form,
    },

    /// Download a filing listed in a saved record and save its text
    Download {
        /// CIK number or ticker of the company
        #[arg(short, long)]
        company: String,

        /// Record to read
        #[arg(short, long)]
        record: Option<String>,

        /// Filing type to download
        #[arg(short, long, value_enum, default_value = "10-K")]
        form: Form,

        /// Which filing to take, 1 being the most recent
        #[arg(short, long, default_value_t = 1)]
        number: usize,

        /// Keep only paragraph, heading, list and table-cell text
        #[arg(long)]
        blocks: bool,

        /// Output filename (defaults to <ticker>_<form>.txt)
        #[arg(long)]
        filename: Option<String>,
    },
}
