// src/commands.rs
use crate::cli::{Command, SubmissionsCommand};
use crate::config::{self, AppContext, Settings, TICKERS_FILE};
use crate::edgar::client::{concept_categories, Endpoints};
use crate::edgar::filings::{filter_by_form, nth_latest};
use crate::edgar::lookup;
use crate::edgar::models::{Cik, CompanyRecord, Form};
use crate::edgar::EdgarClient;
use crate::extractors;
use crate::storage::{self, StorageManager};
use crate::utils::AppError;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Everything a command needs: where config lives, where output goes, which hosts to call.
pub struct App {
    ctx: AppContext,
    storage: StorageManager,
    endpoints: Endpoints,
}

impl App {
    pub fn new(ctx: AppContext, storage: StorageManager) -> Self {
        Self::with_endpoints(ctx, storage, Endpoints::default())
    }

    pub fn with_endpoints(ctx: AppContext, storage: StorageManager, endpoints: Endpoints) -> Self {
        Self { ctx, storage, endpoints }
    }

    fn client_for(&self, settings: &Settings) -> Result<EdgarClient, AppError> {
        Ok(EdgarClient::with_endpoints(settings, self.endpoints.clone())?)
    }

    fn client(&self) -> Result<EdgarClient, AppError> {
        let settings = config::load_settings(&self.ctx)?;
        self.client_for(&settings)
    }

    fn resolve(&self, company: &str) -> Result<CompanyRecord, AppError> {
        let record = lookup::resolve_stored(&self.ctx, company)?;
        tracing::info!("Resolved '{}' to {}", company, record);
        Ok(record)
    }

    pub async fn run(&self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Init { user_agent, no_download } => self.init(user_agent, !no_download).await,
            Command::Settings => self.settings(),
            Command::GetCik { ticker, live } => self.get_cik(&ticker, live).await,
            Command::CompanyFacts { company, concepts } => self.company_facts(&company, concepts).await,
            Command::CompanyConcept { company, tag, taxonomy } => {
                self.company_concept(&company, &taxonomy, &tag).await
            }
            Command::Frames { tag, unit, period, taxonomy, filename } => {
                self.frames(&taxonomy, &tag, &unit, &period, filename).await
            }
            Command::CompanySubmissions { company, filename } => {
                let record = self.resolve(&company)?;
                let name = filename
                    .map(|f| storage::normalize_csv_name(&f))
                    .unwrap_or_else(|| storage::submission_record_name(record.ticker(), None));
                self.save_submissions(&record, &name).await.map(|_| ())
            }
            Command::DownloadSubmission { cik, accession_number, primary_document, filename } => {
                self.download_submission(cik, &accession_number, &primary_document, filename).await
            }
            Command::Submissions(sub) => self.submissions(sub).await,
        }
    }

    async fn init(&self, user_agent: Option<String>, download: bool) -> Result<(), AppError> {
        let user_agent = match user_agent {
            Some(ua) => ua,
            None => prompt("Please enter a user-agent for browsing SEC EDGAR website")?,
        };

        let settings = config::init_config(&self.ctx, &user_agent)?;
        println!("Configuration file created successfully");

        if download {
            println!("Downloading company tickers information");
            let table = self.client_for(&settings)?.company_tickers().await?;
            if table.is_empty() {
                tracing::warn!("The SEC returned an empty ticker list");
            }
            let path = StorageManager::new(self.ctx.config_dir())?.write_json(&table, TICKERS_FILE)?;
            println!("Saved {} tickers to {}", table.len(), path.display());
        }
        Ok(())
    }

    fn settings(&self) -> Result<(), AppError> {
        let settings = config::load_settings(&self.ctx)?;
        println!("config file: {}", self.ctx.config_file().display());
        println!("{}", settings);
        Ok(())
    }

    /// Resolves against the stored table, or against a freshly downloaded one when `live`.
    async fn lookup_company(&self, ticker: &str, live: bool) -> Result<CompanyRecord, AppError> {
        if live {
            let table = self.client()?.company_tickers().await?;
            Ok(lookup::resolve(&table, ticker)?)
        } else {
            self.resolve(ticker)
        }
    }

    async fn get_cik(&self, ticker: &str, live: bool) -> Result<(), AppError> {
        let record = self.lookup_company(ticker, live).await?;
        println!("name:   {}", record.name());
        println!("ticker: {}", record.ticker());
        println!("cik:    {}", record.cik());
        Ok(())
    }

    async fn company_facts(&self, company: &str, show_concepts: bool) -> Result<(), AppError> {
        let record = self.resolve(company)?;
        let facts = self.client()?.company_facts(record.cik()).await?;
        self.storage.write_json(&facts, &format!("{}_facts.json", record.ticker()))?;

        if show_concepts {
            for category in concept_categories(&facts) {
                println!("{}", category);
            }
        }
        Ok(())
    }

    async fn company_concept(&self, company: &str, taxonomy: &str, tag: &str) -> Result<(), AppError> {
        let record = self.resolve(company)?;
        let concept = self.client()?.company_concept(record.cik(), taxonomy, tag).await?;
        self.storage.write_json(&concept, &format!("{}_{}.json", record.ticker(), tag))?;
        Ok(())
    }

    async fn frames(
        &self,
        taxonomy: &str,
        tag: &str,
        unit: &str,
        period: &str,
        filename: Option<String>,
    ) -> Result<(), AppError> {
        let frame = self.client()?.frames(taxonomy, tag, unit, period).await?;
        let name = filename.unwrap_or_else(|| format!("{}_{}_{}_{}.json", taxonomy, tag, unit, period));
        self.storage.write_json(&frame, &name)?;
        Ok(())
    }

    /// Fetches recent filings and writes them to `name` as CSV.
    async fn save_submissions(&self, record: &CompanyRecord, name: &str) -> Result<PathBuf, AppError> {
        let submission = self.client()?.company_submissions(record.cik()).await?;
        let rows = submission.filings.recent.to_rows();
        tracing::info!("{} has {} recent filings", submission.name, rows.len());
        Ok(self.storage.write_submissions_csv(&rows, name)?)
    }

    async fn download_submission(
        &self,
        cik: u64,
        accession: &str,
        primary_doc: &str,
        filename: Option<String>,
    ) -> Result<(), AppError> {
        let cik = Cik::new(cik)
            .ok_or_else(|| AppError::Usage(format!("CIK {} has more than 10 digits", cik)))?;
        let document = self.client()?.download_document(cik, accession, primary_doc).await?;
        let name = filename.unwrap_or_else(|| format!("{}_{}_{}.txt", cik.value(), accession, primary_doc));
        self.storage.write_text(&document, &name)?;
        Ok(())
    }

    async fn submissions(&self, command: SubmissionsCommand) -> Result<(), AppError> {
        match command {
            SubmissionsCommand::Get { company, record } => {
                let company = self.resolve(&company)?;
                let name = storage::submission_record_name(company.ticker(), record.as_deref());
                self.save_submissions(&company, &name).await.map(|_| ())
            }
            SubmissionsCommand::Filter { company, record, form } => {
                self.filter_submissions(company.as_deref(), record.as_deref(), form, io::stdout().lock())
            }
            SubmissionsCommand::Download { company, record, form, number, blocks, filename } => {
                let company = self.resolve(&company)?;
                let name = storage::submission_record_name(company.ticker(), record.as_deref());
                let rows = self.storage.read_submissions_csv(&name)?;
                let filing = nth_latest(&rows, form, number).ok_or_else(|| {
                    AppError::Usage(format!("{} does not list filing #{} of form {}", name, number, form))
                })?;
                tracing::info!("Downloading {} filed {} ({})", form, filing.filing_date, filing.accession_number);

                let report = self
                    .client()?
                    .download_document(company.cik(), &filing.accession_number, &filing.primary_document)
                    .await?;
                let text = if blocks {
                    extractors::to_plaintext(&report)?
                } else {
                    extractors::extract_all_text(&report)?
                };
                let out = filename.unwrap_or_else(|| default_text_name(company.ticker(), form));
                self.storage.write_text(&text, &out)?;
                Ok(())
            }
        }
    }

    /// Writes the saved filings of `form` to `out` as CSV, newest first.
    fn filter_submissions<W: Write>(
        &self,
        company: Option<&str>,
        record: Option<&str>,
        form: Form,
        out: W,
    ) -> Result<(), AppError> {
        let ticker = match (company, record) {
            (None, None) => return Err(AppError::Usage("You must provide either a company or a record".to_string())),
            (Some(company), None) => self.resolve(company)?.ticker().to_string(),
            (_, Some(_)) => String::new(), // record name wins, no lookup needed
        };
        let name = storage::submission_record_name(&ticker, record);
        let rows = self.storage.read_submissions_csv(&name)?;
        let matching = filter_by_form(&rows, form);
        tracing::info!("{} of {} filings in {} are {}", matching.len(), rows.len(), name, form);
        storage::write_rows(matching, out)?;
        Ok(())
    }
}

fn default_text_name(ticker: &str, form: Form) -> String {
    format!("{}_{}.txt", ticker, form)
}

fn prompt(message: &str) -> Result<String, AppError> {
    print!("{}: ", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
