// src/edgar/client.rs
use crate::config::Settings;
use crate::edgar::models::{
    accession_path, validate_frame_period, validate_path_component, Cik, CompanySubmission, LookupTable,
};
use crate::utils::error::EdgarError;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

const SEC_WWW: &str = "https://www.sec.gov";
const SEC_DATA: &str = "https://data.sec.gov";

/// Base URLs of the two SEC hosts. Tests point both at a local server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub www: String,
    pub data: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self { www: SEC_WWW.to_string(), data: SEC_DATA.to_string() }
    }
}

impl Endpoints {
    pub fn tickers(&self) -> String {
        format!("{}/files/company_tickers.json", self.www)
    }

    pub fn submissions(&self, cik: Cik) -> String {
        format!("{}/submissions/CIK{}.json", self.data, cik)
    }

    pub fn company_facts(&self, cik: Cik) -> String {
        format!("{}/api/xbrl/companyfacts/CIK{}.json", self.data, cik)
    }

    pub fn company_concept(&self, cik: Cik, taxonomy: &str, tag: &str) -> String {
        format!("{}/api/xbrl/companyconcept/CIK{}/{}/{}.json", self.data, cik, taxonomy, tag)
    }

    pub fn frames(&self, taxonomy: &str, tag: &str, unit: &str, period: &str) -> String {
        format!("{}/api/xbrl/frames/{}/{}/{}/{}.json", self.data, taxonomy, tag, unit, period)
    }

    /// Archive paths use the unpadded CIK and the accession number without dashes.
    pub fn document(&self, cik: Cik, accession: &str, primary_doc: &str) -> String {
        format!("{}/Archives/edgar/data/{}/{}/{}", self.www, cik.value(), accession, primary_doc)
    }
}

/// Thin wrapper over the EDGAR REST endpoints.
/// Every call is a single GET carrying the configured User-Agent and timeout.
pub struct EdgarClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl EdgarClient {
    pub fn with_endpoints(settings: &Settings, endpoints: Endpoints) -> Result<Self, EdgarError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str()) // SEC rejects anonymous clients
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        tracing::debug!("Using User-Agent: {}", settings.user_agent);
        Ok(Self { http, endpoints })
    }

    /// Sends the GET and maps transport failures and non-2xx statuses.
    async fn get(&self, url: &str, accept: &str) -> Result<String, EdgarError> {
        tracing::info!("Requesting {}", url);

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::FORBIDDEN {
                return Err(EdgarError::Forbidden);
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(EdgarError::NotFound(url.to_string()));
            }
            return Err(EdgarError::Http { status, url: url.to_string() });
        }

        let body = response.text().await.map_err(|e| classify(e, url))?;
        tracing::debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, EdgarError> {
        let body = self.get(url, "application/json").await?;
        serde_json::from_str(&body).map_err(|source| EdgarError::Decode { url: url.to_string(), source })
    }

    /// The full ticker directory, in the order the SEC serves it.
    pub async fn company_tickers(&self) -> Result<LookupTable, EdgarError> {
        self.get_json(&self.endpoints.tickers()).await
    }

    pub async fn company_submissions(&self, cik: Cik) -> Result<CompanySubmission, EdgarError> {
        self.get_json(&self.endpoints.submissions(cik)).await
    }

    /// Every XBRL fact reported by the company, returned untouched.
    pub async fn company_facts(&self, cik: Cik) -> Result<Value, EdgarError> {
        self.get_json(&self.endpoints.company_facts(cik)).await
    }

    pub async fn company_concept(&self, cik: Cik, taxonomy: &str, tag: &str) -> Result<Value, EdgarError> {
        let taxonomy = validate_path_component("taxonomy", taxonomy)?;
        let tag = validate_path_component("tag", tag)?;
        self.get_json(&self.endpoints.company_concept(cik, taxonomy, tag)).await
    }

    /// One fact per filer for the calendrical period closest to `period`.
    pub async fn frames(&self, taxonomy: &str, tag: &str, unit: &str, period: &str) -> Result<Value, EdgarError> {
        let period = validate_frame_period(period)?;
        let taxonomy = validate_path_component("taxonomy", taxonomy)?;
        let tag = validate_path_component("tag", tag)?;
        let unit = validate_path_component("unit", unit)?;
        self.get_json(&self.endpoints.frames(taxonomy, tag, unit, period)).await
    }

    /// Downloads a filing document as raw text (usually HTML).
    pub async fn download_document(&self, cik: Cik, accession: &str, primary_doc: &str) -> Result<String, EdgarError> {
        let accession = accession_path(accession)?;
        let primary_doc = validate_path_component("document", primary_doc)?;
        let url = self.endpoints.document(cik, &accession, primary_doc);
        self.get(&url, "application/xml,text/html,text/plain,*/*").await
    }
}

fn classify(err: reqwest::Error, url: &str) -> EdgarError {
    if err.is_timeout() {
        tracing::warn!("Request to {} timed out", url);
        EdgarError::Timeout(url.to_string())
    } else {
        EdgarError::Network(err)
    }
}

/// Taxonomy names under `facts` (e.g. "dei", "us-gaap").
pub fn concept_categories(facts: &Value) -> Vec<String> {
    facts
        .get("facts")
        .and_then(Value::as_object)
        .map(|facts| facts.keys().cloned().collect())
        .unwrap_or_default()
}
