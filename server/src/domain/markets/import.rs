//! Bulk import of the public street market dataset (DEINFO_AB_FEIRASLIVRES)

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use super::model::Market;
use super::usecases::CreateMarketUseCase;
use crate::core::constants::IMPORT_PROGRESS_INTERVAL;

/// Columns a dataset file must carry. `ID` is accepted but ignored.
const REQUIRED_COLUMNS: &[&str] = &[
    "LONG",
    "LAT",
    "SETCENS",
    "AREAP",
    "CODDIST",
    "DISTRITO",
    "CODSUBPREF",
    "SUBPREFE",
    "REGIAO5",
    "REGIAO8",
    "NOME_FEIRA",
    "REGISTRO",
    "LOGRADOURO",
    "NUMERO",
    "BAIRRO",
    "REFERENCIA",
];

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Row counts of a finished import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: u64,
    /// Register code was already stored
    pub skipped: u64,
    pub failed: u64,
}

impl ImportSummary {
    pub fn total(&self) -> u64 {
        self.created + self.skipped + self.failed
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "UPPERCASE")]
struct MarketRecord {
    #[validate(length(max = 100))]
    long: String,
    #[validate(length(max = 100))]
    lat: String,
    #[validate(length(max = 100))]
    setcens: String,
    #[validate(length(max = 100))]
    areap: String,
    #[validate(range(min = 0))]
    coddist: i64,
    #[validate(length(min = 1, max = 100))]
    distrito: String,
    #[validate(range(min = 0))]
    codsubpref: i64,
    #[validate(length(max = 100))]
    subprefe: String,
    #[validate(length(min = 1, max = 100))]
    regiao5: String,
    #[validate(length(max = 100))]
    regiao8: String,
    #[validate(length(min = 1, max = 100))]
    nome_feira: String,
    #[validate(length(min = 1, max = 20))]
    registro: String,
    #[validate(length(min = 1, max = 100))]
    logradouro: String,
    #[validate(length(max = 100))]
    numero: String,
    #[validate(length(min = 1, max = 100))]
    bairro: String,
    #[validate(length(max = 100))]
    referencia: String,
}

impl From<MarketRecord> for Market {
    fn from(r: MarketRecord) -> Self {
        Self {
            id: 0,
            long: r.long,
            lat: r.lat,
            setcens: r.setcens,
            areap: r.areap,
            coddist: r.coddist,
            distrito: r.distrito,
            codsubpref: r.codsubpref,
            subprefe: r.subprefe,
            regiao5: r.regiao5,
            regiao8: r.regiao8,
            nome_feira: r.nome_feira,
            registro: r.registro,
            logradouro: r.logradouro,
            numero: r.numero,
            bairro: r.bairro,
            referencia: r.referencia,
        }
    }
}

/// Import every row through the create use case.
///
/// Malformed or invalid rows are logged and counted, never fatal. Only an
/// unreadable source or a header without the expected columns aborts.
pub async fn import_csv<R: Read>(
    reader: R,
    create: &dyn CreateMarketUseCase,
) -> Result<ImportSummary, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let mut summary = ImportSummary::default();
    for (idx, result) in rdr.deserialize::<MarketRecord>().enumerate() {
        // Header is line 1
        let line = idx + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line, error = %e, "Skipping malformed row");
                summary.failed += 1;
                continue;
            }
        };
        if let Err(e) = record.validate() {
            tracing::warn!(line, registro = %record.registro, error = %e, "Skipping invalid row");
            summary.failed += 1;
            continue;
        }

        match create.execute(record.into()).await {
            Ok(outcome) if outcome.is_created() => summary.created += 1,
            Ok(_) => summary.skipped += 1,
            Err(e) => {
                tracing::warn!(line, error = %e, "Failed to store row");
                summary.failed += 1;
            }
        }

        if summary.total() % IMPORT_PROGRESS_INTERVAL == 0 {
            tracing::info!(rows = summary.total(), "Import progress");
        }
    }

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        failed = summary.failed,
        "Import finished"
    );
    Ok(summary)
}

/// Import a dataset file from disk
pub async fn import_file(
    path: &Path,
    create: &dyn CreateMarketUseCase,
) -> Result<ImportSummary, ImportError> {
    let file = File::open(path)?;
    tracing::debug!(path = %path.display(), "Importing markets");
    import_csv(file, create).await
}
