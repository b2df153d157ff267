use std::collections::HashMap;
use std::io::Read;

use cost_core::{
    ItemCandidate, ItemId, ItemRepository, NewItem, RepositoryError, ValidationError,
    parse_decimal_text,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when importing items.
#[derive(Debug, Error)]
pub enum ItemLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Row {row}: {reason}")]
    InvalidRow { row: usize, reason: ValidationError },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ItemLoaderError {
    fn from(err: csv::Error) -> Self {
        ItemLoaderError::CsvParse(err.to_string())
    }
}

/// A single line of an items CSV file.
///
/// Numbers are kept as text so that both `4.50` and `"4,50"` are accepted.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ItemRecord {
    pub nome: String,
    pub categoria: String,
    pub quantidade_base: String,
    pub tipo_quantidade: String,
    pub preco_por_quantidade: String,
}

impl ItemRecord {
    fn to_candidate(&self) -> ItemCandidate {
        ItemCandidate {
            nome: Some(self.nome.clone()),
            categoria: Some(self.categoria.trim().to_string()),
            quantidade_base: parse_decimal_text(&self.quantidade_base),
            tipo_quantidade: Some(self.tipo_quantidade.clone()),
            preco_por_quantidade: parse_decimal_text(&self.preco_por_quantidade),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub created: usize,
    pub updated: usize,
}

/// Imports catalog items from CSV through any [`ItemRepository`].
pub struct ItemLoader;

impl ItemLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ItemRecord>, ItemLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ItemRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Create or replace one item per record.
    ///
    /// Every record is validated before anything is written, so one bad row
    /// aborts the whole load. A record whose trimmed `nome` matches an
    /// existing item replaces it; loading the same file twice therefore
    /// leaves the catalog unchanged the second time.
    pub async fn load<R: ItemRepository + ?Sized>(
        repo: &R,
        records: &[ItemRecord],
    ) -> Result<LoadSummary, ItemLoaderError> {
        let items = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_candidate()
                    .validate()
                    .map_err(|reason| ItemLoaderError::InvalidRow {
                        row: index + 1,
                        reason,
                    })
            })
            .collect::<Result<Vec<NewItem>, _>>()?;

        let mut by_name: HashMap<String, ItemId> = HashMap::new();
        for item in repo.list_items().await? {
            by_name.entry(item.nome).or_insert(item.id);
        }

        let mut summary = LoadSummary::default();
        for item in items {
            match by_name.get(item.nome()) {
                Some(&id) => {
                    repo.update_item(id, item).await?;
                    summary.updated += 1;
                }
                None => {
                    let nome = item.nome().to_string();
                    let created = repo.create_item(item).await?;
                    by_name.insert(nome, created.id);
                    summary.created += 1;
                }
            }
        }

        info!(
            created = summary.created,
            updated = summary.updated,
            "items imported"
        );
        Ok(summary)
    }
}
