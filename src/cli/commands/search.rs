use super::{resolve_config, CommandHandler};
use crate::catalog::RecordStore;
use crate::cli::app::{OutputFormat, SiteArgs};
use crate::engine::search::{search_and_rank, MatchField, Ranked};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Handler for the `search` command
pub struct SearchCommand {
    pub query: String,
    pub site: SiteArgs,
    pub format: OutputFormat,
}

#[async_trait]
impl CommandHandler for SearchCommand {
    async fn execute(&self) -> Result<()> {
        let config = resolve_config(&self.site, self.site.overrides())?;
        let store = RecordStore::load(&config.data_file)?;

        let hits = search_and_rank(store.all(), Some(self.query.as_str()));
        println!("{}", format_hits(&hits, self.format)?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "search"
    }
}

impl SearchCommand {
    /// Create new search command
    pub fn new(query: String, site: SiteArgs, format: OutputFormat) -> Self {
        Self {
            query,
            site,
            format,
        }
    }
}

#[derive(Tabled, Serialize)]
struct HitRow {
    #[tabled(rename = "Id")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Breed")]
    breed: String,
    #[tabled(rename = "Matched")]
    #[serde(rename = "matchBy")]
    matched: String,
}

impl From<&Ranked<'_>> for HitRow {
    fn from(hit: &Ranked<'_>) -> Self {
        Self {
            id: hit.cat.id,
            name: hit.cat.name.clone(),
            breed: hit.cat.breed.clone(),
            matched: hit
                .match_by
                .map(|field: MatchField| field.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Render ranked hits for the terminal
pub fn format_hits(hits: &[Ranked<'_>], format: OutputFormat) -> Result<String> {
    let rows: Vec<HitRow> = hits.iter().map(HitRow::from).collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text if rows.is_empty() => Ok("No cats found.".to_string()),
        OutputFormat::Text => {
            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()))
                .to_string();
            Ok(format!("Found {} cats\n\n{}", rows.len(), table))
        }
    }
}
