//! PokeAPI client: list/detail endpoints and page assembly

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::task::JoinSet;

use crate::state::{PageData, PageQuery, PokemonStat, PokemonSummary};

pub const API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {status} from {url}")]
    Response { status: u16, url: String },
    #[error("response parse error: {0}")]
    Parse(String),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    count: u32,
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    base_experience: Option<u32>,
    height: u32,
    weight: u32,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u32,
    stat: NamedResource,
}

/// One page of references from the list endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage {
    pub count: u32,
    pub urls: Vec<String>,
}

/// Where Pokémon data comes from. The HTTP client is the real one; tests
/// plug in fixtures.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn list(&self, limit: u32, offset: u32) -> Result<ListPage, FetchError>;

    /// Fetch a detail payload by absolute URL.
    async fn pokemon(&self, url: &str) -> Result<PokemonSummary, FetchError>;

    async fn type_names(&self) -> Result<Vec<String>, FetchError>;

    /// Detail URL for a lookup by name.
    fn pokemon_url(&self, name: &str) -> String;
}

#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    base: String,
}

impl HttpSource {
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn list_url(&self, limit: u32, offset: u32) -> String {
        format!("{}/pokemon?limit={limit}&offset={offset}", self.base)
    }

    pub fn type_list_url(&self) -> String {
        format!("{}/type?limit=999", self.base)
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Response {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| FetchError::Parse(err.to_string()))
    }
}

#[async_trait]
impl PokemonSource for HttpSource {
    async fn list(&self, limit: u32, offset: u32) -> Result<ListPage, FetchError> {
        let response: ListResponse = self.fetch_json(&self.list_url(limit, offset)).await?;
        Ok(ListPage {
            count: response.count,
            urls: response.results.into_iter().map(|entry| entry.url).collect(),
        })
    }

    async fn pokemon(&self, url: &str) -> Result<PokemonSummary, FetchError> {
        let response: PokemonResponse = self.fetch_json(url).await?;
        Ok(summary_from_response(response))
    }

    async fn type_names(&self) -> Result<Vec<String>, FetchError> {
        let response: ListResponse = self.fetch_json(&self.type_list_url()).await?;
        Ok(clean_type_list(
            response.results.into_iter().map(|entry| entry.name),
        ))
    }

    fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base, urlencoding::encode(name))
    }
}

/// Runs one page fetch. A name search is a single lookup; otherwise the
/// list is fetched and every reference resolved concurrently. Any failed
/// detail fails the whole page.
pub async fn fetch_page(
    source: Arc<dyn PokemonSource>,
    query: &PageQuery,
) -> Result<PageData, FetchError> {
    let search = query.search.trim().to_lowercase();
    if !search.is_empty() {
        let url = source.pokemon_url(&search);
        let item = source.pokemon(&url).await?;
        return Ok(PageData {
            items: vec![item],
            total_count: 1,
        });
    }

    let list = source.list(query.limit, query.offset).await?;
    let urls = list.urls.into_iter().take(query.limit as usize).collect();
    let items = fetch_details(source, urls).await?;
    tracing::debug!(
        count = list.count,
        loaded = items.len(),
        offset = query.offset,
        "page assembled"
    );
    Ok(PageData {
        items,
        total_count: list.count,
    })
}

pub async fn fetch_type_list(source: Arc<dyn PokemonSource>) -> Result<Vec<String>, FetchError> {
    source.type_names().await
}

async fn fetch_details(
    source: Arc<dyn PokemonSource>,
    urls: Vec<String>,
) -> Result<Vec<PokemonSummary>, FetchError> {
    let total = urls.len();
    let mut join_set = JoinSet::new();
    for (index, url) in urls.into_iter().enumerate() {
        let source = Arc::clone(&source);
        join_set.spawn(async move { (index, source.pokemon(&url).await) });
    }

    let mut slots: Vec<Option<PokemonSummary>> = vec![None; total];
    while let Some(joined) = join_set.join_next().await {
        let (index, result) = joined.map_err(|err| FetchError::Transport(err.to_string()))?;
        match result {
            Ok(item) => slots[index] = Some(item),
            Err(err) => {
                join_set.abort_all();
                return Err(err);
            }
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.ok_or_else(|| FetchError::Transport("detail fetch lost".to_string())))
        .collect()
}

fn summary_from_response(response: PokemonResponse) -> PokemonSummary {
    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();

    PokemonSummary {
        id: response.id,
        name: response.name,
        base_experience: response.base_experience.unwrap_or(0),
        height: response.height,
        weight: response.weight,
        types,
        stats,
        artwork_url: pointer_string(&response.sprites, "/other/official-artwork/front_default"),
    }
}

fn clean_type_list(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut types: Vec<String> = names
        .filter(|name| name != "unknown" && name != "shadow")
        .collect();
    types.sort();
    types
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
