use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::{
    api::types::{
        DashboardStats, Health, ImportPlayerRequest, ImportResult, InjuryListResponse,
        Normalize, PlayerListResponse, PlayerRecord, PlayerSearchResponse, TeamSearchResponse,
        TeamSquadResponse, UpcomingMatchesResponse,
    },
    cli::types::{FootballId, PlayerId},
    config::Config,
    core::http::{default_header_map, error_message},
    error::{Result, RosterError},
};


/// Versioned API prefix; only `/health` lives outside it.
pub const API_PREFIX: &str = "/api/v1";

/// The backend rejects shorter football-data search queries.
pub const MIN_SEARCH_LEN: usize = 3;

/// Most fixtures the upcoming-matches endpoint returns in one call.
pub const MAX_UPCOMING: u8 = 50;

/// Query parameters of `GET /players`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_injured: Option<bool>,
}

impl PlayerListParams {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// Query parameters of `GET /injuries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InjuryListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl InjuryListParams {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

fn check_search_query(query: &str) -> Result<&str> {
    let query = query.trim();
    let got = query.chars().count();
    if got < MIN_SEARCH_LEN {
        return Err(RosterError::QueryTooShort {
            min: MIN_SEARCH_LEN,
            got,
        });
    }
    Ok(query)
}

/// Typed client for the roster backend's REST API.
///
/// Every response is decoded into the record types of [`crate::api::types`]
/// and normalized before it is handed back.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// `base_url` is the backend root, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_header_map()?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        tracing::debug!(%method, %url, "backend request");
        self.client.request(method, url)
    }

    /// Send, map non-2xx to [`RosterError::Api`], decode the JSON body.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %url, "backend request failed");
            return Err(RosterError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        tracing::debug!(status = status.as_u16(), %url, bytes = body.len(), "backend response");
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn list_players(&self, params: &PlayerListParams) -> Result<PlayerListResponse> {
        let request = self
            .request(Method::GET, self.api_url("/players"))
            .query(params);
        let response: PlayerListResponse = self.send_json(request).await?;
        Ok(response.normalize())
    }

    pub async fn get_player(&self, id: PlayerId) -> Result<PlayerRecord> {
        let request = self.request(Method::GET, self.api_url(&format!("/players/{}", id)));
        match self.send_json::<PlayerRecord>(request).await {
            Ok(player) => Ok(player.normalize()),
            Err(RosterError::Api { status: 404, .. }) => Err(RosterError::NotFound {
                what: format!("player {}", id),
            }),
            Err(e) => Err(e),
        }
    }

    pub async fn delete_player(&self, id: PlayerId) -> Result<()> {
        let response = self
            .request(Method::DELETE, self.api_url(&format!("/players/{}", id)))
            .send()
            .await?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Err(RosterError::NotFound {
                what: format!("player {}", id),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RosterError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        tracing::info!(player_id = %id, "player deleted");
        Ok(())
    }

    pub async fn list_injuries(&self, params: &InjuryListParams) -> Result<InjuryListResponse> {
        let request = self
            .request(Method::GET, self.api_url("/injuries"))
            .query(params);
        let response: InjuryListResponse = self.send_json(request).await?;
        Ok(response.normalize())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let request = self.request(Method::GET, self.api_url("/stats/dashboard"));
        self.send_json(request).await
    }

    pub async fn health(&self) -> Result<Health> {
        let request = self.request(Method::GET, format!("{}/health", self.base_url));
        self.send_json(request).await
    }

    /// Search the football-data provider (through the backend) by player name.
    pub async fn search_players(&self, query: &str, page: u32) -> Result<PlayerSearchResponse> {
        let query = check_search_query(query)?;
        let page = page.max(1).to_string();
        let request = self
            .request(Method::GET, self.api_url("/football/search-players"))
            .query(&[("query", query), ("page", page.as_str())]);
        self.send_json(request).await
    }

    pub async fn search_teams(
        &self,
        query: &str,
        country: Option<&str>,
    ) -> Result<TeamSearchResponse> {
        let query = check_search_query(query)?;
        let mut params = vec![("query", query)];
        if let Some(country) = country {
            params.push(("country", country));
        }
        let request = self
            .request(Method::GET, self.api_url("/football/search-teams"))
            .query(&params);
        self.send_json(request).await
    }

    pub async fn team_squad(&self, team_id: FootballId) -> Result<TeamSquadResponse> {
        let request = self.request(
            Method::GET,
            self.api_url(&format!("/football/team/{}/squad", team_id)),
        );
        let response: TeamSquadResponse = self.send_json(request).await?;
        Ok(response.normalize())
    }

    /// Next `next` fixtures of a team, clamped to `1..=MAX_UPCOMING`.
    pub async fn upcoming_matches(
        &self,
        team_id: FootballId,
        next: u8,
    ) -> Result<UpcomingMatchesResponse> {
        let next = next.clamp(1, MAX_UPCOMING).to_string();
        let request = self
            .request(
                Method::GET,
                self.api_url(&format!("/football/matches/upcoming/{}", team_id)),
            )
            .query(&[("next", next.as_str())]);
        let response: UpcomingMatchesResponse = self.send_json(request).await?;
        Ok(response.normalize())
    }

    pub async fn import_player(&self, body: &ImportPlayerRequest) -> Result<ImportResult> {
        let request = self
            .request(Method::POST, self.api_url("/players/import"))
            .json(body);
        self.send_json(request).await
    }

    /// Import one member of a team squad into the dashboard.
    pub async fn import_squad_player(
        &self,
        team_id: FootballId,
        player_id: FootballId,
    ) -> Result<ImportResult> {
        let request = self.request(
            Method::POST,
            self.api_url(&format!(
                "/football/team/{}/import-player/{}",
                team_id, player_id
            )),
        );
        self.send_json(request).await
    }
}
