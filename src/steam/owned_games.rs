//! Steam Web API client for the owned-games list
//!
//! Calls `IPlayerService/GetOwnedGames` and retries on gateway errors
//! according to a [`RetryPolicy`].

use std::time::Duration;

use serde::Deserialize;

use crate::error::RouletteError;
use crate::logging::{log_fetch, log_warning};

const OWNED_GAMES_URL: &str = "http://api.steampowered.com/IPlayerService/GetOwnedGames/v0001/";
#[cfg(feature = "fetch")]
const USER_AGENT: &str = concat!("SteamRoulette/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Response Types
// ============================================================================

/// A game associated with the Steam account, installed or not
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OwnedGame {
    #[serde(rename = "appid")]
    pub app_id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct OwnedGamesEnvelope {
    #[serde(default)]
    response: Option<OwnedGamesResponse>,
}

#[derive(Deserialize, Debug, Default)]
struct OwnedGamesResponse {
    #[serde(default)]
    games: Option<Vec<OwnedGame>>,
}

// ============================================================================
// Transport
// ============================================================================

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Minimal blocking HTTP GET.
///
/// Any status code is a successful exchange; only transport failures are
/// errors.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, RouletteError>;
}

/// [`Transport`] backed by a shared `ureq` agent
#[cfg(feature = "fetch")]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "fetch")]
impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
        }
    }
}

#[cfg(feature = "fetch")]
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "fetch")]
impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, RouletteError> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => return Err(RouletteError::Network(e.to_string())),
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| RouletteError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Retry Policy
// ============================================================================

/// When to repeat a request that came back with an error status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Status codes that trigger another attempt
    pub retry_statuses: Vec<u16>,
    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_statuses: vec![502],
            backoff: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    pub fn should_retry(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }
}

// ============================================================================
// Client
// ============================================================================

/// Build the GetOwnedGames request URL
pub fn owned_games_url(api_key: &str, steam_id: &str) -> String {
    format!(
        "{}?key={}&steamid={}&include_appinfo=true&format=json",
        OWNED_GAMES_URL, api_key, steam_id
    )
}

/// Owned-games fetcher over any [`Transport`]
pub struct OwnedGamesClient<T: Transport> {
    transport: T,
    retry: RetryPolicy,
}

#[cfg(feature = "fetch")]
impl OwnedGamesClient<UreqTransport> {
    pub fn with_defaults() -> Self {
        Self::new(UreqTransport::new(), RetryPolicy::default())
    }
}

impl<T: Transport> OwnedGamesClient<T> {
    pub fn new(transport: T, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch every game owned by `steam_id`.
    ///
    /// Only statuses listed in the retry policy are retried. Transport
    /// failures, other non-200 statuses and unparseable bodies fail at once.
    /// A response without a games list (private profiles) is an empty list.
    pub fn fetch(&self, api_key: &str, steam_id: &str) -> Result<Vec<OwnedGame>, RouletteError> {
        let url = owned_games_url(api_key, steam_id);
        let attempts = self.retry.max_attempts.max(1);

        for attempt in 1..=attempts {
            log_fetch(&format!("GetOwnedGames attempt {}/{}", attempt, attempts));
            let response = self.transport.get(&url)?;

            match response.status {
                200 => return parse_owned_games(&response.body),
                status if self.retry.should_retry(status) => {
                    log_warning(&format!("GetOwnedGames returned {}, retrying", status));
                    if attempt < attempts && !self.retry.backoff.is_zero() {
                        std::thread::sleep(self.retry.backoff);
                    }
                }
                status => return Err(RouletteError::HttpStatus(status)),
            }
        }

        Err(RouletteError::RetriesExhausted { attempts })
    }
}

fn parse_owned_games(body: &str) -> Result<Vec<OwnedGame>, RouletteError> {
    let envelope: OwnedGamesEnvelope = serde_json::from_str(body)?;

    match envelope.response.and_then(|r| r.games) {
        Some(games) => {
            log_fetch(&format!("Steam account owns {} games", games.len()));
            Ok(games)
        }
        None => {
            log_warning("GetOwnedGames response has no games list (is the profile private?)");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays canned responses and records requested URLs
    struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, RouletteError>>>,
        requests: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<(u16, &str)>) -> Self {
            Self {
                responses: RefCell::new(
                    responses
                        .into_iter()
                        .map(|(status, body)| {
                            Ok(HttpResponse {
                                status,
                                body: body.to_string(),
                            })
                        })
                        .collect(),
                ),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            let transport = Self::new(Vec::new());
            transport
                .responses
                .borrow_mut()
                .push_back(Err(RouletteError::Network(message.to_string())));
            transport
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, url: &str) -> Result<HttpResponse, RouletteError> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(RouletteError::Network("no scripted response".to_string())))
        }
    }

    const BODY: &str = r#"{"response":{"game_count":2,"games":[
        {"appid":10,"name":"Counter-Strike","playtime_forever":12},
        {"appid":70}
    ]}}"#;

    fn client(responses: Vec<(u16, &str)>) -> OwnedGamesClient<ScriptedTransport> {
        OwnedGamesClient::new(ScriptedTransport::new(responses), RetryPolicy::default())
    }

    #[test]
    fn test_url_template() {
        assert_eq!(
            owned_games_url("KEY", "7656"),
            concat!(
                "http://api.steampowered.com/IPlayerService/GetOwnedGames/v0001/",
                "?key=KEY&steamid=7656&include_appinfo=true&format=json"
            )
        );
    }

    #[test]
    fn test_success_parses_games() {
        let client = client(vec![(200, BODY)]);
        let games = client.fetch("KEY", "7656").unwrap();
        assert_eq!(
            games,
            vec![
                OwnedGame { app_id: 10, name: Some("Counter-Strike".to_string()) },
                OwnedGame { app_id: 70, name: None },
            ]
        );
        assert_eq!(client.transport().request_count(), 1);
        assert!(client.transport().requests.borrow()[0].contains("steamid=7656"));
    }

    #[test]
    fn test_retries_bad_gateway_then_succeeds() {
        let client = client(vec![(502, ""), (502, ""), (200, BODY)]);
        assert_eq!(client.fetch("KEY", "ID").unwrap().len(), 2);
        assert_eq!(client.transport().request_count(), 3);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let client = client(vec![(502, ""), (502, ""), (502, ""), (200, BODY)]);
        let err = client.fetch("KEY", "ID").unwrap_err();
        assert!(matches!(err, RouletteError::RetriesExhausted { attempts: 3 }));
        assert_eq!(client.transport().request_count(), 3);
    }

    #[test]
    fn test_other_status_is_not_retried() {
        let client = client(vec![(403, "Forbidden"), (200, BODY)]);
        let err = client.fetch("KEY", "ID").unwrap_err();
        assert!(matches!(err, RouletteError::HttpStatus(403)));
        assert_eq!(client.transport().request_count(), 1);
    }

    #[test]
    fn test_bad_json_is_not_retried() {
        let client = client(vec![(200, "<html>oops</html>"), (200, BODY)]);
        let err = client.fetch("KEY", "ID").unwrap_err();
        assert!(matches!(err, RouletteError::InvalidJson(_)));
        assert_eq!(client.transport().request_count(), 1);
    }

    #[test]
    fn test_transport_failure_is_not_retried() {
        let client =
            OwnedGamesClient::new(ScriptedTransport::failing("refused"), RetryPolicy::default());
        let err = client.fetch("KEY", "ID").unwrap_err();
        assert!(matches!(err, RouletteError::Network(_)));
        assert_eq!(client.transport().request_count(), 1);
    }

    #[test]
    fn test_private_profile_yields_empty_list() {
        assert!(client(vec![(200, r#"{"response":{}}"#)]).fetch("K", "I").unwrap().is_empty());
        assert!(client(vec![(200, "{}")]).fetch("K", "I").unwrap().is_empty());
    }

    #[test]
    fn test_custom_retry_statuses() {
        let policy = RetryPolicy {
            max_attempts: 2,
            retry_statuses: vec![503],
            backoff: Duration::from_millis(1),
        };
        let transport = ScriptedTransport::new(vec![(503, ""), (200, BODY)]);
        let client = OwnedGamesClient::new(transport, policy);
        assert_eq!(client.fetch("K", "I").unwrap().len(), 2);

        let policy = RetryPolicy {
            max_attempts: 2,
            retry_statuses: vec![503],
            backoff: Duration::ZERO,
        };
        let client = OwnedGamesClient::new(ScriptedTransport::new(vec![(502, "")]), policy);
        assert!(matches!(client.fetch("K", "I").unwrap_err(), RouletteError::HttpStatus(502)));
    }
}
