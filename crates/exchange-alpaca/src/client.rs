//! Alpaca REST client with rate limiting.
//!
//! One client talks to both Alpaca hosts: the trading API (account,
//! positions, orders, contract listings) and the market data API (quotes,
//! bars, option snapshots). Every request waits on a shared governor
//! limiter and carries the `APCA-API-*` key headers.
//!
//! # Example
//!
//! ```ignore
//! use options_lab_alpaca::{AlpacaClient, AlpacaClientConfig};
//! use options_lab_core::MarketData;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AlpacaClient::new(AlpacaClientConfig::paper())?;
//!     let quote = client.latest_quote("SPY").await?;
//!     println!("SPY mid: {:?}", quote.mid());
//!     Ok(())
//! }
//! ```

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use options_lab_core::chain::ChainFilter;
use options_lab_core::config::{AlpacaConfig, LIVE_TRADING_URL, MARKET_DATA_URL, PAPER_TRADING_URL};
use options_lab_core::traits::{Broker, MarketData};
use options_lab_core::types::{
    AccountSummary, DailyBar, OptionContract, OptionSnapshot, Order, OrderSide, Position,
    StockQuote,
};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::{AlpacaAuthConfig, AlpacaCredentials};
use crate::error::{AlpacaError, Result};
use crate::types::{
    parse_occ_symbol, MarketOrderRequest, RawAccount, RawBarsResponse, RawContractsResponse,
    RawLatestQuoteResponse, RawOrder, RawPosition, RawSnapshotsResponse,
};

/// Largest page Alpaca serves for contracts and snapshots.
const MAX_PAGE_SIZE: u32 = 1000;

/// Bars requested per page.
const BAR_PAGE_SIZE: u32 = 1000;

type Query = Vec<(&'static str, String)>;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the Alpaca client.
#[derive(Debug, Clone)]
pub struct AlpacaClientConfig {
    /// Trading API base URL (paper or live).
    pub trading_url: String,

    /// Market data API base URL.
    pub data_url: String,

    /// Whether `trading_url` is the paper endpoint. Orders are refused otherwise.
    pub paper: bool,

    /// Options data feed (`indicative` or `opra`).
    pub options_feed: String,

    pub auth_config: AlpacaAuthConfig,

    pub requests_per_minute: NonZeroU32,

    pub timeout_secs: u64,
}

impl Default for AlpacaClientConfig {
    fn default() -> Self {
        Self {
            trading_url: PAPER_TRADING_URL.to_string(),
            data_url: MARKET_DATA_URL.to_string(),
            paper: true,
            options_feed: "indicative".to_string(),
            auth_config: AlpacaAuthConfig::default(),
            requests_per_minute: nonzero!(200u32),
            timeout_secs: 30,
        }
    }
}

impl AlpacaClientConfig {
    /// Paper trading endpoint.
    #[must_use]
    pub fn paper() -> Self {
        Self::default()
    }

    /// Live trading endpoint. Market data works; order entry is refused.
    #[must_use]
    pub fn live() -> Self {
        Self {
            trading_url: LIVE_TRADING_URL.to_string(),
            paper: false,
            ..Default::default()
        }
    }

    /// Builds the client settings from the `[alpaca]` config section.
    #[must_use]
    pub fn from_app_config(config: &AlpacaConfig) -> Self {
        Self {
            trading_url: config.trading_base_url().to_string(),
            data_url: config.data_url.clone(),
            paper: config.paper,
            options_feed: config.options_feed.clone(),
            auth_config: AlpacaAuthConfig::default(),
            requests_per_minute: NonZeroU32::new(config.requests_per_minute)
                .unwrap_or(nonzero!(200u32)),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Points both APIs at one host (mock servers).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.trading_url = url.clone();
        self.data_url = url;
        self
    }

    #[must_use]
    pub fn with_trading_url(mut self, url: impl Into<String>) -> Self {
        self.trading_url = url.into();
        self
    }

    #[must_use]
    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = url.into();
        self
    }

    #[must_use]
    pub fn with_paper(mut self, paper: bool) -> Self {
        self.paper = paper;
        self
    }

    #[must_use]
    pub fn with_options_feed(mut self, feed: impl Into<String>) -> Self {
        self.options_feed = feed.into();
        self
    }

    #[must_use]
    pub fn with_auth_config(mut self, config: AlpacaAuthConfig) -> Self {
        self.auth_config = config;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_minute: NonZeroU32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// =============================================================================
// AlpacaClient
// =============================================================================

/// Which Alpaca host a request goes to.
#[derive(Debug, Clone, Copy)]
enum Api {
    Trading,
    Data,
}

/// Alpaca REST API client.
pub struct AlpacaClient {
    config: AlpacaClientConfig,

    http: Client,

    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,

    credentials: AlpacaCredentials,
}

impl std::fmt::Debug for AlpacaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaClient")
            .field("trading_url", &self.config.trading_url)
            .field("data_url", &self.config.data_url)
            .field("paper", &self.config.paper)
            .finish_non_exhaustive()
    }
}

impl AlpacaClient {
    /// Creates a client reading credentials from the environment.
    ///
    /// # Errors
    /// Returns error if a credential variable is missing or the HTTP client
    /// cannot be built.
    pub fn new(config: AlpacaClientConfig) -> Result<Self> {
        let credentials = AlpacaCredentials::from_env(&config.auth_config)?;
        Self::with_credentials(config, credentials)
    }

    /// Creates a client with explicit credentials.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_credentials(
        config: AlpacaClientConfig,
        credentials: AlpacaCredentials,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AlpacaError::Network(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_minute(config.requests_per_minute);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        tracing::debug!(
            trading_url = %config.trading_url,
            paper = config.paper,
            key_id = credentials.key_id(),
            "Alpaca client ready"
        );

        Ok(Self {
            config,
            http,
            rate_limiter,
            credentials,
        })
    }

    #[must_use]
    pub fn is_paper(&self) -> bool {
        self.config.paper
    }

    #[must_use]
    pub fn trading_url(&self) -> &str {
        &self.config.trading_url
    }

    /// Validates a stock or OCC option symbol before it goes into a URL.
    ///
    /// Accepts ASCII letters, digits, `.` (class shares like `BRK.B`) and `-`.
    fn validate_symbol(symbol: &str) -> Result<&str> {
        if symbol.contains("..") || symbol.contains('/') || symbol.contains('\\') {
            return Err(AlpacaError::InvalidSymbol(format!(
                "contains forbidden characters: {symbol}"
            )));
        }

        if symbol.is_empty() {
            return Err(AlpacaError::InvalidSymbol("symbol cannot be empty".to_string()));
        }

        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(AlpacaError::InvalidSymbol(format!(
                "must contain only letters, digits, '.' or '-': {symbol}"
            )));
        }

        // OCC symbols top out at 21 characters.
        if symbol.len() > 21 {
            return Err(AlpacaError::InvalidSymbol(format!(
                "exceeds maximum length of 21: {}",
                symbol.len()
            )));
        }

        Ok(symbol)
    }

    fn base(&self, api: Api) -> &str {
        match api {
            Api::Trading => &self.config.trading_url,
            Api::Data => &self.config.data_url,
        }
    }

    /// Waits for the rate limiter and makes an authenticated GET request.
    async fn get<T: DeserializeOwned>(&self, api: Api, path: &str, query: &Query) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base(api), path);
        let [key, secret] = self.credentials.as_tuples();

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header("Accept", "application/json")
            .header(key.0, key.1)
            .header(secret.0, secret.1)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Waits for the rate limiter and makes an authenticated POST to the trading API.
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.config.trading_url, path);
        let body_json = serde_json::to_string(body)?;
        let [key, secret] = self.credentials.as_tuples();

        tracing::debug!("POST {} body_len={}", url, body_json.len());

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header(key.0, key.1)
            .header(secret.0, secret.1)
            .body(body_json)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AlpacaError::rate_limit(retry_after));
        }

        if status.as_u16() == 401 {
            let text = response.text().await.unwrap_or_default();
            return Err(AlpacaError::Authentication(text));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AlpacaError::api(status.as_u16(), text));
        }

        let body = response.json::<T>().await?;
        Ok(body)
    }

    // =========================================================================
    // Market Data Endpoints
    // =========================================================================

    /// Latest NBBO quote for a stock.
    ///
    /// # Errors
    /// Returns error if the symbol is invalid or the API call fails.
    pub async fn get_latest_quote(&self, symbol: &str) -> Result<StockQuote> {
        let symbol = Self::validate_symbol(symbol)?.to_uppercase();
        let path = format!("/v2/stocks/{symbol}/quotes/latest");

        let response: RawLatestQuoteResponse = self.get(Api::Data, &path, &Vec::new()).await?;
        Ok(response.quote.into_quote(&symbol))
    }

    /// Daily bars between two dates, following pagination.
    ///
    /// # Errors
    /// Returns error if the symbol is invalid or the API call fails.
    pub async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let symbol = Self::validate_symbol(symbol)?.to_uppercase();
        let path = format!("/v2/stocks/{symbol}/bars");

        let mut bars = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query: Query = vec![
                ("timeframe", "1Day".to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("limit", BAR_PAGE_SIZE.to_string()),
                ("adjustment", "raw".to_string()),
            ];
            if let Some(token) = page_token.take() {
                query.push(("page_token", token));
            }

            let response: RawBarsResponse = self.get(Api::Data, &path, &query).await?;
            bars.extend(response.bars.unwrap_or_default().into_iter().map(DailyBar::from));

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(symbol = %symbol, count = bars.len(), "Fetched daily bars");
        Ok(bars)
    }

    /// Query parameters shared by the contracts and snapshots endpoints.
    fn chain_query(filter: &ChainFilter, page_size: u32) -> Query {
        let mut query: Query = vec![("limit", page_size.to_string())];
        if let Some(d) = filter.expiration_gte {
            query.push(("expiration_date_gte", d.to_string()));
        }
        if let Some(d) = filter.expiration_lte {
            query.push(("expiration_date_lte", d.to_string()));
        }
        if let Some(r) = filter.right {
            query.push(("type", r.as_str().to_string()));
        }
        if let Some(s) = filter.strike_gte {
            query.push(("strike_price_gte", s.normalize().to_string()));
        }
        if let Some(s) = filter.strike_lte {
            query.push(("strike_price_lte", s.normalize().to_string()));
        }
        query
    }

    /// Listed contracts for an underlying, up to `filter.limit`.
    ///
    /// # Errors
    /// Returns error if the symbol is invalid or the API call fails.
    pub async fn get_option_contracts(
        &self,
        underlying: &str,
        filter: &ChainFilter,
    ) -> Result<Vec<OptionContract>> {
        let underlying = Self::validate_symbol(underlying)?.to_uppercase();
        let wanted = filter.limit as usize;

        let mut contracts = Vec::new();
        let mut page_token: Option<String> = None;
        while contracts.len() < wanted {
            let page_size = (wanted - contracts.len()).min(MAX_PAGE_SIZE as usize) as u32;
            let mut query = Self::chain_query(filter, page_size);
            query.push(("underlying_symbols", underlying.clone()));
            if let Some(token) = page_token.take() {
                query.push(("page_token", token));
            }

            let response: RawContractsResponse =
                self.get(Api::Trading, "/v2/options/contracts", &query).await?;
            contracts.extend(
                response
                    .option_contracts
                    .unwrap_or_default()
                    .into_iter()
                    .map(OptionContract::from),
            );

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        contracts.truncate(wanted);

        tracing::debug!(underlying = %underlying, count = contracts.len(), "Fetched option contracts");
        Ok(contracts)
    }

    /// Option snapshots (quotes, IV, greeks) for an underlying, up to `filter.limit`.
    ///
    /// Results are ordered by expiry, right, then strike.
    ///
    /// # Errors
    /// Returns error if the symbol is invalid or the API call fails.
    pub async fn get_option_snapshots(
        &self,
        underlying: &str,
        filter: &ChainFilter,
    ) -> Result<Vec<OptionSnapshot>> {
        let underlying = Self::validate_symbol(underlying)?.to_uppercase();
        let path = format!("/v1beta1/options/snapshots/{underlying}");
        let wanted = filter.limit as usize;

        let mut snapshots = Vec::new();
        let mut page_token: Option<String> = None;
        while snapshots.len() < wanted {
            let page_size = (wanted - snapshots.len()).min(MAX_PAGE_SIZE as usize) as u32;
            let mut query = Self::chain_query(filter, page_size);
            query.push(("feed", self.config.options_feed.clone()));
            if let Some(token) = page_token.take() {
                query.push(("page_token", token));
            }

            let response: RawSnapshotsResponse = self.get(Api::Data, &path, &query).await?;
            for (symbol, raw) in response.snapshots {
                match parse_occ_symbol(&symbol) {
                    Ok(contract) if filter.matches(&contract) => {
                        snapshots.push(raw.into_snapshot(contract));
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(symbol = %symbol, error = %e, "Skipping snapshot"),
                }
            }

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        snapshots.sort_by(|a, b| {
            let (a, b) = (&a.contract, &b.contract);
            (a.expiry, a.right.as_str(), a.strike).cmp(&(b.expiry, b.right.as_str(), b.strike))
        });
        snapshots.truncate(wanted);

        tracing::debug!(underlying = %underlying, count = snapshots.len(), "Fetched option snapshots");
        Ok(snapshots)
    }

    // =========================================================================
    // Trading Endpoints
    // =========================================================================

    /// # Errors
    /// Returns error if the API call fails.
    pub async fn get_account(&self) -> Result<AccountSummary> {
        let raw: RawAccount = self.get(Api::Trading, "/v2/account", &Vec::new()).await?;
        Ok(raw.into())
    }

    /// # Errors
    /// Returns error if the API call fails.
    pub async fn get_positions(&self) -> Result<Vec<Position>> {
        let raw: Vec<RawPosition> = self.get(Api::Trading, "/v2/positions", &Vec::new()).await?;
        Ok(raw.into_iter().map(Position::from).collect())
    }

    /// # Errors
    /// Returns error if the API call fails.
    pub async fn get_open_orders(&self) -> Result<Vec<Order>> {
        let query: Query = vec![("status", "open".to_string())];
        let raw: Vec<RawOrder> = self.get(Api::Trading, "/v2/orders", &query).await?;
        Ok(raw.into_iter().map(Order::from).collect())
    }

    /// Submits a day market order.
    ///
    /// # Errors
    /// Returns [`AlpacaError::LiveTradingRefused`] unless the client is on the
    /// paper endpoint, or an error if the symbol is invalid or the API call fails.
    pub async fn submit_market_order(
        &self,
        symbol: &str,
        qty: Decimal,
        side: OrderSide,
    ) -> Result<Order> {
        if !self.config.paper {
            return Err(AlpacaError::LiveTradingRefused);
        }
        let symbol = Self::validate_symbol(symbol)?;
        if qty <= Decimal::ZERO {
            return Err(AlpacaError::InvalidOrder(format!("quantity must be positive: {qty}")));
        }

        let body = MarketOrderRequest::day(symbol, qty, side);
        let raw: RawOrder = self.post("/v2/orders", &body).await?;

        tracing::info!(order_id = %raw.id, symbol = %symbol, side = %side, qty = %qty, "Order submitted");
        Ok(raw.into())
    }
}

#[async_trait]
impl MarketData for AlpacaClient {
    async fn latest_quote(&self, symbol: &str) -> anyhow::Result<StockQuote> {
        Ok(self.get_latest_quote(symbol).await?)
    }

    async fn option_contracts(
        &self,
        underlying: &str,
        filter: &ChainFilter,
    ) -> anyhow::Result<Vec<OptionContract>> {
        Ok(self.get_option_contracts(underlying, filter).await?)
    }

    async fn option_snapshots(
        &self,
        underlying: &str,
        filter: &ChainFilter,
    ) -> anyhow::Result<Vec<OptionSnapshot>> {
        Ok(self.get_option_snapshots(underlying, filter).await?)
    }

    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<DailyBar>> {
        Ok(self.get_daily_bars(symbol, start, end).await?)
    }
}

#[async_trait]
impl Broker for AlpacaClient {
    async fn account(&self) -> anyhow::Result<AccountSummary> {
        Ok(self.get_account().await?)
    }

    async fn positions(&self) -> anyhow::Result<Vec<Position>> {
        Ok(self.get_positions().await?)
    }

    async fn open_orders(&self) -> anyhow::Result<Vec<Order>> {
        Ok(self.get_open_orders().await?)
    }

    async fn submit_market_order(
        &self,
        symbol: &str,
        qty: Decimal,
        side: OrderSide,
    ) -> anyhow::Result<Order> {
        Ok(AlpacaClient::submit_market_order(self, symbol, qty, side).await?)
    }
}
