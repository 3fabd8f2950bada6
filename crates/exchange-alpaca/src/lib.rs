//! Alpaca Markets client for options-lab.
//!
//! Implements the [`MarketData`](options_lab_core::MarketData) and
//! [`Broker`](options_lab_core::Broker) traits over Alpaca's REST APIs.
//!
//! Credentials come from `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`. Orders
//! are only ever sent to the paper trading endpoint.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::{AlpacaAuthConfig, AlpacaCredentials};
pub use client::{AlpacaClient, AlpacaClientConfig};
pub use error::{AlpacaError, Result};
pub use types::parse_occ_symbol;
