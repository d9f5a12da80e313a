//! # bot-rest
//!
//! Stateless HTTP command layer. Every operation issues one authenticated
//! request and returns an explicit result; nothing is logged-and-swallowed.

mod client;
mod error;
mod fetch;
mod messages;
pub mod models;

pub use client::RestClient;
pub use error::{RestError, RestResult};
pub use fetch::FetchApi;
pub use messages::{MessagesApi, BULK_DELETE_MAX, BULK_DELETE_MAX_AGE_DAYS};
pub use models::{Author, GatewayBotInfo, Message, MessageContent, SessionStartLimit};
