//! Backend access for the BikeHero console
//!
//! The agent service exposes two endpoints: `POST /chat/` to talk to the agent
//! and `GET /chat/history/` to list stored exchanges. Panels only see the
//! [`AgentApi`] trait, so they can run against [`HttpAgentClient`] in the app
//! and against a scripted backend in tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! use bikehero::api::{AgentApi, HttpAgentClient};
//! use bikehero::config::ApiConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpAgentClient::new(ApiConfig::from_env()?);
//! let reply = client.send_chat("What are your maintenance packages?").await?;
//! println!("{}", reply.response);
//! # Ok(())
//! # }
//! ```

mod client;

pub use client::{AgentApi, AgentHandle, ApiError, ApiResult, HttpAgentClient};
