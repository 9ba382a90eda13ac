use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::InsightsConfig;
use crate::engine::RedemptionEngine;
use crate::format::{format_cpp, format_dollars, format_points};
use crate::types::{Program, SearchOutcome, TripRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub query: TripRequest,
    pub programs: Vec<Program>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn summarize(&self, trip: &TripRequest, programs: &[Program]) -> Result<String>;
}

pub fn describe_outcome(outcome: &SearchOutcome) -> String {
    let Some(best) = &outcome.best else {
        return outcome
            .message
            .clone()
            .unwrap_or_else(|| "No redemption options found.".to_string());
    };

    let mut summary = format!("Best option: {}", best.program);
    if let Some(source) = &best.transfer_from {
        summary.push_str(&format!(" with points transferred from {source}"));
    }
    summary.push_str(&format!(
        ", {} points plus {} in fees, worth about {} per point ({}).",
        format_points(Some(best.points_spent())),
        format_dollars(best.fees),
        format_cpp(best.cents_per_point),
        best.value_rating
    ));
    if let Some(spot) = &best.sweet_spot_details {
        summary.push_str(&format!(" This is a known sweet spot: {}.", spot.name));
    }
    if !best.has_enough_points {
        summary.push_str(" You do not have enough points for it yet.");
    }
    match outcome.alternatives.len() {
        0 => {}
        1 => summary.push_str(" 1 alternative was also considered."),
        n => summary.push_str(&format!(" {n} alternatives were also considered.")),
    }
    summary
}

pub struct LocalSummary {
    engine: RedemptionEngine,
}

impl LocalSummary {
    pub fn new(engine: RedemptionEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl SummaryProvider for LocalSummary {
    async fn summarize(&self, trip: &TripRequest, programs: &[Program]) -> Result<String> {
        Ok(describe_outcome(&self.engine.search(trip, programs)))
    }
}

pub struct RemoteSummary {
    client: Client,
    url: String,
}

impl RemoteSummary {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("redemption-oracle/0.1")
            .timeout(timeout)
            .build()
            .context("failed to build summary HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SummaryProvider for RemoteSummary {
    async fn summarize(&self, trip: &TripRequest, programs: &[Program]) -> Result<String> {
        let body = SummaryRequest {
            query: trip.clone(),
            programs: programs.to_vec(),
        };
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("failed POST request: {}", self.url))?;
        let status = response.status();
        if !status.is_success() {
            let preview: String = response.text().await.unwrap_or_default().chars().take(180).collect();
            return Err(anyhow!("POST {} returned {status}: {preview}", self.url));
        }
        let parsed: SummaryResponse = response
            .json()
            .await
            .with_context(|| format!("invalid summary response: {}", self.url))?;
        Ok(parsed.summary)
    }
}

pub fn provider_from_config(
    config: &InsightsConfig,
    engine: RedemptionEngine,
) -> Result<Box<dyn SummaryProvider>> {
    if config.summary_url.trim().is_empty() {
        return Ok(Box::new(LocalSummary::new(engine)));
    }
    let remote = RemoteSummary::new(
        config.summary_url.trim(),
        Duration::from_secs(config.timeout_secs.max(1)),
    )?;
    Ok(Box::new(remote))
}
