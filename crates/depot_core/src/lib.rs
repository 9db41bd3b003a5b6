//! Core data types for the depot supply-chain decision service.
//!
//! This crate holds the flat records mirrored from the relational store,
//! the external-factor readings fed into prompts, the preference defaults,
//! and the provider-neutral request/response types used to talk to a
//! language model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allocation;
mod company;
mod context;
mod decision;
mod demand;
mod external;
mod factors;
mod location;
mod message;
mod preferences;
mod production;
mod request;

pub use allocation::SupplyAllocation;
pub use company::Company;
pub use context::{DecisionContext, InsightsData};
pub use decision::{AiDecision, DecisionType, NewAiDecision, NewAiDecisionBuilder};
pub use demand::{DemandOrder, OrderStatus};
pub use external::{CacheDataType, DataSource, ExternalData, ExternalDataCache, NewExternalData};
pub use factors::{
    ExternalFactors, MarketReading, MarketTrend, NewsReading, RiskLevel, Sentiment,
    WeatherCondition, WeatherReading,
};
pub use location::{CompanyLocation, LocationInput, NewLocation, DEFAULT_LOCATION_TYPE};
pub use message::{Message, Role};
pub use preferences::{AiSettings, PreferenceToggle, Settings};
pub use production::{LineStatus, ProductionMetric};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse,
    TokenUsage,
};
