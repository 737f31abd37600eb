//! `medswap-ai`
//!
//! **Responsibility:** Efficiency Analyzer for the local hospital's inventory.
//!
//! - Sends a minimal projection of each item to a text-generation service and
//!   validates the structured reply.
//! - Never fails: every error path produces [`AnalysisResult::fallback`].
//! - Results are insights for display; nothing here mutates inventory.

pub mod analyzer;
pub mod config;
pub mod coordinator;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod result;
pub mod watcher;

pub use analyzer::EfficiencyAnalyzer;
pub use config::AnalyzerConfig;
pub use coordinator::{AnalysisCoordinator, AnalysisState, Refreshed};
pub use gemini::GeminiClient;
pub use generator::{DisabledGenerator, TextGenerator};
pub use prompt::{GenerationRequest, ItemProjection};
pub use result::{AiError, AnalysisOutcome, AnalysisResult, RiskLevel};
pub use watcher::{InventoryWatcher, InventoryWatcherHandle};
