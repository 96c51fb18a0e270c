pub mod client;
pub mod factory;
pub mod fallback;
pub mod interface;
pub mod languages;
pub mod orchestrator;
pub mod status;
pub mod validation;

#[cfg(test)]
pub mod testing;

pub use factory::TranslatorFactory;
pub use interface::{TranslationRequest, TranslationResult, AUTO_DETECT};
pub use orchestrator::TranslationOrchestrator;
pub use status::{ChannelStatusSink, LoggingStatusSink, StatusUpdate};
