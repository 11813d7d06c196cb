// Service exports
pub mod bedrock;

pub use bedrock::{BedrockClient, GatewayError, RetryPolicy, TextGenerator};
