pub mod retry;

pub use retry::{retry_if, IsTransient, RetryConfig, RetryResult};
