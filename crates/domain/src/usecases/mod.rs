//! Application use cases
//!
//! Each use case validates caller input before any network call and then
//! dispatches to exactly one port.

pub mod publish;
pub mod search;
pub mod summarize;

pub use publish::PublishUseCase;
pub use search::SearchUseCase;
pub use summarize::SummarizeUseCase;
