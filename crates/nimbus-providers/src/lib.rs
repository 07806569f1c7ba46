//! Addon-backed search providers.
//!
//! An addon is an out-of-process, loosely-trusted worker that answers search
//! requests asynchronously: we hand it a request through a side-channel
//! dispatch, it posts a result array back to a callback address. This crate
//! owns everything between those two hops: the correlation registry, the
//! blocking call protocol built on top of it, the query construction
//! (including the absolute-numbering heuristic for anime), and the episode
//! relevance filter applied to whatever comes back.

pub mod callbacks;
pub mod filter;
pub mod query;
pub mod searcher;
pub mod title;

pub use callbacks::CallbackRegistry;
pub use searcher::{AddonSearcher, DEFAULT_SEARCH_TIMEOUT};
pub use title::normalize_title;
