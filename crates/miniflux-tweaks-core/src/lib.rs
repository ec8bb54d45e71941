//! Client core for Miniflux Tweaks.
//!
//! Everything in this crate is plain data and synchronous state
//! transitions: the browser shell owns the DOM and the network, this
//! crate decides what to do. That split keeps every behavior testable
//! on the native target.

pub mod api;
pub mod guard;
pub mod routing;
pub mod sort_control;
pub mod storage;

pub use api::{ApiError, ApiRequest, HttpMethod, SortDirection, User};
pub use guard::DomainGuardDecision;
pub use sort_control::{SortControlEffect, SortControlEvent, SortControlPhase, SortControlState};
pub use storage::{MemoryStore, TweaksStore, STORAGE_KEY_API_TOKEN, STORAGE_KEY_DOMAIN};
