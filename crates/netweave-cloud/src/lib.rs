//! Netweave Cloud Submission Interface
//!
//! This crate is the boundary between an evaluated topology graph and the
//! external provisioning engine that reconciles it against live
//! infrastructure. The graph is compiled into a provider-neutral
//! [`ResourceSet`]; an engine implements [`CloudProvider`] to receive it,
//! plan the changes, and apply them.
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 netweave CLI                      │
//! │            (validate / synth / outputs)           │
//! └─────────────────┬────────────────────────────────┘
//!                   │
//! ┌─────────────────▼────────────────────────────────┐
//! │               netweave-cloud                      │
//! │  ┌──────────────────────────────────────────┐    │
//! │  │        Submission Interface               │    │
//! │  │  trait CloudProvider { plan, apply }      │    │
//! │  └──────────────────────────────────────────┘    │
//! │  ┌──────────────┐  ┌───────────────┐            │
//! │  │   Compiler   │  │ Named Outputs │            │
//! │  └──────────────┘  └───────────────┘            │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! No engine ships with this crate: diffing, dependency-ordered apply, and
//! state tracking all happen on the far side of the trait.

pub mod action;
pub mod compile;
pub mod error;
pub mod provider;

// Re-exports
pub use action::{Action, ActionType, ApplyResult, Plan, PlanSummary};
pub use compile::{compile, outputs, Output};
pub use error::{CloudError, Result};
pub use provider::{AuthStatus, CloudProvider, ResourceConfig, ResourceKind, ResourceSet};
