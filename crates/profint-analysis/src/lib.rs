//! Analyzers and the run pipeline for profint.
//!
//! Every analyzer is a pure function over immutable inputs and an explicit
//! [`profint_core::AnalysisConfig`]. [`run_report`] fetches from a
//! [`profint_source::DataSource`], runs the analyzers and assembles the
//! [`profint_core::Report`].

pub mod assemble;
pub mod behavior;
pub mod error;
pub mod footprint;
pub mod metrics;
pub mod network;
pub mod pipeline;
pub mod security;

mod lexicon;
mod terms;

pub use assemble::{assemble, AnalyzerOutputs};
pub use behavior::analyze_behavior;
pub use error::RunError;
pub use footprint::extract_footprint;
pub use metrics::profile_metrics;
pub use network::analyze_network;
pub use pipeline::{analyze, collect, run_report, Collected};
pub use security::{assess_privacy, assess_security};
