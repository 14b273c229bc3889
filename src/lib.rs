//! AI-assisted UI component generation workflow engine
//!
//! A client submits a natural-language component request and receives, over a
//! live event stream, the step-by-step execution of the generation job:
//! requirement analysis, knowledge retrieval, streamed code synthesis and
//! persistence of a new version. The [`runner::JobRunner`] drives the
//! [`pipeline`] of stages against the collaborator boundaries in
//! [`generator`] and [`repository`]; [`server`] exposes the run trigger over
//! HTTP.

pub mod config;
pub mod error;
pub mod events;
pub mod generator;
pub mod job;
pub mod knowledge;
pub mod pipeline;
pub mod repository;
pub mod runner;
pub mod server;
