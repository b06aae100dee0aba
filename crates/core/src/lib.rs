//! Core library for genmanim
//!
//! This crate implements the **Functional Core** of the genmanim application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`genmanim_core`** (this crate): Pure transformation functions with zero I/O
//! - **`genmanim`**: HTTP calls to the generation and render services, the CLI
//!   and the MCP server (the Imperative Shell)
//!
//! Nothing in this crate performs I/O. Request bodies are built here, response
//! bodies are parsed here, and the workbench state is advanced here, so all of
//! it is testable with fixture data.
//!
//! # Module Organization
//!
//! - [`models`]: The fixed catalogue of code generation models
//! - [`wire`]: Request and response payloads for both services
//! - [`export`]: Filename and content for copying or downloading generated code
//! - [`workbench`]: Workbench state record and its transitions
//!
//! # Example Usage
//!
//! ```rust
//! use genmanim_core::models::CodeModel;
//! use genmanim_core::workbench::{Action, WorkbenchState};
//!
//! let state = WorkbenchState::new("Draw a red circle", CodeModel::default())
//!     .apply(Action::GenerationStarted)
//!     .apply(Action::GenerationFinished(Some("from manim import *".to_string())));
//!
//! assert!(state.can_export());
//! assert!(state.can_submit_generation());
//! ```

pub mod export;
pub mod models;
pub mod wire;
pub mod workbench;
