/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! CPU/bus multiplex timing generator.
//!
//! Turns a processor clock, a faster bus clock and a handful of setup/hold
//! constraints into bus-tick offsets, then draws them as a WaveDrom diagram.
//!
//! ```text
//! lib.rs
//! ├── config/     – rates, constraints, YAML loading, validation
//! ├── schedule/   – tick count, strobe midpoint, constraint offsets, labels
//! ├── wave        – typed levels, boundary extension, run compression
//! ├── diagram     – WaveDrom lanes + JSON serialisation
//! └── report      – specified / calculated value echo and full document
//! ```
//!
//! The pipeline is one pass: `TimingConfig` → [`schedule::ScheduleDeriver`]
//! → [`diagram::Diagram`] → [`report::render_document`].

pub mod config;
pub mod diagram;
pub mod report;
pub mod schedule;
pub mod wave;
