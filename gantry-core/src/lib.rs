//! Gantry Core
//!
//! Core types and abstractions for the Gantry job delegation system.
//!
//! This crate contains:
//! - Domain types: Core business entities (JobDescriptor, JobHandle, JobPhase, etc.)
//! - DTOs: Data transfer objects exchanged with the remote executor and the host

pub mod domain;
pub mod dto;
