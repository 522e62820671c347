// ABOUTME: Route module organization for Rentora Server HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Route module for Rentora Server
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the database managers and the conversation driver.

/// Assistant chat endpoint and local history reads
pub mod chat;
/// Health check and system status routes
pub mod health;
/// Lead management routes
pub mod leads;
/// Property search routes
pub mod properties;
/// Viewing-scheduling stub routes
pub mod scheduler;

pub use chat::ChatRoutes;
pub use health::HealthRoutes;
pub use leads::LeadRoutes;
pub use properties::PropertyRoutes;
pub use scheduler::SchedulerRoutes;
