//! Test suite for kanban-users
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
