// ABOUTME: Library module for mysql-simple-backup
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod catalog;
pub mod commands;
pub mod config;
pub mod connection;
pub mod dump;
pub mod error;
pub mod interactive;
pub mod job;
pub mod mysql;
pub mod restore;
pub mod selection;
pub mod sink;
