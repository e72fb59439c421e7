//! # Infrastructure Layer
//!
//! Adapters for the relational store and the push notification endpoint.

pub mod persistence;
pub mod push;
