//! Acarya Chat - Conversational relay server
//!
//! Bridges a browser chat client and two external conversational-AI cloud
//! services: a dialog assistant that interprets each chat turn against a
//! conversation graph, and a document search service consulted when the
//! dialog context requests a lookup.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
