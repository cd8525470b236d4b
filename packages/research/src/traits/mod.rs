//! Core trait abstractions for the research library.

pub mod searcher;
