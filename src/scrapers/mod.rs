//! Listing page sources.
//!
//! Each submodule implements [`crate::collector::PageSource`] for one
//! listing site, turning its markup into [`crate::models::RawRecord`]s and
//! following its pagination link.
//!
//! # Supported Sources
//!
//! | Source | Module | Pagination |
//! |--------|--------|------------|
//! | Hacker News | [`hn`] | `a.morelink` ("More") |

pub mod hn;
