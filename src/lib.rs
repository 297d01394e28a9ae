//! Folio Server
//!
//! A web service that turns uploaded EPUB files into paginated, downloadable
//! documents. The core is a pure pipeline:
//!
//! ```text
//! EPUB bytes ──► epub::EpubArchive ──► epub::PackageDocument ──► epub::ExtractedText
//!                                                                      │
//!                    response bytes ◄── render::PageRenderer ◄── layout::paginate
//! ```
//!
//! [`epub`] reads the container and walks the spine, [`html`] strips chapter
//! markup down to plain text, [`layout`] splits the text onto a fixed
//! character grid, and [`render`] turns the grid into PDF or plain text.
//! [`routes`] exposes the pipeline over HTTP.

pub mod config;
pub mod epub;
pub mod error;
pub mod html;
pub mod layout;
pub mod render;
pub mod routes;
pub mod state;
