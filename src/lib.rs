//! InkSeal - sign PDFs with a scanned signature
//!
//! Loads a document and a signature image, removes the signature's paper
//! background, recolors the ink, lets a client place the stamp with pointer
//! gestures and writes the stamped PDF. This library exposes modules for
//! integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
