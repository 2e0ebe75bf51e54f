//! Procedural pixel-art background: layered scrolling mountains, drifting
//! clouds and twinkling stars, paced to a fixed frame rate.
//!
//! [`animator::Animator`] holds all state and turns host timestamps into
//! [`render::Frame`]s; [`surface::Background`] binds it to a [`surface::Surface`].

pub mod animator;
pub mod config;
pub mod draw;
pub mod error;
pub mod palette;
pub mod render;
pub mod scene;
pub mod snapshot;
pub mod surface;
pub mod types;
