//! Lovesosa library - Audio-reactive visual state engine
//!
//! Typed words unlock layers, each layer spins with inertial physics, and a
//! live spectrum scales what they draw. Rendering is left to the caller.

pub mod assets;
pub mod audio;
pub mod cli;
pub mod compositor;
pub mod error;
pub mod interaction;
pub mod layers;
pub mod mesh;
pub mod noise;
pub mod params;
pub mod points;
pub mod words;
