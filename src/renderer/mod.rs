//! Main renderer module.
//!
//! This module contains submodules for pipeline construction, scene geometry,
//! the two-pass scene renderer, and the text overlay. It provides the core
//! rendering infrastructure for the application.

/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// Scene geometry and uniform layouts.
pub mod primitives;
/// Two-pass shadow and color rendering.
pub mod scene_renderer;
/// Text rendering system.
pub mod text;
/// Core WGPU library and utilities.
pub mod wgpu_lib;
