//! # Blockmail HTML compiler
//!
//! Renders a block document into email-client-safe HTML and a plain-text
//! alternative.
//!
//! - Layout is nested `<table>`s; every visual property is an inline style.
//! - Styles resolve block settings over type defaults over global settings.
//! - The mobile breakpoint is baked into a `<style>` block in the head.
//! - Rendering is a pure function: no clock, randomness or I/O. Image assets
//!   come from the [`RenderOptions::assets`] catalog passed in by the caller.

mod compiler;
mod plain_text;
pub mod styles;

pub use compiler::{
    render, render_with_options, RenderFault, RenderOptions, RenderOutput, BLOCK_CLASS, CONTAINER_CLASS,
    FLUID_CLASS,
};
pub use plain_text::{plain_text, EMPTY_PLAIN_TEXT};
