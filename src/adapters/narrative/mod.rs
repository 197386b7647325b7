//! Narrative adapters - template-driven prose sections.

mod handlebars_renderer;

pub use handlebars_renderer::{HandlebarsNarrativeRenderer, TEMPLATE_EXTENSION};
