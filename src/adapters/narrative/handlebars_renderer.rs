//! Handlebars narrative renderer over a directory of markdown templates.
//!
//! Each section key maps to `<templates_dir>/<key>.md`. Templates are read
//! on every call so edits take effect without a restart.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;

use crate::domain::costing::format_amount;
use crate::ports::{NarrativeError, NarrativeRenderer, NarrativeSection};

/// Extension of narrative template files.
pub const TEMPLATE_EXTENSION: &str = "md";

handlebars_helper!(neq: |a: Json, b: Json| a != b);
handlebars_helper!(not_empty: |value: Json| match value {
    Value::Null => false,
    Value::Bool(flag) => *flag,
    Value::String(text) => !text.trim().is_empty(),
    Value::Array(items) => !items.is_empty(),
    Value::Object(fields) => !fields.is_empty(),
    Value::Number(_) => true,
});
handlebars_helper!(money: |amount: f64| format_amount(amount));

/// Escapes markup in interpolated values while leaving markdown
/// punctuation intact.
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders narrative sections with Handlebars.
///
/// Output is markdown: interpolated values have `&`, `<` and `>` escaped
/// so answers cannot inject markup, and markdown punctuation is kept. Besides the
/// built-in `eq`, `gt` and `lt` helpers, templates can use `neq`,
/// `notEmpty` and `money` (two decimals with thousands separators).
pub struct HandlebarsNarrativeRenderer {
    templates_dir: PathBuf,
    registry: Handlebars<'static>,
}

impl HandlebarsNarrativeRenderer {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(escape_markup);
        registry.register_helper("neq", Box::new(neq));
        registry.register_helper("notEmpty", Box::new(not_empty));
        registry.register_helper("money", Box::new(money));

        Self {
            templates_dir: templates_dir.into(),
            registry,
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Path of the template for `key`.
    ///
    /// Keys must resolve to a plain file name inside the templates
    /// directory.
    pub fn template_path(&self, key: &str) -> Result<PathBuf, NarrativeError> {
        let file_name = format!("{}.{}", key, TEMPLATE_EXTENSION);
        let is_plain = !key.is_empty()
            && Path::new(&file_name).file_name().and_then(|n| n.to_str()) == Some(file_name.as_str())
            && !key.contains("..");
        if !is_plain {
            return Err(NarrativeError::InvalidTemplateName(key.to_string()));
        }
        Ok(self.templates_dir.join(file_name))
    }

    /// Renders the template registered under `key`.
    pub async fn render_key(&self, key: &str, context: &Value) -> Result<String, NarrativeError> {
        let path = self.template_path(key)?;
        let source = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                NarrativeError::TemplateNotFound(path.display().to_string())
            } else {
                NarrativeError::render_failed(key, format!("cannot read template: {}", e))
            }
        })?;

        self.registry
            .render_template(&source, context)
            .map_err(|e| NarrativeError::render_failed(key, e.to_string()))
    }
}

#[async_trait]
impl NarrativeRenderer for HandlebarsNarrativeRenderer {
    async fn render(
        &self,
        section: NarrativeSection,
        context: &Value,
    ) -> Result<String, NarrativeError> {
        let key = section.template_name();
        tracing::debug!(section = key, "rendering narrative section");
        let text = self.render_key(key, context).await?;
        tracing::debug!(section = key, chars = text.len(), "narrative section rendered");
        Ok(text)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TechnicalVariant;
    use serde_json::json;
    use tempfile::TempDir;

    fn renderer_with(templates: &[(&str, &str)]) -> (TempDir, HandlebarsNarrativeRenderer) {
        let dir = TempDir::new().unwrap();
        for (key, body) in templates {
            std::fs::write(dir.path().join(format!("{}.md", key)), body).unwrap();
        }
        let renderer = HandlebarsNarrativeRenderer::new(dir.path());
        (dir, renderer)
    }

    // ───────────────────────────────────────────────────────────────
    // Rendering
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn renders_section_against_context() {
        let (_dir, renderer) = renderer_with(&[(
            "executive_summary",
            "A {{answers.application.applicationTypeName}} for {{answers.industry.industry}}.",
        )]);
        let context = json!({
            "answers": {
                "application": { "applicationTypeName": "Web Application" },
                "industry": { "industry": "Healthcare" }
            }
        });

        let text = renderer
            .render(NarrativeSection::ExecutiveSummary, &context)
            .await
            .unwrap();
        assert_eq!(text, "A Web Application for Healthcare.");
    }

    #[tokio::test]
    async fn interpolated_markup_is_escaped_but_markdown_is_kept() {
        let (_dir, renderer) = renderer_with(&[("introduction", "**{{name}}**")]);
        let text = renderer
            .render(
                NarrativeSection::Introduction,
                &json!({ "name": "R&D <script>alert(1)</script> *team* \"quoted\"" }),
            )
            .await
            .unwrap();
        assert_eq!(
            text,
            "**R&amp;D &lt;script&gt;alert(1)&lt;/script&gt; *team* \"quoted\"**"
        );
    }

    #[tokio::test]
    async fn technical_variant_selects_its_own_template() {
        let (_dir, renderer) = renderer_with(&[
            ("technical_solution_web", "web"),
            ("technical_solution_mobile", "mobile"),
        ]);
        let section = NarrativeSection::TechnicalSolution(TechnicalVariant::Mobile);
        assert_eq!(renderer.render(section, &json!({})).await.unwrap(), "mobile");
    }

    // ───────────────────────────────────────────────────────────────
    // Helpers
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn comparison_helpers() {
        let (_dir, renderer) = renderer_with(&[(
            "introduction",
            "{{#if (eq kind \"web\")}}W{{/if}}{{#if (neq kind \"mobile\")}}N{{/if}}\
             {{#if (gt count 2)}}G{{/if}}{{#if (lt count 2)}}L{{/if}}",
        )]);
        let text = renderer
            .render(NarrativeSection::Introduction, &json!({ "kind": "web", "count": 3 }))
            .await
            .unwrap();
        assert_eq!(text, "WNG");
    }

    #[tokio::test]
    async fn not_empty_helper() {
        let (_dir, renderer) = renderer_with(&[(
            "introduction",
            "{{#if (notEmpty list)}}L{{/if}}{{#if (notEmpty blank)}}B{{/if}}{{#if (notEmpty missing)}}M{{/if}}",
        )]);
        let text = renderer
            .render(
                NarrativeSection::Introduction,
                &json!({ "list": [1], "blank": "  " }),
            )
            .await
            .unwrap();
        assert_eq!(text, "L");
    }

    #[tokio::test]
    async fn money_helper_formats_amounts() {
        let (_dir, renderer) = renderer_with(&[("introduction", "{{money total}}")]);
        let text = renderer
            .render(NarrativeSection::Introduction, &json!({ "total": 12000 }))
            .await
            .unwrap();
        assert_eq!(text, "12,000.00");
    }

    // ───────────────────────────────────────────────────────────────
    // Failures
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn missing_template_is_reported() {
        let (_dir, renderer) = renderer_with(&[]);
        let err = renderer
            .render(NarrativeSection::ExecutiveSummary, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, NarrativeError::TemplateNotFound(path) if path.ends_with("executive_summary.md")));
    }

    #[tokio::test]
    async fn malformed_template_fails_to_render() {
        let (_dir, renderer) = renderer_with(&[("introduction", "{{#if open}}never closed")]);
        let err = renderer
            .render(NarrativeSection::Introduction, &json!({ "open": true }))
            .await
            .unwrap_err();
        assert!(matches!(err, NarrativeError::RenderFailed { ref section, .. } if section == "introduction"));
    }

    #[test]
    fn template_names_must_be_plain_file_names() {
        let renderer = HandlebarsNarrativeRenderer::new("templates");
        assert!(renderer.template_path("introduction").is_ok());
        assert!(matches!(
            renderer.template_path("../secrets"),
            Err(NarrativeError::InvalidTemplateName(_))
        ));
        assert!(renderer.template_path("nested/file").is_err());
        assert!(renderer.template_path("").is_err());
    }
}
