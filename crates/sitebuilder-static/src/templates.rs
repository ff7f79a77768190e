//! Template rendering for the site page.

use std::path::{Path, PathBuf};

use minijinja::{context, path_loader, AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use sitebuilder_data::SiteData;

/// Options controlling how the page template is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Template name, relative to the templates directory
    pub template: String,

    /// Fail on references to missing data instead of rendering them empty
    pub strict_undefined: bool,

    /// HTML-escape interpolated values in `.html` templates
    pub autoescape: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            template: "template.html".to_string(),
            strict_undefined: false,
            autoescape: false,
        }
    }
}

/// Errors that can occur when rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template {name} not found in {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },

    #[error("Syntax error in template {name}: {message}")]
    Syntax { name: String, message: String },

    #[error("Failed to render template {name}: {message}")]
    Render { name: String, message: String },
}

/// Template engine using minijinja, loading templates from a directory.
pub struct TemplateRenderer {
    env: Environment<'static>,
    templates_dir: PathBuf,
}

impl TemplateRenderer {
    /// Create a renderer that resolves templates, includes and parents in `templates_dir`.
    pub fn new(templates_dir: &Path, options: &RenderOptions) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(templates_dir));

        if options.strict_undefined {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }

        if !options.autoescape {
            env.set_auto_escape_callback(|_| AutoEscape::None);
        }

        Self {
            env,
            templates_dir: templates_dir.to_path_buf(),
        }
    }

    /// Render `name` with the site data bound as `data`.
    pub fn render(&self, name: &str, data: &SiteData) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound {
                name: name.to_string(),
                dir: self.templates_dir.clone(),
            },
            _ => classify(name, e),
        })?;

        tmpl.render(context! { data => data })
            .map_err(|e| classify(name, e))
    }
}

/// Map an engine error raised while compiling or rendering `name`.
fn classify(name: &str, err: minijinja::Error) -> TemplateError {
    match err.kind() {
        ErrorKind::SyntaxError => TemplateError::Syntax {
            name: name.to_string(),
            message: err.to_string(),
        },
        _ => TemplateError::Render {
            name: name.to_string(),
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sitebuilder_data::Value;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn templates(files: &[(&str, &str)]) -> TempDir {
        let temp = tempdir().unwrap();
        for (name, source) in files {
            fs::write(temp.path().join(name), source).unwrap();
        }
        temp
    }

    fn data(pairs: &[(&str, Value)]) -> SiteData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn renders_data_variable() {
        let dir = templates(&[("template.html", "<h1>{{ data.title }}</h1>\n")]);
        let renderer = TemplateRenderer::new(dir.path(), &RenderOptions::default());

        let html = renderer
            .render("template.html", &data(&[("title", Value::from("Home"))]))
            .unwrap();

        assert_eq!(html, "<h1>Home</h1>");
    }

    #[test]
    fn missing_keys_render_empty() {
        let dir = templates(&[("template.html", "<h1>{{ data.title }}</h1>")]);
        let renderer = TemplateRenderer::new(dir.path(), &RenderOptions::default());

        let html = renderer.render("template.html", &SiteData::new()).unwrap();

        assert_eq!(html, "<h1></h1>");
    }

    #[test]
    fn strict_mode_rejects_missing_keys() {
        let dir = templates(&[("template.html", "<h1>{{ data.title }}</h1>")]);
        let options = RenderOptions {
            strict_undefined: true,
            ..Default::default()
        };
        let renderer = TemplateRenderer::new(dir.path(), &options);

        let result = renderer.render("template.html", &SiteData::new());

        assert!(matches!(result, Err(TemplateError::Render { .. })));
    }

    #[test]
    fn resolves_extends_and_include() {
        let dir = templates(&[
            (
                "base.html",
                "<html>{% include \"nav.html\" %}{% block body %}{% endblock %}</html>",
            ),
            ("nav.html", "<nav>{{ data.site }}</nav>"),
            (
                "template.html",
                "{% extends \"base.html\" %}{% block body %}<ul>{% for tag in data.tags %}<li>{{ tag }}</li>{% endfor %}</ul>{% endblock %}",
            ),
        ]);
        let renderer = TemplateRenderer::new(dir.path(), &RenderOptions::default());

        let html = renderer
            .render(
                "template.html",
                &data(&[
                    ("site", Value::from("Docs")),
                    ("tags", Value::from(vec!["a", "b"])),
                ]),
            )
            .unwrap();

        assert_eq!(
            html,
            "<html><nav>Docs</nav><ul><li>a</li><li>b</li></ul></html>"
        );
    }

    #[test]
    fn iterates_mappings_in_document_order() {
        let dir = templates(&[(
            "template.html",
            "{% for name, url in data.nav|items %}{{ name }}={{ url }} {% endfor %}",
        )]);
        let site: SiteData = serde_yaml::from_str("nav:\n  zeta: /z\n  alpha: /a\n  mid: /m\n")
            .unwrap();
        let renderer = TemplateRenderer::new(dir.path(), &RenderOptions::default());

        let html = renderer.render("template.html", &site).unwrap();

        assert_eq!(html, "zeta=/z alpha=/a mid=/m ");
    }

    #[test]
    fn leaves_html_unescaped_by_default() {
        let dir = templates(&[("template.html", "{{ data.body }}")]);
        let body = data(&[("body", Value::from("<b>bold</b>"))]);

        let raw = TemplateRenderer::new(dir.path(), &RenderOptions::default())
            .render("template.html", &body)
            .unwrap();
        let escaped = TemplateRenderer::new(
            dir.path(),
            &RenderOptions {
                autoescape: true,
                ..Default::default()
            },
        )
        .render("template.html", &body)
        .unwrap();

        assert_eq!(raw, "<b>bold</b>");
        assert_eq!(escaped, "&lt;b&gt;bold&lt;/b&gt;");
    }

    #[test]
    fn errors_on_missing_template() {
        let dir = tempdir().unwrap();
        let renderer = TemplateRenderer::new(dir.path(), &RenderOptions::default());

        let result = renderer.render("template.html", &SiteData::new());

        match result {
            Err(TemplateError::NotFound { name, .. }) => assert_eq!(name, "template.html"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn errors_on_syntax_error() {
        let dir = templates(&[("template.html", "{% if %}oops{% endif %}")]);
        let renderer = TemplateRenderer::new(dir.path(), &RenderOptions::default());

        let result = renderer.render("template.html", &SiteData::new());

        assert!(matches!(result, Err(TemplateError::Syntax { .. })));
    }
}
