use crate::domain::request::OutgoingRequest;
use std::collections::BTreeMap;

pub const DEFAULT_SUBMIT_LABEL: &str = "Proceed to secure server";

/// Attributes that the renderer always sets itself.
const FORM_CONTROLLED: [&str; 2] = ["action", "method"];
const FIELD_CONTROLLED: [&str; 3] = ["name", "value", "type"];

/// Presentation options for one rendering call.
///
/// Build a new value per call; nothing is shared between renders.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Extra attributes on the `<form>` element, e.g. `class`.
    pub form_attrs: BTreeMap<String, String>,
    /// Extra attributes per field, keyed by lower-case field name.
    pub field_attrs: BTreeMap<String, BTreeMap<String, String>>,
    /// Label of the submit button. Defaults to [`DEFAULT_SUBMIT_LABEL`].
    pub submit_label: Option<String>,
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_field_attr(
        mut self,
        field: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.field_attrs
            .entry(field.into().to_lowercase())
            .or_default()
            .insert(name.into(), value.into());
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = Some(label.into());
        self
    }
}

/// Renders a signed request as HTML hidden inputs, optionally wrapped in a
/// form that posts to the processor.
///
/// Every attribute value is HTML-escaped here. Attribute names outside
/// `[A-Za-z0-9_:-]` are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormRenderer;

impl FormRenderer {
    pub fn new() -> Self {
        Self
    }

    /// One `<input type="hidden">` per field, one per line.
    pub fn render_fields(&self, request: &OutgoingRequest, options: &FormOptions) -> String {
        let mut out = String::new();
        for (name, value) in request.fields() {
            let mut attrs = vec![
                ("type", "hidden"),
                ("name", name.as_str()),
                ("value", value),
            ];
            if let Some(extra) = options.field_attrs.get(&name.to_lowercase()) {
                attrs.extend(
                    extra
                        .iter()
                        .filter(|(k, _)| !is_controlled(k, &FIELD_CONTROLLED))
                        .map(|(k, v)| (k.as_str(), v.as_str())),
                );
            }
            out.push_str(&format!("<input{} />\n", render_attrs(&attrs)));
        }
        out
    }

    /// A complete `<form>` posting all fields to the request's endpoint.
    pub fn render_form(&self, request: &OutgoingRequest, options: &FormOptions) -> String {
        let mut attrs = vec![("action", request.endpoint_url()), ("method", "POST")];
        attrs.extend(
            options
                .form_attrs
                .iter()
                .filter(|(k, _)| !is_controlled(k, &FORM_CONTROLLED))
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        let label = options
            .submit_label
            .as_deref()
            .unwrap_or(DEFAULT_SUBMIT_LABEL);

        let mut out = String::new();
        out.push_str(&format!("<form{}>\n", render_attrs(&attrs)));
        out.push_str(&self.render_fields(request, options));
        out.push_str(&format!(
            "<input type=\"submit\" value=\"{}\" />\n",
            escape_html(label)
        ));
        out.push_str("</form>\n");
        out
    }
}

fn is_controlled(name: &str, controlled: &[&str]) -> bool {
    controlled.iter().any(|c| c.eq_ignore_ascii_case(name))
}

fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':'))
}

fn render_attrs(attrs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (name, value) in attrs.iter().filter(|(name, _)| is_valid_attr_name(name)) {
        out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
    }
    out
}

/// Escapes text for use inside a double- or single-quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
