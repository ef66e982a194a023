//! MiniJinja filter registration.

use minijinja::{Environment, Value};

const SAFE_SCHEMES: [&str; 3] = ["http:", "https:", "mailto:"];

/// Registers the card filters on a minijinja environment.
pub(crate) fn register_filters(env: &mut Environment<'static>) {
    // Attribute-escaped here so the path separators survive HTML auto-escaping.
    env.add_filter("safe_url", |value: String| -> Value {
        Value::from_safe_string(escape_attribute(&safe_url(&value)))
    });
}

/// Returns `url` when it is relative or uses an allowed scheme, otherwise an
/// empty string.
pub(crate) fn safe_url(url: &str) -> String {
    let trimmed = url.trim();
    let scheme_end = trimmed.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(pos) if trimmed[pos..].starts_with(':') => {
            let scheme = trimmed[..=pos].to_ascii_lowercase();
            if SAFE_SCHEMES.contains(&scheme.as_str()) {
                trimmed.to_string()
            } else {
                String::new()
            }
        }
        _ => trimmed.to_string(),
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_safe_url_allows_http_and_relative() {
        assert_eq!(safe_url("https://x.test/a.pdf"), "https://x.test/a.pdf");
        assert_eq!(safe_url("HTTP://x.test/a.pdf"), "HTTP://x.test/a.pdf");
        assert_eq!(safe_url("/uploads/a.pdf"), "/uploads/a.pdf");
        assert_eq!(safe_url("#"), "#");
        assert_eq!(safe_url("a.pdf?x=1:2"), "a.pdf?x=1:2");
    }

    #[test]
    fn test_safe_url_rejects_scripts() {
        assert_eq!(safe_url("javascript:alert(1)"), "");
        assert_eq!(safe_url(" JavaScript:alert(1)"), "");
        assert_eq!(safe_url("data:text/html,hi"), "");
    }

    #[test]
    fn test_filters_in_template() {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.add_template("t", "[{{ url | safe_url }}]").unwrap();
        let out = env
            .get_template("t")
            .unwrap()
            .render(context! { url => "javascript:x" })
            .unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_safe_url_escapes_attribute_text() {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.add_template("t.html", r#"<a href="{{ url | safe_url }}">"#)
            .unwrap();
        let out = env
            .get_template("t.html")
            .unwrap()
            .render(context! { url => "/a.pdf?x=1&y=\"2\"" })
            .unwrap();
        assert_eq!(out, r#"<a href="/a.pdf?x=1&amp;y=&quot;2&quot;">"#);
    }
}
