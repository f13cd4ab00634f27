//! HTML rendering for the switcher view.
//!
//! The dropdown is a native `<details>` element, so open/closed state lives in
//! the browser and is never tracked here. Each menu item is a small form that
//! posts the selection back to the host.

use crate::switcher::SwitcherView;
use url::form_urlencoded::byte_serialize;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 4);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// Form action that selects `code`, relative to `action_base`.
pub fn select_action(action_base: &str, code: &str) -> String {
    let encoded: String = byte_serialize(code.as_bytes()).collect();
    format!("{}/{}", action_base.trim_end_matches('/'), encoded)
}

/// Render the switcher, or nothing at all when it is hidden.
pub fn render_switcher(view: Option<&SwitcherView>, action_base: &str) -> String {
    let Some(view) = view else {
        return String::new();
    };

    let disabled = if view.disabled { " disabled" } else { "" };

    let items = view
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<li class="dropdown-item" role="none" data-key="{key}"><form method="post" action="{action}"><button type="submit" role="menuitem"{disabled}>{label}</button></form></li>"#,
                key = escape_html(&item.key),
                action = escape_html(&select_action(action_base, &item.key)),
                label = escape_html(&item.label),
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<div class="box flex items-center language-switcher"><details class="dropdown"><summary class="dropdown-trigger button button-text"><span class="icon icon-{icon}" aria-hidden="true"></span>{label}</summary><ul class="dropdown-menu" role="menu">{items}</ul></details></div>"#,
        icon = view.trigger.icon.name().to_lowercase(),
        label = escape_html(&view.trigger.label),
        items = items,
    )
}

/// Render the admin page that hosts the switcher.
pub fn render_admin_page(language: &str, title: &str, switcher_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<header class="topbar">{switcher}</header>
<main><h1>{title}</h1></main>
</body>
</html>
"#,
        lang = escape_html(language),
        title = escape_html(title),
        switcher = switcher_html,
    )
}

/// Render a minimal error page.
pub fn render_error_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<p>{message}</p>
</body>
</html>
"#,
        title = escape_html(title),
        message = escape_html(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switcher::{Icon, MenuItem, Trigger};

    fn view(disabled: bool) -> SwitcherView {
        SwitcherView {
            trigger: Trigger {
                icon: Icon::Globe,
                label: "English".to_string(),
            },
            items: vec![
                MenuItem {
                    key: "en".to_string(),
                    label: "English".to_string(),
                },
                MenuItem {
                    key: "pt-BR".to_string(),
                    label: "Português (Brasil)".to_string(),
                },
            ],
            disabled,
        }
    }

    // ==================== Escaping Tests ====================

    #[test]
    fn test_escape_html_special_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_keeps_unicode() {
        assert_eq!(escape_html("日本語 Español"), "日本語 Español");
    }

    // ==================== Action Tests ====================

    #[test]
    fn test_select_action() {
        assert_eq!(
            select_action("/admin/switch-language", "fr"),
            "/admin/switch-language/fr"
        );
        assert_eq!(
            select_action("/admin/switch-language/", "pt-BR"),
            "/admin/switch-language/pt-BR"
        );
    }

    #[test]
    fn test_select_action_encodes_code() {
        assert_eq!(
            select_action("/switch", "a/b?c"),
            "/switch/a%2Fb%3Fc"
        );
    }

    // ==================== Switcher Markup Tests ====================

    #[test]
    fn test_hidden_switcher_renders_nothing() {
        assert_eq!(render_switcher(None, "/admin/switch-language"), "");
    }

    #[test]
    fn test_switcher_markup_structure() {
        let html = render_switcher(Some(&view(false)), "/admin/switch-language");

        assert!(html.starts_with(r#"<div class="box flex items-center language-switcher">"#));
        assert!(html.contains(r#"<span class="icon icon-globe" aria-hidden="true"></span>English</summary>"#));
        assert_eq!(html.matches(r#"class="dropdown-item""#).count(), 2);
        assert!(html.contains(r#"data-key="pt-BR""#));
        assert!(html.contains(r#"action="/admin/switch-language/pt-BR""#));
        assert!(html.contains("Português (Brasil)"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_switcher_items_in_order() {
        let html = render_switcher(Some(&view(false)), "/s");
        let en = html.find(r#"data-key="en""#).expect("en item");
        let pt = html.find(r#"data-key="pt-BR""#).expect("pt item");
        assert!(en < pt);
    }

    #[test]
    fn test_disabled_switcher_disables_buttons() {
        let html = render_switcher(Some(&view(true)), "/s");
        assert_eq!(html.matches(" disabled>").count(), 2);
    }

    #[test]
    fn test_switcher_escapes_labels() {
        let mut v = view(false);
        v.trigger.label = "<script>".to_string();
        let html = render_switcher(Some(&v), "/s");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // ==================== Page Tests ====================

    #[test]
    fn test_admin_page_embeds_switcher() {
        let page = render_admin_page("de", "Admin", "<div>switcher</div>");
        assert!(page.contains(r#"<html lang="de">"#));
        assert!(page.contains(r#"<header class="topbar"><div>switcher</div></header>"#));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = render_error_page("Language switch failed", "API error (500): <oops>");
        assert!(page.contains("&lt;oops&gt;"));
        assert!(page.contains("<h1>Language switch failed</h1>"));
    }
}
