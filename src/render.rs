//! Pure HTML rendering of the translation form.

use crate::catalog::{Language, LanguageCatalog};
use crate::form::FormState;

pub const TITLE: &str = "Translatr";

/// Render the whole page for `state`.
///
/// Same state, same markup. The output area is `disabled` and the form posts
/// back to `/`.
pub fn render(state: &FormState) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<main>
<header>
<h1>{title}</h1>
</header>
<form method="post" action="/">
<div class="row">
<div class="form-field">
<label for="language-from">From</label>
<select id="language-from" name="language_from">
{options_from}</select>
<label for="text-from">Text to translate</label>
<textarea id="text-from" name="text_from">{text_from}</textarea>
</div>
<div class="form-field">
<label for="language-to">To</label>
<select id="language-to" name="language_to">
{options_to}</select>
<label for="text-to">Translated text</label>
<textarea id="text-to" disabled>{text_to}</textarea>
</div>
</div>
<button type="submit">Translate</button>
</form>
</main>
</body>
</html>
"#,
        title = TITLE,
        options_from = render_options(state.source_language()),
        options_to = render_options(state.target_language()),
        text_from = escape_html(state.input_text()),
        text_to = escape_html(state.output_text()),
    )
}

/// One `<option>` per catalog entry, in catalog order.
fn render_options(selected: Language) -> String {
    LanguageCatalog::get()
        .list()
        .iter()
        .map(|lang| {
            let marker = if lang.code == selected.code() {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{}\"{}>{}</option>\n",
                escape_html(lang.code),
                marker,
                escape_html(lang.name)
            )
        })
        .collect()
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
