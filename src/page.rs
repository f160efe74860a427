use html_escape::{encode_double_quoted_attribute, encode_text};
use uuid::Uuid;

use crate::session::{Notice, SessionState};
use crate::translate::Language;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; min-height: 100vh; }
aside { background: #008080; color: white; padding: 20px; width: 280px; text-align: center; }
aside .greetings { font-size: 22px; font-weight: bold; margin-bottom: 10px; }
aside .tagline { font-size: 18px; font-style: italic; color: #d9d9d9; margin-bottom: 20px; }
aside label { display: block; font-weight: bold; margin-top: 16px; }
main { flex: 1; padding: 20px 40px; }
h1 { color: #008080; }
textarea { width: 100%; height: 150px; border: 2px solid #008080; border-radius: 10px; padding: 12px; font-size: 18px; }
button { border: none; border-radius: 10px; padding: 12px 20px; font-size: 18px; font-weight: bold; cursor: pointer; }
button.clear { background: red; color: white; margin-top: 24px; }
button.clear:hover { background: darkred; }
.notice { padding: 12px; border-radius: 10px; margin: 12px 0; }
.notice.warning { background: #fff3cd; }
.notice.error { background: #f8d7da; }
.response-box { background: #f1f1f1; padding: 20px; border-radius: 10px; margin-top: 20px; font-size: 18px; white-space: pre-wrap; }
#progress { display: none; margin-left: 12px; }
"#;

const SCRIPT: &str = r#"
document.getElementById('translate-form').addEventListener('submit', function () {
  document.getElementById('translate-button').disabled = true;
  document.getElementById('progress').style.display = 'inline';
});
"#;

fn language_options(selected: Language) -> String {
    Language::ALL
        .iter()
        .map(|lang| {
            let marker = if *lang == selected { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>", lang.name(), marker)
        })
        .collect::<Vec<_>>()
        .join("")
}

fn render_notice(notice: &Notice) -> String {
    let class = match notice {
        Notice::Warning(_) => "warning",
        Notice::Error(_) => "error",
    };
    format!(
        "<div class=\"notice {}\" role=\"alert\">{}</div>",
        class,
        encode_text(notice.message())
    )
}

/// Full page for one session. Every piece of user or model text is escaped.
pub fn render_page(session_id: Uuid, state: &SessionState) -> String {
    let base = format!("/sessions/{}", session_id);
    let notice = state.notice.as_ref().map(render_notice).unwrap_or_default();
    let result = state
        .translated_text
        .as_ref()
        .map(|text| {
            format!(
                "<div class=\"response-box\"><b>Translated Text:</b><br>{}</div>",
                encode_text(text)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Language Translation</title>
<style>{style}</style>
</head>
<body>
<aside>
  <div class="greetings">你好 • नमस्ते • こんにちは • Bonjour • Hola</div>
  <div class="tagline">Break language barriers, one translation at a time!</div>
  <label for="input_language">Select input language</label>
  <select id="input_language" name="input_language" form="translate-form">{input_options}</select>
  <label for="output_language">Select output language</label>
  <select id="output_language" name="output_language" form="translate-form">{output_options}</select>
  <form method="post" action="{clear_action}">
    <button class="clear" type="submit">Clear Chat History</button>
  </form>
</aside>
<main>
  <h1>🌍 Language Translation Assistant</h1>
  <h3>Enter the text to be translated:</h3>
  <form id="translate-form" method="post" action="{translate_action}">
    <textarea name="text" placeholder="Type your text here">{user_input}</textarea>
    <p><button id="translate-button" type="submit">Translate</button><span id="progress">Translating...</span></p>
  </form>
  {notice}
  {result}
</main>
<script>{script}</script>
</body>
</html>
"#,
        style = STYLE,
        input_options = language_options(state.input_language),
        output_options = language_options(state.output_language),
        clear_action = encode_double_quoted_attribute(&format!("{}/clear", base)),
        translate_action = encode_double_quoted_attribute(&format!("{}/translate", base)),
        user_input = encode_text(&state.user_input),
        notice = notice,
        result = result,
        script = SCRIPT,
    )
}
