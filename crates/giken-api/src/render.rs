//! Server-rendered chat page.

use giken_core::config::ChatConfig;
use giken_core::{escape_html, ChatEntry};

use crate::room::PageView;

/// One transcript line: `[time] <b>name</b>： message (goobi)`.
pub fn render_entry(entry: &ChatEntry) -> String {
    format!(
        "<div>[{}] <b>{}</b>： {}</div>",
        escape_html(&entry.time),
        escape_html(&entry.name),
        escape_html(&entry.display_message())
    )
}

/// Full HTML document for the chat room.
pub fn render_page(chat: &ChatConfig, view: &PageView) -> String {
    let log_html = view
        .transcript
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n");

    let goobi_options = chat
        .goobi
        .iter()
        .map(|g| {
            let g = escape_html(g);
            format!("<option value=\"{g}\">{g}</option>")
        })
        .collect::<String>();

    format!(
        "<!DOCTYPE html>
<html>
<head>
  <meta charset=\"UTF-8\">
  <title>{title}</title>
</head>
<body style=\"background-color:{bg}; color:#000; margin:20px;\">
  <h2>{title}</h2>
  <hr>
  <p>最大お名前バイト数は {max_name} です</p>
  <p>最大お言葉バイト数は {max_msg} です</p>
  <form method=\"post\" action=\"/\">
    おなまえ:
    <input type=\"text\" name=\"name\" size=\"10\" value=\"{name}\"> {max_name} Byte まで<br>
    お言葉  :
    <input type=\"text\" name=\"msg\" size=\"60\" value=\"\"><br>
    語尾    :
    <select name=\"goobi\">{goobi_options}</select>
    <input type=\"submit\" value=\"杏奈等と話す\">
  </form>
  <hr>
{log_html}
  <hr>
  <div>Powered by giken {version}</div>
</body>
</html>",
        title = escape_html(&chat.title),
        bg = escape_html(&view.bg_color),
        max_name = chat.max_name_bytes,
        max_msg = chat.max_msg_bytes,
        name = escape_html(&view.name_value),
        goobi_options = goobi_options,
        log_html = log_html,
        version = env!("CARGO_PKG_VERSION"),
    )
}
