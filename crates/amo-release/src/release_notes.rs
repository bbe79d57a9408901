//! Markdown release notes → HTML accepted by the add-on listing
//!
//! The listing does not allow `<hN>` elements, so headings are rendered as
//! bold text on their own line.

use pulldown_cmark::{html, CowStr, Event, Parser, Tag, TagEnd};

pub fn render_release_notes(markdown: &str) -> String {
    let events = Parser::new(markdown).map(|event| match event {
        Event::Start(Tag::Heading { .. }) => Event::Html(CowStr::Borrowed("\n<b>")),
        Event::End(TagEnd::Heading(_)) => Event::Html(CowStr::Borrowed("</b>\n")),
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events);
    output.trim().to_string()
}
