//! Plain-text rendering of the small HTML fragments providers embed in
//! their payloads (e.g. Directions step instructions).

/// Tags that start a new line of text when rendered.
const BLOCK_TAGS: &[&str] = &["div", "br", "p", "li", "ul", "ol", "tr", "table"];

/// Strip tags and decode entities, collapsing whitespace.
///
/// Inline tags (`<b>`, `<span>`, `<wbr/>`) are removed without a gap;
/// block tags are replaced by a single space.
pub fn html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' if !in_tag => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                if is_block_tag(&tag) {
                    text.push(' ');
                }
            }
            _ if in_tag => tag.push(c),
            _ => text.push(c),
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    html_decode(&collapsed)
}

fn is_block_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
