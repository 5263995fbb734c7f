//! Markdown anchor slugs for table-of-contents links.
//!
//! The result must equal the anchor the markdown host derives from the
//! heading text, otherwise TOC links do not resolve.

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

const DROPPED: &[&str] = &[
    "\"", "'", "`", ".", "/", "!", ",", "~", "&", "%", "^", "*", "#", "@", "|", "(", ")", "{",
    "}", "[", "]", "<", ">", "++", "==", "+", "=",
];

fn id_double_dash() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z]-[0-9][0-9]--").expect("static regex"))
}

fn id_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z]-[0-9][0-9]").expect("static regex"))
}

/// Normalize `text` into an anchor slug.
///
/// Lower-cases, strips punctuation, turns spaces into hyphens, then folds
/// `x-NN--` (the id's own hyphen followed by the separator) into the first
/// id tag plus a single hyphen.
pub fn slugify(text: &str) -> String {
    let mut s = text.to_lowercase();
    for c in DROPPED {
        s = s.replace(*c, "");
    }
    s = s.replace(' ', "-");

    let tag = id_tag()
        .find(&s)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    id_double_dash()
        .replace_all(&s, NoExpand(&format!("{tag}-")))
        .into_owned()
}

/// Link target for an issue heading `### [ID] Title`.
pub fn issue_link(id: &str, title: &str) -> String {
    format!("#{}", slugify(&format!("#{id} -{title}")))
}
