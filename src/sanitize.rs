use crate::types::MAX_HEADLINE_LEN;

/// Headline prefixes that carry no content ("LIVE: ", "BREAKING: ", ...).
const SCRUB_PREFIXES: [&str; 7] = [
    "LIVE: ",
    "WATCH: ",
    "VIDEO: ",
    "UPDATE: ",
    "BREAKING: ",
    "OPINION: ",
    "REVIEW: ",
];

/// Substrings that mark an item as not-news regardless of position.
const JUNK_SUBSTRINGS: [&str; 9] = [
    "TODAYS HEADLINES",
    "MORNING BRIEFING",
    "EVENING BRIEFING",
    "DAILY DIGEST",
    "SUBSCRIBE TO",
    "SIGN UP",
    "JAVASCRIPT",
    "ACCESS DENIED",
    "404 NOT FOUND",
];

/// Clickbait/fluff headline prefixes.
const JUNK_PREFIXES: [&str; 8] = [
    "HOW TO ",
    "BEST OF ",
    "DEALS: ",
    "HOROSCOPE",
    "WORDLE ",
    "CROSSWORD ",
    "10 THINGS ",
    "5 THINGS ",
];

/// Full cleanup pass for headlines, cropped at MAX_HEADLINE_LEN.
pub fn clean_text(raw: &str) -> String {
    clean_with_limit(raw, MAX_HEADLINE_LEN)
}

/// Full cleanup pass: entity decoding, inline-markup removal,
/// prefix/suffix scrubbing, ASCII purification, whitespace collapsing,
/// and a word-boundary crop at `max_len`.
pub fn clean_with_limit(raw: &str, max_len: usize) -> String {
    let mut text = raw.to_string();

    // CDATA wrappers and common entities
    for (from, to) in [
        ("<![CDATA[", ""),
        ("]]>", ""),
        ("&apos;", "'"),
        ("&#39;", "'"),
        ("&quot;", "\""),
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&nbsp;", " "),
        ("\u{2026}", "..."),
    ] {
        text = text.replace(from, to);
    }

    // Numeric entities and typographic quotes/dashes
    for (from, to) in [
        ("&#8217;", "'"),
        ("&#8216;", "'"),
        ("&#8220;", "\""),
        ("&#8221;", "\""),
        ("&#8211;", "-"),
        ("&#8212;", "-"),
        ("&#8230;", "..."),
        ("\u{2019}", "'"),
        ("\u{2018}", "'"),
        ("\u{201C}", "\""),
        ("\u{201D}", "\""),
        ("\u{2013}", "-"),
        ("\u{2014}", "-"),
    ] {
        text = text.replace(from, to);
    }

    // Inline emphasis tags
    for tag in ["<b>", "</b>", "<i>", "</i>", "<strong>", "</strong>"] {
        text = text.replace(tag, "");
    }

    // Prefix scrubbing
    let upper = text.to_uppercase();
    for prefix in SCRUB_PREFIXES {
        if upper.starts_with(prefix) {
            text = text[prefix.len()..].to_string();
            break;
        }
    }

    // Suffix scrubbing: trailing " - SourceName" / " | SourceName"
    for sep in [" - ", " | "] {
        if let Some(pos) = text.rfind(sep) {
            if pos > 10 {
                text.truncate(pos);
            }
        }
    }

    // Printable-ASCII purification
    let purified: String = text
        .chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { ' ' })
        .collect();

    // Whitespace collapsing
    let collapsed = purified.split_whitespace().collect::<Vec<_>>().join(" ");

    crop_at_word_boundary(&collapsed, max_len)
}

/// Crop to `max_len` on the last word boundary, appending "...".
fn crop_at_word_boundary(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let hard_cut = max_len.saturating_sub(3);
    match text[..=hard_cut].rfind(' ') {
        Some(cut) if cut > 0 => format!("{}...", &text[..cut]),
        _ => format!("{}...", &text[..hard_cut]),
    }
}

/// Drop <img .../> tags and whole <figure>...</figure> blocks before
/// generic tag stripping, so captions and tracking pixels never leak
/// into summaries.
pub fn strip_media_tags(raw: &str) -> String {
    let mut text = raw.to_string();

    while let Some(start) = text.find("<img") {
        match text[start..].find('>') {
            Some(rel) => text.replace_range(start..start + rel + 1, ""),
            None => break,
        }
    }

    while let Some(start) = text.find("<figure") {
        if let Some(rel_end) = text[start..].find("</figure>") {
            let end_tag = start + rel_end;
            let close = match text[end_tag..].find('>') {
                Some(rel) => end_tag + rel + 1,
                None => end_tag + "</figure>".len(),
            };
            text.replace_range(start..close, "");
        } else {
            match text[start..].find('>') {
                Some(rel) => text.replace_range(start..start + rel + 1, ""),
                None => break,
            }
        }
    }

    text
}

/// Remove every <...> span, keeping the text between tags.
pub fn strip_html_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// True for summaries that are only a "Read more" stub.
pub fn is_read_more_only(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    let upper = trimmed.to_uppercase();
    trimmed.len() < 80 && (upper.contains("READ MORE") || upper.contains("CONTINUE READING"))
}

/// Strip whitespace and re-encode the one entity feeds commonly leave
/// in link elements.
pub fn clean_url(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace("&amp;", "&")
}

/// Quality filter: short, boilerplate, or clickbait headlines are junk.
pub fn is_junk_headline(headline: &str) -> bool {
    if headline.len() < 20 {
        return true;
    }
    let upper = headline.to_uppercase();
    if JUNK_SUBSTRINGS.iter().any(|s| upper.contains(s)) {
        return true;
    }
    JUNK_PREFIXES.iter().any(|p| upper.starts_with(p))
}
