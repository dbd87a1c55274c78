use crate::dates::{format_time_label, parse_pub_date};
use crate::extract::extract_tag;
use crate::sanitize::{
    clean_text, clean_url, clean_with_limit, is_junk_headline, is_read_more_only,
    strip_html_tags, strip_media_tags,
};
use crate::types::{SourceKind, Story};
use tracing::{debug, warn};
use url::Url;

/// Minimum length for a cleaned headline to count as a real story.
const MIN_HEADLINE_LEN: usize = 15;

/// Why an item fragment did not yield a Story. Every variant counts as a
/// parse error for the owning source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseReject {
    NoTitle,
    HeadlineTooShort,
    JunkHeadline,
    BadLink,
}

/// Split a feed document into its raw `<item>...</item>` fragments.
/// A final item without a closing tag is dropped, not truncated.
pub fn split_items(document: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut rest = document;
    while let Some(start) = rest.find("<item>") {
        let after = &rest[start + "<item>".len()..];
        match after.find("</item>") {
            Some(end) => {
                items.push(&after[..end]);
                rest = &after[end + "</item>".len()..];
            }
            None => {
                warn!("item incomplete (no closing tag), dropping tail");
                break;
            }
        }
    }
    items
}

/// Assembles Story records out of item fragments.
pub struct ItemParser {
    timezone_hours: i32,
}

impl ItemParser {
    pub fn new(timezone_hours: i32) -> Self {
        Self { timezone_hours }
    }

    /// Build a candidate Story from one item fragment. The source kind
    /// selects the summary capture limit; Wordpress sources additionally
    /// carry a `content:encoded` body used when the description is a
    /// read-more stub.
    pub fn parse_item(
        &self,
        fragment: &str,
        source_index: usize,
        kind: SourceKind,
    ) -> Result<Story, ParseReject> {
        let raw_title = extract_tag(fragment, "<title>", "</title>").unwrap_or_default();
        let raw_link = extract_tag(fragment, "<link>", "</link>").unwrap_or_default();
        let raw_date = extract_tag(fragment, "<pubDate>", "</pubDate>").unwrap_or_default();

        let summary = self.capture_summary(fragment, kind);

        let mut headline = clean_text(raw_title);
        if headline.is_empty() && !summary.is_empty() {
            // Some aggregated feeds ship title-less items with a usable body.
            headline = clean_text(&summary);
        }
        if headline.is_empty() {
            debug!(source_index, "rejected: no title");
            return Err(ParseReject::NoTitle);
        }
        if headline.len() < MIN_HEADLINE_LEN {
            debug!(source_index, headline, "rejected: headline too short");
            return Err(ParseReject::HeadlineTooShort);
        }
        if is_junk_headline(&headline) {
            debug!(source_index, headline, "rejected: junk headline");
            return Err(ParseReject::JunkHeadline);
        }

        let link = clean_url(&raw_link.replace("<![CDATA[", "").replace("]]>", ""));
        let link_ok = Url::parse(&link)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !link_ok {
            debug!(source_index, link, "rejected: invalid link");
            return Err(ParseReject::BadLink);
        }

        // An unparseable date is "ordering key absent", never a reject.
        let published = parse_pub_date(raw_date);
        let time_label = published
            .map(|dt| format_time_label(dt, self.timezone_hours))
            .unwrap_or_default();

        Ok(Story {
            headline,
            link,
            published,
            time_label,
            summary,
            source_index,
        })
    }

    fn capture_summary(&self, fragment: &str, kind: SourceKind) -> String {
        let description = extract_tag(fragment, "<description>", "</description>")
            .map(|raw| self.clean_body(raw, kind))
            .unwrap_or_default();

        if kind != SourceKind::Wordpress {
            return description;
        }

        // Wordpress feeds bury the real body in content:encoded; prefer it
        // when the description is empty or a read-more stub.
        if description.is_empty() || is_read_more_only(&description) {
            let content = extract_tag(fragment, "<content:encoded>", "</content:encoded>")
                .map(|raw| self.clean_body(raw, kind))
                .unwrap_or_default();
            if !content.is_empty() {
                return content;
            }
        }
        description
    }

    fn clean_body(&self, raw: &str, kind: SourceKind) -> String {
        let no_media = strip_media_tags(raw);
        let no_tags = strip_html_tags(&no_media);
        clean_with_limit(&no_tags, kind.capture_limit())
    }
}
