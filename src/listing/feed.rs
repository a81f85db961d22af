//! Feed document parsing
//!
//! Targeted scanner for the catalog's syndication feed: a `<channel>` of
//! `<item>` elements, each carrying a unique-resource field (`<guid>`, with
//! `<link>` as fallback) and a `<description>` whose HTML fragment embeds
//! the thumbnail as its first `<img src>`. Descriptions arrive either as
//! CDATA or entity-escaped markup.
//!
//! This is deliberately not a general XML parser; it extracts exactly the
//! two fields the listing needs and fails loudly when one is missing.

use super::ListingError;

/// One feed item, still in wire form
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    /// The item's unique-resource URL (guid or link text)
    pub resource_url: String,
    /// First image source found in the description HTML
    pub image_url: String,
}

/// Parse a feed document into its items, in document order
///
/// The document must contain a `<channel>`; a channel with no items is a
/// valid empty listing. A missing guid/link, missing description, or a
/// description without an image is a fatal error naming the item.
pub fn parse_feed(document: &str) -> Result<Vec<FeedItem>, ListingError> {
    if find_open(document, "channel").is_none() {
        return Err(ListingError::Parse(
            "document has no <channel> element".to_string(),
        ));
    }

    let mut items = Vec::new();
    let mut rest = document;
    while let Some(block) = next_element(&mut rest, "item") {
        let ordinal = items.len() + 1;

        let resource = element_text(block, "guid")
            .or_else(|| element_text(block, "link"))
            .ok_or_else(|| {
                ListingError::Parse(format!("item {}: missing <guid> and <link>", ordinal))
            })?;
        if resource.is_empty() {
            return Err(ListingError::Parse(format!(
                "item {}: empty unique-resource field",
                ordinal
            )));
        }

        let description = element_text(block, "description").ok_or_else(|| {
            ListingError::Parse(format!("item {}: missing <description>", ordinal))
        })?;
        let html = description_html(description);
        let image_url = first_image_src(&html).ok_or_else(|| {
            ListingError::Parse(format!("item {}: description has no <img src>", ordinal))
        })?;

        items.push(FeedItem {
            resource_url: resource.to_string(),
            image_url,
        });
    }

    Ok(items)
}

/// Derive an asset id from a unique-resource URL: its last path segment
pub fn id_from_resource(resource_url: &str) -> Option<String> {
    let path = resource_url
        .split(['?', '#'])
        .next()
        .unwrap_or(resource_url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

/// Find the opening tag of `tag` in `hay`
///
/// Returns (index of `<`, index just past the opening tag's `>`), skipping
/// longer tag names that merely share the prefix and self-closing forms.
fn find_open(hay: &str, tag: &str) -> Option<(usize, usize)> {
    let pattern = format!("<{}", tag);
    let mut from = 0;
    while let Some(found) = hay[from..].find(&pattern) {
        let at = from + found;
        let after = &hay[at + pattern.len()..];
        match after.chars().next() {
            Some('>') => return Some((at, at + pattern.len() + 1)),
            Some(c) if c.is_whitespace() => {
                // Opening tag with attributes
                let gt = after.find('>')?;
                if after[..gt].trim_end().ends_with('/') {
                    // Self-closing: no text content, keep scanning
                    from = at + pattern.len() + gt + 1;
                    continue;
                }
                return Some((at, at + pattern.len() + gt + 1));
            }
            _ => from = at + pattern.len(),
        }
    }
    None
}

/// Take the next `<tag>...</tag>` element out of `rest`
///
/// Returns the element's content and advances `rest` past its closing tag.
fn next_element<'a>(rest: &mut &'a str, tag: &str) -> Option<&'a str> {
    let (_, content_start) = find_open(rest, tag)?;
    let close = format!("</{}>", tag);
    let content = &rest[content_start..];
    let end = content.find(&close)?;
    *rest = &content[end + close.len()..];
    Some(&content[..end])
}

/// Text content of the first `<tag>...</tag>` inside `block`, trimmed
fn element_text<'a>(block: &'a str, tag: &str) -> Option<&'a str> {
    let (_, content_start) = find_open(block, tag)?;
    let close = format!("</{}>", tag);
    let content = &block[content_start..];
    let end = content.find(&close)?;
    Some(content[..end].trim())
}

/// Recover the HTML fragment from a description's wire form
///
/// CDATA content is already raw HTML; anything else is entity-escaped.
fn description_html(description: &str) -> String {
    let trimmed = description.trim();
    match trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
    {
        Some(inner) => inner.to_string(),
        None => unescape_entities(trimmed),
    }
}

/// Undo the XML entity escaping used for inline markup
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// First image-source attribute in an HTML fragment
fn first_image_src(html: &str) -> Option<String> {
    let img = html.find("<img")?;
    let tag = &html[img..];
    let tag = tag.find('>').map(|end| &tag[..end]).unwrap_or(tag);

    let src = tag.find("src=")?;
    let value = &tag[src + "src=".len()..];
    match value.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &value[1..];
            let end = inner.find(quote)?;
            Some(inner[..end].to_string())
        }
        _ => {
            // Unquoted attribute value
            let end = value
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(value.len());
            Some(value[..end].to_string())
        }
    }
}
