//! Response scanning and XML text helpers.
//!
//! The service's response vocabulary is flat; elements are located by
//! scanning rather than through a full parser. Namespace prefixes on tags
//! are ignored when matching local names.

use sfmc_client::Record;

use crate::types::SoapFault;

/// XML entity escaping for values embedded in request bodies.
pub(crate) mod xml {
    /// Escape the five predefined XML entities.
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Reverse of [`escape`] for scalar element content.
    #[must_use]
    pub fn unescape(value: &str) -> String {
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }
}

/// Strip a namespace prefix from a tag name.
fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Extract the text content of the first element with the given local name.
///
/// Handles namespace-prefixed tags and tags with attributes. Returns the
/// raw inner text, which may itself contain markup for container elements.
pub(crate) fn extract_element(xml_text: &str, tag: &str) -> Option<String> {
    let mut search = xml_text;
    loop {
        let start = search.find('<')?;
        let after = &search[start + 1..];
        let tag_end = after.find('>')?;
        let tag_text = &after[..tag_end];

        if !tag_text.starts_with('/') && !tag_text.ends_with('/') {
            let name = tag_text.split_whitespace().next().unwrap_or("");
            if local_name(name) == tag {
                let content = &after[tag_end + 1..];
                let close = format!("</{}>", name);
                if let Some(end) = content.find(&close) {
                    return Some(content[..end].to_string());
                }
            }
        }
        search = &after[tag_end + 1..];
    }
}

/// Extract the inner content of every element with the given local name.
///
/// Matches open tags with or without attributes. Does not handle nested
/// elements of the same name, which the response vocabulary never produces.
pub(crate) fn extract_blocks(xml_text: &str, tag: &str) -> Vec<String> {
    let mut results = Vec::new();
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let mut search = xml_text;
    while let Some(start) = search.find(&open) {
        let after = &search[start + open.len()..];
        let boundary = after.chars().next();

        let content_offset = match boundary {
            Some('>') => 1,
            Some(c) if c.is_whitespace() => match after.find('>') {
                Some(idx) if !after[..idx].ends_with('/') => idx + 1,
                _ => {
                    search = after;
                    continue;
                }
            },
            _ => {
                search = after;
                continue;
            }
        };

        let content = &after[content_offset..];
        match content.find(&close) {
            Some(end) => {
                results.push(content[..end].to_string());
                search = &content[end + close.len()..];
            }
            None => break,
        }
    }
    results
}

/// Parse a SOAP fault from the response, if one is present.
pub(crate) fn parse_soap_fault(xml_text: &str) -> Option<SoapFault> {
    if !xml_text.contains("faultcode") {
        return None;
    }

    let fault_code = extract_element(xml_text, "faultcode")?;
    let fault_string = extract_element(xml_text, "faultstring")
        .unwrap_or_else(|| "Unknown error".to_string());

    Some(SoapFault {
        fault_code,
        fault_string,
    })
}

/// Parse the direct child elements of a block into a record.
///
/// Scalar children become strings, self-closing children (`xsi:nil`) become
/// null, and children with element content recurse into nested objects.
pub(crate) fn parse_record(block: &str) -> Record {
    let mut record = Record::new();
    let mut rest = block;
    while let Some((name, value, remaining)) = next_element(rest) {
        record.insert(name, value);
        rest = remaining;
    }
    record
}

fn next_element(xml_text: &str) -> Option<(String, serde_json::Value, &str)> {
    let start = xml_text.find('<')?;
    let after = &xml_text[start + 1..];

    // A closing tag here belongs to the enclosing element.
    if after.starts_with('/') {
        return None;
    }

    let tag_end = after.find('>')?;
    let tag_text = &after[..tag_end];
    let name = tag_text
        .trim_end_matches('/')
        .split_whitespace()
        .next()
        .unwrap_or("");

    if tag_text.ends_with('/') {
        return Some((
            local_name(name).to_string(),
            serde_json::Value::Null,
            &after[tag_end + 1..],
        ));
    }

    let content = &after[tag_end + 1..];
    let close = format!("</{}>", name);
    let end = content.find(&close)?;
    let inner = &content[..end];
    let rest = &content[end + close.len()..];

    let value = if inner.contains('<') {
        serde_json::Value::Object(parse_record(inner))
    } else {
        serde_json::Value::String(xml::unescape(inner.trim()))
    };

    Some((local_name(name).to_string(), value, rest))
}
