//! RSS 2.0 document generation.
//!
//! Serializes a batch of [`FeedItem`]s under one channel block. Items are
//! written in input order and every item element is present even when its
//! value is empty, so consumers always see the same shape.

use std::io;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{AppError, Result};
use crate::models::{FeedItem, FeedMetadata};
use crate::utils::time;

/// Generator bound to one source's channel metadata.
pub struct RssGenerator {
    metadata: FeedMetadata,
}

impl RssGenerator {
    pub fn new(metadata: FeedMetadata) -> Self {
        Self { metadata }
    }

    /// Serialize the items into an indented RSS 2.0 document.
    ///
    /// `lastBuildDate` is stamped with the current UTC time; item fields are
    /// copied verbatim from the records.
    pub fn generate(&self, items: &[FeedItem]) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut rss_start = BytesStart::new("rss");
        rss_start.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss_start))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;
        write_text_element(&mut writer, "title", &self.metadata.title)?;
        write_text_element(&mut writer, "description", &self.metadata.description)?;
        write_text_element(&mut writer, "link", &self.metadata.link)?;
        write_text_element(&mut writer, "lastBuildDate", &time::feed_date_now())?;

        for item in items {
            writer.write_event(Event::Start(BytesStart::new("item")))?;
            write_text_element(&mut writer, "title", &item.title)?;
            write_text_element(&mut writer, "link", &item.link)?;
            write_text_element(&mut writer, "description", &item.description)?;
            write_text_element(&mut writer, "pubDate", &item.pub_date)?;
            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        String::from_utf8(writer.into_inner()).map_err(AppError::feed)
    }
}

/// Write `<tag>text</tag>`, escaping the text body.
fn write_text_element<W: io::Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use quick_xml::Reader;

    use super::*;

    fn sample_metadata() -> FeedMetadata {
        FeedMetadata::new(
            "GitHub Trending",
            "Daily trending repositories on GitHub",
            "https://github.com/trending",
        )
    }

    fn sample_items() -> Vec<FeedItem> {
        vec![
            FeedItem {
                title: "rust-lang/rust".to_string(),
                link: "https://github.com/rust-lang/rust".to_string(),
                description: "Empowering everyone".to_string(),
                pub_date: "Mon, 06 May 2024 12:30:00 GMT".to_string(),
            },
            FeedItem {
                title: "tokio-rs/tokio".to_string(),
                link: "https://github.com/tokio-rs/tokio".to_string(),
                description: String::new(),
                pub_date: "Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
            },
        ]
    }

    /// Pull back item elements as (title, link, description, pub_date).
    fn read_items(xml: &str) -> Vec<(String, String, String, String)> {
        let mut reader = Reader::from_str(xml);
        let mut items = Vec::new();
        let mut current: Option<[String; 4]> = None;
        let mut field: Option<usize> = None;

        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => match e.name().as_ref() {
                    b"item" => current = Some(Default::default()),
                    b"title" if current.is_some() => field = Some(0),
                    b"link" if current.is_some() => field = Some(1),
                    b"description" if current.is_some() => field = Some(2),
                    b"pubDate" if current.is_some() => field = Some(3),
                    _ => {}
                },
                Event::Text(text) => {
                    if let (Some(entry), Some(index)) = (current.as_mut(), field) {
                        entry[index].push_str(&text.xml_content().unwrap());
                    }
                }
                Event::GeneralRef(r) => {
                    if let (Some(entry), Some(index)) = (current.as_mut(), field) {
                        if let Some(ch) = r.resolve_char_ref().unwrap() {
                            entry[index].push(ch);
                        } else {
                            let name = r.decode().unwrap();
                            entry[index]
                                .push_str(quick_xml::escape::resolve_predefined_entity(&name).unwrap_or(""));
                        }
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"item" => {
                        let [title, link, description, pub_date] = current.take().unwrap();
                        items.push((title, link, description, pub_date));
                    }
                    _ => field = None,
                },
                Event::Eof => break,
                _ => {}
            }
        }
        items
    }

    fn read_channel_field(xml: &str, wanted: &str) -> Option<String> {
        let mut reader = Reader::from_str(xml);
        let mut in_item = false;
        let mut capture = false;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    if e.name().as_ref() == b"item" {
                        in_item = true;
                    } else if !in_item && e.name().as_ref() == wanted.as_bytes() {
                        capture = true;
                    }
                }
                Event::Text(text) if capture => {
                    return Some(text.xml_content().unwrap().into_owned());
                }
                Event::End(e) => {
                    if e.name().as_ref() == b"item" {
                        in_item = false;
                    }
                    capture = false;
                }
                Event::Eof => return None,
                _ => {}
            }
        }
    }

    #[test]
    fn test_round_trip_preserves_items_in_order() {
        let generator = RssGenerator::new(sample_metadata());
        let xml = generator.generate(&sample_items()).unwrap();

        let items = read_items(&xml);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].0, "rust-lang/rust");
        assert_eq!(items[0].1, "https://github.com/rust-lang/rust");
        assert_eq!(items[0].2, "Empowering everyone");
        assert_eq!(items[0].3, "Mon, 06 May 2024 12:30:00 GMT");
        assert_eq!(items[1].0, "tokio-rs/tokio");
        assert_eq!(items[1].2, "");
    }

    #[test]
    fn test_channel_block() {
        let generator = RssGenerator::new(sample_metadata());
        let xml = generator.generate(&[]).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert_eq!(
            read_channel_field(&xml, "title").as_deref(),
            Some("GitHub Trending")
        );
        assert_eq!(
            read_channel_field(&xml, "link").as_deref(),
            Some("https://github.com/trending")
        );

        let built = read_channel_field(&xml, "lastBuildDate").unwrap();
        assert!(NaiveDateTime::parse_from_str(&built, time::FEED_DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_empty_item_sequence_is_valid() {
        let generator = RssGenerator::new(sample_metadata());
        let xml = generator.generate(&[]).unwrap();
        assert!(read_items(&xml).is_empty());
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let generator = RssGenerator::new(sample_metadata());
        let items = vec![FeedItem {
            title: "a < b & c".to_string(),
            link: "https://example.com/?a=1&b=2".to_string(),
            description: String::new(),
            pub_date: "Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
        }];
        let xml = generator.generate(&items).unwrap();
        assert!(xml.contains("a &lt; b &amp; c"));

        let parsed = read_items(&xml);
        assert_eq!(parsed[0].0, "a < b & c");
        assert_eq!(parsed[0].1, "https://example.com/?a=1&b=2");
    }
}
