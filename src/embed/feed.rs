//! Minimal RSS 2.0 reader.
//!
//! Extracts the first `<channel>`'s title and description and, for every
//! `<item>` in it, the item title and the `url` attribute of its first
//! `<enclosure>`. Namespaced elements (`itunes:title`, `media:content`, ...)
//! are ignored, and the root element's name is not checked.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Errors raised while reading a feed document.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML: unclosed element <{0}>")]
    Unclosed(String),

    #[error("document has no <channel> element")]
    MissingChannel,
}

/// One `<item>` of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedItem {
    /// Text of the item's `<title>`, as written.
    pub title: String,
    /// `url` attribute of the item's `<enclosure>`, empty when absent.
    pub enclosure_url: String,
}

/// The parts of an RSS channel the podcast resolver uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feed {
    pub title: String,
    pub description: String,
    /// Items in document order.
    pub items: Vec<FeedItem>,
}

/// Where the reader currently is, relative to the first channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    ChannelTitle,
    ChannelDescription,
    Item,
    ItemTitle,
    Other,
}

fn slot(path: &[Vec<u8>]) -> Slot {
    // path[0] is the document root, whatever its name
    match path.get(1..).unwrap_or_default() {
        [channel, title] if channel == b"channel" && title == b"title" => Slot::ChannelTitle,
        [channel, desc] if channel == b"channel" && desc == b"description" => {
            Slot::ChannelDescription
        }
        [channel, item] if channel == b"channel" && item == b"item" => Slot::Item,
        [channel, item, title] if channel == b"channel" && item == b"item" && title == b"title" => {
            Slot::ItemTitle
        }
        _ => Slot::Other,
    }
}

/// Record the `url` of the first `<enclosure>` seen in the current item.
fn take_enclosure(
    tag: &BytesStart<'_>,
    item: Option<&mut FeedItem>,
    seen: &mut bool,
) -> Result<(), FeedError> {
    let Some(item) = item else {
        return Ok(());
    };
    if *seen {
        return Ok(());
    }
    *seen = true;

    if let Some(attr) = tag
        .try_get_attribute("url")
        .map_err(quick_xml::Error::from)?
    {
        item.enclosure_url = attr.unescape_value()?.into_owned();
    }
    Ok(())
}

/// Parse an RSS document.
pub fn parse_feed(xml: &[u8]) -> Result<Feed, FeedError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut feed = Feed::default();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<FeedItem> = None;
    let mut enclosure_seen = false;
    // Only the first <title> of the channel and of each item counts
    let mut closed = TitlesClosed::default();
    let mut channel_seen = false;
    let mut channel_done = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = e.name().as_ref().to_vec();
                if path.len() == 1 && name == b"channel" {
                    channel_seen = true;
                }
                if !channel_done && slot(&path) == Slot::Item && name == b"enclosure" {
                    take_enclosure(e, current.as_mut(), &mut enclosure_seen)?;
                }

                path.push(name);
                if !channel_done && slot(&path) == Slot::Item {
                    current = Some(FeedItem::default());
                    enclosure_seen = false;
                    closed.item_title = false;
                }
            }
            Event::Empty(ref e) => {
                path.push(e.name().as_ref().to_vec());
                match slot(&path) {
                    Slot::ChannelTitle => closed.channel_title = true,
                    Slot::ItemTitle => closed.item_title = true,
                    _ => {}
                }
                path.pop();

                if path.len() == 1 && e.name().as_ref() == b"channel" {
                    channel_seen = true;
                    channel_done = true;
                }
                if !channel_done
                    && slot(&path) == Slot::Item
                    && e.name().as_ref() == b"enclosure"
                {
                    take_enclosure(e, current.as_mut(), &mut enclosure_seen)?;
                }
            }
            Event::Text(ref e) => {
                if !channel_done && closed.accepts(slot(&path)) {
                    let text = e.unescape()?;
                    append_text(&mut feed, current.as_mut(), slot(&path), &text);
                }
            }
            Event::CData(e) => {
                if !channel_done && closed.accepts(slot(&path)) {
                    let raw = e.into_inner();
                    let text = String::from_utf8_lossy(&raw);
                    append_text(&mut feed, current.as_mut(), slot(&path), &text);
                }
            }
            Event::End(_) => {
                match slot(&path) {
                    Slot::Item if !channel_done => {
                        if let Some(item) = current.take() {
                            feed.items.push(item);
                        }
                    }
                    Slot::ChannelTitle => closed.channel_title = true,
                    Slot::ItemTitle => closed.item_title = true,
                    _ => {}
                }
                if path.len() == 2 && path[1] == b"channel" {
                    channel_done = true;
                }
                path.pop();
            }
            Event::Eof => {
                if let Some(open) = path.last() {
                    return Err(FeedError::Unclosed(
                        String::from_utf8_lossy(open).into_owned(),
                    ));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    if !channel_seen {
        return Err(FeedError::MissingChannel);
    }

    Ok(feed)
}

#[derive(Debug, Default)]
struct TitlesClosed {
    channel_title: bool,
    item_title: bool,
}

impl TitlesClosed {
    fn accepts(&self, slot: Slot) -> bool {
        match slot {
            Slot::ChannelTitle => !self.channel_title,
            Slot::ItemTitle => !self.item_title,
            _ => true,
        }
    }
}

fn append_text(feed: &mut Feed, item: Option<&mut FeedItem>, slot: Slot, text: &str) {
    match slot {
        Slot::ChannelTitle => feed.title.push_str(text),
        Slot::ChannelDescription => feed.description.push_str(text),
        Slot::ItemTitle => {
            if let Some(item) = item {
                item.title.push_str(text);
            }
        }
        Slot::Item | Slot::Other => {}
    }
}
