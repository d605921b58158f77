use std::{
    collections::HashMap,
    error::Error,
    fmt::Display,
    io::{self, BufRead, Cursor},
    mem::swap,
};

use lazy_static::lazy_static;
use regex::Regex;
use smol_str::SmolStr;

use crate::format::{Channel, ChannelList, directives};

pub struct Parser(Box<dyn ParserImplTrait>);

impl Parser {
    pub fn new<T: BufRead + 'static>(reader: T) -> Self {
        Self(Box::new(ParserImpl::new(reader)))
    }

    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.0.parse()
    }

    pub fn get_result(&mut self) -> ChannelList {
        self.0.get_result()
    }
}

/// Parse an in-memory document.
///
/// Malformed entries are skipped rather than reported; a document without a
/// single well-formed entry yields an empty list. Read errors cannot occur
/// on an in-memory cursor, so this never fails.
pub fn parse_channels(text: impl AsRef<str>) -> ChannelList {
    let mut parser = ParserImpl::new(Cursor::new(text.as_ref().as_bytes()));
    let _ = parser.parse();
    parser.get_result()
}

#[derive(Debug)]
pub enum ParseError {
    IoError(io::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::IoError(e) => e.fmt(f),
        }
    }
}
impl Error for ParseError {}
impl From<io::Error> for ParseError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}

trait ParserImplTrait {
    fn parse(&mut self) -> Result<(), ParseError>;
    fn get_result(&mut self) -> ChannelList;
}

lazy_static! {
    static ref ATTRIBUTE_REGEX: Regex =
        Regex::new("([^ ]*?)=\"(.*?)\"").expect("Regular expression error");
}

fn parse_attributes(input: impl AsRef<str>) -> HashMap<SmolStr, SmolStr> {
    let mut result = HashMap::new();
    for (_, [key, value]) in ATTRIBUTE_REGEX
        .captures_iter(input.as_ref())
        .map(|x| x.extract())
    {
        result.insert(key.into(), value.into());
    }

    result
}

/// A channel announced by an `#EXTINF:` line whose location has not been
/// seen yet.
struct PendingChannel {
    title: SmolStr,
    attributes: HashMap<SmolStr, SmolStr>,
}

struct ParserImpl<T: BufRead> {
    reader: T,
    buffer: String,
    list: ChannelList,
    pending: Option<PendingChannel>,
    at_start: bool,
}

impl<T: BufRead> ParserImpl<T> {
    pub fn new(reader: T) -> Self {
        Self {
            reader,
            buffer: String::new(),
            list: ChannelList::default(),
            pending: None,
            at_start: true,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, io::Error> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(e) => return Err(e),
            }

            if self.buffer.trim().len() != 0 {
                return Ok(Some(self.buffer.trim().to_owned()));
            }
        }
    }

    fn parse_header(&mut self, line: &str) {
        let attributes = line
            .chars()
            .skip(directives::EXTM3U_LEN)
            .skip_while(|x| x.is_whitespace())
            .collect::<String>();

        self.list.attributes.extend(parse_attributes(attributes));
    }

    /// Title is everything after the last comma on the line; commas inside
    /// quoted attribute values never come last, so this survives them. A
    /// line without any comma announces nothing displayable and the entry
    /// will be dropped once its location is consumed.
    fn parse_channel_info(&self, line: &str) -> PendingChannel {
        let body = &line[directives::EXTINF.len()..];
        match body.rfind(',') {
            None => PendingChannel {
                title: SmolStr::default(),
                attributes: HashMap::new(),
            },
            Some(comma) => PendingChannel {
                title: SmolStr::new(body[comma + 1..].trim()),
                attributes: parse_attributes(&body[..comma]),
            },
        }
    }

    fn finish_channel(&mut self, pending: PendingChannel, location: String) {
        if pending.title.is_empty() {
            return;
        }

        self.list.channels.push(Channel {
            title: pending.title,
            url: location.into(),
            attributes: pending.attributes,
        });
    }
}

impl<T: BufRead> ParserImplTrait for ParserImpl<T> {
    fn parse(&mut self) -> Result<(), ParseError> {
        while let Some(line) = self.next_line()? {
            let at_start = self.at_start;
            self.at_start = false;

            if let Some(pending) = self.pending.take() {
                if line.starts_with('#') {
                    // every directive between an announcement and its
                    // location is swallowed, further #EXTINF: lines included
                    self.pending = Some(pending);
                    continue;
                }

                self.finish_channel(pending, line);
                continue;
            }

            if at_start && line.starts_with(directives::EXTM3U) {
                // the header is optional; when present its attributes are
                // kept for the consumer
                self.parse_header(&line);
                continue;
            }

            if line.starts_with(directives::EXTINF) {
                self.pending = Some(self.parse_channel_info(&line));
            }
            // anything else outside an announcement is ignored
        }

        // an announcement that runs past EOF without a location is discarded
        Ok(())
    }

    fn get_result(&mut self) -> ChannelList {
        let mut result = ChannelList::default();
        swap(&mut self.list, &mut result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::{Parser, parse_channels, parser::parse_attributes};

    #[test]
    fn test_parse_attributes() {
        let result = parse_attributes("HELLO=\"WORLD\" FOO=\"BAR\"");
        assert!(result.contains_key("HELLO"));
        assert_eq!(result.get("FOO").unwrap(), "BAR");
        assert!(!result.contains_key("NOT_FOUND"));
    }

    #[test]
    fn test_parse_basic() {
        let result = parse_channels("#EXTINF:-1,Channel A\nhttp://a\n#EXTINF:-1,Channel B\nhttp://b\n");
        assert_eq!(result.len(), 2);
        assert_eq!(result.channels[0].title, "Channel A");
        assert_eq!(result.channels[0].url, "http://a");
        assert_eq!(result.channels[1].title, "Channel B");
        assert_eq!(result.channels[1].url, "http://b");
    }

    #[test]
    fn test_title_is_after_last_comma() {
        let result = parse_channels("#EXTINF:-1,Group: News,Channel C\nhttp://c\n");
        assert_eq!(result.len(), 1);
        assert_eq!(result.channels[0].title, "Channel C");
    }

    #[test]
    fn test_dangling_announcement_discarded() {
        let result = parse_channels("#EXTINF:-1,Only Title\n");
        assert!(result.is_empty());
    }

    #[test]
    fn test_announcement_without_comma_dropped() {
        // the malformed entry still consumes its location line, so the
        // following entry keeps its own
        let result = parse_channels("#EXTINF:-1 no title here\nhttp://x\n#EXTINF:-1,B\nhttp://b\n");
        assert_eq!(result.len(), 1);
        assert_eq!(result.channels[0].title, "B");
        assert_eq!(result.channels[0].url, "http://b");
    }

    #[test]
    fn test_directives_swallowed_while_seeking_location() {
        let result = parse_channels("#EXTINF:-1,A\n#EXTINF:-1,B\nhttp://x\n");
        assert_eq!(result.len(), 1);
        assert_eq!(result.channels[0].title, "A");
        assert_eq!(result.channels[0].url, "http://x");
    }

    #[test]
    fn test_blank_lines_and_directives_skipped() {
        let result = parse_channels("#EXTINF:-1,A\n\n#EXTVLCOPT:network-caching=1000\n\nhttp://a\n");
        assert_eq!(result.len(), 1);
        assert_eq!(result.channels[0].url, "http://a");
    }

    #[test]
    fn test_line_ending_tolerance() {
        let unix = "#EXTM3U\n#EXTINF:-1,A\nhttp://a\n#EXTINF:-1,B\nhttp://b\n";
        let dos = unix.replace('\n', "\r\n");

        let unix = parse_channels(unix);
        let dos = parse_channels(dos);
        assert_eq!(unix.channels, dos.channels);
    }

    #[test]
    fn test_concatenation() {
        let first = "#EXTINF:-1,A\nhttp://a\n";
        let second = "#EXTINF:-1,B\nhttp://b\n";

        let joined = parse_channels(format!("{}{}", first, second));
        let mut split = parse_channels(first).channels;
        split.extend(parse_channels(second).channels);
        assert_eq!(joined.channels, split);
    }

    #[test]
    fn test_duplicates_preserved() {
        let result = parse_channels("#EXTINF:-1,A\nhttp://a\n#EXTINF:-1,A again\nhttp://a\n");
        assert_eq!(result.len(), 2);
        assert_eq!(result.channels[0].url, result.channels[1].url);
    }

    #[test]
    fn test_header_not_required() {
        let result = parse_channels("#EXTINF:-1,A\nhttp://a\n");
        assert_eq!(result.len(), 1);
        assert!(result.attributes.is_empty());
    }

    #[test]
    fn test_garbage_input() {
        assert!(parse_channels("").is_empty());
        assert!(parse_channels("\n\n\n").is_empty());
        assert!(parse_channels("just some text\nhttp://orphan\n#EXTM3U\n").is_empty());
        assert!(parse_channels("#EXTINF:\n#EXTINF:,\n").is_empty());
    }

    #[test]
    fn test_parse_list() {
        let data = r#"
#EXTM3U x-tvg-url="test"

#EXTINF:1 tvg-id="a" provider-type="iptv",A
http://example.com/A.m3u8

#EXTINF:2 tvg-id="b" provider-type="iptv",B
http://example.com/B.m3u8

#EXTINF:3 tvg-id="c" provider-type="iptv",C
http://example.com/C.m3u8

#EXTINF:4 tvg-id="d" provider-type="iptv",D
http://example.com/D.m3u8
"#;
        let mut parser = Parser::new(Cursor::new(data));
        parser.parse().unwrap();
        let result = parser.get_result();

        assert_eq!(result.attributes.get("x-tvg-url").unwrap(), "test");
        assert_eq!(result.len(), 4);
        assert_eq!(result.channels.get(1).unwrap().title, "B");
        assert_eq!(
            result
                .channels
                .get(2)
                .unwrap()
                .attributes
                .get("provider-type")
                .unwrap(),
            "iptv"
        );
        assert_eq!(
            result.channels.get(3).unwrap().url,
            "http://example.com/D.m3u8"
        );
    }

    #[test]
    fn test_attribute_with_comma_does_not_break_title() {
        let result =
            parse_channels("#EXTINF:-1 group-title=\"News, Local\",Channel D\nhttp://d\n");
        assert_eq!(result.channels[0].title, "Channel D");
        assert_eq!(
            result.channels[0].attributes.get("group-title").unwrap(),
            "News, Local"
        );
    }
}
