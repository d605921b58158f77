//! # zaplist-rs
//! A library for parsing and generating IPTV channel lists in M3U format
//!
//! # Example
//! ```rust
//! use zaplist_rs::Parser;
//! use std::io::Cursor;
//!
//! // 1. Parse
//! let mut parser = Parser::new(Cursor::new(r#"
//! #EXTM3U x-tvg-url="test"
//! #EXTINF:-1 tvg-id="a" group-title="News",Channel A
//! http://example.com/a.m3u8"#));
//! parser.parse().unwrap();
//! let result = parser.get_result();
//! // Do your works with result...
//!
//! // 2. Generate
//! println!("{}", result.to_string());
//! ```

mod builder;
pub mod format;
mod parser;
pub use parser::*;
