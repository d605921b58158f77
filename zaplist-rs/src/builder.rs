use std::fmt::Display;

use crate::format::{Channel, ChannelList, directives};

impl Display for ChannelList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // header
        write!(f, "{}", directives::EXTM3U)?;
        for (key, value) in self.attributes.iter() {
            write!(f, " {}=\"{}\"", key, value)?;
        }
        write!(f, "\n")?;

        // channels
        for it in self.channels.iter() {
            write!(f, "\n")?;
            it.fmt(f)?;
        }

        Ok(())
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // #EXTINF:duration attributes...,title
        // the duration of a live channel is not tracked, written as -1
        write!(f, "{}-1", directives::EXTINF)?;
        for (key, value) in self.attributes.iter() {
            write!(f, " {}=\"{}\"", key, value)?;
        }
        writeln!(f, ",{}", self.title)?;

        writeln!(f, "{}", self.url)?;

        Ok(())
    }
}
