mod channel;
mod list;

pub use channel::*;
pub use list::*;

pub mod directives {
    pub const EXTM3U: &str = "#EXTM3U";
    pub const EXTM3U_LEN: usize = EXTM3U.len();
    pub const EXTINF: &str = "#EXTINF:";
}
