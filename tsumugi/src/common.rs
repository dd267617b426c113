//! Common settings in Tsumugi.

use bincode::config::{self, Fixint, LittleEndian};

/// Connection id reserved for the beginning and end of a sentence.
pub const BOS_EOS_CONNECTION_ID: u16 = 0;

/// Feature string of the sentence sentinels.
pub const BOS_EOS_FEATURE: &str = "BOS/EOS";

/// Names of the categories whose characters form kanji-only spans.
pub const KANJI_CATEGORIES: [&str; 2] = ["KANJI", "KANJINUMERIC"];

/// Gets the common bincode configuration of serialization.
pub fn bincode_config() -> config::Configuration<LittleEndian, Fixint> {
    config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
}
