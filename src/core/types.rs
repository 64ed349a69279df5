/// Store-assigned hero identifier. Positive; never reused within a store instance.
pub type HeroId = i64;

/// Identifier of a superpower catalog entry.
pub type PowerId = i64;
