use regex::Regex;

use super::error::SynthesisError;

/// Reference word-window size for the chunked provider
pub const WORDS_PER_CHUNK: usize = 20;

/// Reference character-window size
pub const CHARS_PER_CHUNK: usize = 150;

/// How raw text is split into provider-sized chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkPolicy {
    /// Split on whitespace and group into windows of N words, re-joined
    /// with single spaces
    Words(usize),
    /// Split into windows of N characters regardless of word boundaries
    Chars(usize),
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        ChunkPolicy::Words(WORDS_PER_CHUNK)
    }
}

/// A bounded-size slice of input text submitted as one synthesis request unit.
///
/// Ordering by `index` is the sole contract the assembler relies on: chunks
/// may be requested concurrently but are always reassembled by ascending
/// `index`, never by completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub index: usize,
    pub raw_text: String,
    pub sanitized_text: String,
}

/// Split text into an ordered sequence of chunks.
///
/// Fails with [`SynthesisError::EmptyText`] before any chunk is created when
/// the input is empty or whitespace-only.
pub fn segment(text: &str, policy: ChunkPolicy) -> Result<Vec<TextChunk>, SynthesisError> {
    if text.trim().is_empty() {
        return Err(SynthesisError::EmptyText);
    }

    let raw_chunks: Vec<String> = match policy {
        ChunkPolicy::Words(n) => {
            let words: Vec<&str> = text.split_whitespace().collect();
            words.chunks(n.max(1)).map(|w| w.join(" ")).collect()
        }
        ChunkPolicy::Chars(n) => {
            let chars: Vec<char> = text.chars().collect();
            chars
                .chunks(n.max(1))
                .map(|c| c.iter().collect())
                .collect()
        }
    };

    Ok(raw_chunks
        .into_iter()
        .enumerate()
        .map(|(index, raw_text)| {
            let sanitized_text = sanitize(&raw_text);
            TextChunk {
                index,
                raw_text,
                sanitized_text,
            }
        })
        .collect())
}

/// Sanitize one chunk into the transport-safe alphabet the chunked-JSON
/// provider accepts.
///
/// Lossy: Unicode, punctuation and emphasis markers are dropped because the
/// provider only accepts `[a-zA-Z0-9+]`. Whitespace runs become a
/// single `+`, the provider's URL-safe word joiner; `+` survives the filter
/// so sanitizing an already-sanitized chunk yields the same chunk. The
/// streaming provider takes raw UTF-8 and must never pass through here.
pub fn sanitize(chunk: &str) -> String {
    let cleaned = Regex::new(r"[^a-zA-Z0-9 +]")
        .unwrap()
        .replace_all(chunk, "");
    let joined = Regex::new(r"\s+").unwrap().replace_all(&cleaned, "+");
    Regex::new(r"[-*]").unwrap().replace_all(&joined, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_text_fails_before_chunking() {
        assert!(matches!(
            segment("", ChunkPolicy::default()),
            Err(SynthesisError::EmptyText)
        ));
        assert!(matches!(
            segment("   \n\t ", ChunkPolicy::default()),
            Err(SynthesisError::EmptyText)
        ));
    }

    #[test]
    fn two_words_fit_in_one_chunk() {
        let chunks = segment("Hello world", ChunkPolicy::Words(20)).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].raw_text, "Hello world");
        assert_eq!(chunks[0].sanitized_text, "Hello+world");
    }

    #[test]
    fn forty_five_words_make_three_word_chunks() {
        let words: Vec<String> = (0..45).map(|i| format!("word{i}")).collect();
        let text = words.join(" ");
        let chunks = segment(&text, ChunkPolicy::Words(20)).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].raw_text.split_whitespace().count(), 20);
        assert_eq!(chunks[1].raw_text.split_whitespace().count(), 20);
        assert_eq!(chunks[2].raw_text.split_whitespace().count(), 5);
        let indexes: Vec<usize> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn word_chunks_reproduce_the_original_text() {
        let words: Vec<String> = (0..45).map(|i| format!("word{i}")).collect();
        let text = words.join(" ");
        let chunks = segment(&text, ChunkPolicy::Words(20)).unwrap();

        let rejoined = chunks
            .iter()
            .map(|c| c.raw_text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn char_chunks_reproduce_the_original_text() {
        let text = "abcdefghij".repeat(40); // 400 chars
        let chunks = segment(&text, ChunkPolicy::Chars(150)).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].raw_text.chars().count(), 150);
        assert_eq!(chunks[2].raw_text.chars().count(), 100);
        let rejoined: String = chunks.iter().map(|c| c.raw_text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn char_chunking_never_splits_a_code_point() {
        let text = "日本語のテキスト".repeat(30);
        let chunks = segment(&text, ChunkPolicy::Chars(7)).unwrap();

        let rejoined: String = chunks.iter().map(|c| c.raw_text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn sanitize_strips_to_the_provider_alphabet() {
        assert_eq!(sanitize("Hello, world!"), "Hello+world");
        assert_eq!(sanitize("don't stop"), "dont+stop");
        assert_eq!(sanitize("a-b *c* d"), "ab+c+d");
        assert_eq!(sanitize("tabs\tand\nnewlines"), "tabs+and+newlines");
    }

    #[test]
    fn sanitize_drops_unicode_entirely() {
        assert_eq!(sanitize("café naïve"), "caf+nave");
        assert_eq!(sanitize("日本語"), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in ["Hello, world!", "a-b *c* d", "  spaced   out  ", "café"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not stable for {input:?}");
        }
    }
}
