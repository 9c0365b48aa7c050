//! Fixed-capacity snapshot format for `LexerState`.
//!
//! Layout, counts little-endian:
//!
//! ```text
//! [u16 emitted_tags][u16 total_tags]          tag: [u8 kind] (custom: [u8 len][bytes])
//! [u16 emitted_sections][u16 total_sections]  section: [u8 len][bytes]
//! [u8 len][bytes] x3                          start, end, old_end (len 0 = default)
//! ```
//!
//! Encoding is lossy by construction: entries that do not fit are counted in
//! the total but not emitted, and decode pads the stacks back to their totals
//! with placeholder entries. Decode never fails.

use crate::state::{Delimiter, Delimiters, LexerState, Scope, ScopeStack, Section};
use tags::{Tag, TagKind};

pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

const MAX_ENTRIES: usize = u16::MAX as usize;
const MAX_NAME_BYTES: usize = u8::MAX as usize;
const STACK_HEADER_BYTES: usize = 4;
const DELIMITER_SLOTS: usize = 3;

/// Result of one `encode` call. Callers that only need the byte count may
/// ignore the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOutcome {
    pub written: usize,
    pub dropped_tags: usize,
    pub dropped_sections: usize,
    pub delimiters_dropped: bool,
}

impl EncodeOutcome {
    pub fn is_lossless(&self) -> bool {
        self.dropped_tags == 0 && self.dropped_sections == 0 && !self.delimiters_dropped
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateCodec {
    capacity: usize,
}

impl Default for StateCodec {
    fn default() -> Self {
        Self::new(SERIALIZATION_BUFFER_SIZE)
    }
}

impl StateCodec {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Write `state` into `buffer`, never past `min(buffer.len(), capacity)`.
    pub fn encode(&self, state: &LexerState, buffer: &mut [u8]) -> EncodeOutcome {
        let limit = buffer.len().min(self.capacity);
        let fixed = 2 * STACK_HEADER_BYTES + DELIMITER_SLOTS;
        if limit < fixed {
            return EncodeOutcome {
                written: 0,
                dropped_tags: state.tags.len(),
                dropped_sections: state.sections.len(),
                delimiters_dropped: state.delimiters != Delimiters::default(),
            };
        }

        let delimiters = [
            clip(state.delimiters.start_slot().custom_text()),
            clip(state.delimiters.end_slot().custom_text()),
            clip(state.delimiters.old_end_slot().custom_text()),
        ];
        let delimiter_bytes: usize = delimiters.iter().map(|d| d.len()).sum();
        let delimiters_dropped = fixed + delimiter_bytes > limit;
        let reserved = if delimiters_dropped {
            fixed
        } else {
            fixed + delimiter_bytes
        };

        let mut writer = ByteWriter::new(&mut buffer[..limit]);
        // Stack entries may use everything not reserved for headers and delimiters.
        let mut budget = limit - reserved;

        let total_tags = state.tags.len().min(MAX_ENTRIES);
        let header = writer.reserve_u16_pair();
        let mut emitted_tags = 0usize;
        for tag in state.tags.iter().take(total_tags) {
            let name = match tag {
                Tag::Known(_) => None,
                Tag::Custom(name) => Some(clip(name)),
            };
            let size = 1 + name.map_or(0, |n| 1 + n.len());
            if size > budget {
                break;
            }
            budget -= size;
            writer.u8(tag.kind().to_u8());
            if let Some(name) = name {
                writer.str8(name);
            }
            emitted_tags += 1;
        }
        writer.fill_u16_pair(header, emitted_tags, total_tags);

        let total_sections = state.sections.len().min(MAX_ENTRIES);
        let header = writer.reserve_u16_pair();
        let mut emitted_sections = 0usize;
        for section in state.sections.iter().take(total_sections) {
            let name = clip(section.name());
            let size = 1 + name.len();
            if size > budget {
                break;
            }
            budget -= size;
            writer.str8(name);
            emitted_sections += 1;
        }
        writer.fill_u16_pair(header, emitted_sections, total_sections);

        for delimiter in delimiters {
            writer.str8(if delimiters_dropped { "" } else { delimiter });
        }

        EncodeOutcome {
            written: writer.position(),
            dropped_tags: state.tags.len() - emitted_tags,
            dropped_sections: state.sections.len() - emitted_sections,
            delimiters_dropped,
        }
    }

    /// Rebuild a state from `buffer`. Anything unreadable degrades to
    /// placeholders or defaults.
    pub fn decode(&self, buffer: &[u8]) -> LexerState {
        let mut state = LexerState::new();
        if buffer.is_empty() {
            return state;
        }
        let mut reader = ByteReader::new(&buffer[..buffer.len().min(self.capacity)]);

        let (emitted, total) = reader.u16_pair();
        state.tags = decode_stack(&mut reader, emitted, total, |reader| {
            let kind = TagKind::from_u8(reader.u8()?)?;
            if kind == TagKind::Custom {
                Some(Tag::Custom(reader.str8()?.into()))
            } else {
                Some(Tag::Known(kind))
            }
        });

        let (emitted, total) = reader.u16_pair();
        state.sections = decode_stack(&mut reader, emitted, total, |reader| {
            reader.str8().map(Section::new)
        });

        let start = reader.str8().unwrap_or_default();
        let end = reader.str8().unwrap_or_default();
        let old_end = reader.str8().unwrap_or_default();
        state.delimiters = Delimiters::new(
            Delimiter::custom(&start),
            Delimiter::custom(&end),
            Delimiter::custom(&old_end),
        );

        if reader.poisoned {
            log::debug!(
                target: "scanner.codec",
                "short or corrupt state buffer ({} bytes)",
                buffer.len()
            );
        }
        state
    }
}

fn decode_stack<T, F>(
    reader: &mut ByteReader<'_>,
    emitted: u16,
    total: u16,
    mut entry: F,
) -> ScopeStack<T>
where
    T: Scope,
    F: FnMut(&mut ByteReader<'_>) -> Option<T>,
{
    let total = usize::from(total.max(emitted));
    let mut stack = ScopeStack::default();
    for _ in 0..emitted {
        if reader.poisoned {
            break;
        }
        match entry(reader) {
            Some(item) => stack.push(item),
            None => reader.poisoned = true,
        }
    }
    while stack.len() < total {
        stack.push(T::default());
    }
    stack
}

/// Longest prefix of `text` that fits a `u8` length and ends on a char
/// boundary.
fn clip(text: &str) -> &str {
    if text.len() <= MAX_NAME_BYTES {
        return text;
    }
    let mut end = MAX_NAME_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

struct ByteWriter<'a> {
    buffer: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn u8(&mut self, value: u8) {
        self.buffer[self.pos] = value;
        self.pos += 1;
    }

    fn str8(&mut self, text: &str) {
        let bytes = text.as_bytes();
        self.u8(bytes.len() as u8);
        self.buffer[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    fn reserve_u16_pair(&mut self) -> usize {
        let at = self.pos;
        self.pos += STACK_HEADER_BYTES;
        at
    }

    fn fill_u16_pair(&mut self, at: usize, emitted: usize, total: usize) {
        self.buffer[at..at + 2].copy_from_slice(&(emitted as u16).to_le_bytes());
        self.buffer[at + 2..at + 4].copy_from_slice(&(total as u16).to_le_bytes());
    }
}

struct ByteReader<'a> {
    buffer: &'a [u8],
    pos: usize,
    poisoned: bool,
}

impl<'a> ByteReader<'a> {
    fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            pos: 0,
            poisoned: false,
        }
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.poisoned {
            return None;
        }
        match self.buffer.get(self.pos..self.pos + len) {
            Some(bytes) => {
                self.pos += len;
                Some(bytes)
            }
            None => {
                self.poisoned = true;
                None
            }
        }
    }

    fn u8(&mut self) -> Option<u8> {
        self.take(1).map(|bytes| bytes[0])
    }

    fn u16(&mut self) -> Option<u16> {
        self.take(2).map(|bytes| u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn u16_pair(&mut self) -> (u16, u16) {
        let emitted = self.u16().unwrap_or(0);
        let total = self.u16().unwrap_or(emitted);
        (emitted, total)
    }

    fn str8(&mut self) -> Option<String> {
        let len = usize::from(self.u8()?);
        self.take(len)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}
