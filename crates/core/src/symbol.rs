// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Morse symbols and the static character table.

/// Longest mark sequence any table entry may hold.
pub const MAX_MARKS: usize = 7;

/// Room for the marks of one character plus the separator space.
pub const RUN_CAPACITY: usize = MAX_MARKS + 1;

/// Scratch buffer a single run is rendered into.
pub type RunBuf = [u8; RUN_CAPACITY];

/// First character covered by [`TABLE`].
pub const TABLE_FIRST: u8 = b'!';

/// Last character covered by [`TABLE`].
pub const TABLE_LAST: u8 = b'Z';

pub const TABLE_LEN: usize = (TABLE_LAST - TABLE_FIRST + 1) as usize;

pub const SEPARATOR: u8 = b' ';

/// The single mark a word gap renders as.
pub const GAP_MARK: u8 = b' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Dot,
    Dash,
}

impl Mark {
    pub const fn as_byte(self) -> u8 {
        match self {
            Mark::Dot => b'.',
            Mark::Dash => b'-',
        }
    }
}

/// One character's marks: bit `i` of `pattern` is mark `i`, set for a dash.
///
/// The word gap is the one symbol whose mark is neither: it has length 1 and
/// renders that mark as [`GAP_MARK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Symbol {
    pattern: u8,
    len: u8,
    gap: bool,
}

impl Symbol {
    /// Characters without a Morse pattern render as the bare separator.
    pub const EMPTY: Symbol = Symbol {
        pattern: 0,
        len: 0,
        gap: false,
    };

    /// Space and newline. Renders as `GAP_MARK` plus the separator, so a
    /// word boundary is one space wider than an empty entry.
    pub const WORD_GAP: Symbol = Symbol {
        pattern: 0,
        len: 1,
        gap: true,
    };

    /// Builds a symbol from a string of `.` and `-`.
    ///
    /// Usable in const context; panics (a compile error there) on any other
    /// byte or on more than [`MAX_MARKS`] marks.
    pub const fn from_marks(marks: &str) -> Symbol {
        let bytes = marks.as_bytes();
        assert!(bytes.len() <= MAX_MARKS, "too many marks for one symbol");

        let mut pattern = 0u8;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'-' => pattern |= 1 << i,
                b'.' => {}
                _ => panic!("marks must be '.' or '-'"),
            }
            i += 1;
        }

        Symbol {
            pattern,
            len: bytes.len() as u8,
            gap: false,
        }
    }

    /// Runtime counterpart of [`Symbol::from_marks`]; `None` for anything
    /// that is not a valid mark sequence.
    pub fn parse(run: &[u8]) -> Option<Symbol> {
        if run.len() > MAX_MARKS {
            return None;
        }

        let mut pattern = 0u8;
        for (i, &byte) in run.iter().enumerate() {
            match byte {
                b'-' => pattern |= 1 << i,
                b'.' => {}
                _ => return None,
            }
        }

        Some(Symbol {
            pattern,
            len: run.len() as u8,
            gap: false,
        })
    }

    pub const fn pattern(&self) -> u8 {
        self.pattern
    }

    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_word_gap(&self) -> bool {
        self.gap
    }

    /// Dots and dashes only; the word gap yields none.
    pub fn marks(&self) -> impl Iterator<Item = Mark> {
        let pattern = self.pattern;
        let count = if self.gap { 0 } else { self.len };
        (0..count).map(move |i| {
            if (pattern >> i) & 1 == 1 {
                Mark::Dash
            } else {
                Mark::Dot
            }
        })
    }

    /// Renders the marks followed by one separator and returns that run.
    pub fn render<'a>(&self, buf: &'a mut RunBuf) -> &'a [u8] {
        if self.gap {
            buf[0] = GAP_MARK;
            buf[1] = SEPARATOR;
            return &buf[..2];
        }

        let mut n = 0;
        for mark in self.marks() {
            buf[n] = mark.as_byte();
            n += 1;
        }
        buf[n] = SEPARATOR;
        &buf[..=n]
    }
}

const fn m(marks: &str) -> Symbol {
    Symbol::from_marks(marks)
}

/// Morse table for `'!'..='Z'`, indexed by `code - b'!'`.
pub const TABLE: [Symbol; TABLE_LEN] = [
    m("-.-.--"),  // !
    m(".-..-."),  // "
    m(""),        // #
    m("...-..-"), // $
    m(""),        // %
    m(".-..."),   // &
    m(".----."),  // '
    m("-.--."),   // (
    m("-.--.-"),  // )
    m(""),        // *
    m(".-.-."),   // +
    m("--..--"),  // ,
    m("-....-"),  // -
    m(".-.-.-"),  // .
    m("-..-."),   // /
    m("-----"),   // 0
    m(".----"),   // 1
    m("..---"),   // 2
    m("...--"),   // 3
    m("....-"),   // 4
    m("....."),   // 5
    m("-...."),   // 6
    m("--..."),   // 7
    m("---.."),   // 8
    m("----."),   // 9
    m("---..."),  // :
    m("-.-.-."),  // ;
    m(""),        // <
    m("-...-"),   // =
    m(""),        // >
    m("..--.."),  // ?
    m(".--.-."),  // @
    m(".-"),      // A
    m("-..."),    // B
    m("-.-."),    // C
    m("-.."),     // D
    m("."),       // E
    m("..-."),    // F
    m("--."),     // G
    m("...."),    // H
    m(".."),      // I
    m(".---"),    // J
    m("-.-"),     // K
    m(".-.."),    // L
    m("--"),      // M
    m("-."),      // N
    m("---"),     // O
    m(".--."),    // P
    m("--.-"),    // Q
    m(".-."),     // R
    m("..."),     // S
    m("-"),       // T
    m("..-"),     // U
    m("...-"),    // V
    m(".--"),     // W
    m("-..-"),    // X
    m("-.--"),    // Y
    m("--.."),    // Z
];

/// Applies the character policy: newline becomes a space, lowercase folds to
/// uppercase, and anything outside `' '..='Z'` afterwards is dropped.
pub fn normalize(byte: u8) -> Option<u8> {
    let folded = match byte {
        b'\n' => b' ',
        b'a'..=b'z' => byte.to_ascii_uppercase(),
        _ => byte,
    };
    (b' '..=TABLE_LAST).contains(&folded).then_some(folded)
}

/// Symbol for a raw input byte, or `None` if the policy drops it.
pub fn lookup(byte: u8) -> Option<Symbol> {
    match normalize(byte)? {
        b' ' => Some(Symbol::WORD_GAP),
        c => Some(TABLE[(c - TABLE_FIRST) as usize]),
    }
}

/// Reverse lookup. Empty symbols have no unique character and yield `None`.
pub fn character_for(symbol: Symbol) -> Option<u8> {
    if symbol.is_empty() {
        return None;
    }
    TABLE
        .iter()
        .position(|entry| *entry == symbol)
        .map(|index| TABLE_FIRST + index as u8)
}

/// Iterates over `(character, symbol)` for every table entry with marks.
pub fn entries() -> impl Iterator<Item = (u8, Symbol)> {
    TABLE
        .iter()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_empty())
        .map(|(index, symbol)| (TABLE_FIRST + index as u8, *symbol))
}
