use crate::{Gen, Range, Result};

/// Every character [`text_like`] can produce.
pub const TEXT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz \n.-!?,0123456789";

struct CharClass {
    weight: u32,
    chars: &'static str,
}

/// Earlier classes are what shrinking heads for.
const CLASSES: [CharClass; 5] = [
    CharClass {
        weight: 26,
        chars: "abcdefghijklmnopqrstuvwxyz",
    },
    CharClass {
        weight: 6,
        chars: " ",
    },
    CharClass {
        weight: 1,
        chars: "\n",
    },
    CharClass {
        weight: 2,
        chars: ".-!?,",
    },
    CharClass {
        weight: 3,
        chars: "0123456789",
    },
];

fn class_at(mut ticket: u32) -> &'static CharClass {
    for class in &CLASSES {
        if ticket < class.weight {
            return class;
        }
        ticket -= class.weight;
    }
    &CLASSES[CLASSES.len() - 1]
}

pub fn is_text_like(c: char) -> bool {
    TEXT_ALPHABET.contains(c)
}

/// A class picked by weight, then a character uniformly within it.
pub fn text_char() -> Gen<char> {
    let total: u32 = CLASSES.iter().map(|class| class.weight).sum();
    Gen::<u32>::from_range(Range::new(0, total - 1)).bind(|ticket| {
        let chars: Vec<char> = class_at(ticket).chars.chars().collect();
        Gen::<usize>::from_range(Range::new(0, chars.len() - 1)).map(move |i| chars[i])
    })
}

/// Prose-like strings over [`TEXT_ALPHABET`].
pub fn text_like() -> Gen<String> {
    Gen::<String>::string_of(text_char())
}

/// Like [`text_like`] with the character count bounded by `range`.
pub fn text_like_with(range: Range<usize>) -> Result<Gen<String>> {
    Gen::<String>::with_range(range, text_char())
}
