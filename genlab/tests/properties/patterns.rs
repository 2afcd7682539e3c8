//! Ways of stating a property: checking against a trusted model, pinning
//! down invariants of an operation, and encoding symmetry.

use crate::{config, expect_pass};
use genlab::{for_all_fallible, for_all_named, Gen, Range, TestResult};
use std::fmt;
use std::str::FromStr;

const INT_MAX: i64 = 100_000;

fn naturals() -> Gen<Vec<i64>> {
    Gen::vec_of(Gen::<i64>::from_range(Range::new(0, INT_MAX)))
}

/// Largest element, walked by hand.
fn biggest(values: &[i64]) -> Option<i64> {
    let (&head, tail) = values.split_first()?;
    Some(tail.iter().fold(head, |best, &n| if n > best { n } else { best }))
}

/// Skips the head, so a list whose first element is the largest comes out wrong.
fn biggest_of_tail(values: &[i64]) -> Option<i64> {
    values.get(1..).and_then(biggest)
}

/// Property: the hand-written maximum agrees with `Iterator::max`
pub fn test_biggest_matches_model() {
    let lists = Gen::vec_with_range(
        Range::new(1, 50),
        Gen::<i64>::from_range(Range::new(0, INT_MAX)),
    )
    .expect("non-empty length bounds");
    let prop = for_all_named(lists, "values", |values: &Vec<i64>| {
        biggest(values) == values.iter().copied().max()
    });

    expect_pass("biggest matches max", prop.run(&config()));
    assert_eq!(biggest(&[]), None);
}

/// The model catches a maximum that ignores the head and shrinks to one zero
pub fn test_model_catches_skipped_head() {
    let lists = Gen::vec_with_range(
        Range::new(1, 50),
        Gen::<i64>::from_range(Range::new(0, INT_MAX)),
    )
    .expect("non-empty length bounds");
    let prop = for_all_named(lists, "values", |values: &Vec<i64>| {
        biggest_of_tail(values) == values.iter().copied().max()
    });

    match prop.run(&config()) {
        TestResult::Fail { counterexample, .. } => {
            assert_eq!(counterexample, "[0]");
            println!("✓ Skipped head shrank to {counterexample}");
        }
        result => panic!("Expected the skipped head to be caught, got: {result:?}"),
    }
}

/// Property: a pushed element is the last one
pub fn test_push_then_last() {
    let gen = naturals().zip(Gen::<i64>::from_range(Range::new(0, INT_MAX)));
    let prop = for_all_named(gen, "list_and_last", |(values, last): &(Vec<i64>, i64)| {
        let mut values = values.clone();
        values.push(*last);
        values.last() == Some(last)
    });

    expect_pass("push then last", prop.run(&config()));
}

fn sorted(values: &[i64]) -> Vec<i64> {
    let mut out = values.to_vec();
    out.sort();
    out
}

fn is_ordered(values: &[i64]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Property: sorting yields non-decreasing order
pub fn test_sort_is_ordered() {
    let prop = for_all_named(naturals(), "values", |values: &Vec<i64>| {
        is_ordered(&sorted(values))
    });

    expect_pass("sort is ordered", prop.run(&config()));
}

/// Property: sorting keeps the length
pub fn test_sort_keeps_length() {
    let prop = for_all_named(naturals(), "values", |values: &Vec<i64>| {
        sorted(values).len() == values.len()
    });

    expect_pass("sort keeps length", prop.run(&config()));
}

/// Property: sorting invents no elements
pub fn test_sort_adds_nothing() {
    let prop = for_all_named(naturals(), "values", |values: &Vec<i64>| {
        sorted(values).iter().all(|n| values.contains(n))
    });

    expect_pass("sort adds nothing", prop.run(&config()));
}

/// Property: sorting loses no elements
pub fn test_sort_removes_nothing() {
    let prop = for_all_named(naturals(), "values", |values: &Vec<i64>| {
        let out = sorted(values);
        values.iter().all(|n| out.contains(n))
    });

    expect_pass("sort removes nothing", prop.run(&config()));
}

/// A deduplicating sort passes three invariants; only the length check
/// catches it, and it shrinks to one repeated pair.
pub fn test_length_invariant_catches_dedup() {
    let small = Gen::vec_of(Gen::<i64>::from_range(Range::new(0, 10)));
    let prop = for_all_named(small, "values", |values: &Vec<i64>| {
        let mut out = sorted(values);
        out.dedup();
        is_ordered(&out)
            && out.iter().all(|n| values.contains(n))
            && values.iter().all(|n| out.contains(n))
            && out.len() == values.len()
    });

    match prop.run(&config()) {
        TestResult::Fail { counterexample, .. } => {
            let inner = counterexample.trim_start_matches('[').trim_end_matches(']');
            let parts: Vec<&str> = inner.split(", ").collect();
            assert_eq!(parts.len(), 2, "{counterexample}");
            assert_eq!(parts[0], parts[1], "{counterexample}");
            println!("✓ Dedup sort shrank to {counterexample}");
        }
        result => panic!("Expected the dedup sort to be caught, got: {result:?}"),
    }
}

/// One of six shapes, written as a tag followed by a length-prefixed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datum {
    Text(String),
    Texts(Vec<String>),
    Char(char),
    Chars(Vec<char>),
    Int(i64),
    Ints(Vec<i64>),
}

impl Datum {
    fn kind(&self) -> &'static str {
        match self {
            Datum::Text(_) => "text",
            Datum::Texts(_) => "texts",
            Datum::Char(_) => "char",
            Datum::Chars(_) => "chars",
            Datum::Int(_) => "int",
            Datum::Ints(_) => "ints",
        }
    }
}

fn write_text(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    write!(f, "{}:{text}", text.chars().count())
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Text(text) => {
                f.write_str("s")?;
                write_text(f, text)
            }
            Datum::Texts(texts) => {
                write!(f, "S{}:", texts.len())?;
                texts.iter().try_for_each(|text| write_text(f, text))
            }
            Datum::Char(c) => write!(f, "c{c}"),
            Datum::Chars(chars) => {
                write!(f, "C{}:", chars.len())?;
                chars.iter().try_for_each(|c| write!(f, "{c}"))
            }
            Datum::Int(n) => write!(f, "i{n};"),
            Datum::Ints(ints) => {
                write!(f, "I{}:", ints.len())?;
                ints.iter().try_for_each(|n| write!(f, "{n};"))
            }
        }
    }
}

struct Reader<'a> {
    rest: std::str::Chars<'a>,
}

impl Reader<'_> {
    fn char(&mut self) -> Result<char, String> {
        self.rest
            .next()
            .ok_or_else(|| "unexpected end of input".to_string())
    }

    fn until(&mut self, end: char) -> Result<String, String> {
        let mut token = String::new();
        loop {
            match self.char()? {
                c if c == end => return Ok(token),
                c => token.push(c),
            }
        }
    }

    fn count(&mut self) -> Result<usize, String> {
        let token = self.until(':')?;
        token
            .parse()
            .map_err(|error| format!("bad count {token:?}: {error}"))
    }

    fn int(&mut self) -> Result<i64, String> {
        let token = self.until(';')?;
        token
            .parse()
            .map_err(|error| format!("bad integer {token:?}: {error}"))
    }

    fn text(&mut self) -> Result<String, String> {
        let len = self.count()?;
        (0..len).map(|_| self.char()).collect()
    }

    fn many<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, String>,
    ) -> Result<Vec<T>, String> {
        let len = self.count()?;
        (0..len).map(|_| item(self)).collect()
    }
}

impl FromStr for Datum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = Reader { rest: s.chars() };
        let datum = match reader.char()? {
            's' => Datum::Text(reader.text()?),
            'S' => Datum::Texts(reader.many(Reader::text)?),
            'c' => Datum::Char(reader.char()?),
            'C' => Datum::Chars(reader.many(Reader::char)?),
            'i' => Datum::Int(reader.int()?),
            'I' => Datum::Ints(reader.many(Reader::int)?),
            tag => return Err(format!("unknown tag {tag:?}")),
        };
        match reader.rest.next() {
            None => Ok(datum),
            Some(c) => Err(format!("trailing input starting at {c:?}")),
        }
    }
}

fn ints() -> Gen<i64> {
    Gen::<i64>::from_range(Range::new(-INT_MAX, INT_MAX))
}

pub fn datums() -> Gen<Datum> {
    Gen::one_of(vec![
        Gen::<String>::unicode().map(Datum::Text),
        Gen::vec_of(Gen::<String>::unicode()).map(Datum::Texts),
        Gen::<char>::unicode().map(Datum::Char),
        Gen::vec_of(Gen::<char>::unicode()).map(Datum::Chars),
        ints().map(Datum::Int),
        Gen::vec_of(ints()).map(Datum::Ints),
    ])
    .expect("six shapes")
}

/// Property: decoding an encoded datum gives it back
pub fn test_encoding_round_trips() {
    let prop = for_all_fallible(datums(), |datum: &Datum| -> Result<(), String> {
        let decoded: Datum = datum.to_string().parse()?;
        if decoded == *datum {
            Ok(())
        } else {
            Err(format!("decoded as {decoded:?}"))
        }
    })
    .label(|datum| datum.kind().to_string());

    let result = prop.run_with_context(&config(), Some("round_trip"), Some(module_path!()));
    match &result {
        TestResult::PassWithStatistics { statistics, .. } => {
            for kind in ["text", "texts", "char", "chars", "int", "ints"] {
                assert!(statistics.event_count(kind) > 0, "{kind} never drawn");
            }
            println!("{result}");
        }
        other => panic!("Expected a passing round trip, got: {other:?}"),
    }
}

/// Separators inside payloads survive, malformed input is rejected
pub fn test_encoding_edge_cases() {
    let tricky = Datum::Texts(vec!["3:".to_string(), String::new(), "é;\n".to_string()]);
    assert_eq!(tricky.to_string().parse::<Datum>(), Ok(tricky));
    assert_eq!("c:".parse::<Datum>(), Ok(Datum::Char(':')));
    assert_eq!("I0:".parse::<Datum>(), Ok(Datum::Ints(Vec::new())));

    for bad in ["", "x", "s5:ab", "i12", "i1;2", "Cz:"] {
        assert!(bad.parse::<Datum>().is_err(), "{bad:?} should not decode");
    }
}
