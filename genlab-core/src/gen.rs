//! Generator combinators for property-based testing.

use crate::{data::*, error::*, range::*, tree::*};
use std::ops::BitOr;
use std::rc::Rc;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed
/// using combinator functions. This is a key difference from
/// type-directed approaches like QuickCheck.
pub struct Gen<T> {
    generator: Rc<dyn Fn(Size, Seed) -> Tree<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> Tree<T> + 'static,
    {
        Gen {
            generator: Rc::new(f),
        }
    }

    /// Generate a value, with its shrinks, for the given size and seed.
    pub fn generate(&self, size: Size, seed: Seed) -> Tree<T> {
        (self.generator)(size, seed)
    }
}

impl<T> Gen<T>
where
    T: 'static,
{
    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(move |_size, _seed| Tree::singleton(value.clone()))
    }

    /// Draw a single value, discarding its shrinks.
    pub fn sample(&self, size: Size, seed: Seed) -> T {
        self.generate(size, seed).value
    }

    /// Draw `count` values at sizes ramping from 0 to [`MAX_SIZE`].
    pub fn samples(&self, count: usize, seed: Seed) -> Vec<T> {
        seed.split_n(count)
            .into_iter()
            .enumerate()
            .map(|(i, seed)| self.sample(Size::new(i * MAX_SIZE / count.max(1)), seed))
            .collect()
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + Clone + 'static,
        U: 'static,
    {
        Gen::new(move |size, seed| self.generate(size, seed).map(f.clone()))
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The value drawn here decides which generator runs next. Shrinking
    /// the first value regenerates the second from the same seed.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Gen<U> + 'static,
        U: 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed| {
            let (outer_seed, inner_seed) = seed.split();
            let f = Rc::clone(&f);
            self.generate(size, outer_seed)
                .bind(move |value| f(value).generate(size, inner_seed))
        })
    }

    /// Pair with another generator; this one shrinks first.
    pub fn zip<U>(self, other: Gen<U>) -> Gen<(T, U)>
    where
        T: Clone,
        U: Clone + 'static,
    {
        Gen::new(move |size, seed| {
            let (left, right) = seed.split();
            self.generate(size, left).zip(other.generate(size, right))
        })
    }

    /// Build a generator from the current size.
    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Gen::new(move |size, seed| f(size).generate(size, seed))
    }

    /// Run with a fixed size regardless of what the driver asks for.
    pub fn resize(self, size: Size) -> Self {
        Gen::new(move |_size, seed| self.generate(size, seed))
    }

    /// Choose between generators by weight, shrinking towards earlier
    /// choices.
    ///
    /// Zero-weight choices are never drawn. Fails when no choice has a
    /// positive weight.
    pub fn frequency(choices: Vec<WeightedChoice<T>>) -> Result<Self> {
        let choices: Vec<WeightedChoice<T>> =
            choices.into_iter().filter(|c| c.weight > 0).collect();
        if choices.is_empty() {
            return Err(GenlabError::InvalidGenerator {
                message: "frequency needs at least one choice with positive weight".to_string(),
            });
        }

        let weights: Vec<u64> = choices.iter().map(|c| c.weight).collect();
        let total = weights
            .iter()
            .try_fold(0u64, |acc, &w| acc.checked_add(w))
            .ok_or_else(|| GenlabError::InvalidGenerator {
                message: "frequency weights overflow u64".to_string(),
            })?;
        let gens: Rc<Vec<Gen<T>>> = Rc::new(choices.into_iter().map(|c| c.gen).collect());

        Ok(Gen::new(move |size, seed| {
            let (pick_seed, value_seed) = seed.split();
            let (mut target, _) = pick_seed.next_bounded(total);
            let mut index = weights.len() - 1;
            for (i, &weight) in weights.iter().enumerate() {
                if target < weight {
                    index = i;
                    break;
                }
                target -= weight;
            }
            choose(&gens, index, size, value_seed)
        }))
    }

    /// Choose uniformly between generators, shrinking towards the first.
    pub fn one_of(gens: Vec<Gen<T>>) -> Result<Self> {
        if gens.is_empty() {
            return Err(GenlabError::InvalidGenerator {
                message: "one_of needs at least one generator".to_string(),
            });
        }
        let gens = Rc::new(gens);
        Ok(Gen::new(move |size, seed| {
            let (pick_seed, value_seed) = seed.split();
            let (index, _) = pick_seed.next_bounded(gens.len() as u64);
            choose(&gens, index as usize, size, value_seed)
        }))
    }

    /// Pick one of `values` uniformly, shrinking towards the first.
    pub fn element(values: Vec<T>) -> Result<Self>
    where
        T: Clone,
    {
        if values.is_empty() {
            return Err(GenlabError::InvalidGenerator {
                message: "element needs at least one value".to_string(),
            });
        }
        let values = Rc::new(values);
        let last = values.len() - 1;
        Ok(Gen::<usize>::from_range(Range::new(0, last)).map(move |i| values[i].clone()))
    }
}

/// Draw from `gens[index]`, with shrinks that retry earlier generators.
fn choose<T: 'static>(gens: &Rc<Vec<Gen<T>>>, index: usize, size: Size, seed: Seed) -> Tree<T> {
    let gens = Rc::clone(gens);
    Tree::unfold(index, |&i: &usize| {
        towards(0, i as i128)
            .into_iter()
            .map(|j| j as usize)
            .collect()
    })
    .bind(move |i| gens[i].generate(size, seed))
}

/// Union of two generators, picking each half the time.
///
/// Shrinking prefers the left operand. `a | b | c` nests, so `c` is drawn
/// half the time; use [`Gen::one_of`] for a flat uniform choice.
impl<T: 'static> BitOr for Gen<T> {
    type Output = Gen<T>;

    fn bitor(self, other: Gen<T>) -> Gen<T> {
        let gens = Rc::new(vec![self, other]);
        Gen::new(move |size, seed| {
            let (pick_seed, value_seed) = seed.split();
            let (index, _) = pick_seed.next_bounded(2);
            choose(&gens, index as usize, size, value_seed)
        })
    }
}

/// A generator with its relative weight, for [`Gen::frequency`].
pub struct WeightedChoice<T> {
    pub weight: u64,
    pub gen: Gen<T>,
}

impl<T> WeightedChoice<T> {
    pub fn new(weight: u64, gen: Gen<T>) -> Self {
        WeightedChoice { weight, gen }
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean; `true` shrinks to `false`.
    pub fn bool() -> Self {
        Gen::new(|_size, seed| {
            let (value, _new_seed) = seed.next_bool();
            if value {
                Tree::with_children(true, vec![Tree::singleton(false)])
            } else {
                Tree::singleton(false)
            }
        })
    }
}

fn integral<T: Integral>(range: Range<T>) -> Gen<T> {
    Gen::new(move |size, seed| {
        let (lo, hi) = range.bounds(size);
        let (lo, hi) = (lo.to_i128(), hi.to_i128());
        let span = (hi - lo) as u128 + 1;
        let offset = if span > u64::MAX as u128 {
            seed.next_u64().0 as i128
        } else {
            seed.next_bounded(span as u64).0 as i128
        };

        let origin = range.shrink_origin();
        Tree::unfold(T::from_i128(lo + offset), move |current: &T| {
            towards(origin, current.to_i128())
                .into_iter()
                .map(T::from_i128)
                .collect()
        })
    })
}

macro_rules! integral_generators {
    ($($t:ty),*) => {
        $(
            impl Gen<$t> {
                /// Generate a value within `range`, shrinking towards its origin.
                pub fn from_range(range: Range<$t>) -> Self {
                    integral(range)
                }

                /// Like `from_range`, but rejects inverted bounds.
                pub fn try_from_range(range: Range<$t>) -> Result<Self> {
                    range.validate()?;
                    Ok(integral(range))
                }

                /// Generate from the whole domain, widening with size.
                pub fn any() -> Self {
                    integral(Range::full())
                }
            }
        )*
    };
}

integral_generators!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Gen<i32> {
    /// Generate an integer in the given range.
    pub fn int_range(min: i32, max: i32) -> Self {
        Self::from_range(Range::new(min, max))
    }
}

/// Unicode scalar values exclude the 0x800 surrogate code points.
const SURROGATE_START: u32 = 0xD800;
const SURROGATE_COUNT: u32 = 0x800;
const SCALAR_COUNT: u32 = 0x11_0000 - SURROGATE_COUNT;

fn scalar_at(index: u32) -> char {
    let code = if index < SURROGATE_START {
        index
    } else {
        index + SURROGATE_COUNT
    };
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

impl Gen<char> {
    /// Characters between `lo` and `hi` inclusive, shrinking towards `lo`.
    pub fn char_range(lo: char, hi: char) -> Result<Self> {
        if lo > hi {
            return Err(GenlabError::InvalidGenerator {
                message: format!("char range {lo:?}..={hi:?} is empty"),
            });
        }
        Ok(Self::between(lo, hi))
    }

    fn between(lo: char, hi: char) -> Self {
        Gen::<u32>::from_range(Range::new(lo as u32, hi as u32)).map(|code| {
            char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
        })
    }

    pub fn ascii_lowercase() -> Self {
        Self::between('a', 'z')
    }

    /// `a-z` then `A-Z`, shrinking towards `a`.
    pub fn ascii_alpha() -> Self {
        Gen::<u8>::from_range(Range::new(0, 51)).map(|i| {
            if i < 26 {
                (b'a' + i) as char
            } else {
                (b'A' + i - 26) as char
            }
        })
    }

    /// Any Unicode scalar value, shrinking towards `a`.
    pub fn unicode() -> Self {
        Gen::<u32>::from_range(Range::from_origin('a' as u32, 0, SCALAR_COUNT - 1)).map(scalar_at)
    }
}

fn collect_string(chars: Vec<char>) -> String {
    chars.into_iter().collect()
}

impl Gen<String> {
    /// Strings whose length grows with size.
    pub fn string_of(chars: Gen<char>) -> Self {
        Gen::vec_of(chars).map(collect_string)
    }

    /// Strings of exactly `len` characters.
    pub fn exact(len: usize, chars: Gen<char>) -> Self {
        Gen::vec_exact(len, chars).map(collect_string)
    }

    /// Strings whose character count falls in `range`.
    pub fn with_range(range: Range<usize>, chars: Gen<char>) -> Result<Self> {
        Ok(Gen::vec_with_range(range, chars)?.map(collect_string))
    }

    pub fn ascii_alpha() -> Self {
        Self::string_of(Gen::<char>::ascii_alpha())
    }

    pub fn unicode() -> Self {
        Self::string_of(Gen::<char>::unicode())
    }
}

fn list<T: Clone + 'static>(
    element: &Gen<T>,
    len: usize,
    min_len: usize,
    size: Size,
    seed: Seed,
) -> Tree<Vec<T>> {
    let trees = seed
        .split_n(len)
        .into_iter()
        .map(|seed| element.generate(size, seed))
        .collect();
    Tree::interleave(trees, min_len)
}

impl<T> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    /// Lists of up to `size` elements.
    pub fn vec_of(element: Gen<T>) -> Self {
        Gen::new(move |size, seed| {
            let (length_seed, element_seed) = seed.split();
            let (len, _) = length_seed.next_bounded(size.get() as u64 + 1);
            list(&element, len as usize, 0, size, element_seed)
        })
    }

    /// Lists of exactly `len` elements; only the elements shrink.
    pub fn vec_exact(len: usize, element: Gen<T>) -> Self {
        Gen::new(move |size, seed| list(&element, len, len, size, seed))
    }

    /// Lists whose length falls in `range`. Shrinks never go below
    /// `range.min`. Fails when the bounds are contradictory.
    pub fn vec_with_range(range: Range<usize>, element: Gen<T>) -> Result<Self> {
        range.validate()?;
        Ok(Gen::new(move |size, seed| {
            let (length_seed, element_seed) = seed.split();
            let (lo, hi) = range.bounds(size);
            let (offset, _) = length_seed.next_bounded((hi - lo) as u64 + 1);
            list(&element, lo + offset as usize, range.min, size, element_seed)
        }))
    }
}

impl<A, B> Gen<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    pub fn tuple_of(first: Gen<A>, second: Gen<B>) -> Self {
        first.zip(second)
    }
}

impl<A, B, C> Gen<(A, B, C)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    pub fn tuple_of(first: Gen<A>, second: Gen<B>, third: Gen<C>) -> Self {
        first
            .zip(second.zip(third))
            .map(|(a, (b, c))| (a, b, c))
    }
}

impl<A, B, C, D> Gen<(A, B, C, D)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    D: Clone + 'static,
{
    pub fn tuple_of(first: Gen<A>, second: Gen<B>, third: Gen<C>, fourth: Gen<D>) -> Self {
        first
            .zip(second)
            .zip(third.zip(fourth))
            .map(|((a, b), (c, d))| (a, b, c, d))
    }
}
