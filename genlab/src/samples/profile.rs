use super::text::text_char;
use crate::{Gen, Generate, Range};
use log::trace;

pub const NAME_MAX_CHARS: usize = 10;
pub const AGE_MIN: u8 = 1;
pub const AGE_MAX: u8 = 150;
/// Bio length per name character in [`profiles`].
pub const BIO_CHARS_PER_NAME_CHAR: usize = 35;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Generate)]
pub struct Profile {
    #[gen(with = "name")]
    pub name: String,
    #[gen(range(AGE_MIN, AGE_MAX))]
    pub age: u8,
    #[gen(with = "bio")]
    pub bio: String,
}

/// Letters only, at most [`NAME_MAX_CHARS`] of them.
pub fn name() -> Gen<String> {
    Gen::<usize>::from_range(Range::linear(0, NAME_MAX_CHARS))
        .bind(|len| Gen::<String>::exact(len, Gen::<char>::ascii_alpha()))
}

pub fn bio() -> Gen<String> {
    Gen::<String>::string_of(text_char())
}

/// Every field drawn on its own.
pub fn profile() -> Gen<Profile> {
    Profile::generate()
}

/// The bio length follows the drawn name: `35 × name length` characters.
///
/// Shrinking the name regenerates a bio of the matching length.
pub fn profiles() -> Gen<Profile> {
    name().bind(|name| {
        let bio_len = BIO_CHARS_PER_NAME_CHAR * name.chars().count();
        trace!("drawing a {bio_len} character bio for {name:?}");

        let age = Gen::<u8>::from_range(Range::new(AGE_MIN, AGE_MAX));
        let bio = Gen::<String>::exact(bio_len, text_char());
        age.zip(bio).map(move |(age, bio)| Profile {
            name: name.clone(),
            age,
            bio,
        })
    })
}
