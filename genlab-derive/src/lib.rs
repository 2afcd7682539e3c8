//! Derive macros for genlab generators.
//!
//! `#[derive(Generate)]` adds an associated `generate()` function returning a
//! `genlab::Gen<Self>` that draws every field independently. Fields are
//! chained with `bind`, so a failing record shrinks one field at a time.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, Field, Fields, GenericArgument, Ident,
    LitStr, PathArguments, Token, Type,
};

/// Derive an independent-field generator.
///
/// Field generators default by type: `bool`, `char`, `String`, integers in
/// `0..=100`, `Vec<T>` of the element default, and `T::generate()` for
/// anything else. Override per field with:
///
/// - `#[gen(range(lo, hi))]` for an integer field drawn uniformly from `lo..=hi`
/// - `#[gen(with = "path::to::fn")]` for a `fn() -> Gen<FieldType>`
///
/// Generic types are rejected: there is no way to pick a generator for a
/// type parameter. Write `generate()` by hand for those.
///
/// # Example
///
/// ```rust,ignore
/// use genlab::Generate;
///
/// #[derive(Generate, Debug, Clone)]
/// struct Reading {
///     #[gen(range(-40, 60))]
///     celsius: i16,
///     station: String,
/// }
///
/// let gen = Reading::generate();
/// ```
#[proc_macro_derive(Generate, attributes(gen))]
pub fn derive_generate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Generate cannot be derived for generic types; write `generate()` by hand",
        ));
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let generator_impl = match &input.data {
        Data::Struct(data) => fields_generator(&data.fields, quote! { Self })?,
        Data::Enum(data) => {
            let variants = data
                .variants
                .iter()
                .map(|variant| {
                    let ident = &variant.ident;
                    fields_generator(&variant.fields, quote! { Self::#ident })
                })
                .collect::<Result<Vec<_>, syn::Error>>()?;

            if variants.is_empty() {
                return Err(syn::Error::new_spanned(
                    input,
                    "Generate cannot be derived for an enum without variants",
                ));
            }
            let last = variants.len() - 1;

            // The variant index shrinks towards the first variant.
            quote! {
                {
                    let variants: ::std::vec::Vec<::genlab::Gen<Self>> = ::std::vec![#(#variants),*];
                    ::genlab::Gen::<usize>::from_range(::genlab::Range::new(0, #last))
                        .bind(move |index| ::core::clone::Clone::clone(&variants[index]))
                }
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Generate derive macro does not support unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Generator drawing every field independently.
            pub fn generate() -> ::genlab::Gen<Self> {
                #generator_impl
            }
        }
    })
}

/// A generator for one constructor (`Self`, `Self::Variant`).
fn fields_generator(fields: &Fields, constructor: TokenStream2) -> Result<TokenStream2, syn::Error> {
    let members: Vec<&Field> = fields.iter().collect();
    let generators = members
        .iter()
        .map(|field| field_generator(field))
        .collect::<Result<Vec<_>, syn::Error>>()?;

    let gen_vars: Vec<Ident> = (0..members.len()).map(|i| numbered("gen", i)).collect();
    let field_vars: Vec<Ident> = (0..members.len()).map(|i| numbered("field", i)).collect();

    let build = match fields {
        Fields::Named(_) => {
            let names = members.iter().map(|field| &field.ident);
            quote! { #constructor { #(#names: ::core::clone::Clone::clone(&#field_vars)),* } }
        }
        Fields::Unnamed(_) => {
            quote! { #constructor(#(::core::clone::Clone::clone(&#field_vars)),*) }
        }
        Fields::Unit => quote! { #constructor },
    };

    let chain = bind_chain(0, &gen_vars, &field_vars, &build);

    Ok(quote! {
        {
            #(let #gen_vars = #generators;)*
            #chain
        }
    })
}

/// Nest one `bind` per field, re-cloning captured state at every level so
/// each closure stays `Fn`.
fn bind_chain(
    index: usize,
    gen_vars: &[Ident],
    field_vars: &[Ident],
    build: &TokenStream2,
) -> TokenStream2 {
    if index == gen_vars.len() {
        return quote! { ::genlab::Gen::constant(#build) };
    }

    let drawn = &field_vars[..index];
    let pending = &gen_vars[index + 1..];
    let current_gen = &gen_vars[index];
    let current_field = &field_vars[index];
    let rest = bind_chain(index + 1, gen_vars, field_vars, build);

    quote! {
        {
            #(let #drawn = ::core::clone::Clone::clone(&#drawn);)*
            #(let #pending = ::core::clone::Clone::clone(&#pending);)*
            ::core::clone::Clone::clone(&#current_gen).bind(move |#current_field| #rest)
        }
    }
}

fn numbered(prefix: &str, index: usize) -> Ident {
    Ident::new(&format!("{prefix}_{index}"), Span::call_site())
}

enum FieldOverride {
    Range(Expr, Expr),
    With(syn::Path),
}

fn field_override(attrs: &[Attribute]) -> Result<Option<FieldOverride>, syn::Error> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("gen")) {
        attr.parse_nested_meta(|meta| {
            if found.is_some() {
                return Err(meta.error("only one generator override per field"));
            }
            if meta.path.is_ident("range") {
                let content;
                syn::parenthesized!(content in meta.input);
                let lo: Expr = content.parse()?;
                content.parse::<Token![,]>()?;
                let hi: Expr = content.parse()?;
                found = Some(FieldOverride::Range(lo, hi));
                Ok(())
            } else if meta.path.is_ident("with") {
                let path: LitStr = meta.value()?.parse()?;
                found = Some(FieldOverride::With(path.parse()?));
                Ok(())
            } else {
                Err(meta.error("expected `range(lo, hi)` or `with = \"path\"`"))
            }
        })?;
    }
    Ok(found)
}

fn field_generator(field: &Field) -> Result<TokenStream2, syn::Error> {
    let ty = &field.ty;
    match field_override(&field.attrs)? {
        Some(FieldOverride::Range(lo, hi)) => Ok(quote! {
            ::genlab::Gen::<#ty>::from_range(::genlab::Range::new(#lo, #hi))
        }),
        Some(FieldOverride::With(path)) => Ok(quote! { #path() }),
        None => Ok(default_generator(ty)),
    }
}

fn default_generator(ty: &Type) -> TokenStream2 {
    let Type::Path(type_path) = ty else {
        return quote! { <#ty>::generate() };
    };
    let Some(segment) = type_path.path.segments.last() else {
        return quote! { <#ty>::generate() };
    };

    match segment.ident.to_string().as_str() {
        "bool" => quote! { ::genlab::Gen::bool() },
        "char" => quote! { ::genlab::Gen::<char>::ascii_alpha() },
        "String" => quote! { ::genlab::Gen::<String>::ascii_alpha() },
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            quote! { ::genlab::Gen::<#ty>::from_range(::genlab::Range::new(0, 100)) }
        }
        "Vec" => match &segment.arguments {
            PathArguments::AngleBracketed(args) => match args.args.first() {
                Some(GenericArgument::Type(element)) => {
                    let element = default_generator(element);
                    quote! { ::genlab::Gen::vec_of(#element) }
                }
                _ => quote! { <#ty>::generate() },
            },
            _ => quote! { <#ty>::generate() },
        },
        _ => quote! { <#ty>::generate() },
    }
}
