use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericArgument, Generics, Ident, Lit, Meta, NestedMeta,
    PathArguments, PathSegment, Type,
};

use crate::error::{DeriveError, Result};

const FACT_ATTR: &str = "fact";
const NAME_OPTION: &str = "name";
const NORMALIZED_OPTION: &str = "normalized";

/// How a struct field is stored in a record.
enum FieldKind {
    Text,
    Nested(Type),
}

struct FieldDef {
    ident: Ident,
    name: String,
    kind: FieldKind,
    required: bool,
    normalized: bool,
}

pub fn generate(ast: DeriveInput) -> TokenStream {
    match expand(&ast) {
        Ok(ts) => ts,
        Err(e) => {
            let msg = e.to_string();
            quote_spanned! { ast.ident.span() =>
                compile_error!(#msg);
            }
        }
    }
}

fn expand(ast: &DeriveInput) -> Result<TokenStream> {
    let schema_name = schema_name(ast)?;
    let fields = fields_from_ast(ast)?;
    Ok(generate_impl(&ast.ident, &ast.generics, &schema_name, &fields))
}

/// Collect the nested options of every `#[fact(...)]` attribute.
fn fact_options(attrs: &[Attribute]) -> Result<Vec<NestedMeta>> {
    let mut options = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path.is_ident(FACT_ATTR)) {
        match attr.parse_meta()? {
            Meta::List(list) => options.extend(list.nested),
            _ => return Err(DeriveError::Other("expected #[fact(...)]".to_owned())),
        }
    }
    Ok(options)
}

/// The schema name: the struct name unless overridden with
/// `#[fact(name = "...")]`.
fn schema_name(ast: &DeriveInput) -> Result<String> {
    let mut name = ast.ident.to_string();
    for option in fact_options(&ast.attrs)? {
        match option {
            NestedMeta::Meta(Meta::NameValue(val)) if val.path.is_ident(NAME_OPTION) => {
                match val.lit {
                    Lit::Str(s) => name = s.value(),
                    _ => return Err(DeriveError::Other("fact name not a string".to_owned())),
                }
            }
            other => return Err(DeriveError::UnknownOption(quote!(#other).to_string())),
        }
    }
    Ok(name)
}

fn fields_from_ast(ast: &DeriveInput) -> Result<Vec<FieldDef>> {
    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Err(DeriveError::UnnamedFields),
        },
        _ => return Err(DeriveError::NotAStruct),
    };

    fields
        .iter()
        .map(|field| {
            let ident = field.ident.clone().ok_or(DeriveError::UnnamedFields)?;
            let name = ident.to_string().trim_start_matches("r#").to_owned();

            let mut normalized = false;
            for option in fact_options(&field.attrs)? {
                match option {
                    NestedMeta::Meta(Meta::Path(path)) if path.is_ident(NORMALIZED_OPTION) => {
                        normalized = true
                    }
                    other => {
                        return Err(DeriveError::UnknownOption(quote!(#other).to_string()))
                    }
                }
            }

            let (ty, required) = match option_inner(&field.ty) {
                Some(inner) => (inner, false),
                None => (&field.ty, true),
            };
            let kind = if is_string(ty) {
                FieldKind::Text
            } else if normalized {
                return Err(DeriveError::NormalizedNested(name));
            } else {
                FieldKind::Nested(ty.clone())
            };

            Ok(FieldDef {
                ident,
                name,
                kind,
                required,
                normalized,
            })
        })
        .collect()
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn is_string(ty: &Type) -> bool {
    matches!(last_segment(ty), Some(seg) if seg.ident == "String" && seg.arguments.is_empty())
}

/// The `T` of an `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let seg = last_segment(ty)?;
    if seg.ident != "Option" {
        return None;
    }
    match &seg.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// Generate the `rules::Fact` implementation.
fn generate_impl(
    name: &Ident,
    generics: &Generics,
    schema_name: &str,
    fields: &[FieldDef],
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let specs = fields.iter().map(generate_field_spec);
    let inits = fields.iter().map(|field| generate_field_init(schema_name, field));

    quote! {
        impl #impl_generics ::rules::Fact for #name #ty_generics #where_clause {
            fn schema() -> ::rules::Schema {
                ::rules::Schema::new(#schema_name)
                    #( .with_field(#specs) )*
            }

            fn from_record(record: &::rules::Record) -> ::std::result::Result<Self, ::rules::InterpretError> {
                ::std::result::Result::Ok(#name {
                    #( #inits ),*
                })
            }
        }
    }
}

fn generate_field_spec(field: &FieldDef) -> TokenStream {
    let name = &field.name;
    let base = match field.kind {
        FieldKind::Text => quote! { ::rules::FieldSpec::text(#name) },
        FieldKind::Nested(_) => quote! { ::rules::FieldSpec::nested(#name) },
    };
    let normalized = if field.normalized {
        quote! { .normalized() }
    } else {
        quote! {}
    };
    let required = if field.required {
        quote! { .required() }
    } else {
        quote! {}
    };
    quote! { #base #normalized #required }
}

fn generate_field_init(schema_name: &str, field: &FieldDef) -> TokenStream {
    let ident = &field.ident;
    let name = &field.name;
    let missing = quote! {
        || ::rules::InterpretError::MissingRequiredField {
            fact: ::std::borrow::ToOwned::to_owned(#schema_name),
            field: ::std::borrow::ToOwned::to_owned(#name),
        }
    };

    let value = match (&field.kind, field.required) {
        (FieldKind::Text, false) => quote! {
            record.text(#name).map(::std::borrow::ToOwned::to_owned)
        },
        (FieldKind::Text, true) => quote! {
            record.text(#name).map(::std::borrow::ToOwned::to_owned).ok_or_else(#missing)?
        },
        (FieldKind::Nested(ty), false) => quote! {
            record.record(#name).map(<#ty as ::rules::Fact>::from_record).transpose()?
        },
        (FieldKind::Nested(ty), true) => quote! {
            <#ty as ::rules::Fact>::from_record(record.record(#name).ok_or_else(#missing)?)?
        },
    };
    quote! { #ident: #value }
}
