//! `#[derive(Fact)]`: generates a fact schema and record decoding for a
//! struct with named fields.
//!
//! `String` fields are required text, `Option<String>` optional text. Any
//! other type is a nested fact, optional when wrapped in `Option`.
//!
//! ```ignore
//! #[derive(Fact)]
//! #[fact(name = "Name")]
//! struct PersonName {
//!     #[fact(normalized)]
//!     first: Option<String>,
//!     last: Option<String>,
//! }
//! ```

use syn::{parse_macro_input, DeriveInput};

mod error;
mod generate;

#[proc_macro_derive(Fact, attributes(fact))]
pub fn derive_fact(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    proc_macro::TokenStream::from(generate::generate(ast))
}
