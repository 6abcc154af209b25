use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, DeriveError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DeriveError {
    NotAStruct,
    UnnamedFields,
    UnknownOption(String),
    NormalizedNested(String),
    Other(String),
}

impl Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DeriveError::NotAStruct => write!(f, "Fact can only be derived for structs"),
            DeriveError::UnnamedFields => {
                write!(f, "Fact can only be derived for structs with named fields")
            }
            DeriveError::UnknownOption(ref s) => write!(f, "Unknown fact option: {}", s),
            DeriveError::NormalizedNested(ref s) => {
                write!(f, "Nested fact field '{}' cannot be normalized", s)
            }
            DeriveError::Other(ref s) => write!(f, "Derive error: {}", s),
        }
    }
}

impl From<syn::Error> for DeriveError {
    fn from(e: syn::Error) -> DeriveError {
        DeriveError::Other(format!("syn error: {}", e))
    }
}
