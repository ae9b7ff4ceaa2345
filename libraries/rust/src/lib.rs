//! Stock quotes and anonymized ticker likes.

/// Stock checker schema module
pub mod schema;

/// Stock checker anonymizer module
pub mod anonymizer;

#[cfg(feature = "quotes")]
/// Stock checker quotes module
pub mod quotes;

#[cfg(feature = "likes")]
/// Stock checker likes module
pub mod likes;
