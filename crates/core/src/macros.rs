// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for reducing boilerplate.
//!
//! - [`simple_display!`]: `Display` impl mapping enum variants to string literals
//! - [`setters!`]: chained setters for optional request fields

/// Generate a `Display` impl that maps enum variants to string literals.
///
/// Unit variants match directly; data-carrying variants use `(..)` to ignore fields.
///
/// ```ignore
/// crate::simple_display! {
///     MyEnum {
///         Foo => "foo",
///         Bar(..) => "bar",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($ignore:tt)* ))? => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant $(( $($ignore)* ))? => $str, )+
                })
            }
        }
    };
}

/// Generate builder-style setters for `Option` fields inside an `impl` block.
///
/// Each setter takes `impl Into<T>` and stores `Some(v.into())`.
///
/// ```ignore
/// impl GeneratorRun {
///     lc_core::setters! {
///         option { arguments: Vec<String>, environment: String }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (option { $( $field:ident : $ty:ty ),* $(,)? }) => {
        $(
            pub fn $field(mut self, v: impl Into<$ty>) -> Self {
                self.$field = Some(v.into());
                self
            }
        )*
    };
}
