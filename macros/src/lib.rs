//! Derive macros for Composable Todo
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Classifies action enum variants as commands or events
//!
//! # Example
//!
//! ```ignore
//! use composable_todo_core::action::{Action as _, ActionKind};
//! use composable_todo_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[command]
//!     AddTodo { text: String },
//!
//!     #[event]
//!     TodoAdded { id: u64, text: String },
//! }
//!
//! let action = TodoAction::AddTodo { text: "test".into() };
//! assert!(action.is_command());
//! assert_eq!(action.kind(), ActionKind::Command);
//! assert_eq!(action.name(), "AddTodo");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// Derive macro for Action enums
///
/// Implements `composable_todo_core::action::Action` and adds inherent
/// `is_command()` / `is_event()` helpers.
///
/// # Attributes
///
/// - `#[command]` - Mark a variant as a command
/// - `#[event]` - Mark a variant as an event
///
/// Every variant must carry exactly one of the two. The following are
/// compile errors:
/// - Applying the derive to anything but an enum
/// - A variant with both `#[command]` and `#[event]`
/// - A variant with neither
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut kind_arms = Vec::with_capacity(data_enum.variants.len());
    let mut name_arms = Vec::with_capacity(data_enum.variants.len());

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        let kind = match (is_command, is_event) {
            (true, false) => quote! { ::composable_todo_core::action::ActionKind::Command },
            (false, true) => quote! { ::composable_todo_core::action::ActionKind::Event },
            (true, true) => {
                return syn::Error::new_spanned(
                    variant,
                    "Variant cannot be both #[command] and #[event]",
                )
                .to_compile_error()
                .into();
            },
            (false, false) => {
                return syn::Error::new_spanned(
                    variant,
                    "Variant must be marked #[command] or #[event]",
                )
                .to_compile_error()
                .into();
            },
        };

        let pattern = variant_pattern(variant);
        let variant_name = variant.ident.to_string();
        kind_arms.push(quote! { #pattern => #kind, });
        name_arms.push(quote! { #pattern => #variant_name, });
    }

    let expanded = quote! {
        impl #impl_generics ::composable_todo_core::action::Action for #name #ty_generics #where_clause {
            fn kind(&self) -> ::composable_todo_core::action::ActionKind {
                match self {
                    #(#kind_arms)*
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            pub fn is_command(&self) -> bool {
                ::composable_todo_core::action::Action::kind(self)
                    == ::composable_todo_core::action::ActionKind::Command
            }

            /// Returns true if this action is an event
            #[must_use]
            pub fn is_event(&self) -> bool {
                ::composable_todo_core::action::Action::kind(self)
                    == ::composable_todo_core::action::ActionKind::Event
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern for a variant that ignores its fields
fn variant_pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let ident = &variant.ident;
    match variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
