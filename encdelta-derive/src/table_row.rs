use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Ident};

pub fn derive(tokens: proc_macro::TokenStream) -> TokenStream {
    let DeriveInput { ident, data, attrs, .. } = syn::parse(tokens).unwrap();

    match data {
        Data::Struct(_) => {}
        Data::Enum(_) => panic!("TableRow can only be derived for structs"),
        Data::Union(_) => panic!("TableRow can only be derived for structs"),
    }

    let kind = table_attr(&ident, &attrs);

    quote! {
        impl crate::token::TableRow for #ident {
            const KIND: crate::token::TableKind = crate::token::TableKind::#kind;
        }
    }
}

fn table_attr(ident: &Ident, attrs: &[syn::Attribute]) -> Ident {
    for attr in attrs {
        if attr.path().is_ident("table") {
            return attr.parse_args::<Ident>().unwrap_or_else(|_| {
                panic!("expected #[table(TableKind)] on `{ident}`")
            });
        }
    }
    panic!("`{ident}` is missing a #[table(..)] attribute");
}
