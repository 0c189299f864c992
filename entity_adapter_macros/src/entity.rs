use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

pub fn derive_entity(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract the field marked with #[entity(id)] or default to "id"
    let (id_ident, id_ty) = extract_id_field(input)?.ok_or_else(|| {
        syn::Error::new_spanned(
            name,
            "Entity derive: no field marked with #[entity(id)] and no field named `id`",
        )
    })?;

    Ok(quote! {
        impl #impl_generics entity_adapter::Entity for #name #ty_generics #where_clause {
            type Id = #id_ty;

            fn id(&self) -> Self::Id {
                ::std::clone::Clone::clone(&self.#id_ident)
            }
        }
    })
}

fn extract_id_field(input: &DeriveInput) -> syn::Result<Option<(syn::Ident, syn::Type)>> {
    let Data::Struct(data_struct) = &input.data else {
        return Ok(None);
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Ok(None);
    };

    for field in &fields.named {
        for attr in &field.attrs {
            if !attr.path().is_ident("entity") {
                continue;
            }

            let mut is_id = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    is_id = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported entity attribute, expected `id`"))
                }
            })?;
            if is_id {
                return Ok(field.ident.clone().map(|ident| (ident, field.ty.clone())));
            }
        }
    }

    // Default: look for a field named "id"
    Ok(fields.named.iter().find_map(|field| match &field.ident {
        Some(ident) if ident == "id" => Some((ident.clone(), field.ty.clone())),
        _ => None,
    }))
}
