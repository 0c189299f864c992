use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, LitStr};

pub fn derive_patch(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;
    let patch_name = parse_struct_attrs(input)?.unwrap_or_else(|| format_ident!("{}Patch", name));
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let generics = &input.generics;

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Patch derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Patch derive only supports structs",
            ));
        }
    };

    // Collect patchable fields (exclude #[patch(skip)])
    let mut patch_fields = Vec::with_capacity(fields.len());
    for field in fields {
        if has_patch_skip(&field.attrs)? {
            continue;
        }
        if let Some(ident) = &field.ident {
            patch_fields.push((ident.clone(), field.ty.clone()));
        }
    }

    let field_defs = patch_fields
        .iter()
        .map(|(n, ty)| quote! { pub #n: ::std::option::Option<#ty> });

    let apply_stmts = patch_fields.iter().map(|(n, _)| {
        quote! {
            if let ::std::option::Option::Some(value) = self.#n {
                target.#n = value;
            }
        }
    });

    let doc = format!("Partial update for [`{}`]. `None` fields are left untouched.", name);

    Ok(quote! {
        #[doc = #doc]
        #[derive(Clone, Debug, Default, PartialEq)]
        #vis struct #patch_name #generics #where_clause {
            #(#field_defs),*
        }

        impl #impl_generics entity_adapter::Patch<#name #ty_generics> for #patch_name #ty_generics #where_clause {
            fn apply(self, target: &mut #name #ty_generics) {
                #(#apply_stmts)*
            }
        }
    })
}

fn parse_struct_attrs(input: &DeriveInput) -> syn::Result<Option<syn::Ident>> {
    let mut custom_name = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("patch") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                custom_name = Some(value.parse::<syn::Ident>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported patch attribute, expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(custom_name)
}

fn has_patch_skip(attrs: &[syn::Attribute]) -> syn::Result<bool> {
    let mut found_skip = false;
    for attr in attrs {
        if !attr.path().is_ident("patch") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                found_skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported patch attribute, expected `skip`"))
            }
        })?;
    }
    Ok(found_skip)
}
