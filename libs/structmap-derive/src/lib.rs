use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Generics, LitStr};

/// Derive macro for runtime introspection.
///
/// Generates `structmap::Reflect` (and `structmap::Struct` for named
/// structs) so the type can be a source or destination of `convert`.
///
/// - Struct with named fields: a structure. Fields are correlated by name.
/// - Tuple struct with a single field: a named alias of that field's type,
///   transparently convertible to and from it.
///
/// Field attributes:
/// - `#[structmap(rename = "...")]`: correlate under a different name.
/// - `#[structmap(skip)]`: hide the field from conversion.
///
/// Every field type must implement `Reflect`. Types used behind `Option`
/// must also implement `Default`.
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect, Default)]
/// pub struct UserEntity {
///     pub id: Option<i64>,
///
///     #[structmap(rename = "first_name")]
///     pub name: Option<String>,
///
///     #[structmap(skip)]
///     pub cache_key: u64,
/// }
///
/// #[derive(Reflect, Default)]
/// pub struct Uuid(String);
/// ```
#[proc_macro_derive(Reflect, attributes(structmap))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Reflect only supports structs",
            ))
        }
    };

    let generics = with_reflect_bounds(&input.generics, &data.fields);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = match &data.fields {
        Fields::Named(fields) => {
            let mut field_tokens = Vec::new();
            let mut field_mut_tokens = Vec::new();

            for field in &fields.named {
                let field_name = field.ident.as_ref().ok_or_else(|| {
                    syn::Error::new_spanned(field, "expected named field")
                })?;

                // Parse #[structmap(...)] attribute.
                let mut rename: Option<String> = None;
                let mut skip = false;

                for attr in &field.attrs {
                    if !attr.path().is_ident("structmap") {
                        continue;
                    }
                    attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("rename") {
                            let value: LitStr = meta.value()?.parse()?;
                            rename = Some(value.value());
                            Ok(())
                        } else if meta.path.is_ident("skip") {
                            skip = true;
                            Ok(())
                        } else {
                            Err(meta.error("unknown structmap attribute (expected `rename` or `skip`)"))
                        }
                    })?;
                }

                if skip {
                    continue;
                }

                let key = rename.unwrap_or_else(|| unraw(&field_name.to_string()));
                field_tokens.push(quote! {
                    ::structmap::Field::new(#key, &self.#field_name)
                });
                field_mut_tokens.push(quote! {
                    #key => ::core::option::Option::Some(&mut self.#field_name as &mut dyn ::structmap::Reflect),
                });
            }

            quote! {
                impl #impl_generics ::structmap::Reflect for #name #ty_generics #where_clause {
                    fn type_of() -> ::structmap::Type {
                        ::structmap::Type::structure::<Self>()
                    }

                    fn ty(&self) -> ::structmap::Type {
                        <Self as ::structmap::Reflect>::type_of()
                    }

                    fn value(&self) -> ::structmap::Value<'_> {
                        ::structmap::Value::Struct(self)
                    }

                    fn value_mut(&mut self) -> ::structmap::ValueMut<'_> {
                        ::structmap::ValueMut::Struct(self)
                    }
                }

                impl #impl_generics ::structmap::Struct for #name #ty_generics #where_clause {
                    fn fields(&self) -> ::std::vec::Vec<::structmap::Field<'_>> {
                        ::std::vec![
                            #(#field_tokens),*
                        ]
                    }

                    fn field_mut(
                        &mut self,
                        __name: &str,
                    ) -> ::core::option::Option<&mut dyn ::structmap::Reflect> {
                        match __name {
                            #(#field_mut_tokens)*
                            _ => ::core::option::Option::None,
                        }
                    }
                }
            }
        }
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let inner = &fields.unnamed[0].ty;
            quote! {
                impl #impl_generics ::structmap::Reflect for #name #ty_generics #where_clause {
                    fn type_of() -> ::structmap::Type {
                        ::structmap::Type::alias::<Self, #inner>()
                    }

                    fn ty(&self) -> ::structmap::Type {
                        <Self as ::structmap::Reflect>::type_of()
                    }

                    fn value(&self) -> ::structmap::Value<'_> {
                        ::structmap::Reflect::value(&self.0)
                    }

                    fn value_mut(&mut self) -> ::structmap::ValueMut<'_> {
                        ::structmap::Reflect::value_mut(&mut self.0)
                    }
                }
            }
        }
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Reflect only supports structs with named fields or single-field tuple structs",
            ))
        }
    };

    Ok(TokenStream::from(expanded))
}

/// Require `Reflect` of every type parameter and, for generic structs, of
/// every field type (`Vec<T>` needs more than `T: Reflect`).
fn with_reflect_bounds(generics: &Generics, fields: &Fields) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    if params.is_empty() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::structmap::Reflect));
    }
    for field in fields {
        let ty = &field.ty;
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::structmap::Reflect));
    }
    generics
}

/// `r#type` correlates as `type`.
fn unraw(name: &str) -> String {
    name.strip_prefix("r#").unwrap_or(name).to_string()
}
