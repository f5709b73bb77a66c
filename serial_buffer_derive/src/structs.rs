use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Field, Fields, Generics, Ident, Index};

use crate::get_with;

pub fn derive_encode_struct(
	data: DataStruct,
	ident: Ident,
	generics: Generics,
) -> syn::Result<TokenStream> {
	// Fields are encoded in declaration order
	let field_stmts = data
		.fields
		.iter()
		.enumerate()
		.map(|(index, field)| {
			let accessor = match &field.ident {
				Some(field_name) => quote! {#field_name},
				None => {
					let index = Index::from(index);
					quote! {#index}
				}
			};
			get_encode_stmt(accessor, field)
		})
		.collect::<syn::Result<Vec<_>>>()?;

	let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

	// `buffer` is unused for structs without fields
	Ok(quote! {
		#[automatically_derived]
		impl #impl_generics ::serial_buffer::Encode for #ident #type_generics #where_clause {
			#[allow(unused_variables)]
			fn encode_into(&self, buffer: &mut ::serial_buffer::SerialBuffer) {
				#(#field_stmts)*
			}
		}
	})
}

fn get_encode_stmt(accessor: TokenStream, field: &Field) -> syn::Result<TokenStream> {
	let ty = &field.ty;
	let stmt = match get_with(field)? {
		Some(with) => {
			quote_spanned! {field.span()=>
				<#with as ::serial_buffer::EncodeWith<#ty>>::encode_with(&self.#accessor, buffer);
			}
		}
		None => {
			quote_spanned! {field.span()=>
				<#ty as ::serial_buffer::Encode>::encode_into(&self.#accessor, buffer);
			}
		}
	};
	Ok(stmt)
}

pub fn derive_decode_struct(
	data: DataStruct,
	ident: Ident,
	generics: Generics,
) -> syn::Result<TokenStream> {
	// Struct expressions evaluate their fields in the order written, so
	// listing fields in declaration order reads them in declaration order
	let construct = match &data.fields {
		Fields::Named(fields) => {
			let inits = fields
				.named
				.iter()
				.map(|field| {
					let field_name = field.ident.as_ref().expect("Missing field name");
					let expr = get_decode_expr(field)?;
					Ok(quote! {#field_name: #expr})
				})
				.collect::<syn::Result<Vec<_>>>()?;
			quote! { Self { #(#inits),* } }
		}
		Fields::Unnamed(fields) => {
			let exprs = fields
				.unnamed
				.iter()
				.map(get_decode_expr)
				.collect::<syn::Result<Vec<_>>>()?;
			quote! { Self(#(#exprs),*) }
		}
		Fields::Unit => quote! { Self },
	};

	let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

	Ok(quote! {
		#[automatically_derived]
		impl #impl_generics ::serial_buffer::Decode for #ident #type_generics #where_clause {
			#[allow(unused_variables)]
			fn decode_from(
				buffer: &mut ::serial_buffer::SerialBuffer
			) -> ::serial_buffer::Result<Self> {
				::core::result::Result::Ok(#construct)
			}
		}
	})
}

fn get_decode_expr(field: &Field) -> syn::Result<TokenStream> {
	let ty = &field.ty;
	let expr = match get_with(field)? {
		Some(with) => {
			quote_spanned! {field.span()=>
				<#with as ::serial_buffer::DecodeWith<#ty>>::decode_with(buffer)?
			}
		}
		None => {
			quote_spanned! {field.span()=>
				<#ty as ::serial_buffer::Decode>::decode_from(buffer)?
			}
		}
	};
	Ok(expr)
}
