use proc_macro2::{Span, TokenStream};
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Error, GenericParam, Generics, Path};

mod structs;
use structs::{derive_decode_struct, derive_encode_struct};

#[proc_macro_derive(Encode, attributes(serial_with))]
pub fn encode(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	derive(input, "Encode", derive_encode_struct).into()
}

#[proc_macro_derive(Decode, attributes(serial_with))]
pub fn decode(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	derive(input, "Decode", derive_decode_struct).into()
}

type DeriveStruct = fn(syn::DataStruct, syn::Ident, Generics) -> syn::Result<TokenStream>;

fn derive(input: DeriveInput, trait_name: &str, derive_struct: DeriveStruct) -> TokenStream {
	let result = match input.data {
		Data::Struct(data) => {
			let generics = add_trait_bounds(input.generics, trait_name);
			derive_struct(data, input.ident, generics)
		}
		// Only structs are records
		Data::Enum(_) | Data::Union(_) => Err(Error::new(
			input.ident.span(),
			format!("Deriving `{trait_name}` is only supported on structs"),
		)),
	};

	result.unwrap_or_else(|err| err.to_compile_error())
}

/// Add `T: ::serial_buffer::<trait_name>` bound to every type parameter
fn add_trait_bounds(mut generics: Generics, trait_name: &str) -> Generics {
	let trait_ident = syn::Ident::new(trait_name, Span::call_site());
	let trait_path: Path = parse_quote!(::serial_buffer::#trait_ident);

	for param in &mut generics.params {
		if let GenericParam::Type(type_param) = param {
			type_param.bounds.push(parse_quote!(#trait_path));
		}
	}
	generics
}

/// Get path from `#[serial_with(Path)]` attribute, if field has one
fn get_with(field: &syn::Field) -> syn::Result<Option<Path>> {
	let mut with: Option<Path> = None;
	for attr in &field.attrs {
		if !attr.path.is_ident("serial_with") {
			continue;
		}
		if with.is_some() {
			return Err(Error::new_spanned(
				attr,
				"Cannot have more than 1 `#[serial_with]` attribute on a field",
			));
		}
		let path = attr.parse_args::<Path>().map_err(|_| {
			Error::new_spanned(
				attr,
				"`#[serial_with]` needs a path e.g. `#[serial_with(ForeignTypeProxy)]`",
			)
		})?;
		with = Some(path);
	}
	Ok(with)
}
