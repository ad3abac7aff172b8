use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{parse_macro_input, FnArg, Ident, ItemFn, LitStr, Pat, PatType, Type};

fn is_f64(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path.path.is_ident("f64"),
        _ => false,
    }
}

/// Declares a builtin math function.
///
/// The annotated function is kept as written. Next to it the macro emits a
/// `static` registry entry named after the function in upper case, e.g.
/// `fn atan2(y: f64, x: f64) -> f64` becomes `ATAN2: crate::registry::Builtin`.
/// The entry carries the public name (`name = "..."`, defaulting to the Rust
/// name), the parameter names and an adapter taking `&[f64]`. The return
/// value is converted with `f64::from`, so integral and boolean results are
/// widened to `f64`.
#[proc_macro_attribute]
pub fn builtin(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut public_name: Option<LitStr> = None;
    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            public_name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported builtin property, expected `name`"))
        }
    });
    parse_macro_input!(attr with attr_parser);

    let input = parse_macro_input!(item as ItemFn);
    let fn_name = &input.sig.ident;
    let public_name =
        public_name.unwrap_or_else(|| LitStr::new(&fn_name.to_string(), fn_name.span()));
    let static_name = Ident::new(&fn_name.to_string().to_uppercase(), Span::call_site());

    let mut param_names = Vec::new();
    let mut arg_reads = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let (pat, ty) = match arg {
            FnArg::Typed(PatType { pat, ty, .. }) => (pat, ty),
            FnArg::Receiver(receiver) => {
                return syn::Error::new_spanned(receiver, "builtins cannot take `self`")
                    .to_compile_error()
                    .into();
            }
        };

        let arg_name = match **pat {
            Pat::Ident(ref ident) => &ident.ident,
            _ => {
                return syn::Error::new_spanned(pat, "builtin parameters must be plain names")
                    .to_compile_error()
                    .into();
            }
        };

        if !is_f64(ty) {
            return syn::Error::new_spanned(ty, "builtin parameters must be f64")
                .to_compile_error()
                .into();
        }

        param_names.push(LitStr::new(&arg_name.to_string(), arg_name.span()));
        arg_reads.push(quote! { args[#i] });
    }

    let adapter = format_ident!("__{}_adapter", fn_name);

    let expanded = quote! {
        #input

        pub static #static_name: crate::registry::Builtin = crate::registry::Builtin {
            name: #public_name,
            params: &[#(#param_names),*],
            func: {
                fn #adapter(args: &[f64]) -> f64 {
                    f64::from(#fn_name(#(#arg_reads),*))
                }
                #adapter
            },
        };
    };

    TokenStream::from(expanded)
}
