use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Data,
    DeriveInput,
    Expr,
    ExprArray,
    Fields,
    Ident,
    Result,
    Token,
};

/// One `tag = value` pair of the `error` attribute.
enum Tag {
    Message(Expr),
    Labels(ExprArray),
    Help(Expr),
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;

        match name.to_string().as_str() {
            "message" => Ok(Tag::Message(input.parse()?)),
            "labels" => Ok(Tag::Labels(input.parse()?)),
            "help" => Ok(Tag::Help(input.parse()?)),
            other => Err(syn::Error::new_spanned(
                &name,
                format!("unknown tag `{}`, expected `message`, `labels` or `help`", other),
            )),
        }
    }
}

/// The contents of the `#[error(...)]` attribute.
struct ErrorAttr {
    message: Expr,
    labels: Vec<Expr>,
    help: Option<Expr>,
}

impl ErrorAttr {
    /// Finds and parses the `error` attribute among the attributes of the item called `name`.
    fn from_attrs(name: &Ident, attrs: &[Attribute]) -> Result<Self> {
        let attr = attrs.iter()
            .find(|attr| attr.path().is_ident("error"))
            .ok_or_else(|| syn::Error::new_spanned(name, "missing `#[error(...)]` attribute"))?;
        let tags = attr.parse_args_with(Punctuated::<Tag, Token![,]>::parse_terminated)?;

        let (mut message, mut labels, mut help) = (None, Vec::new(), None);
        for tag in tags {
            match tag {
                Tag::Message(expr) => message = Some(expr),
                Tag::Labels(array) => labels = array.elems.into_iter().collect(),
                Tag::Help(expr) => help = Some(expr),
            }
        }

        let message = message
            .ok_or_else(|| syn::Error::new_spanned(attr, "missing `message` tag in `error` attribute"))?;
        Ok(Self { message, labels, help })
    }
}

/// A struct deriving `ErrorKind`.
pub struct ErrorKindImpl {
    name: Ident,
    fields: Fields,
    attr: ErrorAttr,
}

impl ErrorKindImpl {
    pub fn new(input: DeriveInput) -> Result<Self> {
        let Data::Struct(data) = input.data else {
            return Err(syn::Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs"));
        };
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(&input.generics, "`ErrorKind` cannot be derived for generic structs"));
        }
        if let Fields::Unnamed(_) = data.fields {
            return Err(syn::Error::new_spanned(&input.ident, "`ErrorKind` cannot be derived for tuple structs"));
        }

        let attr = ErrorAttr::from_attrs(&input.ident, &input.attrs)?;
        Ok(Self { name: input.ident, fields: data.fields, attr })
    }

    /// Brings the named fields of the struct into scope for the tag expressions.
    fn destructure(&self) -> TokenStream2 {
        let names = self.fields.iter().filter_map(|field| field.ident.as_ref());
        quote! {
            #[allow(unused_variables)]
            let Self { #(#names),* } = self;
        }
    }

    /// Attaches one label per span. Without a `labels` tag, every span is marked without text.
    fn labels(&self) -> TokenStream2 {
        if self.attr.labels.is_empty() {
            return quote! {
                for span in spans {
                    builder.add_label(
                        ariadne::Label::new((src_id, span.clone())).with_color(symdiff_error::EXPR),
                    );
                }
            };
        }

        let labels = self.attr.labels.iter().enumerate().map(|(i, label)| quote! {
            if let Some(span) = spans.get(#i) {
                builder.add_label(
                    ariadne::Label::new((src_id, span.clone()))
                        .with_color(symdiff_error::EXPR)
                        .with_message(#label),
                );
            }
        });
        quote! { #(#labels)* }
    }
}

impl ToTokens for ErrorKindImpl {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let name = &self.name;
        let destructure = self.destructure();
        let message = &self.attr.message;
        let labels = self.labels();
        let help = self.attr.help.as_ref().map(|help| quote! { builder.set_help(#help); });

        tokens.extend(quote! {
            impl ErrorKind for #name {
                fn as_any(&self) -> &dyn std::any::Any {
                    self
                }

                fn build_report<'a>(
                    &self,
                    src_id: &'a str,
                    spans: &[std::ops::Range<usize>],
                ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                    #destructure

                    let offset = spans.first().map_or(0, |span| span.start);
                    let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                        .with_message(#message);
                    #labels
                    #help
                    builder.finish()
                }
            }
        });
    }
}
