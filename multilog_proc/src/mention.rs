// SPDX-License-Identifier: MIT OR Apache-2.0
use proc_macro::{Delimiter, TokenStream, TokenTree};

fn compile_error(message: &str) -> TokenStream {
    format!("compile_error!({:?});", message)
        .parse()
        .unwrap_or_default()
}

/// Implementation of the `#[mention]` attribute macro.
///
/// Finds the function name and its body, then prefixes the body with a call to
/// `mention_pre` so the line is emitted before any user code runs.
pub fn mention_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    let mut fn_name: Option<String> = None;
    let mut body_idx: Option<usize> = None;

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            TokenTree::Ident(ident) if ident.to_string() == "fn" && fn_name.is_none() => {
                if let Some(TokenTree::Ident(name)) = tokens.get(i + 1) {
                    fn_name = Some(name.to_string());
                }
            }
            // the body is the last brace group; `where` clauses never use braces
            TokenTree::Group(g) if g.delimiter() == Delimiter::Brace && fn_name.is_some() => {
                body_idx = Some(i);
            }
            _ => {}
        }
        i += 1;
    }

    let Some(fn_name) = fn_name else {
        return compile_error("#[mention] can only be applied to functions");
    };
    let Some(body_idx) = body_idx else {
        return compile_error("#[mention] requires a function with a body");
    };
    let TokenTree::Group(body) = &tokens[body_idx] else {
        return compile_error("expected function body");
    };
    let original_body = body.stream();

    let attr = attr.to_string();
    let logger = if attr.trim().is_empty() {
        "multilog::default_logger()".to_string()
    } else {
        attr
    };

    let new_body_src = format!(
        r#"{{
            multilog::hidden::mention_pre(
                &{logger},
                concat!(module_path!(), "::", "{fn_name}"),
                file!(), line!(), column!(),
            );
            {{ {original_body} }}
        }}"#
    );

    let new_body: TokenStream = match new_body_src.parse() {
        Ok(body) => body,
        Err(_) => return compile_error("#[mention] could not parse the logger expression"),
    };
    let Some(new_body_group) = new_body.into_iter().next() else {
        return compile_error("#[mention] produced an empty body");
    };

    tokens[body_idx] = new_body_group;
    tokens.into_iter().collect()
}
