//! Bean 访问器表派生宏实现

use crate::utils::to_camel_case;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_quote, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Path, Result};

/// 构造方式
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorKind {
    /// `Default::default`
    Default,
    /// 指定的无参关联函数
    Named(Ident),
    /// 不可由容器构造
    Abstract,
}

/// 结构体级参数
#[derive(Debug, Clone)]
pub struct BeanArgs {
    /// 构造方式
    pub constructor: ConstructorKind,
    /// 可按名称调用的方法
    pub methods: Vec<Ident>,
    /// 生成代码引用的公共 crate 路径
    pub krate: Path,
}

impl Default for BeanArgs {
    fn default() -> Self {
        Self {
            constructor: ConstructorKind::Default,
            methods: Vec::new(),
            krate: parse_quote!(::infrastructure_common),
        }
    }
}

/// 单个字段的访问信息
#[derive(Debug, Clone)]
struct FieldAccessor {
    ident: Ident,
    names: Vec<String>,
}

/// 解析结构体上的 `#[bean(...)]`
pub fn parse_bean_args(attrs: &[Attribute]) -> Result<BeanArgs> {
    let mut args = BeanArgs::default();

    for attr in attrs {
        if !attr.path().is_ident("bean") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("constructor") {
                let lit: LitStr = meta.value()?.parse()?;
                args.constructor = ConstructorKind::Named(lit.parse()?);
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                args.krate = lit.parse()?;
            } else if meta.path.is_ident("abstract") {
                args.constructor = ConstructorKind::Abstract;
            } else if meta.path.is_ident("methods") {
                meta.parse_nested_meta(|method| {
                    let ident = method
                        .path
                        .get_ident()
                        .cloned()
                        .ok_or_else(|| method.error("方法名称必须是标识符"))?;
                    args.methods.push(ident);
                    Ok(())
                })?;
            } else {
                return Err(meta.error("不支持的 bean 参数，可用: constructor, abstract, methods, crate"));
            }
            Ok(())
        })?;
    }

    Ok(args)
}

fn parse_fields(input: &DeriveInput) -> Result<Vec<FieldAccessor>> {
    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Bean)] 只能用于结构体",
            ))
        }
    };

    let named = match &data.fields {
        Fields::Named(named) => named,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Bean)] 不支持元组结构体",
            ))
        }
    };

    let mut accessors: Vec<FieldAccessor> = Vec::new();
    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        let mut skip = false;
        let mut rename = None;
        for attr in &field.attrs {
            if !attr.path().is_ident("bean") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    rename = Some(lit.value());
                } else {
                    return Err(meta.error("不支持的字段参数，可用: skip, rename"));
                }
                Ok(())
            })?;
        }
        if skip {
            continue;
        }

        let rust_name = ident.to_string();
        let rust_name = rust_name.trim_start_matches("r#").to_string();
        let mut names = Vec::new();
        let candidates = [Some(rust_name.clone()), Some(to_camel_case(&rust_name)), rename];
        for candidate in candidates.into_iter().flatten() {
            if !names.contains(&candidate) {
                names.push(candidate);
            }
        }

        for name in &names {
            if accessors.iter().any(|other| other.names.contains(name)) {
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!("字段名称 '{}' 与其他字段冲突", name),
                ));
            }
        }

        accessors.push(FieldAccessor { ident, names });
    }

    Ok(accessors)
}

fn method_names(method: &Ident) -> Vec<String> {
    let rust_name = method.to_string();
    let camel = to_camel_case(&rust_name);
    if camel == rust_name {
        vec![rust_name]
    } else {
        vec![rust_name, camel]
    }
}

/// 生成访问器表实现
pub fn expand_bean(input: &DeriveInput) -> Result<TokenStream2> {
    let args = parse_bean_args(&input.attrs)?;
    let fields = parse_fields(input)?;

    let krate = &args.krate;
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let field_arms = fields.iter().map(|field| {
        let ident = &field.ident;
        let names = &field.names;
        quote! {
            #(#names)|* => {
                self.#ident = #krate::assign_field(type_name, name, value)?;
                Ok(())
            }
        }
    });

    let method_arms = args.methods.iter().map(|method| {
        let names = method_names(method);
        quote! {
            #(#names)|* => #krate::invoke_outcome(type_name, name, self.#method()),
        }
    });

    let invoke_method = if args.methods.is_empty() {
        quote! {}
    } else {
        quote! {
            fn invoke_method(&mut self, name: &str) -> #krate::BeanResult<()> {
                let type_name = #krate::Bean::bean_type_name(self);
                match name {
                    #(#method_arms)*
                    _ => Err(#krate::BeanError::no_such_method(type_name, name)),
                }
            }
        }
    };

    let value_binding = if fields.is_empty() {
        quote! { let _ = value; }
    } else {
        quote! {}
    };

    let constructor = match &args.constructor {
        ConstructorKind::Default => {
            quote! { Some(<Self as ::core::default::Default>::default) }
        }
        ConstructorKind::Named(ident) => quote! { Some(Self::#ident) },
        ConstructorKind::Abstract => quote! { None },
    };

    Ok(quote! {
        impl #impl_generics #krate::Bean for #struct_name #ty_generics #where_clause {
            fn set_property(
                &mut self,
                name: &str,
                value: #krate::ResolvedValue,
            ) -> #krate::BeanResult<()> {
                let type_name = #krate::Bean::bean_type_name(self);
                #value_binding
                match name {
                    #(#field_arms)*
                    _ => Err(#krate::BeanError::missing_field(type_name, name)),
                }
            }

            #invoke_method

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::std::any::Any + ::core::marker::Send + ::core::marker::Sync> {
                self
            }
        }

        impl #impl_generics #krate::BeanType for #struct_name #ty_generics #where_clause {
            fn constructor() -> ::core::option::Option<fn() -> Self> {
                #constructor
            }
        }
    })
}

/// 实现 #[derive(Bean)] 宏
pub fn derive_bean_impl(input: DeriveInput) -> TokenStream {
    match expand_bean(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bean_args_defaults() {
        let input: DeriveInput = parse_quote! {
            struct Plain;
        };
        let args = parse_bean_args(&input.attrs).unwrap();
        assert_eq!(args.constructor, ConstructorKind::Default);
        assert!(args.methods.is_empty());
    }

    #[test]
    fn test_bean_args() {
        let input: DeriveInput = parse_quote! {
            #[bean(constructor = "new", methods(init, close_pool))]
            struct Pool;
        };
        let args = parse_bean_args(&input.attrs).unwrap();
        assert!(matches!(args.constructor, ConstructorKind::Named(ref ident) if ident == "new"));
        assert_eq!(args.methods.len(), 2);

        let input: DeriveInput = parse_quote! {
            #[bean(abstract)]
            struct Shape;
        };
        let args = parse_bean_args(&input.attrs).unwrap();
        assert_eq!(args.constructor, ConstructorKind::Abstract);
    }

    #[test]
    fn test_crate_path_override() {
        let input: DeriveInput = parse_quote! {
            #[bean(crate = "facade::common")]
            struct Pool {
                size: i32,
            }
        };
        let args = parse_bean_args(&input.attrs).unwrap();
        let krate = &args.krate;
        assert_eq!(quote!(#krate).to_string(), quote!(facade::common).to_string());

        let expanded = expand_bean(&input).unwrap().to_string();
        assert!(expanded.contains("facade :: common :: Bean"));
        assert!(!expanded.contains("infrastructure_common"));

        let default = BeanArgs::default().krate;
        assert_eq!(
            quote!(#default).to_string(),
            quote!(::infrastructure_common).to_string()
        );
    }

    #[test]
    fn test_field_names() {
        let input: DeriveInput = parse_quote! {
            struct UserService {
                user_dao: Option<Arc<UserDao>>,
                #[bean(rename = "timeoutMillis")]
                timeout: u64,
                #[bean(skip)]
                calls: u32,
            }
        };
        let fields = parse_fields(&input).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].names, vec!["user_dao", "userDao"]);
        assert_eq!(fields[1].names, vec!["timeout", "timeoutMillis"]);
    }

    #[test]
    fn test_method_names() {
        let init: Ident = parse_quote!(init);
        let open_pool: Ident = parse_quote!(open_pool);
        assert_eq!(method_names(&init), vec!["init"]);
        assert_eq!(method_names(&open_pool), vec!["open_pool", "openPool"]);
    }

    #[test]
    fn test_conflicting_names_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Clash {
                user_name: String,
                #[bean(rename = "userName")]
                alias: String,
            }
        };
        assert!(parse_fields(&input).is_err());
    }

    #[test]
    fn test_rejects_enums_and_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            enum Mode { A, B }
        };
        assert!(expand_bean(&input).is_err());

        let input: DeriveInput = parse_quote! {
            struct Wrapper(String);
        };
        assert!(expand_bean(&input).is_err());
    }

    #[test]
    fn test_expansion_contains_accessors() {
        let input: DeriveInput = parse_quote! {
            #[bean(methods(init))]
            struct DataSource {
                url: String,
            }
        };
        let expanded = expand_bean(&input).unwrap().to_string();
        assert!(expanded.contains("set_property"));
        assert!(expanded.contains("invoke_method"));
        assert!(expanded.contains("\"url\""));
        assert!(expanded.contains("BeanType"));
    }
}
