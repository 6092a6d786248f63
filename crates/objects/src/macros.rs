//! Typed value-object declarations.

/// Declare a typed value object.
///
/// Generates a newtype around [`ValueObject`](crate::ValueObject) with a
/// lazily built, shared definition and one accessor per declared field.
///
/// ```ignore
/// value_object! {
///     /// A payment.
///     pub struct Payment as "App\\Payment" {
///         amount: "/** @var int */",
///         currency: "/** @var Currency */",
///         memo: "/** @var string|null */",
///         meta,
///     }
///     aliases {
///         "Currency" => "App\\Currency",
///     }
/// }
///
/// let payment = Payment::new(universe, [("amount", Value::from(100)), ...])?;
/// assert_eq!(payment.amount(), &Value::Int(100));
/// ```
///
/// Unset fields read as [`Value::Null`](crate::Value::Null).
#[macro_export]
macro_rules! value_object {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $owner:literal {
            $( $field:ident $(: $annotation:expr)? ),* $(,)?
        }
        $( aliases { $( $alias:literal => $target:literal ),* $(,)? } )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($crate::ValueObject);

        impl $name {
            /// Shared definition, built on first use.
            pub fn definition() -> ::std::sync::Arc<$crate::ValueObjectDefinition> {
                static DEFINITION: ::std::sync::OnceLock<
                    ::std::sync::Arc<$crate::ValueObjectDefinition>,
                > = ::std::sync::OnceLock::new();

                DEFINITION
                    .get_or_init(|| {
                        ::std::sync::Arc::new(
                            $crate::ValueObjectDefinition::builder($owner)
                                $( .declare(stringify!($field), $crate::__annotation!($($annotation)?)) )*
                                $( $( .alias($alias, $target) )* )?
                                .build(),
                        )
                    })
                    .clone()
            }

            pub fn new<I, K, V>(
                universe: $crate::SharedUniverse,
                parameters: I,
            ) -> $crate::ValueObjectResult<Self>
            where
                I: IntoIterator<Item = (K, V)>,
                K: Into<String>,
                V: Into<$crate::Value>,
            {
                $crate::ValueObject::new(Self::definition(), universe, parameters).map(Self)
            }

            /// Copy with one field re-validated and replaced.
            pub fn with(
                &self,
                field: &str,
                value: impl Into<$crate::Value>,
            ) -> $crate::ValueObjectResult<Self> {
                self.0.with(field, value).map(Self)
            }

            $(
                pub fn $field(&self) -> &$crate::Value {
                    static NULL: $crate::Value = $crate::Value::Null;
                    self.0.get(stringify!($field)).unwrap_or(&NULL)
                }
            )*

            pub fn as_value_object(&self) -> &$crate::ValueObject {
                &self.0
            }

            pub fn into_value_object(self) -> $crate::ValueObject {
                self.0
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __annotation {
    () => {
        ::core::option::Option::None
    };
    ($annotation:expr) => {
        ::core::option::Option::Some($annotation)
    };
}
