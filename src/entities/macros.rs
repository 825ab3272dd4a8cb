//! Macros for reducing boilerplate when defining records
//!
//! These macros generate the repetitive trait implementations shared by every
//! record kind and the string-backed enums used for statuses and categories.

/// Implement [`Record`](crate::core::record::Record) for a struct with a `u64` `id` field
///
/// # Example
/// ```rust,ignore
/// impl_record!(Settlement, "settlement", "settlements");
/// ```
#[macro_export]
macro_rules! impl_record {
    ($type:ident, $singular:expr, $plural:expr) => {
        impl $crate::core::record::Record for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> u64 {
                self.id
            }
        }
    };
}

/// Define a fieldless enum serialized as fixed labels
///
/// Generates the enum with serde support, an `ALL` list in declaration order,
/// `as_str()` and `Display`.
///
/// # Example
/// ```rust,ignore
/// record_enum! {
///     /// Settlement lifecycle
///     SettlementStatus {
///         Pending => "PENDING",
///         Completed => "COMPLETED",
///     }
/// }
/// ```
#[macro_export]
macro_rules! record_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The serialized label
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
