//! Helper macro for declaring port and adapter error enums.
//!
//! Each variant gets a `#[error(...)]` message, a snake-case constructor that
//! accepts `impl Into<T>` for every field, and an entry in `kind()` so log
//! lines can record the failure category without formatting the message.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Variant name, for structured log fields.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) => {
                            stringify!($variant)
                        }
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated constructors and kinds.
    define_port_error! {
        pub enum ExampleClientError {
            Offline => "client offline",
            Rejected { code: String, message: String } => "{message}",
            Status { status: u16 } => "status {status}",
        }
    }

    #[test]
    fn unit_variants_get_plain_constructors() {
        let err = ExampleClientError::offline();
        assert_eq!(err.to_string(), "client offline");
        assert_eq!(err.kind(), "Offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ExampleClientError::rejected("CF-Bad", "bad domain");
        assert_eq!(err.to_string(), "bad domain");
        assert_eq!(err.kind(), "Rejected");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = ExampleClientError::status(502_u16);
        assert_eq!(err, ExampleClientError::Status { status: 502 });
        assert_eq!(err.kind(), "Status");
    }
}
