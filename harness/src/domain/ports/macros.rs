//! Helper macro for message-carrying port error enums.

/// Declares a `thiserror` enum whose variants each carry a `message` string,
/// plus a snake-case constructor per variant accepting `impl Into<String>`.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    /// Human-readable failure detail.
                    message: String,
                },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Builds the `" $variant "` variant."]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                }
            )*

            /// Returns the failure detail carried by every variant.
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message } => message, )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
