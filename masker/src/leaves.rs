//! Ready-made capability leaves for common personal data.
//!
//! Each type is a newtype over `String` that derives `Mask` with
//! `#[mask(leaf)]` and masks itself with a fixed [`MaskPolicy`]. `Debug` only
//! ever prints the masked form.

use std::fmt;

use crate::{capability::MaskedString, policy::MaskPolicy, value::Value, Mask};

macro_rules! masked_leaf {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Mask)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        #[mask(leaf)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the unmasked text.
            pub fn expose(&self) -> &str {
                &self.0
            }

            /// Unwraps the unmasked text.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Value {
            fn from(leaf: $name) -> Self {
                Value::text(leaf)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.masked_string())
                    .finish()
            }
        }
    };
}

masked_leaf!(
    /// A phone number. Keeps the first 3 and last 4 characters: `138****1234`.
    Phone
);

masked_leaf!(
    /// An email address. Keeps the first character of the local part and the
    /// whole domain: `z*******@example.com`.
    Email
);

masked_leaf!(
    /// A national identity number. Keeps the first 3 and last 4 characters.
    IdCard
);

masked_leaf!(
    /// A bank card number. Keeps the last 4 characters.
    BankCard
);

masked_leaf!(
    /// A person's name. Keeps the first character.
    Name
);

masked_leaf!(
    /// A postal address. Keeps the first 6 characters.
    Address
);

masked_leaf!(
    /// A password. Replaced entirely.
    Password
);

masked_leaf!(
    /// An access token or API key. Keeps the last 4 characters.
    Token
);

impl MaskedString for Phone {
    fn masked_string(&self) -> String {
        MaskPolicy::keep(3, 4).apply(&self.0)
    }
}

impl MaskedString for Email {
    fn masked_string(&self) -> String {
        match self.0.rsplit_once('@') {
            Some((local, domain)) => {
                format!("{}@{domain}", MaskPolicy::keep_head(1).apply(local))
            }
            None => MaskPolicy::keep_head(1).apply(&self.0),
        }
    }
}

impl MaskedString for IdCard {
    fn masked_string(&self) -> String {
        MaskPolicy::keep(3, 4).apply(&self.0)
    }
}

impl MaskedString for BankCard {
    fn masked_string(&self) -> String {
        MaskPolicy::keep_tail(4).apply(&self.0)
    }
}

impl MaskedString for Name {
    fn masked_string(&self) -> String {
        MaskPolicy::keep_head(1).apply(&self.0)
    }
}

impl MaskedString for Address {
    fn masked_string(&self) -> String {
        MaskPolicy::keep_head(6).apply(&self.0)
    }
}

impl MaskedString for Password {
    fn masked_string(&self) -> String {
        MaskPolicy::full().apply(&self.0)
    }
}

impl MaskedString for Token {
    fn masked_string(&self) -> String {
        MaskPolicy::keep_tail(4).apply(&self.0)
    }
}
