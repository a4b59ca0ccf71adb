//! Macros for declaring state and trigger enums.

/// Generate a unit enum implementing [`State`](crate::core::State).
///
/// The enum serializes as its zero-based variant ordinal, which is how
/// states appear in persisted documents.
///
/// # Example
///
/// ```
/// use flowline::state_enum;
/// use flowline::core::State;
///
/// state_enum! {
///     pub enum OrderState {
///         Created,
///         Paid,
///         Completed,
///     }
/// }
///
/// assert_eq!(OrderState::Paid.name(), "Paid");
/// assert_eq!(serde_json::to_string(&OrderState::Paid).unwrap(), "1");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            const VARIANTS: &'static [$name] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> ::core::result::Result<Ser::Ok, Ser::Error> {
                serializer.serialize_u32(*self as u32)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> ::core::result::Result<Self, D::Error> {
                let ordinal = <u32 as serde::Deserialize>::deserialize(deserializer)?;
                Self::VARIANTS.get(ordinal as usize).copied().ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(format!(
                        "no {} state with ordinal {}",
                        stringify!($name),
                        ordinal
                    ))
                })
            }
        }
    };
}

/// Generate a unit enum implementing [`Trigger`](crate::core::Trigger).
///
/// # Example
///
/// ```
/// use flowline::trigger_enum;
/// use flowline::core::Trigger;
///
/// trigger_enum! {
///     pub enum OrderTrigger {
///         Pay,
///         Ship,
///     }
/// }
///
/// assert_eq!(OrderTrigger::Ship.name(), "Ship");
/// ```
#[macro_export]
macro_rules! trigger_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Trigger for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{State, Trigger};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    trigger_enum! {
        enum TestTrigger {
            Start,
            Finish,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn state_enum_serializes_by_ordinal() {
        assert_eq!(serde_json::to_string(&TestState::Initial).unwrap(), "0");
        assert_eq!(serde_json::to_string(&TestState::Complete).unwrap(), "2");

        let state: TestState = serde_json::from_str("1").unwrap();
        assert_eq!(state, TestState::Processing);
    }

    #[test]
    fn unknown_ordinal_is_rejected() {
        let error = serde_json::from_str::<TestState>("7").unwrap_err();
        assert!(error.to_string().contains("no TestState state with ordinal 7"));
        assert!(serde_json::from_str::<TestState>("\"Initial\"").is_err());
    }

    #[test]
    fn trigger_enum_macro_generates_trait() {
        assert_eq!(TestTrigger::Start.name(), "Start");
        assert_eq!(TestTrigger::Finish.name(), "Finish");
    }

    #[test]
    fn state_enum_supports_visibility_and_attributes() {
        state_enum! {
            /// Documented
            pub enum PublicState {
                A,
                #[allow(dead_code)]
                B,
            }
        }

        assert_eq!(PublicState::A.name(), "A");
    }
}
