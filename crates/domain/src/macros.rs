//! Macro for string conversions on wire-level enums
//!
//! Task statuses, timer phases and setting keys all travel as lowercase
//! strings. This macro generates the matching `Display`/`FromStr` pair plus an
//! `as_str` accessor and an `ALL` list, from a single variant table.
//!
//! # Example
//!
//! ```rust
//! use trak_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum SyncState {
//!     Idle,
//!     Busy,
//! }
//!
//! impl_domain_status_conversions!(SyncState {
//!     Idle => "idle",
//!     Busy => "busy",
//! });
//!
//! assert_eq!(SyncState::Busy.as_str(), "busy");
//! assert_eq!("IDLE".parse::<SyncState>(), Ok(SyncState::Idle));
//! assert_eq!(SyncState::ALL.len(), 2);
//! ```

/// Implements Display, FromStr, `as_str` and `ALL` for a unit-variant enum
///
/// Parsing is case-insensitive and ignores surrounding whitespace; output is
/// always the exact string given in the table.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation of this variant
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err(::std::format!(
                        "Invalid {}: {}",
                        stringify!($enum_name),
                        s
                    )),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Green,
        AmberFlash,
        Red,
    }

    impl_domain_status_conversions!(Light {
        Green => "green",
        AmberFlash => "amber_flash",
        Red => "red",
    });

    #[test]
    fn test_display_uses_table() {
        assert_eq!(Light::AmberFlash.to_string(), "amber_flash");
        assert_eq!(Light::Red.as_str(), "red");
    }

    #[test]
    fn test_fromstr_is_case_insensitive_and_trimmed() {
        assert_eq!(Light::from_str("GREEN").unwrap(), Light::Green);
        assert_eq!(Light::from_str("  Amber_Flash ").unwrap(), Light::AmberFlash);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = Light::from_str("blue");
        assert!(result.unwrap_err().contains("Invalid Light: blue"));
        assert!(Light::from_str("").is_err());
    }

    #[test]
    fn test_all_roundtrips() {
        assert_eq!(Light::ALL.len(), 3);
        for light in Light::ALL {
            assert_eq!(Light::from_str(light.as_str()).unwrap(), *light);
        }
    }

    mod with_result_alias {
        use std::str::FromStr;

        #[allow(unused_imports)]
        use crate::{Result, TrakError};

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Mode {
            Fast,
            Slow,
        }

        impl_domain_status_conversions!(Mode {
            Fast => "fast",
            Slow => "slow",
        });

        #[test]
        fn test_expands_next_to_single_parameter_result_alias() {
            assert_eq!(Mode::from_str("slow"), Ok(Mode::Slow));
            assert_eq!(Mode::Fast.to_string(), "fast");
            assert!(Mode::from_str("medium").unwrap_err().contains("Invalid Mode"));
        }
    }
}
