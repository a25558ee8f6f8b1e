//! Solver configuration.
use serde::Deserialize;

/// Defines [`SolverConfig`] and [`SolverConfigUpdate`] from one list of options.
///
/// Each option's doc comment is used for the field and for [`SolverConfig::help`].
macro_rules! solver_config {
    ($( $(#[doc = $doc:literal])* $name:ident: $ty:ty = $default:expr, )*) => {
        /// Configurable parameters used during solving.
        ///
        /// None of the parameters change whether a formula is found satisfiable, but they can
        /// change which model is reported.
        #[derive(Clone, Debug, PartialEq)]
        pub struct SolverConfig {
            $( $(#[doc = $doc])* pub $name: $ty, )*
        }

        impl Default for SolverConfig {
            fn default() -> SolverConfig {
                SolverConfig {
                    $( $name: $default, )*
                }
            }
        }

        impl SolverConfig {
            /// Description of all options and their defaults, one per line.
            pub fn help() -> String {
                let mut help = String::new();
                $(
                    help.push_str(&format!(
                        "{}:{} (Default: {:?})\n",
                        stringify!($name),
                        concat!($($doc),*),
                        $default
                    ));
                )*
                help
            }

            /// Overwrite all parameters that are set in the update.
            pub fn apply(&mut self, update: &SolverConfigUpdate) {
                $(
                    if let Some(value) = &update.$name {
                        self.$name = value.clone();
                    }
                )*
            }
        }

        /// A partial [`SolverConfig`], as read from a configuration file or command line option.
        #[derive(Clone, Debug, Default, PartialEq, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct SolverConfigUpdate {
            $( pub $name: Option<$ty>, )*
        }

        impl SolverConfigUpdate {
            /// Create an update that changes nothing.
            pub fn new() -> SolverConfigUpdate {
                SolverConfigUpdate::default()
            }

            /// Merge another update into this one. Values set in `other` take precedence.
            pub fn merge(&mut self, other: SolverConfigUpdate) {
                $(
                    if other.$name.is_some() {
                        self.$name = other.$name;
                    }
                )*
            }
        }
    };
}

solver_config! {
    /// Assign variables occurring in only one polarity before branching.
    pure_literal_elimination: bool = true,

    /// Polarity assigned first when branching on a variable.
    branch_polarity: bool = true,
}
