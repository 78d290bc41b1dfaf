//! Canonical function signatures and overload resolution
//!
//! Overloads are kept in declaration order and matched by argument count
//! first: [`find_by_argument_count`] returns the first candidate with the
//! right arity and does not attempt to rank several equal-count candidates.
//! [`CanonicalFunctions::resolve_call`] additionally checks argument types
//! through the promoter, still taking the first overload that accepts.

use indexmap::IndexMap;
use odata_diagnostics::{Diagnostic, ErrorCode, ODQ0101, ODQ0102, ODQ0103};
use odata_edm::{EdmPrimitiveKind, EdmTypeRef};
use smallvec::SmallVec;
use thiserror::Error;

use crate::promotion::TypePromoter;

/// A single overload of a canonical function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    return_type: EdmTypeRef,
    argument_types: SmallVec<[EdmTypeRef; 3]>,
}

impl FunctionSignature {
    /// Create a signature from its return type and parameter types
    pub fn new(
        return_type: EdmTypeRef,
        argument_types: impl IntoIterator<Item = EdmTypeRef>,
    ) -> Self {
        Self {
            return_type,
            argument_types: argument_types.into_iter().collect(),
        }
    }

    /// The type a call to this overload evaluates to
    pub fn return_type(&self) -> &EdmTypeRef {
        &self.return_type
    }

    /// The declared parameter types, in order
    pub fn argument_types(&self) -> &[EdmTypeRef] {
        &self.argument_types
    }

    /// Number of parameters this overload takes
    pub fn arity(&self) -> usize {
        self.argument_types.len()
    }
}

/// First candidate, in declaration order, taking exactly `arg_count`
/// arguments
///
/// Several candidates with the same count are not disambiguated; the first
/// one declared wins. Returns `None` when no count matches.
pub fn find_by_argument_count(
    candidates: &[FunctionSignature],
    arg_count: usize,
) -> Option<&FunctionSignature> {
    candidates.iter().find(|sig| sig.arity() == arg_count)
}

/// Errors raised while resolving a canonical function call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionResolutionError {
    /// No function with this name is registered
    #[error("unknown canonical function '{name}'")]
    UnknownFunction {
        /// Name as written in the query
        name: String,
    },

    /// The function exists but no overload takes this many arguments
    #[error("function '{name}' has no overload taking {arg_count} argument(s)")]
    NoMatchingOverload {
        /// Name of the function
        name: String,
        /// Number of arguments supplied
        arg_count: usize,
    },

    /// Overloads with the right count exist but none accepts the argument
    /// types
    #[error("no overload of '{name}' accepts the supplied argument types")]
    ArgumentTypeMismatch {
        /// Name of the function
        name: String,
        /// Number of arguments supplied
        arg_count: usize,
    },
}

impl FunctionResolutionError {
    /// The stable error code for this error
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownFunction { .. } => ODQ0101,
            Self::NoMatchingOverload { .. } => ODQ0102,
            Self::ArgumentTypeMismatch { .. } => ODQ0103,
        }
    }
}

impl From<FunctionResolutionError> for Diagnostic {
    fn from(error: FunctionResolutionError) -> Self {
        Diagnostic::error(error.code(), error.to_string())
    }
}

/// Registry of canonical functions, keyed by name in registration order
#[derive(Debug, Clone, Default)]
pub struct CanonicalFunctions {
    overloads: IndexMap<String, Vec<FunctionSignature>>,
    promoter: TypePromoter,
}

impl CanonicalFunctions {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry preloaded with the OData URI canonical functions
    ///
    /// String, date/time, and arithmetic functions as defined for `$filter`
    /// expressions. All parameter and return types are nullable: a null
    /// argument yields a null result rather than an error.
    pub fn with_uri_builtins() -> Self {
        let mut registry = Self::new();

        let string = EdmTypeRef::string(true);
        let int32 = EdmTypeRef::int32(true);
        let boolean = EdmTypeRef::boolean(true);
        let date = EdmTypeRef::date(true);
        let date_time = EdmTypeRef::date_time_offset(true);
        let time = EdmTypeRef::primitive(EdmPrimitiveKind::TimeOfDay, true);
        let double = EdmTypeRef::double(true);
        let decimal = EdmTypeRef::decimal(true);

        // String functions
        registry.register(
            "concat",
            FunctionSignature::new(string.clone(), [string.clone(), string.clone()]),
        );
        for name in ["contains", "endswith", "startswith"] {
            registry.register(
                name,
                FunctionSignature::new(boolean.clone(), [string.clone(), string.clone()]),
            );
        }
        registry.register(
            "indexof",
            FunctionSignature::new(int32.clone(), [string.clone(), string.clone()]),
        );
        registry.register(
            "length",
            FunctionSignature::new(int32.clone(), [string.clone()]),
        );
        registry.register(
            "substring",
            FunctionSignature::new(string.clone(), [string.clone(), int32.clone()]),
        );
        registry.register(
            "substring",
            FunctionSignature::new(
                string.clone(),
                [string.clone(), int32.clone(), int32.clone()],
            ),
        );
        for name in ["tolower", "toupper", "trim"] {
            registry.register(
                name,
                FunctionSignature::new(string.clone(), [string.clone()]),
            );
        }

        // Date and time functions; date parts accept both point-in-time
        // kinds, time parts both time-carrying kinds.
        for name in ["year", "month", "day"] {
            registry.register(
                name,
                FunctionSignature::new(int32.clone(), [date_time.clone()]),
            );
            registry.register(name, FunctionSignature::new(int32.clone(), [date.clone()]));
        }
        for name in ["hour", "minute", "second"] {
            registry.register(
                name,
                FunctionSignature::new(int32.clone(), [date_time.clone()]),
            );
            registry.register(name, FunctionSignature::new(int32.clone(), [time.clone()]));
        }
        registry.register(
            "date",
            FunctionSignature::new(date.clone(), [date_time.clone()]),
        );
        registry.register(
            "time",
            FunctionSignature::new(time.clone(), [date_time.clone()]),
        );
        registry.register("now", FunctionSignature::new(date_time.clone(), []));

        // Arithmetic functions
        for name in ["round", "floor", "ceiling"] {
            registry.register(
                name,
                FunctionSignature::new(double.clone(), [double.clone()]),
            );
            registry.register(
                name,
                FunctionSignature::new(decimal.clone(), [decimal.clone()]),
            );
        }

        registry
    }

    /// Append an overload for `name`
    pub fn register(&mut self, name: impl Into<String>, signature: FunctionSignature) {
        self.overloads.entry(name.into()).or_default().push(signature);
    }

    /// All declared overloads of `name`, in declaration order
    pub fn signatures(&self, name: &str) -> Option<&[FunctionSignature]> {
        self.overloads.get(name).map(Vec::as_slice)
    }

    /// Resolve a call by argument count alone
    pub fn resolve(
        &self,
        name: &str,
        arg_count: usize,
    ) -> Result<&FunctionSignature, FunctionResolutionError> {
        let candidates = self.candidates(name)?;
        find_by_argument_count(candidates, arg_count).ok_or_else(|| {
            FunctionResolutionError::NoMatchingOverload {
                name: name.to_string(),
                arg_count,
            }
        })
    }

    /// Resolve a call by argument count and argument types
    ///
    /// Among the count matches, the first overload whose parameters accept
    /// every argument wins. An argument with no static type (open property,
    /// null literal) is accepted by any parameter; concrete arguments must
    /// convert per [`TypePromoter::can_convert_to`].
    pub fn resolve_call(
        &self,
        name: &str,
        args: &[Option<EdmTypeRef>],
    ) -> Result<&FunctionSignature, FunctionResolutionError> {
        let candidates = self.candidates(name)?;
        let mut count_matched = false;
        for signature in candidates {
            if signature.arity() != args.len() {
                continue;
            }
            count_matched = true;
            if self.accepts(signature, args) {
                return Ok(signature);
            }
        }
        if count_matched {
            Err(FunctionResolutionError::ArgumentTypeMismatch {
                name: name.to_string(),
                arg_count: args.len(),
            })
        } else {
            Err(FunctionResolutionError::NoMatchingOverload {
                name: name.to_string(),
                arg_count: args.len(),
            })
        }
    }

    fn candidates(&self, name: &str) -> Result<&[FunctionSignature], FunctionResolutionError> {
        self.overloads
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| FunctionResolutionError::UnknownFunction {
                name: name.to_string(),
            })
    }

    fn accepts(&self, signature: &FunctionSignature, args: &[Option<EdmTypeRef>]) -> bool {
        signature
            .argument_types()
            .iter()
            .zip(args)
            .all(|(param, arg)| match arg {
                None => true,
                Some(arg) => self.promoter.can_convert_to(arg, param),
            })
    }
}
