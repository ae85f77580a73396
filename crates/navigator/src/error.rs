//! Navigation errors.
//!
//! A [`NavError`] is attached to a [`Navigator`](crate::Navigator) the first
//! time an operation fails and then rides along with every later call. Each
//! error carries a machine-readable [`ErrorKind`] with a stable numeric code,
//! a location tag naming the operation (and argument) that produced it, an
//! optional message, and an optional underlying cause.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Machine-readable error kind
///
/// Codes are grouped by family: 1xxx entry parsing, 2xxx entry types,
/// 3xxx keys/values/conversion, 4xxx indexing, 5xxx operation misuse,
/// 6xxx mutation.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unknown,
    InitParseFailed,
    InitParamType,
    UnsupportedObject,
    KeyType,
    ValueType,
    ValueConvertFailed,
    BaseTypeConvertFailed,
    KeyNotFound,
    GetFuncTypeInconsistent,
    IllegalMapObject,
    EmptyMapObject,
    ListIndexIllegal,
    UnsupportedOperation,
    CannotIndex,
    TypeMismatch,
    FunctionMisuse,
    UnrecoverablePanic,
    SetValue,
    UnsupportedSetValueType,
    TraceEmpty,
    TraceParentMissing,
}

impl ErrorKind {
    /// Stable numeric code
    pub const fn code(self) -> i32 {
        match self {
            Self::Unknown => -1,
            Self::InitParseFailed => 1001,
            Self::InitParamType => 2001,
            Self::UnsupportedObject => 2002,
            Self::KeyType => 3001,
            Self::ValueType => 3002,
            Self::ValueConvertFailed => 3003,
            Self::BaseTypeConvertFailed => 3004,
            Self::KeyNotFound => 3005,
            Self::GetFuncTypeInconsistent => 3006,
            Self::IllegalMapObject => 3007,
            Self::EmptyMapObject => 3008,
            Self::ListIndexIllegal => 4001,
            Self::UnsupportedOperation => 5001,
            Self::CannotIndex => 5002,
            Self::TypeMismatch => 5003,
            Self::FunctionMisuse => 5004,
            Self::UnrecoverablePanic => 5005,
            Self::SetValue => 6001,
            Self::UnsupportedSetValueType => 6002,
            Self::TraceEmpty => 6003,
            Self::TraceParentMissing => 6004,
        }
    }

    /// Look a kind up by its code
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            -1 => Self::Unknown,
            1001 => Self::InitParseFailed,
            2001 => Self::InitParamType,
            2002 => Self::UnsupportedObject,
            3001 => Self::KeyType,
            3002 => Self::ValueType,
            3003 => Self::ValueConvertFailed,
            3004 => Self::BaseTypeConvertFailed,
            3005 => Self::KeyNotFound,
            3006 => Self::GetFuncTypeInconsistent,
            3007 => Self::IllegalMapObject,
            3008 => Self::EmptyMapObject,
            4001 => Self::ListIndexIllegal,
            5001 => Self::UnsupportedOperation,
            5002 => Self::CannotIndex,
            5003 => Self::TypeMismatch,
            5004 => Self::FunctionMisuse,
            5005 => Self::UnrecoverablePanic,
            6001 => Self::SetValue,
            6002 => Self::UnsupportedSetValueType,
            6003 => Self::TraceEmpty,
            6004 => Self::TraceParentMissing,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::InitParseFailed => "InitParseFailed",
            Self::InitParamType => "InitParamType",
            Self::UnsupportedObject => "UnsupportedObject",
            Self::KeyType => "KeyType",
            Self::ValueType => "ValueType",
            Self::ValueConvertFailed => "ValueConvertFailed",
            Self::BaseTypeConvertFailed => "BaseTypeConvertFailed",
            Self::KeyNotFound => "KeyNotFound",
            Self::GetFuncTypeInconsistent => "GetFuncTypeInconsistent",
            Self::IllegalMapObject => "IllegalMapObject",
            Self::EmptyMapObject => "EmptyMapObject",
            Self::ListIndexIllegal => "ListIndexIllegal",
            Self::UnsupportedOperation => "UnsupportedOperation",
            Self::CannotIndex => "CannotIndex",
            Self::TypeMismatch => "TypeMismatch",
            Self::FunctionMisuse => "FunctionMisuse",
            Self::UnrecoverablePanic => "UnrecoverablePanic",
            Self::SetValue => "SetValue",
            Self::UnsupportedSetValueType => "UnsupportedSetValueType",
            Self::TraceEmpty => "TraceEmpty",
            Self::TraceParentMissing => "TraceParentMissing",
        }
    }

    /// Mutation family (6xxx)
    pub const fn is_mutation(self) -> bool {
        matches!(
            self,
            Self::SetValue | Self::UnsupportedSetValueType | Self::TraceEmpty | Self::TraceParentMissing
        )
    }

    /// Conversion family
    pub const fn is_conversion(self) -> bool {
        matches!(self, Self::ValueConvertFailed | Self::BaseTypeConvertFailed)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.code(), self.name())
    }
}

// ============================================================================
// NAV ERROR
// ============================================================================

type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Error attached to a navigator chain
///
/// Cloning is cheap; the cause is shared. Two errors compare equal when
/// their kinds are equal.
#[derive(Debug, Clone)]
pub struct NavError {
    kind: ErrorKind,
    location: Cow<'static, str>,
    message: Option<Cow<'static, str>>,
    source: Option<Cause>,
}

impl NavError {
    pub fn new(kind: ErrorKind, location: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            location: location.into(),
            message: None,
            source: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Attach an already shared cause
    pub fn with_shared_source(mut self, source: Cause) -> Self {
        self.source = Some(source);
        self
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn code(&self) -> i32 {
        self.kind.code()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    // ------------------------------------------------------------------------
    // Constructors for frequent kinds
    // ------------------------------------------------------------------------

    pub fn key_not_found(location: impl Into<Cow<'static, str>>, key: impl fmt::Display) -> Self {
        Self::new(ErrorKind::KeyNotFound, location).with_message(format!("key {key} not found"))
    }

    pub fn index_out_of_range(location: impl Into<Cow<'static, str>>, index: usize, len: usize) -> Self {
        Self::new(ErrorKind::ListIndexIllegal, location)
            .with_message(format!("index {index} out of range for length {len}"))
    }

    pub fn unsupported(location: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::UnsupportedOperation, location).with_message(message)
    }

    pub fn misuse(location: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::FunctionMisuse, location).with_message(message)
    }

    pub fn convert_failed(
        location: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::ValueConvertFailed, location).with_message(message)
    }

    pub fn base_convert_failed(
        location: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::BaseTypeConvertFailed, location).with_message(message)
    }
}

impl PartialEq for NavError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for NavError {}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NavError{{location: {}, code: {}", self.location, self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ", message: {message}")?;
        }
        if let Some(source) = &self.source {
            write!(f, ", source: {source}")?;
        }
        f.write_str("}")
    }
}

impl StdError for NavError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|s| s as &(dyn StdError + 'static))
    }
}

/// Result type for navigator operations
pub type NavResult<T> = Result<T, NavError>;
