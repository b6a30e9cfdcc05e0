//! Fault connection codes.
//!
//! Users type codes like `abc`, `AG` or `acg`. Each one canonicalizes to
//! exactly one [`FaultConnection`]; phase letters may appear in any order.

use crate::error::{ScaError, ScaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical fault connection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FaultConnection {
    Abc,
    Ag,
    Bg,
    Cg,
    Ab,
    Bc,
    Ca,
    Abg,
    Bcg,
    Cag,
}

/// Fault topology family, used in engine fault descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    ThreePhase,
    SingleLineToGround,
    LineToLine,
    DoubleLineToGround,
}

impl ConnectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionKind::ThreePhase => "3LG",
            ConnectionKind::SingleLineToGround => "1LG",
            ConnectionKind::LineToLine => "LL",
            ConnectionKind::DoubleLineToGround => "2LG",
        }
    }
}

impl FaultConnection {
    pub const ALL: [FaultConnection; 10] = [
        FaultConnection::Abc,
        FaultConnection::Ag,
        FaultConnection::Bg,
        FaultConnection::Cg,
        FaultConnection::Ab,
        FaultConnection::Bc,
        FaultConnection::Ca,
        FaultConnection::Abg,
        FaultConnection::Bcg,
        FaultConnection::Cag,
    ];

    /// Canonical code, e.g. `"CAG"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultConnection::Abc => "ABC",
            FaultConnection::Ag => "AG",
            FaultConnection::Bg => "BG",
            FaultConnection::Cg => "CG",
            FaultConnection::Ab => "AB",
            FaultConnection::Bc => "BC",
            FaultConnection::Ca => "CA",
            FaultConnection::Abg => "ABG",
            FaultConnection::Bcg => "BCG",
            FaultConnection::Cag => "CAG",
        }
    }

    pub fn kind(&self) -> ConnectionKind {
        match self {
            FaultConnection::Abc => ConnectionKind::ThreePhase,
            FaultConnection::Ag | FaultConnection::Bg | FaultConnection::Cg => {
                ConnectionKind::SingleLineToGround
            }
            FaultConnection::Ab | FaultConnection::Bc | FaultConnection::Ca => {
                ConnectionKind::LineToLine
            }
            FaultConnection::Abg | FaultConnection::Bcg | FaultConnection::Cag => {
                ConnectionKind::DoubleLineToGround
            }
        }
    }
}

/// Map a user-supplied code to its canonical connection, ignoring case.
pub fn canonicalize(code: &str) -> ScaResult<FaultConnection> {
    let upper = code.to_ascii_uppercase();
    let conn = match upper.as_str() {
        "ABC" => FaultConnection::Abc,
        "AG" => FaultConnection::Ag,
        "BG" => FaultConnection::Bg,
        "CG" => FaultConnection::Cg,
        "AB" | "BA" => FaultConnection::Ab,
        "BC" | "CB" => FaultConnection::Bc,
        "CA" | "AC" => FaultConnection::Ca,
        "ABG" | "BAG" => FaultConnection::Abg,
        "BCG" | "CBG" => FaultConnection::Bcg,
        "CAG" | "ACG" => FaultConnection::Cag,
        _ => return Err(ScaError::UnrecognizedConnectionCode(upper)),
    };
    Ok(conn)
}

/// Canonicalize every code; the first bad one fails the whole list.
pub fn canonicalize_all<I, S>(codes: I) -> ScaResult<Vec<FaultConnection>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|code| canonicalize(code.as_ref()))
        .collect()
}

impl FromStr for FaultConnection {
    type Err = ScaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        canonicalize(s)
    }
}

impl TryFrom<String> for FaultConnection {
    type Error = ScaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        canonicalize(&value)
    }
}

impl From<FaultConnection> for String {
    fn from(conn: FaultConnection) -> Self {
        conn.as_str().to_string()
    }
}

impl fmt::Display for FaultConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
