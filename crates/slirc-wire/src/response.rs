//! IRC numeric response codes emitted by this layer.
//!
//! # Reference
//! - Modern IRC documentation: <https://modern.ircdocs.horse/#rplisupport-005>

#![allow(non_camel_case_types)]

use std::fmt;

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 005 - Server supported features (ISUPPORT)
    RPL_ISUPPORT = 5,
}

impl Response {
    /// The numeric code.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// The three-digit wire form, e.g. `"005"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RPL_ISUPPORT => "005",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
