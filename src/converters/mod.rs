//! Conversion primitives between textual and integer address forms.
//!
//! Every function here is pure. Parsing functions validate as they go and
//! fail with a format error; rendering functions are total.

pub mod ipv4;
pub mod ipv6;
