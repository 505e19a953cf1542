//! Colon-hex ⇄ 128-bit integer, with canonical (RFC 5952) compression.

use super::ipv4;
use crate::error::{NetError, NetResult};
use crate::types::Family;
use crate::validators::validate_group;

const GROUPS: usize = 8;
const MAPPED_HEAD_GROUPS: usize = 6;
const MAPPED_HEAD: u128 = 0xffff;

fn invalid(s: &str, reason: &'static str) -> NetError {
    NetError::InvalidAddress {
        family: Family::V6,
        input: s.to_string(),
        reason,
    }
}

/// Parse a colon-hex address into its 128-bit value.
///
/// Accepts the full eight-group form, the `::`-compressed form and the
/// IPv4-mapped form `::ffff:a.b.c.d`.
pub fn address_to_int(s: &str) -> NetResult<u128> {
    if s.contains('.') {
        return mapped_to_int(s);
    }

    Ok(fold_groups(&parse_groups(s, s, GROUPS)?))
}

/// Render a 128-bit value in canonical compressed form.
///
/// The longest run of two or more zero groups becomes `::`; ties go to the
/// first run. Digits are lowercase without leading zeros.
pub fn int_to_address(value: u128) -> String {
    let groups = to_groups(value);

    match longest_zero_run(&groups) {
        Some((start, len)) => format!(
            "{}::{}",
            join_groups(&groups[..start]),
            join_groups(&groups[start + len..])
        ),
        None => join_groups(&groups),
    }
}

/// Render a 128-bit value with all eight groups zero-padded to four digits.
pub fn int_to_expanded(value: u128) -> String {
    to_groups(value)
        .iter()
        .map(|g| format!("{g:04x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Expand any accepted address text to the full eight-group form.
pub fn expand_address(s: &str) -> NetResult<String> {
    address_to_int(s).map(int_to_expanded)
}

fn mapped_to_int(s: &str) -> NetResult<u128> {
    let (head, tail) = s
        .rsplit_once(':')
        .ok_or_else(|| invalid(s, "malformed IPv4-mapped address"))?;

    let low = ipv4::address_to_int(tail)?;
    let high = fold_groups(&parse_groups(s, head, MAPPED_HEAD_GROUPS)?);
    if high != MAPPED_HEAD {
        return Err(invalid(s, "only the ::ffff:a.b.c.d mapped form is accepted"));
    }

    Ok((high << 32) | u128::from(low))
}

/// Parse `text` into exactly `expected` groups, expanding a single `::`.
fn parse_groups(input: &str, text: &str, expected: usize) -> NetResult<Vec<u16>> {
    let mut halves = text.split("::");
    let left = halves.next().unwrap_or("");

    match (halves.next(), halves.next()) {
        (_, Some(_)) => Err(invalid(input, "more than one \"::\"")),
        (None, _) => {
            let groups = split_groups(left)?;
            if groups.len() != expected {
                return Err(invalid(input, "wrong number of groups"));
            }
            Ok(groups)
        }
        (Some(right), None) => {
            let mut groups = split_groups(left)?;
            let right = split_groups(right)?;
            if groups.len() + right.len() >= expected {
                return Err(invalid(input, "\"::\" must stand for at least one group"));
            }
            groups.resize(expected - right.len(), 0);
            groups.extend(right);
            Ok(groups)
        }
    }
}

fn split_groups(part: &str) -> NetResult<Vec<u16>> {
    if part.is_empty() {
        return Ok(Vec::new());
    }
    part.split(':').map(validate_group).collect()
}

fn fold_groups(groups: &[u16]) -> u128 {
    groups
        .iter()
        .fold(0u128, |acc, &g| (acc << 16) | u128::from(g))
}

fn to_groups(value: u128) -> [u16; GROUPS] {
    let mut groups = [0u16; GROUPS];
    for (i, group) in groups.iter_mut().enumerate() {
        *group = (value >> (16 * (GROUPS - 1 - i))) as u16;
    }
    groups
}

fn join_groups(groups: &[u16]) -> String {
    groups
        .iter()
        .map(|g| format!("{g:x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Find the first longest run of at least two zero groups as `(start, len)`.
fn longest_zero_run(groups: &[u16]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;

    while i < groups.len() {
        if groups[i] != 0 {
            i += 1;
            continue;
        }

        let start = i;
        while i < groups.len() && groups[i] == 0 {
            i += 1;
        }

        let len = i - start;
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }

    best
}
