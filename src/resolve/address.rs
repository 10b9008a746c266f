//! Listen address splitting and completion.
//!
//! Splitting is purely syntactic: `host:port`, `[ipv6]:port` and `:port` split,
//! while a bare host, a bare IPv6 literal or an empty string do not. The port
//! component is not checked for being numeric; binding reports that later.

use std::net::Ipv6Addr;

use thiserror::Error;

/// Why an address did not split into host and port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("missing port in address")]
    MissingPort,
    #[error("too many colons in address")]
    TooManyColons,
    #[error("missing ']' in address")]
    MissingBracket,
    #[error("unexpected bracket in address")]
    UnexpectedBracket,
}

/// Split `address` into host and port.
pub fn split_host_port(address: &str) -> Result<(&str, &str), SplitError> {
    let (host, port) = if let Some(rest) = address.strip_prefix('[') {
        let end = rest.find(']').ok_or(SplitError::MissingBracket)?;
        let host = &rest[..end];
        let port = rest[end + 1..]
            .strip_prefix(':')
            .ok_or(SplitError::MissingPort)?;
        if port.contains(':') {
            return Err(SplitError::TooManyColons);
        }
        if host.contains('[') {
            return Err(SplitError::UnexpectedBracket);
        }
        (host, port)
    } else {
        let colon = address.rfind(':').ok_or(SplitError::MissingPort)?;
        let host = &address[..colon];
        if host.contains(':') {
            return Err(SplitError::TooManyColons);
        }
        if host.contains(['[', ']']) {
            return Err(SplitError::UnexpectedBracket);
        }
        (host, &address[colon + 1..])
    };

    if port.contains(['[', ']']) {
        return Err(SplitError::UnexpectedBracket);
    }
    Ok((host, port))
}

/// Join a host and port, bracketing IPv6 literals.
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Complete `address` with `port` unless it already names one.
///
/// Returns `None` when the address needs a port and none was resolved.
pub fn finalize(address: String, port: Option<u16>) -> Option<String> {
    if split_host_port(&address).is_ok() {
        return Some(address);
    }
    port.map(|port| join_host_port(&address, port))
}
