use log::warn;

use crate::packet::Endpoint;
use crate::utils::{is_ipv4_literal, is_local_hostname};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainInfo {
    pub domain: String,
    pub subdomain: Option<String>,
    pub fld: String,
}

/// Registrable-domain lookup against the public suffix list. Returns `None`
/// for unlisted suffixes and bare suffixes, which callers treat as a
/// per-record degradation.
pub fn resolve_hostname(host: &str) -> Option<DomainInfo> {
    let host = host.to_ascii_lowercase();
    let parsed = psl::domain(host.as_bytes())?;
    if !parsed.suffix().is_known() {
        return None;
    }

    let fld = std::str::from_utf8(parsed.as_bytes()).ok()?;
    let suffix = std::str::from_utf8(parsed.suffix().as_bytes()).ok()?;
    let domain = fld.strip_suffix(suffix)?.trim_end_matches('.');
    if domain.is_empty() {
        return None;
    }
    let subdomain = host.strip_suffix(fld)?.trim_end_matches('.');

    Some(DomainInfo {
        domain: domain.to_string(),
        subdomain: (!subdomain.is_empty()).then(|| subdomain.to_string()),
        fld: fld.to_string(),
    })
}

pub fn enrich_endpoint(endpoint: &mut Endpoint) {
    // IP literals and mDNS-style local names carry no registrable domain.
    if is_ipv4_literal(&endpoint.host) || is_local_hostname(&endpoint.host) {
        return;
    }
    match resolve_hostname(&endpoint.host) {
        Some(info) => {
            endpoint.domain = Some(info.domain);
            endpoint.subdomain = info.subdomain;
            endpoint.fld = Some(info.fld);
        }
        None => warn!("domain lookup failed for {}", endpoint.host),
    }
}
