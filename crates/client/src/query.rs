//! Query construction for inventory objects.
//!
//! Pure functions that translate an inventory record into Lucene query
//! strings against the configured search field, with an ordered IP fallback
//! plan for virtual machines. No escaping of Lucene operators is performed;
//! Graylog's query parser tolerates them in hostnames.

use graylog_config::GraylogConfig;

use crate::inventory::{Device, Endpoint, VirtualMachine};
use crate::models::{QueryPlan, SearchQuery, SearchStrategy};

/// Field holding the remote IP recorded by Graylog, used for IP fallback.
const REMOTE_IP_FIELD: &str = "gl2_remote_ip";

/// Field holding the sender hostname, used for source-by-IP fallback.
const SOURCE_FIELD: &str = "source";

/// Apply the FQDN setting: keep the full name, or truncate before the
/// first `.`. An empty name passes through unchanged.
fn host_term(name: &str, use_fqdn: bool) -> &str {
    if use_fqdn {
        name
    } else {
        name.split('.').next().unwrap_or(name)
    }
}

/// Strip the prefix length from a CIDR address (`10.0.0.5/24` -> `10.0.0.5`).
fn address_without_prefix(cidr: &str) -> &str {
    cidr.split('/').next().unwrap_or(cidr)
}

/// Wildcard hostname query on the configured search field. The trailing
/// `*` matches FQDN variations; Graylog wildcards are case-insensitive.
fn hostname_query(config: &GraylogConfig, host: &str) -> String {
    format!("{}:{}*", config.search_field.as_str(), host)
}

/// Build the single search query for a device.
///
/// Virtual chassis members search under the shared chassis name rather
/// than their per-member name. With IP fallback enabled and a primary
/// IPv4 present, hostname and IP are combined into one OR query.
pub fn device_query(device: &Device, config: &GraylogConfig) -> SearchQuery {
    let name = device.virtual_chassis.as_deref().unwrap_or(&device.name);
    let host = host_term(name, config.use_fqdn);
    let hostname_query = hostname_query(config, host);

    match device
        .primary_ip4
        .as_deref()
        .filter(|_| config.fallback_to_ip)
    {
        Some(cidr) => {
            let ip = address_without_prefix(cidr);
            SearchQuery::new(
                format!("({hostname_query} OR {REMOTE_IP_FIELD}:{ip} OR {SOURCE_FIELD}:{ip})"),
                SearchStrategy::Combined,
            )
        }
        None => SearchQuery::new(hostname_query, SearchStrategy::Hostname),
    }
}

/// Build the ordered fallback plan for a virtual machine.
///
/// The hostname query always runs first. With IP fallback enabled and a
/// primary IPv4 present, `gl2_remote_ip` and then `source` by IP are tried,
/// each only when the previous attempt returned no messages and no error.
pub fn vm_query_plan(vm: &VirtualMachine, config: &GraylogConfig) -> QueryPlan {
    let host = host_term(&vm.name, config.use_fqdn);
    let primary = SearchQuery::new(hostname_query(config, host), SearchStrategy::Hostname);

    let fallbacks = match vm.primary_ip4.as_deref().filter(|_| config.fallback_to_ip) {
        Some(cidr) => {
            let ip = address_without_prefix(cidr);
            vec![
                SearchQuery::new(format!("{REMOTE_IP_FIELD}:{ip}"), SearchStrategy::Ip),
                SearchQuery::new(format!("{SOURCE_FIELD}:{ip}"), SearchStrategy::SourceIp),
            ]
        }
        None => Vec::new(),
    };

    QueryPlan { primary, fallbacks }
}

/// Build the search query for an endpoint. Endpoints are searched by name
/// only; there is no chassis or IP fallback concept for them.
pub fn endpoint_query(endpoint: &Endpoint, config: &GraylogConfig) -> SearchQuery {
    let host = host_term(&endpoint.name, config.use_fqdn);
    SearchQuery::new(hostname_query(config, host), SearchStrategy::Hostname)
}
