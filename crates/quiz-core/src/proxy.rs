//! Reverse proxy trust
//!
//! With N trusted hops the client address is entry N of the chain
//! `[peer, XFF_last, ..., XFF_first]`, or the last entry when the chain is
//! shorter. Each trusted proxy appends the address it received the request
//! from, so entries beyond N could have been forged by the client.

use axum::http::HeaderMap;
use std::net::IpAddr;

use crate::extract::ClientInfo;

fn forwarded_for(headers: &HeaderMap) -> Vec<IpAddr> {
	headers
		.get_all("x-forwarded-for")
		.iter()
		.filter_map(|h| h.to_str().ok())
		.flat_map(|h| h.split(','))
		.filter_map(|ip| ip.trim().parse().ok())
		.collect()
}

fn forwarded_proto(headers: &HeaderMap) -> Option<Box<str>> {
	headers
		.get("x-forwarded-proto")
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.split(',').next())
		.map(|p| p.trim().to_ascii_lowercase())
		.filter(|p| !p.is_empty())
		.map(String::into_boxed_str)
}

/// Derive client address and protocol from the peer address and forwarding
/// headers
pub fn client_info(peer: Option<IpAddr>, headers: &HeaderMap, trusted_hops: usize) -> ClientInfo {
	if trusted_hops == 0 {
		return ClientInfo { ip: peer, proto: "http".into() };
	}

	let mut chain: Vec<IpAddr> = peer.into_iter().collect();
	chain.extend(forwarded_for(headers).into_iter().rev());
	let ip = chain.get(trusted_hops).or_else(|| chain.last()).copied();
	let proto = forwarded_proto(headers).unwrap_or_else(|| "http".into());

	ClientInfo { ip, proto }
}


// vim: ts=4
