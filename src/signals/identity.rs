// src/signals/identity.rs
// Pseudonymous identity derivation and IP masking for audit context.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::IpAddr;

use sha2::{Digest, Sha256};

/// Opaque, deterministic key for one `(email, client_ip)` pair.
///
/// Used only to bucket rate-limit state and label audit events; the
/// raw pair is never stored and the key is never reversed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey([u8; 32]);

impl IdentityKey {
    pub fn derive(email: &str, client_ip: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(email.as_bytes());
        hasher.update(b":");
        hasher.update(client_ip.as_bytes());
        IdentityKey(hasher.finalize().into())
    }

    /// Short hex prefix, enough to correlate audit events without
    /// exposing the full key.
    pub fn prefix(&self) -> String {
        self.0[..6].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({}..)", self.prefix())
    }
}

/// Mask an IP address for audit context.
///
/// - IPv4: zero the last octet => "a.b.c.0"
/// - IPv6: keep the 64-bit prefix => "xxxx:xxxx:xxxx:xxxx::/64"
/// - Unparseable input: hash into one of 1024 buckets => "h{n}"
pub fn bucket_ip(ip: &str) -> String {
    if let Ok(addr) = ip.parse::<IpAddr>() {
        match addr {
            IpAddr::V4(v4) => {
                let o = v4.octets();
                return format!("{}.{}.{}.0", o[0], o[1], o[2]);
            }
            IpAddr::V6(v6) => {
                let segs = v6.segments();
                return format!(
                    "{:x}:{:x}:{:x}:{:x}::/64",
                    segs[0], segs[1], segs[2], segs[3]
                );
            }
        }
    }
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    ip.hash(&mut hasher);
    format!("h{}", hasher.finish() % 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pair_same_key() {
        let a = IdentityKey::derive("a@b.com", "1.2.3.4");
        let b = IdentityKey::derive("a@b.com", "1.2.3.4");
        assert_eq!(a, b);
    }

    #[test]
    fn different_ip_different_key() {
        let a = IdentityKey::derive("a@b.com", "1.2.3.4");
        let b = IdentityKey::derive("a@b.com", "1.2.3.5");
        assert_ne!(a, b);
    }

    #[test]
    fn separator_prevents_boundary_collisions() {
        // ("ab", "c") and ("a", "bc") must not collide.
        let a = IdentityKey::derive("ab", "c");
        let b = IdentityKey::derive("a", "bc");
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_email_is_hashed_verbatim() {
        let a = IdentityKey::derive("not an email", "1.2.3.4");
        let b = IdentityKey::derive("not an email", "1.2.3.4");
        assert_eq!(a, b);
    }

    #[test]
    fn prefix_is_short_hex() {
        let key = IdentityKey::derive("a@b.com", "1.2.3.4");
        let prefix = key.prefix();
        assert_eq!(prefix.len(), 12);
        assert!(prefix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ipv4_bucket_masks_last_octet() {
        assert_eq!(bucket_ip("203.0.113.77"), "203.0.113.0");
    }

    #[test]
    fn ipv6_bucket_keeps_prefix() {
        let b = bucket_ip("2001:0db8:85a3:0000:0000:8a2e:0370:7334");
        assert!(b.ends_with("::/64"));
        assert!(b.starts_with("2001:db8:85a3"));
    }

    #[test]
    fn garbage_ip_falls_back_to_hash_bucket() {
        let b = bucket_ip("not-an-ip");
        assert!(b.starts_with('h'));
    }
}
