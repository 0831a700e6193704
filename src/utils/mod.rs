use std::net::Ipv4Addr;

/// Keep only ASCII letters and digits
pub fn strip_non_alphanumeric(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Name for a VLAN database entry: whitespace runs become underscores,
/// then upper-cased (e.g. "Data Center" -> "DATA_CENTER")
pub fn vlan_database_name(name: &str) -> String {
    let whitespace = regex_lite::Regex::new(r"\s+").ok();
    let joined = match &whitespace {
        Some(re) => re.replace_all(name.trim(), "_").to_string(),
        None => name.trim().to_string(),
    };
    joined.to_uppercase()
}

/// Validate an IPv4 address (e.g., "192.168.1.1").
/// Returns true if the string is a valid dotted-decimal IPv4 address.
pub fn is_valid_ipv4(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts.iter().all(|p| p.parse::<u8>().is_ok())
}

/// Validate a hostname.
/// Allows alphanumeric, hyphens, dots, and underscores. No path separators or shell metacharacters.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > 253 {
        return false;
    }
    hostname.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}

/// Parse "a.b.c.d/len" into its network address and prefix length
pub fn parse_cidr(cidr: &str) -> Option<(Ipv4Addr, u8)> {
    let (addr, len) = cidr.split_once('/')?;
    let addr: Ipv4Addr = addr.parse().ok()?;
    let len: u8 = len.parse().ok()?;
    if len > 32 {
        return None;
    }
    Some((addr, len))
}

fn mask_bits(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        len => u32::MAX << (32 - u32::from(len.min(32))),
    }
}

/// Dotted-decimal netmask for a prefix length (24 -> "255.255.255.0")
pub fn netmask(prefix_len: u8) -> String {
    Ipv4Addr::from(mask_bits(prefix_len)).to_string()
}

/// Cisco wildcard mask for a prefix length (24 -> "0.0.0.255")
pub fn wildcard(prefix_len: u8) -> String {
    Ipv4Addr::from(!mask_bits(prefix_len)).to_string()
}

/// Address of the n-th host inside a subnet ("10.1.20.0/24", 252 -> "10.1.20.252")
pub fn subnet_host(cidr: &str, host: u32) -> Option<String> {
    let (addr, len) = parse_cidr(cidr)?;
    let mask = mask_bits(len);
    if host & mask != 0 {
        return None;
    }
    Some(Ipv4Addr::from((u32::from(addr) & mask) | host).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_alphanumeric() {
        assert_eq!(strip_non_alphanumeric("Sales & Marketing"), "SalesMarketing");
        assert_eq!(strip_non_alphanumeric("R&D-2"), "RD2");
        assert_eq!(strip_non_alphanumeric("Café"), "Caf");
    }

    #[test]
    fn test_vlan_database_name() {
        assert_eq!(vlan_database_name("VoIP"), "VOIP");
        assert_eq!(vlan_database_name("Data Center  West"), "DATA_CENTER_WEST");
        assert_eq!(vlan_database_name("Data_ICT"), "DATA_ICT");
    }

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
        assert!(!is_valid_ipv4(""));
        assert!(!is_valid_ipv4("not-an-ip"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("1.2.3.4.5"));
        assert!(!is_valid_ipv4("1.2.3.-1"));
    }

    #[test]
    fn test_is_valid_hostname() {
        assert!(is_valid_hostname("Access-SALE-SW1"));
        assert!(is_valid_hostname("Core-SW2"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("Access-HR &-SW1"));
        assert!(!is_valid_hostname("host\nname"));
    }

    #[test]
    fn test_masks() {
        assert_eq!(netmask(24), "255.255.255.0");
        assert_eq!(netmask(16), "255.255.0.0");
        assert_eq!(netmask(0), "0.0.0.0");
        assert_eq!(wildcard(24), "0.0.0.255");
        assert_eq!(wildcard(16), "0.0.255.255");
        assert_eq!(wildcard(32), "0.0.0.0");
    }

    #[test]
    fn test_subnet_host() {
        assert_eq!(subnet_host("10.4.20.0/24", 252).as_deref(), Some("10.4.20.252"));
        assert_eq!(subnet_host("192.168.10.0/24", 1).as_deref(), Some("192.168.10.1"));
        assert_eq!(subnet_host("10.4.20.0/24", 256), None);
        assert_eq!(subnet_host("bogus", 1), None);
    }
}
