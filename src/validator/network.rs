//! ネットワークアドレスの検査

use crate::rule::Tag;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

/// ネットワーク系タグの検査（該当しないタグには `None`）
pub fn check_network(tag: Tag, s: &str) -> Option<bool> {
    let ok = match tag {
        Tag::Ip | Tag::IpAddr => parse_ip(s).is_some(),
        Tag::Ipv4 | Tag::Ip4Addr => parse_ip(s).is_some_and(|ip| as_v4(ip).is_some()),
        Tag::Ipv6 | Tag::Ip6Addr => parse_ip(s).is_some_and(|ip| as_v4(ip).is_none()),
        Tag::Cidr => parse_cidr(s).is_some(),
        Tag::Cidrv4 => parse_cidr(s).is_some_and(|ip| ip.is_ipv4()),
        Tag::Cidrv6 => parse_cidr(s).is_some_and(|ip| ip.is_ipv6()),
        Tag::TcpAddr | Tag::UdpAddr => s.parse::<SocketAddr>().is_ok(),
        Tag::Tcp4Addr | Tag::Udp4Addr => s.parse::<SocketAddrV4>().is_ok(),
        Tag::Tcp6Addr | Tag::Udp6Addr => s.parse::<SocketAddrV6>().is_ok(),
        // UNIXソケットのパスはどんな文字列でも解決できるため失敗しない
        Tag::UnixAddr => true,
        Tag::Mac => is_mac(s),
        _ => return None,
    };
    Some(ok)
}

/// IPv4、IPv6（ゾーンなし）をパース
fn parse_ip(s: &str) -> Option<IpAddr> {
    s.parse::<IpAddr>().ok()
}

/// IPv4、またはIPv4射影IPv6アドレスならIPv4として取り出す
fn as_v4(ip: IpAddr) -> Option<Ipv4Addr> {
    match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    }
}

/// `address/prefix` 形式をパースしてアドレスを返す
fn parse_cidr(s: &str) -> Option<IpAddr> {
    let (addr, prefix) = s.split_once('/')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let prefix: u8 = prefix.parse().ok()?;
    if let Ok(v4) = addr.parse::<Ipv4Addr>() {
        return (prefix <= 32).then_some(IpAddr::V4(v4));
    }
    let v6 = addr.parse::<Ipv6Addr>().ok()?;
    (prefix <= 128).then_some(IpAddr::V6(v6))
}

/// MACアドレス（EUI-48、EUI-64、20オクテットのIPoIB）
///
/// `01:23:45:67:89:ab`、`01-23-45-67-89-ab`、`0123.4567.89ab` の各形式
fn is_mac(s: &str) -> bool {
    const OCTET_COUNTS: [usize; 3] = [6, 8, 20];
    let is_hex = |part: &str, width: usize| {
        part.len() == width && part.bytes().all(|b| b.is_ascii_hexdigit())
    };

    for sep in [':', '-'] {
        if s.contains(sep) {
            let parts: Vec<&str> = s.split(sep).collect();
            return OCTET_COUNTS.contains(&parts.len()) && parts.iter().all(|&p| is_hex(p, 2));
        }
    }
    if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        return OCTET_COUNTS.contains(&(parts.len() * 2)) && parts.iter().all(|&p| is_hex(p, 4));
    }
    false
}
