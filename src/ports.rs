//! Target-port arithmetic and occupancy probing.

use std::net::TcpListener;

/// Base prefixes of the bench port family, in stop order.
pub const BASE_PORTS: [u16; 5] = [1100, 1200, 1300, 900, 800];

/// Combine a base prefix with the suffix digit by decimal concatenation,
/// e.g. base 1100 and suffix '5' give 11005.
pub fn target_port(base: u16, suffix: char) -> u16 {
    debug_assert!(suffix.is_ascii_digit());
    base * 10 + u16::from(suffix as u8 - b'0')
}

/// Check if a port is free by attempting to bind to it.
/// This binds and immediately drops the listener, which releases the port.
pub fn is_port_free(port: u16) -> bool {
    match TcpListener::bind(("127.0.0.1", port)) {
        Ok(listener) => {
            // Get the actual bound address to ensure it worked
            listener.local_addr().is_ok()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_five_produces_documented_port_family() {
        let ports: Vec<u16> = BASE_PORTS
            .iter()
            .map(|&base| target_port(base, '5'))
            .collect();
        assert_eq!(ports, vec![11005, 12005, 13005, 9005, 8005]);
    }

    #[test]
    fn suffix_zero_keeps_trailing_zero() {
        assert_eq!(target_port(800, '0'), 8000);
        assert_eq!(target_port(1300, '0'), 13000);
    }

    #[test]
    fn occupied_port_reports_not_free() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
        let port = listener.local_addr().expect("local addr").port();
        assert!(!is_port_free(port));
        drop(listener);
        assert!(is_port_free(port));
    }
}
