//! Property tests for operator input validation.

use proptest::prelude::*;

use hoist::domain::value_objects::{AppPort, HostAddress, ServerName};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every port in 1..=65535 is accepted and kept as given.
    #[test]
    fn property_valid_ports_round_trip(port in 1u32..=65535) {
        let parsed = AppPort::new(port).unwrap();
        prop_assert_eq!(u32::from(parsed.get()), port);
    }

    /// PROPERTY: zero and anything above 65535 is rejected.
    #[test]
    fn property_out_of_range_ports_rejected(port in prop_oneof![Just(0u32), 65536u32..]) {
        prop_assert!(AppPort::new(port).is_err());
    }

    /// PROPERTY: dotted quads with octets in range are IPv4 addresses.
    #[test]
    fn property_dotted_quads_accepted(a: u8, b: u8, c: u8, d: u8) {
        let host = HostAddress::parse(&format!("{a}.{b}.{c}.{d}")).unwrap();
        prop_assert!(host.is_ipv4());
    }

    /// PROPERTY: a numeric-looking host with an octet above 255 is never accepted.
    #[test]
    fn property_oversized_octet_rejected(
        a in 256u32..1000,
        b: u8,
        c: u8,
        d: u8,
        position in 0usize..4,
    ) {
        let mut octets = vec![b.to_string(), c.to_string(), d.to_string()];
        octets.insert(position.min(3), a.to_string());
        prop_assert!(HostAddress::parse(&octets.join(".")).is_err());
    }

    /// PROPERTY: three octets followed by a word is a mistyped address.
    #[test]
    fn property_mistyped_quads_rejected(a: u8, b: u8, c: u8, last in "[a-z][a-z0-9]{0,3}") {
        let input = format!("{a}.{b}.{c}.{last}");
        prop_assert!(HostAddress::parse(&input).is_err(), "{} was accepted", input);
    }

    /// PROPERTY: host and server name parsing never panic on arbitrary input.
    #[test]
    fn property_parsers_never_panic(s in "(?s).{0,300}") {
        let _ = HostAddress::parse(&s);
        let _ = ServerName::parse(&s);
        let _ = s.parse::<AppPort>();
    }

    /// PROPERTY: an accepted server name cannot carry nginx syntax.
    #[test]
    fn property_server_names_have_no_directive_characters(s in "[a-z0-9.;{} _-]{1,40}") {
        if let Ok(name) = ServerName::parse(&s) {
            prop_assert!(
                !name.as_str().contains([';', '{', '}', ' ']),
                "server name {:?} carries nginx syntax",
                name.as_str()
            );
        }
    }
}

#[test]
fn known_bad_inputs_are_rejected() {
    assert!(AppPort::new(70000).is_err());
    assert!(AppPort::new(0).is_err());
    assert!(HostAddress::parse("999.1.1.1").is_err());
    assert!(HostAddress::parse("abc").is_err());
}
