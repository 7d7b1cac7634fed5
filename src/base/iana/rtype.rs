//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind of
    /// information is represented by the record. Only the types the
    /// response parser dispatches on have constants here. Any other value
    /// is carried through as is.
    ///
    /// See the [RRTYPE registry] for the full list of assigned values.
    ///
    /// [RRTYPE registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16, "TYPE";

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// Server selection.
    (SRV => 33, "SRV")

    /// Naming authority pointer.
    (NAPTR => 35, "NAPTR")

    /// EDNS option.
    (OPT => 41, "OPT")

    /// A request for all records the server/cache has available.
    (ANY => 255, "ANY")

    /// Uniform Resource Identifier.
    (URI => 256, "URI")

    /// Certification Authority Restriction.
    (CAA => 257, "CAA")
}

//============ Tests =========================================================
