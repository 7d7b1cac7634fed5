//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for
    /// different network types. That is, each class has its own separate
    /// record tree starting at the root. However, in practice, only the IN
    /// class is really relevant. CAA records are also accepted in the CH
    /// class.
    ///
    /// See [RFC 1034] for the introduction of classes.
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    =>
    Class, u16, "CLASS";

    /// Internet (IN).
    (IN => 1, "IN")

    /// Chaosnet (CH).
    (CH => 3, "CH")

    /// Hesiod (HS).
    (HS => 4, "HS")

    /// Query class None.
    (NONE => 0xFE, "NONE")

    /// Query class * (ANY).
    (ANY => 0xFF, "*")
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Class;

    #[test]
    fn mnemonics() {
        assert_eq!(Class::from_mnemonic(b"in"), Some(Class::IN));
        assert_eq!(Class::from_mnemonic(b"CH"), Some(Class::CH));
        assert_eq!(Class::from_mnemonic(b"XX"), None);
        assert_eq!(Class::IN.to_string(), "IN");
        assert_eq!(Class::from_int(5).to_string(), "CLASS5");
        assert_eq!(format!("{:?}", Class::CH), "Class::CH");
    }
}
