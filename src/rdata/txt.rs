//! Record data from [RFC 1035]: TXT records.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::{copy_octets, fmt_quoted};
use crate::base::iana::Rtype;
use crate::base::record::AnswerRecord;
use crate::resolv::error::Error;
use core::fmt;
use tracing::debug;

//------------ TxtReply ------------------------------------------------------

/// A single character string of a TXT record.
///
/// A TXT record consists of one or more character strings. Each of them
/// becomes its own value. The first string of each record is marked via
/// [`record_start`][Self::record_start] so callers can tell where one
/// record ends and the next one begins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TxtReply {
    txt: Vec<u8>,
    record_start: bool,
}

impl TxtReply {
    /// The rtype of this record data type.
    pub const RTYPE: Rtype = Rtype::TXT;

    pub fn new(txt: Vec<u8>, record_start: bool) -> Self {
        TxtReply { txt, record_start }
    }

    /// Parses all character strings of `record`.
    ///
    /// Record data without any strings results in an empty vec. A string
    /// whose length exceeds the remaining data makes the record malformed.
    pub fn parse(record: &AnswerRecord) -> Result<Vec<Self>, Error> {
        let mut data = record.data();
        let mut res = Vec::new();
        while let Some((&len, rest)) = data.split_first() {
            let len = usize::from(len);
            if len > rest.len() {
                debug!(
                    "TXT string of {} octets exceeds remaining {} octets",
                    len,
                    rest.len()
                );
                return Err(Error::BadResponse);
            }
            let (txt, rest) = rest.split_at(len);
            res.try_reserve(1).map_err(|_| Error::NoMemory)?;
            res.push(TxtReply {
                txt: copy_octets(txt)?,
                record_start: res.is_empty(),
            });
            data = rest;
        }
        Ok(res)
    }

    /// Returns the content of the string.
    pub fn txt(&self) -> &[u8] {
        &self.txt
    }

    /// Returns whether this is the first string of a record.
    pub fn record_start(&self) -> bool {
        self.record_start
    }
}

//--- Display

impl fmt::Display for TxtReply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_quoted(&self.txt, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Class;
    use crate::base::name::NameMode;
    use crate::base::record::Response;
    use crate::base::testing::ResponseBuilder;

    fn parse(data: &[u8]) -> Result<Vec<TxtReply>, Error> {
        let mut builder = ResponseBuilder::new("example.com", Rtype::TXT);
        builder.push(ResponseBuilder::QNAME, Rtype::TXT, Class::IN, 60, data);
        let msg = builder.finish();
        let response = Response::parse(&msg, NameMode::Hostname).unwrap();
        let record = response.answers().next().unwrap().unwrap();
        TxtReply::parse(&record)
    }

    #[test]
    fn strings() {
        let txt = parse(b"\x05hello\x00\x03a\"b").unwrap();
        assert_eq!(txt.len(), 3);
        assert_eq!(txt[0], TxtReply::new(b"hello".to_vec(), true));
        assert_eq!(txt[1], TxtReply::new(Vec::new(), false));
        assert_eq!(txt[2].txt(), b"a\"b");
        assert!(!txt[2].record_start());
        assert_eq!(txt[2].to_string(), "\"a\\\"b\"");
    }

    #[test]
    fn empty_data() {
        assert_eq!(parse(b""), Ok(Vec::new()));
    }

    #[test]
    fn overrun() {
        assert_eq!(parse(b"\x02ok\x05abc"), Err(Error::BadResponse));
    }
}
