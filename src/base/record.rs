//! Scanning the answer section of a response.
//!
//! A response handed to the resolver is expected to contain exactly one
//! question followed by the answer section. [`Response`] checks the header
//! and decodes the question. Its [`answers`][Response::answers] method then
//! provides an [`AnswerScanner`] that walks over the records of the answer
//! section, checking the framing of each record against the bounds of the
//! message before any of its data is looked at.

use super::header::Header;
use super::iana::{Class, Rtype};
use super::name::{expand_name, parse_name, NameMode};
use super::wire::{FormError, Parse, ParseError};
use octseq::parse::Parser;
use tracing::trace;

//------------ Response ------------------------------------------------------

/// A response message with its header and question decoded.
#[derive(Clone, Debug)]
pub struct Response<'a> {
    /// The complete message.
    msg: &'a [u8],

    /// The header of the message.
    header: Header,

    /// The single question of the message.
    question: Question,

    /// The position of the first answer record.
    answer_pos: usize,
}

impl<'a> Response<'a> {
    /// Decodes header and question of a response.
    ///
    /// The question name is decoded using `mode`. Fails if the message is
    /// shorter than the header, if the question count is not exactly one,
    /// or if the question is malformed or truncated.
    pub fn parse(msg: &'a [u8], mode: NameMode) -> Result<Self, ParseError> {
        let mut parser = Parser::from_ref(msg);
        let header = Header::parse(&mut parser)?;
        if header.qdcount() != 1 {
            return Err(FormError::new("question count is not one").into());
        }
        let question = Question::parse(&mut parser, mode)?;
        Ok(Response {
            msg,
            header,
            question,
            answer_pos: parser.pos(),
        })
    }

    /// Returns the header of the response.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the question of the response.
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Takes the question out of the response.
    pub fn into_question(self) -> Question {
        self.question
    }

    /// Returns a scanner over the records of the answer section.
    pub fn answers(&self) -> AnswerScanner<'a> {
        let mut parser = Parser::from_ref(self.msg);
        // We have already been there during parsing.
        let _ = parser.seek(self.answer_pos);
        AnswerScanner {
            parser,
            remaining: self.header.ancount(),
        }
    }
}

//------------ Question ------------------------------------------------------

/// The question of a response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    qname: String,
    qtype: Rtype,
    qclass: Class,
}

impl Question {
    /// Parses a question from the beginning of `parser`.
    pub fn parse(
        parser: &mut Parser<'_, [u8]>,
        mode: NameMode,
    ) -> Result<Self, ParseError> {
        Ok(Question {
            qname: parse_name(parser, mode)?,
            qtype: Rtype::parse(parser)?,
            qclass: Class::parse(parser)?,
        })
    }

    /// Returns the question name.
    pub fn qname(&self) -> &str {
        &self.qname
    }

    /// Takes the question name.
    pub fn into_qname(self) -> String {
        self.qname
    }

    /// Returns the question type.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the question class.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

//------------ AnswerScanner -------------------------------------------------

/// An iterator over the records in the answer section of a response.
///
/// The scanner walks over exactly as many records as the answer count in
/// the header announces. Each step decodes the owner name, checks that the
/// fixed part of the record header and then the record data as announced
/// by the data length are present, and then advances past the data.
///
/// If framing a record fails, the iterator returns the error once and is
/// exhausted afterwards. All records returned so far have to be discarded
/// by the caller since the response as a whole is malformed.
#[derive(Clone, Debug)]
pub struct AnswerScanner<'a> {
    parser: Parser<'a, [u8]>,
    remaining: u16,
}

impl<'a> AnswerScanner<'a> {
    /// Returns the number of records left to scan.
    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Frames the next record.
    fn next_record(&mut self) -> Result<AnswerRecord<'a>, ParseError> {
        let owner = parse_name(&mut self.parser, NameMode::Any)?;
        self.parser.check_len(AnswerRecord::HEADER_LEN)?;
        let rtype = Rtype::parse(&mut self.parser)?;
        let class = Class::parse(&mut self.parser)?;
        let ttl = u32::parse(&mut self.parser)?;
        let rdlen = u16::parse(&mut self.parser)?;
        let data_pos = self.parser.pos();
        self.parser.advance(rdlen.into())?;
        trace!(
            "answer record {owner} {class} {rtype} ttl={ttl} rdlen={rdlen}"
        );
        Ok(AnswerRecord {
            msg: self.parser.octets_ref(),
            owner,
            rtype,
            class,
            ttl,
            data_pos,
            rdlen,
        })
    }
}

impl<'a> Iterator for AnswerScanner<'a> {
    type Item = Result<AnswerRecord<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        match self.next_record() {
            Ok(record) => {
                self.remaining -= 1;
                Some(Ok(record))
            }
            Err(err) => {
                self.remaining = 0;
                Some(Err(err))
            }
        }
    }
}

//------------ AnswerRecord --------------------------------------------------

/// A single framed record of the answer section.
///
/// The record owns its decoded owner name while its data is only
/// referenced within the message. The record is meant to be consumed right
/// away by one of the builders for typed results.
#[derive(Clone, Debug)]
pub struct AnswerRecord<'a> {
    msg: &'a [u8],
    owner: String,
    rtype: Rtype,
    class: Class,
    ttl: u32,
    data_pos: usize,
    rdlen: u16,
}

impl<'a> AnswerRecord<'a> {
    /// The length of the record header following the owner name.
    pub const HEADER_LEN: usize = 10;

    /// Returns the owner name of the record.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Takes the owner name out of the record.
    pub fn into_owner(self) -> String {
        self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the class of the record.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL of the record in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the length of the record data.
    pub fn rdlen(&self) -> u16 {
        self.rdlen
    }

    /// Returns the record data.
    pub fn data(&self) -> &'a [u8] {
        &self.msg[self.data_pos..self.data_pos + usize::from(self.rdlen)]
    }

    /// Returns a parser limited to the record data.
    pub fn data_parser(&self) -> Parser<'a, [u8]> {
        Parser::from_ref(self.data())
    }

    /// Expands a domain name at the position of `parser`.
    ///
    /// The parser has to be one returned by
    /// [`data_parser`][Self::data_parser]. It is advanced past the name as
    /// it appears in the record data. A name that runs past the end of the
    /// record data is an error even if it is complete within the message.
    pub fn parse_data_name(
        &self,
        parser: &mut Parser<'a, [u8]>,
        mode: NameMode,
    ) -> Result<String, ParseError> {
        let offset = parser.pos();
        if offset >= usize::from(self.rdlen) {
            return Err(ParseError::ShortInput);
        }
        let (name, len) = expand_name(self.msg, self.data_pos + offset, mode)?;
        parser.advance(len)?;
        Ok(name)
    }

    /// Expands a domain name starting `offset` octets into the record data.
    ///
    /// Compression pointers are resolved against the complete message.
    pub fn data_name(
        &self,
        offset: usize,
        mode: NameMode,
    ) -> Result<String, ParseError> {
        if offset >= usize::from(self.rdlen) {
            return Err(ParseError::ShortInput);
        }
        expand_name(self.msg, self.data_pos + offset, mode).map(|res| res.0)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::testing::ResponseBuilder;

    fn response() -> Vec<u8> {
        let mut builder = ResponseBuilder::new("www.example.com", Rtype::A);
        builder.push_cname(ResponseBuilder::QNAME, 300, "web.example.com");
        builder.push(0xC00C, Rtype::A, Class::IN, 60, &[192, 0, 2, 1]);
        builder.push_name("other.test", Rtype::TXT, Class::CH, 5, b"\x02hi");
        builder.finish()
    }

    #[test]
    fn scan() {
        let msg = response();
        let response = Response::parse(&msg, NameMode::Any).unwrap();
        assert_eq!(response.header().ancount(), 3);
        assert_eq!(response.question().qname(), "www.example.com");
        assert_eq!(response.question().qtype(), Rtype::A);
        assert_eq!(response.question().qclass(), Class::IN);

        let mut answers = response.answers();
        let cname = answers.next().unwrap().unwrap();
        assert_eq!(cname.owner(), "www.example.com");
        assert_eq!(cname.rtype(), Rtype::CNAME);
        assert_eq!(cname.ttl(), 300);
        assert_eq!(
            cname.data_name(0, NameMode::Hostname).unwrap(),
            "web.example.com"
        );

        let a = answers.next().unwrap().unwrap();
        assert_eq!(a.owner(), "www.example.com");
        assert_eq!(a.class(), Class::IN);
        assert_eq!(a.data(), &[192, 0, 2, 1]);
        assert_eq!(a.data_name(4, NameMode::Any), Err(ParseError::ShortInput));

        let txt = answers.next().unwrap().unwrap();
        assert_eq!(txt.owner(), "other.test");
        assert_eq!(txt.class(), Class::CH);
        assert_eq!(txt.rdlen(), 3);
        assert_eq!(txt.into_owner(), "other.test");

        assert!(answers.next().is_none());
    }

    #[test]
    fn question_count() {
        let mut msg = response();
        msg[5] = 2;
        assert!(matches!(
            Response::parse(&msg, NameMode::Any),
            Err(ParseError::Form(_))
        ));
        msg[5] = 0;
        assert!(Response::parse(&msg, NameMode::Any).is_err());
    }

    #[test]
    fn truncated() {
        let msg = response();
        let response = Response::parse(&msg, NameMode::Any).unwrap();
        let full = response.answers().count();
        assert_eq!(full, 3);

        // Cutting the message anywhere inside the answer section makes the
        // scanner fail exactly once.
        let question_end = 12 + 17 + 4;
        for len in question_end..msg.len() {
            let short = &msg[..len];
            let response = Response::parse(short, NameMode::Any).unwrap();
            let res: Vec<_> = response.answers().collect();
            assert!(res.last().unwrap().is_err(), "len {}", len);
            assert_eq!(res.iter().filter(|item| item.is_err()).count(), 1);
        }

        // Cutting into the question fails early.
        for len in 0..question_end {
            assert!(Response::parse(&msg[..len], NameMode::Any).is_err());
        }
    }

    #[test]
    fn names_in_data() {
        let mut builder = ResponseBuilder::new("example.com", Rtype::SOA);
        // Compressed name, uncompressed name, one trailing octet.
        let data = b"\x02ns\xc0\x0c\x01a\x00\x2a";
        builder.push(0xC00C, Rtype::SOA, Class::IN, 60, data);
        // Name running past the record data.
        builder.push(0xC00C, Rtype::SOA, Class::IN, 60, b"\x03ns");
        let msg = builder.finish();
        let response = Response::parse(&msg, NameMode::Any).unwrap();
        let mut answers = response.answers();

        let record = answers.next().unwrap().unwrap();
        let mut parser = record.data_parser();
        assert_eq!(
            record.parse_data_name(&mut parser, NameMode::Any).unwrap(),
            "ns.example.com"
        );
        assert_eq!(parser.pos(), 5);
        assert_eq!(
            record.parse_data_name(&mut parser, NameMode::Any).unwrap(),
            "a"
        );
        assert_eq!(parser.parse_u8().ok(), Some(0x2a));
        assert_eq!(
            record.parse_data_name(&mut parser, NameMode::Any),
            Err(ParseError::ShortInput)
        );

        let record = answers.next().unwrap().unwrap();
        let mut parser = record.data_parser();
        assert!(record.parse_data_name(&mut parser, NameMode::Any).is_err());
    }

    #[test]
    fn data_length_beyond_message() {
        let mut builder = ResponseBuilder::new("example.com", Rtype::A);
        builder.push(0xC00C, Rtype::A, Class::IN, 60, &[192, 0, 2, 1]);
        let mut msg = builder.finish();
        // Bump the data length of the record to 5.
        let len = msg.len();
        msg[len - 5] = 5;
        let response = Response::parse(&msg, NameMode::Any).unwrap();
        let mut answers = response.answers();
        assert_eq!(answers.next().unwrap().unwrap_err(), ParseError::ShortInput);
        assert!(answers.next().is_none());
    }
}
